/// Alphanumeric mode encoder (Mode 0010)
/// Alphanumeric character set: 0-9, A-Z, space, $%*+-./:
use crate::error::{QrError, Result};
use crate::utils::BitSequence;

const ALPHANUMERIC_TABLE: [char; 45] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I',
    'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z', ' ', '$',
    '%', '*', '+', '-', '.', '/', ':',
];

/// Index of `c` in the alphanumeric table
pub fn alphanumeric_code(c: char) -> Option<u32> {
    ALPHANUMERIC_TABLE
        .iter()
        .position(|&t| t == c)
        .map(|i| i as u32)
}

/// Encode alphanumeric data
/// Pairs = 11 bits, single = 6 bits
pub struct AlphanumericEncoder;

impl AlphanumericEncoder {
    /// Append 11-bit pair codes, plus a 6-bit code for an odd last character
    pub fn encode(content: &str, bits: &mut BitSequence) -> Result<()> {
        let codes = content
            .chars()
            .map(|c| {
                alphanumeric_code(c).ok_or_else(|| {
                    QrError::InvalidInput(format!("'{}' is not in the alphanumeric set", c))
                })
            })
            .collect::<Result<Vec<u32>>>()?;

        for pair in codes.chunks(2) {
            match *pair {
                [first, second] => bits.append_bits(first * 45 + second, 11)?,
                [single] => bits.append_bits(single, 6)?,
                _ => {}
            }
        }
        Ok(())
    }
}
