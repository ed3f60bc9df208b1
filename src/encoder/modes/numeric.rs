/// Numeric mode encoder (Mode 0001)
/// Groups of 3 digits = 10 bits, 2 digits = 7 bits, 1 digit = 4 bits
use crate::error::{QrError, Result};
use crate::utils::BitSequence;

/// Encode numeric mode data
pub struct NumericEncoder;

impl NumericEncoder {
    /// Append the numeric payload for `content` to `bits`
    pub fn encode(content: &str, bits: &mut BitSequence) -> Result<()> {
        let digits = content
            .chars()
            .map(|c| {
                c.to_digit(10)
                    .ok_or_else(|| QrError::InvalidInput(format!("'{}' is not a digit", c)))
            })
            .collect::<Result<Vec<u32>>>()?;

        for group in digits.chunks(3) {
            let value = group.iter().fold(0, |acc, &d| acc * 10 + d);
            let num_bits = match group.len() {
                3 => 10,
                2 => 7,
                _ => 4,
            };
            bits.append_bits(value, num_bits)?;
        }
        Ok(())
    }
}
