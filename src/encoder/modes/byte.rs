/// Byte mode encoder (Mode 0100) for 8-bit data
use crate::error::Result;
use crate::utils::BitSequence;

/// Encode byte mode data (8 bits per byte, already in the target charset)
pub struct ByteEncoder;

impl ByteEncoder {
    /// Append each byte as 8 bits
    pub fn encode(bytes: &[u8], bits: &mut BitSequence) -> Result<()> {
        for &b in bytes {
            bits.append_bits(b as u32, 8)?;
        }
        Ok(())
    }
}
