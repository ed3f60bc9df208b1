/// Kanji mode encoder (Mode 1000)
/// Each double-byte Shift_JIS character is packed into 13 bits
use crate::error::{QrError, Result};
use crate::utils::BitSequence;

/// True if `bytes` is a non-empty run of Shift_JIS double-byte characters
/// whose lead bytes fall in 0x81-0x9F or 0xE0-0xEB
pub fn is_only_double_byte_kanji(bytes: &[u8]) -> bool {
    if bytes.is_empty() || bytes.len() % 2 != 0 {
        return false;
    }
    bytes
        .chunks_exact(2)
        .all(|pair| matches!(pair[0], 0x81..=0x9F | 0xE0..=0xEB))
}

/// Encode Kanji mode data (13 bits per double-byte character)
pub struct KanjiEncoder;

impl KanjiEncoder {
    /// Append 13-bit codes for Shift_JIS encoded `bytes`
    pub fn encode(bytes: &[u8], bits: &mut BitSequence) -> Result<()> {
        if bytes.len() % 2 != 0 {
            return Err(QrError::Unsupported(format!(
                "Kanji byte size not even: {}",
                bytes.len()
            )));
        }
        for pair in bytes.chunks_exact(2) {
            let code = ((pair[0] as u32) << 8) | pair[1] as u32;
            let subtracted = match code {
                0x8140..=0x9FFC => code - 0x8140,
                0xE040..=0xEBBF => code - 0xC140,
                _ => {
                    return Err(QrError::Unsupported(format!(
                        "invalid Shift_JIS double-byte sequence {:#06x}",
                        code
                    )));
                }
            };
            let encoded = (subtracted >> 8) * 0xC0 + (subtracted & 0xFF);
            bits.append_bits(encoded, 13)?;
        }
        Ok(())
    }
}
