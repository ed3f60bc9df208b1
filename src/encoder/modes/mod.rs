//! QR code data mode encoders
//!
//! This module contains encoders for the supported data modes:
//! - Numeric: Efficient encoding for digits (0-9)
//! - Alphanumeric: Upper-case letters, digits, and symbols
//! - Byte: 8-bit data in the selected character set
//! - Kanji: Shift_JIS double-byte characters

/// Alphanumeric mode (0-9, A-Z, space, `$%*+-./:`)
pub mod alphanumeric;
/// Byte mode
pub mod byte;
/// Kanji mode (Shift_JIS double-byte characters)
pub mod kanji;
/// Numeric mode
pub mod numeric;

use super::charset::CharacterSetEci;
use crate::error::{QrError, Result};
use crate::models::Mode;
use crate::utils::BitSequence;
use alphanumeric::{AlphanumericEncoder, alphanumeric_code};
use byte::ByteEncoder;
use kanji::{KanjiEncoder, is_only_double_byte_kanji};
use numeric::NumericEncoder;

/// Pick the most compact mode able to represent `content`.
///
/// With a Shift_JIS character set, content made only of double-byte Kanji
/// uses Kanji mode.
pub fn choose_mode(content: &str, charset: CharacterSetEci) -> Mode {
    if charset == CharacterSetEci::ShiftJis {
        return match charset.encode(content) {
            Ok(bytes) if is_only_double_byte_kanji(&bytes) => Mode::Kanji,
            _ => Mode::Byte,
        };
    }
    let mut has_numeric = false;
    let mut has_alphanumeric = false;
    for c in content.chars() {
        if c.is_ascii_digit() {
            has_numeric = true;
        } else if alphanumeric_code(c).is_some() {
            has_alphanumeric = true;
        } else {
            return Mode::Byte;
        }
    }
    if has_alphanumeric {
        Mode::Alphanumeric
    } else if has_numeric {
        Mode::Numeric
    } else {
        Mode::Byte
    }
}

/// Append the payload bits of `content` in `mode`. Returns the value for the
/// character count field: bytes in byte mode, characters otherwise.
pub fn append_payload(
    content: &str,
    mode: Mode,
    charset: CharacterSetEci,
    bits: &mut BitSequence,
) -> Result<usize> {
    match mode {
        Mode::Numeric => {
            NumericEncoder::encode(content, bits)?;
            Ok(content.chars().count())
        }
        Mode::Alphanumeric => {
            AlphanumericEncoder::encode(content, bits)?;
            Ok(content.chars().count())
        }
        Mode::Byte => {
            let bytes = charset.encode(content)?;
            ByteEncoder::encode(&bytes, bits)?;
            Ok(bytes.len())
        }
        Mode::Kanji => {
            let bytes = CharacterSetEci::ShiftJis.encode(content)?;
            KanjiEncoder::encode(&bytes, bits)?;
            Ok(bytes.len() / 2)
        }
        other => Err(QrError::Unsupported(format!("cannot encode data in {} mode", other))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LATIN1: CharacterSetEci = CharacterSetEci::Iso8859_1;

    #[test]
    fn test_choose_mode() {
        assert_eq!(choose_mode("0", LATIN1), Mode::Numeric);
        assert_eq!(choose_mode("0123456789", LATIN1), Mode::Numeric);
        assert_eq!(choose_mode("0123456789A", LATIN1), Mode::Alphanumeric);
        assert_eq!(choose_mode("A", LATIN1), Mode::Alphanumeric);
        assert_eq!(choose_mode("AZ09 $%*+-./:", LATIN1), Mode::Alphanumeric);
        assert_eq!(choose_mode("0123456789a", LATIN1), Mode::Byte);
        assert_eq!(choose_mode("0123456789#", LATIN1), Mode::Byte);
        assert_eq!(choose_mode("a", LATIN1), Mode::Byte);
        assert_eq!(choose_mode("", LATIN1), Mode::Byte);
    }

    #[test]
    fn test_choose_mode_shift_jis() {
        let sjis = CharacterSetEci::ShiftJis;
        assert_eq!(choose_mode("\u{70b9}", sjis), Mode::Kanji);
        assert_eq!(choose_mode("\u{70b9}\u{8317}", sjis), Mode::Kanji);
        // Half-width characters are single bytes
        assert_eq!(choose_mode("\u{70b9}A", sjis), Mode::Byte);
        assert_eq!(choose_mode("12345", sjis), Mode::Byte);
        // Without the Shift_JIS hint Kanji is never chosen
        assert_eq!(choose_mode("\u{70b9}", CharacterSetEci::Utf8), Mode::Byte);
    }

    #[test]
    fn test_append_payload_counts() {
        let mut bits = BitSequence::new();
        assert_eq!(append_payload("12345", Mode::Numeric, LATIN1, &mut bits).unwrap(), 5);
        assert_eq!(bits.size(), 10 + 7);

        let mut bits = BitSequence::new();
        let count = append_payload("\u{e9}t\u{e9}", Mode::Byte, CharacterSetEci::Utf8, &mut bits).unwrap();
        assert_eq!(count, 5);
        assert_eq!(bits.size(), 40);

        let mut bits = BitSequence::new();
        let count = append_payload("\u{70b9}", Mode::Kanji, CharacterSetEci::ShiftJis, &mut bits).unwrap();
        assert_eq!(count, 1);
        assert_eq!(bits.size(), 13);

        let mut bits = BitSequence::new();
        assert!(append_payload("x", Mode::Eci, LATIN1, &mut bits).is_err());
    }
}
