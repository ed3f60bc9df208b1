//! Character sets that can be announced with an ECI designator
//! (ISO 18004:2006 5.3.1.1) and the transcoding used for byte mode.

use crate::error::{QrError, Result};
use encoding_rs::Encoding;
use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

/// Character set with its ECI assignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CharacterSetEci {
    /// IBM code page 437 (ECI 0 and 2)
    Cp437,
    /// Default byte mode character set
    #[default]
    Iso8859_1,
    /// Latin-2, Central European
    Iso8859_2,
    /// Latin-3, South European
    Iso8859_3,
    /// Latin-4, North European
    Iso8859_4,
    /// Latin/Cyrillic
    Iso8859_5,
    /// Latin/Arabic
    Iso8859_6,
    /// Latin/Greek
    Iso8859_7,
    /// Latin/Hebrew
    Iso8859_8,
    /// Latin-5, Turkish
    Iso8859_9,
    /// Latin-6, Nordic
    Iso8859_10,
    /// Latin/Thai
    Iso8859_11,
    /// Latin-7, Baltic Rim
    Iso8859_13,
    /// Latin-8, Celtic
    Iso8859_14,
    /// Latin-9
    Iso8859_15,
    /// Latin-10, South-Eastern European
    Iso8859_16,
    /// Shift_JIS; enables Kanji mode
    ShiftJis,
    /// Windows Central European
    Cp1250,
    /// Windows Cyrillic
    Cp1251,
    /// Windows Western European
    Cp1252,
    /// Windows Arabic
    Cp1256,
    /// UTF-16, big endian
    Utf16Be,
    /// UTF-8
    Utf8,
    /// US-ASCII (ECI 27 and 170)
    Ascii,
    /// Traditional Chinese
    Big5,
    /// Simplified Chinese
    Gb18030,
    /// Korean
    EucKr,
}

impl CharacterSetEci {
    /// Every supported character set, in ECI order
    pub const ALL: [CharacterSetEci; 27] = [
        CharacterSetEci::Cp437,
        CharacterSetEci::Iso8859_1,
        CharacterSetEci::Iso8859_2,
        CharacterSetEci::Iso8859_3,
        CharacterSetEci::Iso8859_4,
        CharacterSetEci::Iso8859_5,
        CharacterSetEci::Iso8859_6,
        CharacterSetEci::Iso8859_7,
        CharacterSetEci::Iso8859_8,
        CharacterSetEci::Iso8859_9,
        CharacterSetEci::Iso8859_10,
        CharacterSetEci::Iso8859_11,
        CharacterSetEci::Iso8859_13,
        CharacterSetEci::Iso8859_14,
        CharacterSetEci::Iso8859_15,
        CharacterSetEci::Iso8859_16,
        CharacterSetEci::ShiftJis,
        CharacterSetEci::Cp1250,
        CharacterSetEci::Cp1251,
        CharacterSetEci::Cp1252,
        CharacterSetEci::Cp1256,
        CharacterSetEci::Utf16Be,
        CharacterSetEci::Utf8,
        CharacterSetEci::Ascii,
        CharacterSetEci::Big5,
        CharacterSetEci::Gb18030,
        CharacterSetEci::EucKr,
    ];

    /// All ECI assignment numbers; the first is the one written when encoding
    pub fn values(self) -> &'static [u32] {
        use CharacterSetEci::*;
        match self {
            Cp437 => &[0, 2],
            Iso8859_1 => &[1, 3],
            Iso8859_2 => &[4],
            Iso8859_3 => &[5],
            Iso8859_4 => &[6],
            Iso8859_5 => &[7],
            Iso8859_6 => &[8],
            Iso8859_7 => &[9],
            Iso8859_8 => &[10],
            Iso8859_9 => &[11],
            Iso8859_10 => &[12],
            Iso8859_11 => &[13],
            Iso8859_13 => &[15],
            Iso8859_14 => &[16],
            Iso8859_15 => &[17],
            Iso8859_16 => &[18],
            ShiftJis => &[20],
            Cp1250 => &[21],
            Cp1251 => &[22],
            Cp1252 => &[23],
            Cp1256 => &[24],
            Utf16Be => &[25],
            Utf8 => &[26],
            Ascii => &[27, 170],
            Big5 => &[28],
            Gb18030 => &[29],
            EucKr => &[30],
        }
    }

    /// Primary ECI value, the one written to the ECI segment
    pub fn value(self) -> u32 {
        self.values()[0]
    }

    /// Canonical IANA name followed by accepted aliases
    pub fn names(self) -> &'static [&'static str] {
        use CharacterSetEci::*;
        match self {
            Cp437 => &["Cp437"],
            Iso8859_1 => &["ISO-8859-1", "ISO8859_1"],
            Iso8859_2 => &["ISO-8859-2", "ISO8859_2"],
            Iso8859_3 => &["ISO-8859-3", "ISO8859_3"],
            Iso8859_4 => &["ISO-8859-4", "ISO8859_4"],
            Iso8859_5 => &["ISO-8859-5", "ISO8859_5"],
            Iso8859_6 => &["ISO-8859-6", "ISO8859_6"],
            Iso8859_7 => &["ISO-8859-7", "ISO8859_7"],
            Iso8859_8 => &["ISO-8859-8", "ISO8859_8"],
            Iso8859_9 => &["ISO-8859-9", "ISO8859_9"],
            Iso8859_10 => &["ISO-8859-10", "ISO8859_10"],
            Iso8859_11 => &["ISO-8859-11", "ISO8859_11"],
            Iso8859_13 => &["ISO-8859-13", "ISO8859_13"],
            Iso8859_14 => &["ISO-8859-14", "ISO8859_14"],
            Iso8859_15 => &["ISO-8859-15", "ISO8859_15"],
            Iso8859_16 => &["ISO-8859-16", "ISO8859_16"],
            ShiftJis => &["Shift_JIS", "SJIS"],
            Cp1250 => &["windows-1250", "Cp1250"],
            Cp1251 => &["windows-1251", "Cp1251"],
            Cp1252 => &["windows-1252", "Cp1252"],
            Cp1256 => &["windows-1256", "Cp1256"],
            Utf16Be => &["UTF-16BE", "UnicodeBig", "UnicodeBigUnmarked"],
            Utf8 => &["UTF-8", "UTF8"],
            Ascii => &["US-ASCII", "ASCII"],
            Big5 => &["Big5"],
            Gb18030 => &["GB18030", "GB2312", "EUC_CN", "GBK"],
            EucKr => &["EUC-KR", "EUC_KR"],
        }
    }

    /// Canonical IANA name
    pub fn name(self) -> &'static str {
        self.names()[0]
    }

    /// Look up a character set by ECI assignment number
    pub fn for_value(value: u32) -> Result<Option<Self>> {
        if value >= 900 {
            return Err(QrError::InvalidArgument(format!(
                "ECI value out of range: {}",
                value
            )));
        }
        Ok(value_map().get(&value).copied())
    }

    /// Look up a character set by name or alias, ignoring ASCII case
    pub fn for_name(name: &str) -> Option<Self> {
        name_map().get(&name.to_ascii_lowercase()).copied()
    }

    /// Transcode `content` into this character set.
    ///
    /// Characters that have no mapping are an `InvalidInput` error rather than
    /// being replaced.
    pub fn encode(self, content: &str) -> Result<Vec<u8>> {
        match self {
            CharacterSetEci::Iso8859_1 => encode_single_byte(content, 0xFF, self),
            CharacterSetEci::Ascii => encode_single_byte(content, 0x7F, self),
            CharacterSetEci::Utf8 => Ok(content.as_bytes().to_vec()),
            CharacterSetEci::Utf16Be => Ok(content
                .encode_utf16()
                .flat_map(|unit| unit.to_be_bytes())
                .collect()),
            _ => {
                let encoding = self.encoding().ok_or_else(|| {
                    QrError::Unsupported(format!("no encoder available for {}", self.name()))
                })?;
                let (bytes, _, had_errors) = encoding.encode(content);
                if had_errors {
                    return Err(QrError::InvalidInput(format!(
                        "content cannot be represented in {}",
                        self.name()
                    )));
                }
                Ok(bytes.into_owned())
            }
        }
    }

    fn encoding(self) -> Option<&'static Encoding> {
        use CharacterSetEci::*;
        Some(match self {
            Iso8859_2 => encoding_rs::ISO_8859_2,
            Iso8859_3 => encoding_rs::ISO_8859_3,
            Iso8859_4 => encoding_rs::ISO_8859_4,
            Iso8859_5 => encoding_rs::ISO_8859_5,
            Iso8859_6 => encoding_rs::ISO_8859_6,
            Iso8859_7 => encoding_rs::ISO_8859_7,
            Iso8859_8 => encoding_rs::ISO_8859_8,
            // Closest WHATWG encodings for the two Latin/Thai sets it folds away
            Iso8859_9 => encoding_rs::WINDOWS_1254,
            Iso8859_10 => encoding_rs::ISO_8859_10,
            Iso8859_11 => encoding_rs::WINDOWS_874,
            Iso8859_13 => encoding_rs::ISO_8859_13,
            Iso8859_14 => encoding_rs::ISO_8859_14,
            Iso8859_15 => encoding_rs::ISO_8859_15,
            Iso8859_16 => encoding_rs::ISO_8859_16,
            ShiftJis => encoding_rs::SHIFT_JIS,
            Cp1250 => encoding_rs::WINDOWS_1250,
            Cp1251 => encoding_rs::WINDOWS_1251,
            Cp1252 => encoding_rs::WINDOWS_1252,
            Cp1256 => encoding_rs::WINDOWS_1256,
            Big5 => encoding_rs::BIG5,
            Gb18030 => encoding_rs::GB18030,
            EucKr => encoding_rs::EUC_KR,
            Cp437 | Iso8859_1 | Utf16Be | Utf8 | Ascii => return None,
        })
    }
}

impl fmt::Display for CharacterSetEci {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn encode_single_byte(content: &str, max: u32, charset: CharacterSetEci) -> Result<Vec<u8>> {
    content
        .chars()
        .map(|c| {
            let code = c as u32;
            if code <= max {
                Ok(code as u8)
            } else {
                Err(QrError::InvalidInput(format!(
                    "'{}' cannot be represented in {}",
                    c,
                    charset.name()
                )))
            }
        })
        .collect()
}

static VALUE_TO_ECI: OnceLock<HashMap<u32, CharacterSetEci>> = OnceLock::new();
static NAME_TO_ECI: OnceLock<HashMap<String, CharacterSetEci>> = OnceLock::new();

fn value_map() -> &'static HashMap<u32, CharacterSetEci> {
    VALUE_TO_ECI.get_or_init(|| {
        CharacterSetEci::ALL
            .iter()
            .flat_map(|&eci| eci.values().iter().map(move |&v| (v, eci)))
            .collect()
    })
}

fn name_map() -> &'static HashMap<String, CharacterSetEci> {
    NAME_TO_ECI.get_or_init(|| {
        CharacterSetEci::ALL
            .iter()
            .flat_map(|&eci| eci.names().iter().map(move |n| (n.to_ascii_lowercase(), eci)))
            .collect()
    })
}
