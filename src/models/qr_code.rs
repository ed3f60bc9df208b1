use super::{ModuleMatrix, Version};
use crate::error::{QrError, Result};
use std::fmt;

/// Error correction level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ECLevel {
    /// Low (~7% recovery capacity)
    L,
    /// Medium (~15% recovery capacity)
    M,
    /// Quartile (~25% recovery capacity)
    Q,
    /// High (~30% recovery capacity)
    H,
}

/// Indexed by the 2-bit format code, which is not declaration order.
const EC_LEVEL_FOR_BITS: [ECLevel; 4] = [ECLevel::M, ECLevel::L, ECLevel::H, ECLevel::Q];

impl ECLevel {
    /// All levels in ascending strength
    pub const ALL: [ECLevel; 4] = [ECLevel::L, ECLevel::M, ECLevel::Q, ECLevel::H];

    /// Position in `ALL`, used to index the EC block tables
    pub fn ordinal(self) -> usize {
        match self {
            ECLevel::L => 0,
            ECLevel::M => 1,
            ECLevel::Q => 2,
            ECLevel::H => 3,
        }
    }

    /// 2-bit code written into the format information (L=01, M=00, Q=11, H=10)
    pub fn bits(self) -> u8 {
        match self {
            ECLevel::L => 0x01,
            ECLevel::M => 0x00,
            ECLevel::Q => 0x03,
            ECLevel::H => 0x02,
        }
    }

    /// Get error correction level from its 2-bit format code
    pub fn for_bits(bits: u8) -> Result<Self> {
        EC_LEVEL_FOR_BITS
            .get(bits as usize)
            .copied()
            .ok_or_else(|| QrError::InvalidArgument(format!("EC level bits out of range: {}", bits)))
    }
}

impl fmt::Display for ECLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Data encoding mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// End of message (0000)
    Terminator,
    /// Digits 0-9
    Numeric,
    /// Digits, upper-case letters, space and `$%*+-./:`
    Alphanumeric,
    /// Structured append header
    StructuredAppend,
    /// 8-bit bytes in the selected character set
    Byte,
    /// Extended Channel Interpretation designator
    Eci,
    /// Shift_JIS double-byte characters
    Kanji,
    /// GS1 FNC1 in first position
    Fnc1FirstPosition,
    /// AIM FNC1 in second position
    Fnc1SecondPosition,
}

impl Mode {
    /// 4-bit mode indicator
    pub fn bits(self) -> u8 {
        match self {
            Mode::Terminator => 0x0,
            Mode::Numeric => 0x1,
            Mode::Alphanumeric => 0x2,
            Mode::StructuredAppend => 0x3,
            Mode::Byte => 0x4,
            Mode::Fnc1FirstPosition => 0x5,
            Mode::Eci => 0x7,
            Mode::Kanji => 0x8,
            Mode::Fnc1SecondPosition => 0x9,
        }
    }

    /// Mode for a 4-bit indicator
    pub fn for_bits(bits: u8) -> Result<Self> {
        Ok(match bits {
            0x0 => Mode::Terminator,
            0x1 => Mode::Numeric,
            0x2 => Mode::Alphanumeric,
            0x3 => Mode::StructuredAppend,
            0x4 => Mode::Byte,
            0x5 => Mode::Fnc1FirstPosition,
            0x7 => Mode::Eci,
            0x8 => Mode::Kanji,
            0x9 => Mode::Fnc1SecondPosition,
            _ => {
                return Err(QrError::InvalidArgument(format!(
                    "unknown mode indicator: {:#x}",
                    bits
                )));
            }
        })
    }

    /// Character count field widths for versions 1-9, 10-26 and 27-40
    fn count_bits_table(self) -> Option<[usize; 3]> {
        match self {
            Mode::Terminator | Mode::StructuredAppend => Some([0, 0, 0]),
            Mode::Numeric => Some([10, 12, 14]),
            Mode::Alphanumeric => Some([9, 11, 13]),
            Mode::Byte => Some([8, 16, 16]),
            Mode::Kanji => Some([8, 10, 12]),
            Mode::Eci | Mode::Fnc1FirstPosition | Mode::Fnc1SecondPosition => None,
        }
    }

    /// Width of the character count field for this mode in `version`
    pub fn character_count_bits(self, version: &Version) -> Result<usize> {
        let table = self.count_bits_table().ok_or_else(|| {
            QrError::InvalidArgument(format!("{:?} has no character count field", self))
        })?;
        let bucket = match version.number() {
            0..=9 => 0,
            10..=26 => 1,
            _ => 2,
        };
        Ok(table[bucket])
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mode::Terminator => "TERMINATOR",
            Mode::Numeric => "NUMERIC",
            Mode::Alphanumeric => "ALPHANUMERIC",
            Mode::StructuredAppend => "STRUCTURED_APPEND",
            Mode::Byte => "BYTE",
            Mode::Eci => "ECI",
            Mode::Kanji => "KANJI",
            Mode::Fnc1FirstPosition => "FNC1_FIRST_POSITION",
            Mode::Fnc1SecondPosition => "FNC1_SECOND_POSITION",
        };
        f.write_str(name)
    }
}

/// Mask pattern (0-7)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaskPattern {
    /// (x + y) % 2 == 0
    Pattern0 = 0,
    /// y % 2 == 0
    Pattern1 = 1,
    /// x % 3 == 0
    Pattern2 = 2,
    /// (x + y) % 3 == 0
    Pattern3 = 3,
    /// (y/2 + x/3) % 2 == 0
    Pattern4 = 4,
    /// (x*y)%2 + (x*y)%3 == 0
    Pattern5 = 5,
    /// ((x*y)%2 + (x*y)%3) % 2 == 0
    Pattern6 = 6,
    /// ((x+y)%2 + (x*y)%3) % 2 == 0
    Pattern7 = 7,
}

impl MaskPattern {
    /// Candidates in scoring order
    pub const ALL: [MaskPattern; 8] = [
        MaskPattern::Pattern0,
        MaskPattern::Pattern1,
        MaskPattern::Pattern2,
        MaskPattern::Pattern3,
        MaskPattern::Pattern4,
        MaskPattern::Pattern5,
        MaskPattern::Pattern6,
        MaskPattern::Pattern7,
    ];

    /// Get mask pattern from its 3-bit index
    pub fn from_bits(bits: u8) -> Result<Self> {
        Self::ALL
            .get(bits as usize)
            .copied()
            .ok_or_else(|| QrError::InvalidArgument(format!("invalid mask pattern: {}", bits)))
    }

    /// 3-bit mask reference
    pub fn bits(self) -> u8 {
        self as u8
    }
}

/// A finished QR code symbol
#[derive(Debug, Clone)]
pub struct QrSymbol {
    mode: Mode,
    ec_level: ECLevel,
    version: &'static Version,
    mask_pattern: MaskPattern,
    num_total_bytes: usize,
    num_data_bytes: usize,
    num_ec_bytes: usize,
    num_rs_blocks: usize,
    matrix: ModuleMatrix,
}

impl QrSymbol {
    /// Mode of the payload segment
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Error correction level
    pub fn ec_level(&self) -> ECLevel {
        self.ec_level
    }

    /// Chosen version
    pub fn version(&self) -> &'static Version {
        self.version
    }

    /// Mask applied to the data modules
    pub fn mask_pattern(&self) -> MaskPattern {
        self.mask_pattern
    }

    /// Width (= height) in modules
    pub fn matrix_width(&self) -> usize {
        self.version.dimension()
    }

    /// Data plus EC codewords
    pub fn num_total_bytes(&self) -> usize {
        self.num_total_bytes
    }

    /// Data codewords, header and padding included
    pub fn num_data_bytes(&self) -> usize {
        self.num_data_bytes
    }

    /// EC codewords across all blocks
    pub fn num_ec_bytes(&self) -> usize {
        self.num_ec_bytes
    }

    /// Reed-Solomon block count
    pub fn num_rs_blocks(&self) -> usize {
        self.num_rs_blocks
    }

    /// Module matrix (no module is `Empty`)
    pub fn matrix(&self) -> &ModuleMatrix {
        &self.matrix
    }

    /// Dark module at (x, y); coordinates outside the symbol read as light
    pub fn is_dark(&self, x: usize, y: usize) -> bool {
        x < self.matrix.width() && y < self.matrix.height() && self.matrix.get(x, y).is_dark()
    }
}

impl fmt::Display for QrSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "<<")?;
        writeln!(f, " mode: {}", self.mode)?;
        writeln!(f, " ecLevel: {}", self.ec_level)?;
        writeln!(f, " version: {}", self.version.number())?;
        writeln!(f, " matrixWidth: {}", self.matrix_width())?;
        writeln!(f, " maskPattern: {}", self.mask_pattern.bits())?;
        writeln!(f, " numTotalBytes: {}", self.num_total_bytes)?;
        writeln!(f, " numDataBytes: {}", self.num_data_bytes)?;
        writeln!(f, " numECBytes: {}", self.num_ec_bytes)?;
        writeln!(f, " numRSBlocks: {}", self.num_rs_blocks)?;
        writeln!(f, " matrix:")?;
        write!(f, "{}", self.matrix)?;
        writeln!(f, ">>")
    }
}

/// Staged builder for [`QrSymbol`]; fields are filled as encoding progresses
/// and checked together in [`QrSymbolBuilder::finish`].
#[derive(Debug, Default)]
pub struct QrSymbolBuilder {
    mode: Option<Mode>,
    ec_level: Option<ECLevel>,
    version: Option<&'static Version>,
    mask_pattern: Option<MaskPattern>,
    num_total_bytes: Option<usize>,
    num_data_bytes: Option<usize>,
    num_ec_bytes: Option<usize>,
    num_rs_blocks: Option<usize>,
    matrix: Option<ModuleMatrix>,
}

impl QrSymbolBuilder {
    /// Builder with nothing recorded
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the error correction level
    pub fn ec_level(&mut self, level: ECLevel) -> &mut Self {
        self.ec_level = Some(level);
        self
    }

    /// Record the payload mode
    pub fn mode(&mut self, mode: Mode) -> &mut Self {
        self.mode = Some(mode);
        self
    }

    /// Record the chosen version and its codeword budget
    pub fn sizing(
        &mut self,
        version: &'static Version,
        num_total_bytes: usize,
        num_data_bytes: usize,
        num_ec_bytes: usize,
        num_rs_blocks: usize,
    ) -> &mut Self {
        self.version = Some(version);
        self.num_total_bytes = Some(num_total_bytes);
        self.num_data_bytes = Some(num_data_bytes);
        self.num_ec_bytes = Some(num_ec_bytes);
        self.num_rs_blocks = Some(num_rs_blocks);
        self
    }

    /// Record the chosen mask
    pub fn mask_pattern(&mut self, mask: MaskPattern) -> &mut Self {
        self.mask_pattern = Some(mask);
        self
    }

    /// Record the laid-out matrix
    pub fn matrix(&mut self, matrix: ModuleMatrix) -> &mut Self {
        self.matrix = Some(matrix);
        self
    }

    /// Validate completeness and consistency, producing the symbol
    pub fn finish(self) -> Result<QrSymbol> {
        fn missing(field: &str) -> QrError {
            QrError::Internal(format!("symbol is missing {}", field))
        }
        let mode = self.mode.ok_or_else(|| missing("mode"))?;
        let ec_level = self.ec_level.ok_or_else(|| missing("EC level"))?;
        let version = self.version.ok_or_else(|| missing("version"))?;
        let mask_pattern = self.mask_pattern.ok_or_else(|| missing("mask pattern"))?;
        let num_total_bytes = self.num_total_bytes.ok_or_else(|| missing("total bytes"))?;
        let num_data_bytes = self.num_data_bytes.ok_or_else(|| missing("data bytes"))?;
        let num_ec_bytes = self.num_ec_bytes.ok_or_else(|| missing("EC bytes"))?;
        let num_rs_blocks = self.num_rs_blocks.ok_or_else(|| missing("RS block count"))?;
        let matrix = self.matrix.ok_or_else(|| missing("matrix"))?;

        if num_total_bytes != num_data_bytes + num_ec_bytes {
            return Err(QrError::Internal(format!(
                "total bytes {} != data bytes {} + EC bytes {}",
                num_total_bytes, num_data_bytes, num_ec_bytes
            )));
        }
        if matrix.width() != matrix.height() {
            return Err(QrError::Internal(format!(
                "matrix is not square: {}x{}",
                matrix.width(),
                matrix.height()
            )));
        }
        if matrix.width() != version.dimension() {
            return Err(QrError::Internal(format!(
                "matrix width {} does not match version {} width {}",
                matrix.width(),
                version.number(),
                version.dimension()
            )));
        }
        if !matrix.is_complete() {
            return Err(QrError::Internal("matrix has unset modules".to_string()));
        }

        Ok(QrSymbol {
            mode,
            ec_level,
            version,
            mask_pattern,
            num_total_bytes,
            num_data_bytes,
            num_ec_bytes,
            num_rs_blocks,
            matrix,
        })
    }
}
