/// Main QR encoder that orchestrates the encoding pipeline
use super::bitstream::{
    append_eci, append_length_info, append_mode_info, interleave_with_ec_bytes, terminate_bits,
};
use super::charset::CharacterSetEci;
use super::config;
use super::layout::build_matrix;
use super::mask::mask_penalty;
use super::modes::{append_payload, choose_mode};
use crate::debug::trace;
use crate::error::{QrError, Result};
use crate::models::{ECLevel, MaskPattern, Mode, ModuleMatrix, QrSymbol, QrSymbolBuilder, Version};
use crate::utils::BitSequence;
use rayon::prelude::*;

/// Modules of light border the renderer adds on each side by default
pub const DEFAULT_QUIET_ZONE: usize = 4;

/// Per-call encoding options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeHints {
    /// Error correction level
    pub error_correction: ECLevel,
    /// Character set for byte mode; anything but ISO-8859-1 is announced with an ECI
    pub character_set: CharacterSetEci,
    /// Smallest version to consider, clamped to 1..=40
    pub min_version: u32,
    /// Quiet zone width in modules, used when rendering
    pub quiet_zone: usize,
}

impl Default for EncodeHints {
    fn default() -> Self {
        Self {
            error_correction: ECLevel::L,
            character_set: CharacterSetEci::Iso8859_1,
            min_version: 1,
            quiet_zone: DEFAULT_QUIET_ZONE,
        }
    }
}

impl EncodeHints {
    /// Default hints at the given error correction level
    pub fn with_error_correction(ec_level: ECLevel) -> Self {
        Self {
            error_correction: ec_level,
            ..Self::default()
        }
    }
}

/// Text to QR symbol encoder
pub struct QrEncoder;

impl QrEncoder {
    /// Encode `content` into a complete, validated symbol
    pub fn encode(content: &str, hints: &EncodeHints) -> Result<QrSymbol> {
        if content.is_empty() {
            return Err(QrError::InvalidInput("found empty contents".to_string()));
        }
        let ec_level = hints.error_correction;
        let charset = hints.character_set;
        let mut symbol = QrSymbolBuilder::new();
        symbol.ec_level(ec_level);

        // Step 1: pick the mode
        let mode = choose_mode(content, charset);
        symbol.mode(mode);

        // Step 2: payload bits, without header
        let mut data_bits = BitSequence::new();
        let num_letters = append_payload(content, mode, charset, &mut data_bits)?;

        // Step 3: smallest version with room for the payload
        let version = choose_version(data_bits.size(), ec_level, hints.min_version)?;
        let num_total_bytes = version.total_codewords();
        let ec_blocks = version.ec_blocks_for_level(ec_level);
        let num_ec_bytes = ec_blocks.total_ec_codewords();
        let num_rs_blocks = ec_blocks.num_blocks();
        let num_data_bytes = num_total_bytes - num_ec_bytes;
        symbol.sizing(version, num_total_bytes, num_data_bytes, num_ec_bytes, num_rs_blocks);
        trace!(
            "mode {} version {} level {} ({} data + {} EC bytes in {} blocks)",
            mode,
            version.number(),
            ec_level,
            num_data_bytes,
            num_ec_bytes,
            num_rs_blocks
        );

        // Step 4: header then payload
        let mut header_and_data_bits = BitSequence::new();
        if mode == Mode::Byte && charset != CharacterSetEci::Iso8859_1 {
            append_eci(charset, &mut header_and_data_bits)?;
        }
        append_mode_info(mode, &mut header_and_data_bits)?;
        append_length_info(num_letters, version, mode, &mut header_and_data_bits)?;
        header_and_data_bits.append_bit_sequence(&data_bits);

        // Step 5: terminator and pad codewords
        terminate_bits(num_data_bytes, &mut header_and_data_bits)?;

        // Step 6: split into blocks and add EC codewords
        let final_bits = interleave_with_ec_bytes(
            &header_and_data_bits,
            num_total_bytes,
            num_data_bytes,
            num_rs_blocks,
        )?;

        // Step 7: lowest-penalty mask
        let mask = choose_mask_pattern(&final_bits, ec_level, version)?;
        symbol.mask_pattern(mask);

        // Step 8: final layout
        let dimension = version.dimension();
        let mut matrix = ModuleMatrix::new(dimension, dimension);
        build_matrix(&final_bits, ec_level, version, mask, &mut matrix)?;
        symbol.matrix(matrix);

        // Step 9
        symbol.finish()
    }
}

/// Smallest version at or above `min_version` whose data capacity holds
/// `num_input_bits` plus three bytes for the header
pub fn choose_version(
    num_input_bits: usize,
    ec_level: ECLevel,
    min_version: u32,
) -> Result<&'static Version> {
    let num_input_bytes = num_input_bits.div_ceil(8);
    for number in min_version.clamp(1, 40)..=40 {
        let version = Version::for_number(number)?;
        if version.data_codewords(ec_level) >= num_input_bytes + 3 {
            return Ok(version);
        }
    }
    Err(QrError::CapacityExceeded(format!(
        "{} data bytes do not fit in any version at level {}",
        num_input_bytes, ec_level
    )))
}

/// Lay out every mask candidate and keep the one with the lowest penalty.
/// Ties go to the lower pattern index.
pub fn choose_mask_pattern(
    bits: &BitSequence,
    ec_level: ECLevel,
    version: &Version,
) -> Result<MaskPattern> {
    let dimension = version.dimension();
    let score = |mask: MaskPattern| -> Result<u32> {
        let mut matrix = ModuleMatrix::new(dimension, dimension);
        build_matrix(bits, ec_level, version, mask, &mut matrix)?;
        Ok(mask_penalty(&matrix))
    };

    let parallel =
        config::parallel_masks() && version.number() as usize >= config::parallel_min_version();
    let penalties: Vec<u32> = if parallel {
        MaskPattern::ALL
            .par_iter()
            .map(|&mask| score(mask))
            .collect::<Result<Vec<u32>>>()?
    } else {
        MaskPattern::ALL
            .iter()
            .map(|&mask| score(mask))
            .collect::<Result<Vec<u32>>>()?
    };

    let mut best: Option<(MaskPattern, u32)> = None;
    for (&mask, &penalty) in MaskPattern::ALL.iter().zip(&penalties) {
        trace!("mask {} penalty {}", mask.bits(), penalty);
        if best.is_none_or(|(_, min_penalty)| penalty < min_penalty) {
            best = Some((mask, penalty));
        }
    }
    let (mask, penalty) =
        best.ok_or_else(|| QrError::Internal("no mask pattern was scored".to_string()))?;
    trace!("chose mask {} (penalty {})", mask.bits(), penalty);
    Ok(mask)
}
