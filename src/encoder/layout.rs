/// Places function patterns, format/version information and data bits into a
/// module matrix.
use super::bch::{make_type_info_bits, make_version_info_bits};
use super::mask::data_mask_bit;
use crate::error::{QrError, Result};
use crate::models::{ECLevel, MaskPattern, Module, ModuleMatrix, Version};
use crate::utils::BitSequence;

const POSITION_DETECTION_PATTERN: [[u8; 7]; 7] = [
    [1, 1, 1, 1, 1, 1, 1],
    [1, 0, 0, 0, 0, 0, 1],
    [1, 0, 1, 1, 1, 0, 1],
    [1, 0, 1, 1, 1, 0, 1],
    [1, 0, 1, 1, 1, 0, 1],
    [1, 0, 0, 0, 0, 0, 1],
    [1, 1, 1, 1, 1, 1, 1],
];

const POSITION_ADJUSTMENT_PATTERN: [[u8; 5]; 5] = [
    [1, 1, 1, 1, 1],
    [1, 0, 0, 0, 1],
    [1, 0, 1, 0, 1],
    [1, 0, 0, 0, 1],
    [1, 1, 1, 1, 1],
];

/// (x, y) of the top-left copy of the type information, bit 0 first
const TYPE_INFO_COORDINATES: [(usize, usize); 15] = [
    (8, 0),
    (8, 1),
    (8, 2),
    (8, 3),
    (8, 4),
    (8, 5),
    (8, 7),
    (8, 8),
    (7, 8),
    (5, 8),
    (4, 8),
    (3, 8),
    (2, 8),
    (1, 8),
    (0, 8),
];

/// Reset every module to `Empty`
pub fn clear_matrix(matrix: &mut ModuleMatrix) {
    matrix.clear(Module::Empty);
}

/// Lay out a complete symbol: function patterns, type and version
/// information, then the masked data bits.
pub fn build_matrix(
    data_bits: &BitSequence,
    ec_level: ECLevel,
    version: &Version,
    mask: MaskPattern,
    matrix: &mut ModuleMatrix,
) -> Result<()> {
    let dimension = version.dimension();
    if matrix.width() != dimension || matrix.height() != dimension {
        return Err(QrError::InvalidArgument(format!(
            "matrix is {}x{}, version {} needs {}x{}",
            matrix.width(),
            matrix.height(),
            version.number(),
            dimension,
            dimension
        )));
    }
    clear_matrix(matrix);
    embed_basic_patterns(version, matrix)?;
    embed_type_info(ec_level, mask, matrix)?;
    maybe_embed_version_info(version, matrix)?;
    embed_data_bits(data_bits, Some(mask), matrix)
}

/// Finder patterns with separators, the dark module, alignment patterns and
/// timing patterns.
pub fn embed_basic_patterns(version: &Version, matrix: &mut ModuleMatrix) -> Result<()> {
    embed_position_detection_patterns_and_separators(matrix)?;
    embed_dark_dot_at_left_bottom_corner(matrix)?;
    maybe_embed_position_adjustment_patterns(version, matrix);
    embed_timing_patterns(matrix);
    Ok(())
}

/// Write both copies of the 15-bit type information
pub fn embed_type_info(ec_level: ECLevel, mask: MaskPattern, matrix: &mut ModuleMatrix) -> Result<()> {
    let mut type_info_bits = BitSequence::new();
    make_type_info_bits(ec_level, mask, &mut type_info_bits)?;

    let width = matrix.width();
    let height = matrix.height();
    let size = type_info_bits.size();
    for (i, &(x1, y1)) in TYPE_INFO_COORDINATES.iter().enumerate() {
        // Stored LSB first
        let bit = type_info_bits.get(size - 1 - i)?;
        matrix.set_bool(x1, y1, bit);

        if i < 8 {
            matrix.set_bool(width - i - 1, 8, bit);
        } else {
            matrix.set_bool(8, height - 7 + (i - 8), bit);
        }
    }
    Ok(())
}

/// Write the two 6x3 version information blocks (versions 7 and up)
pub fn maybe_embed_version_info(version: &Version, matrix: &mut ModuleMatrix) -> Result<()> {
    if version.number() < 7 {
        return Ok(());
    }
    let mut version_info_bits = BitSequence::new();
    make_version_info_bits(version, &mut version_info_bits)?;

    let height = matrix.height();
    let mut bit_index = 6 * 3;
    for i in 0..6 {
        for j in 0..3 {
            bit_index -= 1;
            let bit = version_info_bits.get(bit_index)?;
            // Bottom-left block
            matrix.set_bool(i, height - 11 + j, bit);
            // Top-right block
            matrix.set_bool(height - 11 + j, i, bit);
        }
    }
    Ok(())
}

/// Fill every still-empty module in zig-zag order starting at the bottom
/// right. Once `data_bits` runs out the remainder bits are 0. With a mask,
/// each bit is XORed with the mask function.
pub fn embed_data_bits(
    data_bits: &BitSequence,
    mask: Option<MaskPattern>,
    matrix: &mut ModuleMatrix,
) -> Result<()> {
    let mut bit_index = 0;
    let mut direction: isize = -1;
    let height = matrix.height() as isize;
    let mut x = matrix.width() as isize - 1;
    let mut y = height - 1;
    while x > 0 {
        // Skip the vertical timing pattern
        if x == 6 {
            x -= 1;
        }
        while y >= 0 && y < height {
            for i in 0..2 {
                let xx = (x - i) as usize;
                let yy = y as usize;
                if !matrix.get(xx, yy).is_empty() {
                    continue;
                }
                let mut bit = if bit_index < data_bits.size() {
                    let bit = data_bits.get(bit_index)?;
                    bit_index += 1;
                    bit
                } else {
                    false
                };
                if let Some(mask) = mask {
                    if data_mask_bit(mask, xx, yy) {
                        bit = !bit;
                    }
                }
                matrix.set_bool(xx, yy, bit);
            }
            y += direction;
        }
        direction = -direction;
        y += direction;
        x -= 2;
    }
    if bit_index != data_bits.size() {
        return Err(QrError::Internal(format!(
            "not all bits consumed: {}/{}",
            bit_index,
            data_bits.size()
        )));
    }
    Ok(())
}

fn embed_position_detection_patterns_and_separators(matrix: &mut ModuleMatrix) -> Result<()> {
    let pdp_width = POSITION_DETECTION_PATTERN[0].len();
    let width = matrix.width();
    let height = matrix.height();

    embed_position_detection_pattern(0, 0, matrix)?;
    embed_position_detection_pattern(width - pdp_width, 0, matrix)?;
    embed_position_detection_pattern(0, width - pdp_width, matrix)?;

    let hsp_width = 8;
    embed_horizontal_separation_pattern(0, hsp_width - 1, matrix)?;
    embed_horizontal_separation_pattern(width - hsp_width, hsp_width - 1, matrix)?;
    embed_horizontal_separation_pattern(0, width - hsp_width, matrix)?;

    let vsp_size = 7;
    embed_vertical_separation_pattern(vsp_size, 0, matrix)?;
    embed_vertical_separation_pattern(height - vsp_size - 1, 0, matrix)?;
    embed_vertical_separation_pattern(vsp_size, height - vsp_size, matrix)?;
    Ok(())
}

fn embed_position_detection_pattern(x_start: usize, y_start: usize, matrix: &mut ModuleMatrix) -> Result<()> {
    for (y, row) in POSITION_DETECTION_PATTERN.iter().enumerate() {
        for (x, &value) in row.iter().enumerate() {
            claim(matrix, x_start + x, y_start + y, value == 1)?;
        }
    }
    Ok(())
}

fn embed_horizontal_separation_pattern(x_start: usize, y_start: usize, matrix: &mut ModuleMatrix) -> Result<()> {
    for x in 0..8 {
        claim(matrix, x_start + x, y_start, false)?;
    }
    Ok(())
}

fn embed_vertical_separation_pattern(x_start: usize, y_start: usize, matrix: &mut ModuleMatrix) -> Result<()> {
    for y in 0..7 {
        claim(matrix, x_start, y_start + y, false)?;
    }
    Ok(())
}

/// Set a module that no other pattern may have touched yet
fn claim(matrix: &mut ModuleMatrix, x: usize, y: usize, dark: bool) -> Result<()> {
    if !matrix.get(x, y).is_empty() {
        return Err(QrError::Internal(format!(
            "module ({}, {}) already set to {:?}",
            x,
            y,
            matrix.get(x, y)
        )));
    }
    matrix.set_bool(x, y, dark);
    Ok(())
}

fn embed_dark_dot_at_left_bottom_corner(matrix: &mut ModuleMatrix) -> Result<()> {
    let y = matrix.height() - 8;
    if matrix.get(8, y) == Module::Light {
        return Err(QrError::Internal(format!(
            "dark module position (8, {}) is already light",
            y
        )));
    }
    matrix.set(8, y, Module::Dark);
    Ok(())
}

fn maybe_embed_position_adjustment_patterns(version: &Version, matrix: &mut ModuleMatrix) {
    if version.number() < 2 {
        return;
    }
    let centers = version.alignment_centers();
    for &y in centers {
        for &x in centers {
            // Centres overlapping a finder are already claimed
            if matrix.get(x, y).is_empty() {
                embed_position_adjustment_pattern(x - 2, y - 2, matrix);
            }
        }
    }
}

fn embed_position_adjustment_pattern(x_start: usize, y_start: usize, matrix: &mut ModuleMatrix) {
    for (y, row) in POSITION_ADJUSTMENT_PATTERN.iter().enumerate() {
        for (x, &value) in row.iter().enumerate() {
            matrix.set_bool(x_start + x, y_start + y, value == 1);
        }
    }
}

fn embed_timing_patterns(matrix: &mut ModuleMatrix) {
    let width = matrix.width();
    for i in 8..width - 8 {
        let dark = (i + 1) % 2 == 1;
        if matrix.get(i, 6).is_empty() {
            matrix.set_bool(i, 6, dark);
        }
        if matrix.get(6, i).is_empty() {
            matrix.set_bool(6, i, dark);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bits_from_bytes(bytes: &[u8]) -> BitSequence {
        let mut bits = BitSequence::new();
        for &b in bytes {
            bits.append_bits(b as u32, 8).unwrap();
        }
        bits
    }

    fn basic_patterns(version: u32) -> ModuleMatrix {
        let version = Version::for_number(version).unwrap();
        let mut matrix = ModuleMatrix::new(version.dimension(), version.dimension());
        embed_basic_patterns(version, &mut matrix).unwrap();
        matrix
    }

    #[test]
    fn test_basic_patterns_version1() {
        let matrix = basic_patterns(1);
        let expected = concat!(
            " 1 1 1 1 1 1 1 0           0 1 1 1 1 1 1 1\n",
            " 1 0 0 0 0 0 1 0           0 1 0 0 0 0 0 1\n",
            " 1 0 1 1 1 0 1 0           0 1 0 1 1 1 0 1\n",
            " 1 0 1 1 1 0 1 0           0 1 0 1 1 1 0 1\n",
            " 1 0 1 1 1 0 1 0           0 1 0 1 1 1 0 1\n",
            " 1 0 0 0 0 0 1 0           0 1 0 0 0 0 0 1\n",
            " 1 1 1 1 1 1 1 0 1 0 1 0 1 0 1 1 1 1 1 1 1\n",
            " 0 0 0 0 0 0 0 0           0 0 0 0 0 0 0 0\n",
            "             1                            \n",
            "             0                            \n",
            "             1                            \n",
            "             0                            \n",
            "             1                            \n",
            " 0 0 0 0 0 0 0 0 1                        \n",
            " 1 1 1 1 1 1 1 0                          \n",
            " 1 0 0 0 0 0 1 0                          \n",
            " 1 0 1 1 1 0 1 0                          \n",
            " 1 0 1 1 1 0 1 0                          \n",
            " 1 0 1 1 1 0 1 0                          \n",
            " 1 0 0 0 0 0 1 0                          \n",
            " 1 1 1 1 1 1 1 0                          \n",
        );
        assert_eq!(matrix.to_string(), expected);
    }

    #[test]
    fn test_alignment_patterns_version2() {
        let matrix = basic_patterns(2);
        // Single alignment pattern centred at (18, 18)
        assert_eq!(matrix.get(18, 18), Module::Dark);
        assert_eq!(matrix.get(17, 18), Module::Light);
        assert_eq!(matrix.get(16, 16), Module::Dark);
        assert_eq!(matrix.get(20, 20), Module::Dark);
        assert!(matrix.get(15, 15).is_empty());
    }

    #[test]
    fn test_embed_type_info() {
        let mut matrix = ModuleMatrix::new(21, 21);
        embed_type_info(ECLevel::M, MaskPattern::Pattern5, &mut matrix).unwrap();
        // 0x40CE = 100000011001110, stored LSB first along column 8
        let column: Vec<bool> = [0, 1, 2, 3, 4, 5, 7, 8]
            .iter()
            .map(|&y| matrix.get(8, y).is_dark())
            .collect();
        assert_eq!(column, [false, true, true, true, false, false, true, true]);
        // Row 8 copy on the right mirrors the column
        for i in 0..8 {
            assert_eq!(matrix.get(20 - i, 8), matrix.get(TYPE_INFO_COORDINATES[i].0, TYPE_INFO_COORDINATES[i].1));
        }
        for i in 8..15 {
            let (x, y) = TYPE_INFO_COORDINATES[i];
            assert_eq!(matrix.get(8, 21 - 7 + (i - 8)), matrix.get(x, y));
        }
    }

    #[test]
    fn test_embed_version_info() {
        let version = Version::for_number(7).unwrap();
        let mut matrix = ModuleMatrix::new(45, 45);
        maybe_embed_version_info(version, &mut matrix).unwrap();
        // 0x07C94 = 000111 110010 010100, last bit first
        let bits = 0x07C94u32;
        for i in 0..6 {
            for j in 0..3 {
                let index = 17 - (i * 3 + j);
                let expected = (bits >> (17 - index)) & 1 == 1;
                assert_eq!(matrix.get(i, 45 - 11 + j).is_dark(), expected, "({}, {})", i, j);
                assert_eq!(matrix.get(45 - 11 + j, i), matrix.get(i, 45 - 11 + j));
            }
        }

        let mut small = ModuleMatrix::new(21, 21);
        maybe_embed_version_info(Version::for_number(6).unwrap(), &mut small).unwrap();
        assert!(small.modules().iter().all(|m| m.is_empty()));
    }

    #[test]
    fn test_embed_data_bits_unmasked() {
        let version = Version::for_number(1).unwrap();
        let mut matrix = ModuleMatrix::new(21, 21);
        embed_basic_patterns(version, &mut matrix).unwrap();
        embed_type_info(ECLevel::L, MaskPattern::Pattern0, &mut matrix).unwrap();
        let bits = BitSequence::with_size(26 * 8);
        embed_data_bits(&bits, None, &mut matrix).unwrap();
        assert!(matrix.is_complete());
        // All-zero data leaves the bottom-right corner light
        assert_eq!(matrix.get(20, 20), Module::Light);
        assert_eq!(matrix.get(19, 9), Module::Light);
    }

    #[test]
    fn test_embed_data_bits_rejects_excess_bits() {
        let version = Version::for_number(1).unwrap();
        let mut matrix = ModuleMatrix::new(21, 21);
        embed_basic_patterns(version, &mut matrix).unwrap();
        embed_type_info(ECLevel::L, MaskPattern::Pattern0, &mut matrix).unwrap();
        let bits = BitSequence::with_size(27 * 8);
        assert!(matches!(
            embed_data_bits(&bits, None, &mut matrix),
            Err(QrError::Internal(_))
        ));
    }

    #[test]
    fn test_build_matrix() {
        let bytes = [
            32, 65, 205, 69, 41, 220, 46, 128, 236, 42, 159, 74, 221, 244, 169, 239, 150, 138, 70,
            237, 85, 224, 96, 74, 219, 61,
        ];
        let bits = bits_from_bytes(&bytes);
        let mut matrix = ModuleMatrix::new(21, 21);
        build_matrix(
            &bits,
            ECLevel::H,
            Version::for_number(1).unwrap(),
            MaskPattern::Pattern3,
            &mut matrix,
        )
        .unwrap();
        let expected = concat!(
            " 1 1 1 1 1 1 1 0 0 1 1 0 0 0 1 1 1 1 1 1 1\n",
            " 1 0 0 0 0 0 1 0 0 0 0 0 0 0 1 0 0 0 0 0 1\n",
            " 1 0 1 1 1 0 1 0 0 0 0 1 0 0 1 0 1 1 1 0 1\n",
            " 1 0 1 1 1 0 1 0 0 1 1 0 0 0 1 0 1 1 1 0 1\n",
            " 1 0 1 1 1 0 1 0 1 1 0 0 1 0 1 0 1 1 1 0 1\n",
            " 1 0 0 0 0 0 1 0 0 0 1 1 1 0 1 0 0 0 0 0 1\n",
            " 1 1 1 1 1 1 1 0 1 0 1 0 1 0 1 1 1 1 1 1 1\n",
            " 0 0 0 0 0 0 0 0 1 1 0 1 1 0 0 0 0 0 0 0 0\n",
            " 0 0 1 1 0 0 1 1 1 0 0 1 1 1 1 0 1 0 0 0 0\n",
            " 1 0 1 0 1 0 0 0 0 0 1 1 1 0 0 1 0 1 1 1 0\n",
            " 1 1 1 1 0 1 1 0 1 0 1 1 1 0 0 1 1 1 0 1 0\n",
            " 1 0 1 0 1 1 0 1 1 1 0 0 1 1 1 0 0 1 0 1 0\n",
            " 0 0 1 0 0 1 1 1 0 0 0 0 0 0 1 0 1 1 1 1 1\n",
            " 0 0 0 0 0 0 0 0 1 1 0 1 0 0 0 0 0 1 0 1 1\n",
            " 1 1 1 1 1 1 1 0 1 1 1 1 0 0 0 0 1 0 1 1 0\n",
            " 1 0 0 0 0 0 1 0 0 0 0 1 0 1 1 1 0 0 0 0 0\n",
            " 1 0 1 1 1 0 1 0 0 1 0 0 1 1 0 0 1 0 0 1 1\n",
            " 1 0 1 1 1 0 1 0 1 1 0 1 0 0 0 0 0 1 1 1 0\n",
            " 1 0 1 1 1 0 1 0 1 1 1 1 0 0 0 0 1 1 1 0 0\n",
            " 1 0 0 0 0 0 1 0 0 0 0 0 0 0 0 0 1 0 1 0 0\n",
            " 1 1 1 1 1 1 1 0 0 0 1 1 1 1 1 0 1 0 0 1 0\n",
        );
        assert_eq!(matrix.to_string(), expected);
    }

    #[test]
    fn test_build_matrix_rejects_wrong_size() {
        let mut matrix = ModuleMatrix::new(25, 25);
        let bits = BitSequence::with_size(26 * 8);
        assert!(build_matrix(
            &bits,
            ECLevel::L,
            Version::for_number(1).unwrap(),
            MaskPattern::Pattern0,
            &mut matrix
        )
        .is_err());
    }

    #[test]
    fn test_dark_dot_collision() {
        let mut matrix = ModuleMatrix::new(21, 21);
        matrix.set(8, 13, Module::Light);
        assert!(embed_dark_dot_at_left_bottom_corner(&mut matrix).is_err());
    }
}
