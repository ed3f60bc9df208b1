/// BCH codes for QR code format (type) and version information
use crate::error::{QrError, Result};
use crate::models::{ECLevel, MaskPattern, Version};
use crate::utils::BitSequence;

/// Generator for the 15-bit type information: x^10 + x^8 + x^5 + x^4 + x^2 + x + 1
pub const TYPE_INFO_POLY: u32 = 0x537;
/// XOR mask that keeps type information from being all zero
pub const TYPE_INFO_MASK_PATTERN: u32 = 0x5412;
/// Generator for the 18-bit version information: x^12 + x^11 + x^10 + x^9 + x^8 + x^5 + x^2 + 1
pub const VERSION_INFO_POLY: u32 = 0x1F25;

/// Position of the most significant set bit, 1-based (0 for 0)
fn find_msb_set(value: u32) -> u32 {
    32 - value.leading_zeros()
}

/// Remainder of `value * x^(deg poly)` divided by `poly` over GF(2)
pub fn calculate_bch_code(value: u32, poly: u32) -> Result<u32> {
    if poly == 0 {
        return Err(QrError::InvalidArgument(
            "BCH generator polynomial must be non-zero".to_string(),
        ));
    }
    let msb_set_in_poly = find_msb_set(poly);
    let mut value = value << (msb_set_in_poly - 1);
    while find_msb_set(value) >= msb_set_in_poly {
        value ^= poly << (find_msb_set(value) - msb_set_in_poly);
    }
    Ok(value)
}

/// Append the 15 masked type information bits for `ec_level` and `mask`
pub fn make_type_info_bits(ec_level: ECLevel, mask: MaskPattern, bits: &mut BitSequence) -> Result<()> {
    let type_info = ((ec_level.bits() as u32) << 3) | mask.bits() as u32;
    bits.append_bits(type_info, 5)?;

    let bch_code = calculate_bch_code(type_info, TYPE_INFO_POLY)?;
    bits.append_bits(bch_code, 10)?;

    let mut mask_bits = BitSequence::new();
    mask_bits.append_bits(TYPE_INFO_MASK_PATTERN, 15)?;
    bits.xor(&mask_bits)?;

    if bits.size() != 15 {
        return Err(QrError::Internal(format!(
            "type info should be 15 bits, got {}",
            bits.size()
        )));
    }
    Ok(())
}

/// Append the 18 version information bits (only meaningful for versions 7+)
pub fn make_version_info_bits(version: &Version, bits: &mut BitSequence) -> Result<()> {
    let number = version.number() as u32;
    bits.append_bits(number, 6)?;
    let bch_code = calculate_bch_code(number, VERSION_INFO_POLY)?;
    bits.append_bits(bch_code, 12)?;

    if bits.size() != 18 {
        return Err(QrError::Internal(format!(
            "version info should be 18 bits, got {}",
            bits.size()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bits_value(bits: &BitSequence) -> u32 {
        bits.iter().fold(0, |acc, b| (acc << 1) | b as u32)
    }

    fn type_info(level: ECLevel, mask: u8) -> u32 {
        let mut bits = BitSequence::new();
        make_type_info_bits(level, MaskPattern::from_bits(mask).unwrap(), &mut bits).unwrap();
        bits_value(&bits)
    }

    #[test]
    fn test_calculate_bch_code() {
        // Version 7 -> 0x7C94 (ISO 18004 Table D.1)
        assert_eq!(calculate_bch_code(7, VERSION_INFO_POLY).unwrap(), 0xC94);
        assert_eq!(calculate_bch_code(8, VERSION_INFO_POLY).unwrap(), 0x5BC);
        // L, mask 0 -> 01000 1111001110 before masking
        assert_eq!(calculate_bch_code(8, TYPE_INFO_POLY).unwrap(), 0x3D6);
        assert_eq!(calculate_bch_code(0, TYPE_INFO_POLY).unwrap(), 0);
        assert!(calculate_bch_code(1, 0).is_err());
    }

    #[test]
    fn test_make_type_info_bits() {
        assert_eq!(type_info(ECLevel::L, 0), 0x77C4);
        assert_eq!(type_info(ECLevel::M, 0), 0x5412);
        assert_eq!(type_info(ECLevel::M, 5), 0x40CE);
        assert_eq!(type_info(ECLevel::Q, 2), 0x3F31);
        assert_eq!(type_info(ECLevel::H, 7), 0x083B);
    }

    #[test]
    fn test_make_version_info_bits() {
        let mut bits = BitSequence::new();
        make_version_info_bits(Version::for_number(7).unwrap(), &mut bits).unwrap();
        assert_eq!(bits_value(&bits), 0x07C94);

        let mut bits = BitSequence::new();
        make_version_info_bits(Version::for_number(40).unwrap(), &mut bits).unwrap();
        assert_eq!(bits_value(&bits), 0x28C69);
    }
}
