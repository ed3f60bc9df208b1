/// Reed-Solomon error correction for QR codes
/// QR codes use RS over GF(256) with primitive polynomial x^8 + x^4 + x^3 + x^2 + 1
use super::gf256::{GaloisField, GfPoly, qr_code_field};
use crate::error::{QrError, Result};
use std::sync::{Mutex, OnceLock};

/// Reed-Solomon encoder for QR codes
///
/// Generator polynomials are cached by degree; the cache sits behind a mutex so
/// one encoder can be shared between threads.
pub struct ReedSolomonEncoder {
    field: &'static GaloisField,
    cached_generators: Mutex<Vec<GfPoly<'static>>>,
}

static SHARED_ENCODER: OnceLock<ReedSolomonEncoder> = OnceLock::new();

impl ReedSolomonEncoder {
    /// Create an encoder over `field`, which must be the QR code field
    pub fn new(field: &'static GaloisField) -> Result<Self> {
        if !std::ptr::eq(field, qr_code_field()) {
            return Err(QrError::Unsupported(format!(
                "Reed-Solomon encoding only supports the QR code field, got {:?}",
                field
            )));
        }
        Ok(Self::for_qr_field())
    }

    fn for_qr_field() -> Self {
        let field = qr_code_field();
        Self {
            field,
            cached_generators: Mutex::new(vec![field.one()]),
        }
    }

    /// Process-wide encoder whose generator cache is shared by all encode calls
    pub fn shared() -> &'static ReedSolomonEncoder {
        SHARED_ENCODER.get_or_init(Self::for_qr_field)
    }

    /// Generator polynomial (x - a^0)(x - a^1)...(x - a^(degree-1))
    pub fn generator(&self, degree: usize) -> Result<GfPoly<'static>> {
        let mut cache = self
            .cached_generators
            .lock()
            .map_err(|_| QrError::Internal("generator cache lock poisoned".to_string()))?;
        let cached = cache.len();
        if degree >= cached {
            let mut last = cache[cached - 1].clone();
            for d in cached..=degree {
                let factor = GfPoly::new(self.field, &[1, self.field.exp((d - 1) as u8)])?;
                let next = last.multiply(&factor)?;
                cache.push(next.clone());
                last = next;
            }
        }
        Ok(cache[degree].clone())
    }

    /// Fill the last `ec_bytes` entries of `to_encode` with EC codewords for
    /// the data codewords in front of them.
    pub fn encode(&self, to_encode: &mut [u8], ec_bytes: usize) -> Result<()> {
        if ec_bytes == 0 {
            return Err(QrError::InvalidArgument(
                "no error correction bytes requested".to_string(),
            ));
        }
        if to_encode.len() <= ec_bytes {
            return Err(QrError::InvalidArgument(format!(
                "no data bytes provided ({} total, {} EC)",
                to_encode.len(),
                ec_bytes
            )));
        }
        let data_bytes = to_encode.len() - ec_bytes;
        let generator = self.generator(ec_bytes)?;

        let info = GfPoly::new(self.field, &to_encode[..data_bytes])?;
        let info = info.multiply_by_monomial(ec_bytes, 1);
        let (_, remainder) = info.divide(&generator)?;

        let coefficients = remainder.coefficients();
        let num_zero = ec_bytes.checked_sub(coefficients.len()).ok_or_else(|| {
            QrError::Internal(format!(
                "remainder has {} coefficients for {} EC bytes",
                coefficients.len(),
                ec_bytes
            ))
        })?;
        let tail = &mut to_encode[data_bytes..];
        tail[..num_zero].fill(0);
        tail[num_zero..].copy_from_slice(coefficients);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::gf256::QR_CODE_PRIMITIVE;

    /// Independent shift-register RS encoder used as a reference.
    fn rs_encode(data: &[u8], num_ecc: usize) -> Vec<u8> {
        let field = qr_code_field();
        let mut gpoly = vec![0u8; num_ecc + 1];
        gpoly[0] = 1;
        for i in 0..num_ecc {
            let root = field.exp(i as u8);
            for j in (1..=i + 1).rev() {
                gpoly[j] = gpoly[j - 1] ^ field.multiply(gpoly[j], root);
            }
            gpoly[0] = field.multiply(gpoly[0], root);
        }

        let mut gpoly_div: Vec<u8> = gpoly[0..num_ecc].to_vec();
        gpoly_div.reverse();

        let mut remainder = vec![0u8; num_ecc];
        for &d in data {
            let factor = d ^ remainder[0];
            remainder.rotate_left(1);
            remainder[num_ecc - 1] = 0;
            for j in 0..num_ecc {
                remainder[j] ^= field.multiply(gpoly_div[j], factor);
            }
        }

        let mut codeword = data.to_vec();
        codeword.extend_from_slice(&remainder);
        codeword
    }

    fn encode(data: &[u8], ec: usize) -> Vec<u8> {
        let mut buf = data.to_vec();
        buf.resize(data.len() + ec, 0);
        ReedSolomonEncoder::shared().encode(&mut buf, ec).unwrap();
        buf
    }

    #[test]
    fn test_hello_world_1m() {
        let data = [
            32, 91, 11, 120, 209, 114, 220, 77, 67, 64, 236, 17, 236, 17, 236, 17,
        ];
        let codeword = encode(&data, 10);
        assert_eq!(
            &codeword[16..],
            &[196, 35, 39, 119, 235, 215, 231, 226, 93, 23]
        );
    }

    #[test]
    fn test_matches_reference_encoder() {
        let data: Vec<u8> = (0..40u32).map(|i| (i * 37 + 11) as u8).collect();
        for ec in [7, 10, 13, 17, 22, 30] {
            assert_eq!(encode(&data, ec), rs_encode(&data, ec), "ec = {}", ec);
        }
    }

    #[test]
    fn test_zero_data_gives_zero_ec() {
        let codeword = encode(&[0u8; 19], 7);
        assert!(codeword.iter().all(|&b| b == 0));
    }

    #[test]
    fn test_zero_block_leaves_buffer_zeroed() {
        let encoder = ReedSolomonEncoder::shared();
        let mut block = [0u8; 26];
        encoder.encode(&mut block, 7).unwrap();
        assert_eq!(block, [0u8; 26]);

        // Stale EC bytes are overwritten, not kept
        let mut block = [0u8; 26];
        block[19..].fill(0xAA);
        encoder.encode(&mut block, 7).unwrap();
        assert_eq!(block, [0u8; 26]);
    }

    #[test]
    fn test_ec_is_linear_in_data() {
        let a: Vec<u8> = (0..16u8).map(|i| i.wrapping_mul(29) ^ 0x5A).collect();
        let b: Vec<u8> = (0..16u8).map(|i| i.wrapping_mul(71).wrapping_add(3)).collect();
        let sum: Vec<u8> = a.iter().zip(&b).map(|(x, y)| x ^ y).collect();
        let (ea, eb, es) = (encode(&a, 10), encode(&b, 10), encode(&sum, 10));
        for i in 16..26 {
            assert_eq!(es[i], ea[i] ^ eb[i], "EC byte {}", i - 16);
        }
    }

    #[test]
    fn test_codeword_has_zero_syndromes() {
        let field = qr_code_field();
        let data = b"4376471154038";
        let codeword = encode(data, 10);
        let poly = GfPoly::new(field, &codeword).unwrap();
        for i in 0..10u8 {
            assert_eq!(poly.evaluate_at(field.exp(i)), 0, "syndrome {}", i);
        }
    }

    #[test]
    fn test_generator_degree() {
        let encoder = ReedSolomonEncoder::new(qr_code_field()).unwrap();
        let g = encoder.generator(7).unwrap();
        assert_eq!(g.degree(), 7);
        assert_eq!(g.coefficient(7), 1);
        // Lower degrees were cached on the way up
        assert_eq!(encoder.generator(3).unwrap().degree(), 3);
    }

    #[test]
    fn test_rejects_bad_arguments() {
        let mut buf = [1u8, 2, 3];
        let encoder = ReedSolomonEncoder::shared();
        assert!(encoder.encode(&mut buf, 0).is_err());
        assert!(encoder.encode(&mut buf, 3).is_err());
        assert!(encoder.encode(&mut buf, 4).is_err());
    }

    #[test]
    fn test_rejects_foreign_field() {
        let other: &'static GaloisField = Box::leak(Box::new(GaloisField::new(QR_CODE_PRIMITIVE)));
        assert!(matches!(
            ReedSolomonEncoder::new(other),
            Err(QrError::Unsupported(_))
        ));
    }
}
