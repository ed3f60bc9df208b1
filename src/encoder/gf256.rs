//! GF(256) arithmetic and polynomials over it
//!
//! QR codes use the field generated by x^8 + x^4 + x^3 + x^2 + 1 (0x011D).
//! Addition and subtraction are both XOR.

use crate::error::{QrError, Result};
use std::fmt;
use std::sync::OnceLock;

/// Primitive polynomial of the QR code field
pub const QR_CODE_PRIMITIVE: u32 = 0x011D;

/// GF(256) field operations using log/exp tables
pub struct GaloisField {
    exp: [u8; 256],
    log: [u8; 256],
    primitive: u32,
}

static QR_CODE_FIELD: OnceLock<GaloisField> = OnceLock::new();

/// The shared QR code field instance
pub fn qr_code_field() -> &'static GaloisField {
    QR_CODE_FIELD.get_or_init(|| GaloisField::new(QR_CODE_PRIMITIVE))
}

impl GaloisField {
    /// Build the exp/log tables for the field generated by `primitive`
    pub fn new(primitive: u32) -> Self {
        let mut exp = [0u8; 256];
        let mut log = [0u8; 256];
        let mut x: u32 = 1;
        for slot in exp.iter_mut() {
            *slot = (x & 0xFF) as u8;
            x <<= 1;
            if x >= 0x100 {
                x ^= primitive;
            }
        }
        for i in 0..255 {
            log[exp[i] as usize] = i as u8;
        }
        Self {
            exp,
            log,
            primitive,
        }
    }

    /// Primitive polynomial the tables were built from
    pub fn primitive(&self) -> u32 {
        self.primitive
    }

    /// Addition and subtraction coincide in characteristic 2
    #[inline]
    pub fn add_or_subtract(a: u8, b: u8) -> u8 {
        a ^ b
    }

    /// alpha^a
    #[inline]
    pub fn exp(&self, a: u8) -> u8 {
        self.exp[a as usize]
    }

    /// Base-alpha logarithm of `a`
    pub fn log(&self, a: u8) -> Result<u8> {
        if a == 0 {
            return Err(QrError::InvalidArgument("log(0) is undefined".to_string()));
        }
        Ok(self.log[a as usize])
    }

    /// Multiplicative inverse of `a`
    pub fn inverse(&self, a: u8) -> Result<u8> {
        if a == 0 {
            return Err(QrError::InvalidArgument("0 has no inverse".to_string()));
        }
        Ok(self.exp[255 - self.log[a as usize] as usize])
    }

    /// Product of two field elements
    #[inline]
    pub fn multiply(&self, a: u8, b: u8) -> u8 {
        if a == 0 || b == 0 {
            return 0;
        }
        let log_a = self.log[a as usize] as usize;
        let log_b = self.log[b as usize] as usize;
        self.exp[(log_a + log_b) % 255]
    }

    /// The constant polynomial 0
    pub fn zero(&self) -> GfPoly<'_> {
        GfPoly {
            field: self,
            coefficients: vec![0],
        }
    }

    /// The constant polynomial 1
    pub fn one(&self) -> GfPoly<'_> {
        GfPoly {
            field: self,
            coefficients: vec![1],
        }
    }

    /// coefficient * x^degree
    pub fn build_monomial(&self, degree: usize, coefficient: u8) -> GfPoly<'_> {
        if coefficient == 0 {
            return self.zero();
        }
        let mut coefficients = vec![0u8; degree + 1];
        coefficients[0] = coefficient;
        GfPoly {
            field: self,
            coefficients,
        }
    }
}

impl fmt::Debug for GaloisField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GF(0x{:X})", self.primitive)
    }
}

/// Immutable polynomial over a [`GaloisField`], most significant coefficient first.
#[derive(Clone)]
pub struct GfPoly<'f> {
    field: &'f GaloisField,
    coefficients: Vec<u8>,
}

impl<'f> GfPoly<'f> {
    /// Build a polynomial, dropping leading zero terms
    pub fn new(field: &'f GaloisField, coefficients: &[u8]) -> Result<Self> {
        if coefficients.is_empty() {
            return Err(QrError::InvalidArgument(
                "polynomial needs at least one coefficient".to_string(),
            ));
        }
        let first_non_zero = coefficients.iter().position(|&c| c != 0);
        let coefficients = match first_non_zero {
            Some(i) => coefficients[i..].to_vec(),
            None => vec![0],
        };
        Ok(Self {
            field,
            coefficients,
        })
    }

    /// Field the coefficients live in
    pub fn field(&self) -> &'f GaloisField {
        self.field
    }

    /// Coefficients, highest degree first. Never empty.
    pub fn coefficients(&self) -> &[u8] {
        &self.coefficients
    }

    /// Degree of the polynomial (0 for constants)
    pub fn degree(&self) -> usize {
        self.coefficients.len() - 1
    }

    /// True for the zero polynomial
    pub fn is_zero(&self) -> bool {
        self.coefficients[0] == 0
    }

    /// Coefficient of the x^degree term
    pub fn coefficient(&self, degree: usize) -> u8 {
        if degree > self.degree() {
            return 0;
        }
        self.coefficients[self.coefficients.len() - 1 - degree]
    }

    /// Evaluate at `a` (Horner's method)
    pub fn evaluate_at(&self, a: u8) -> u8 {
        if a == 0 {
            return self.coefficient(0);
        }
        if a == 1 {
            return self.coefficients.iter().fold(0, |acc, &c| acc ^ c);
        }
        let mut result = self.coefficients[0];
        for &c in &self.coefficients[1..] {
            result = self.field.multiply(a, result) ^ c;
        }
        result
    }

    fn check_field(&self, other: &GfPoly<'_>) -> Result<()> {
        if !std::ptr::eq(self.field, other.field) {
            return Err(QrError::InvalidArgument(
                "polynomials do not share a field".to_string(),
            ));
        }
        Ok(())
    }

    /// Sum (equivalently difference) of two polynomials
    pub fn add_or_subtract(&self, other: &GfPoly<'_>) -> Result<GfPoly<'f>> {
        self.check_field(other)?;
        if self.is_zero() {
            return Ok(GfPoly {
                field: self.field,
                coefficients: other.coefficients.clone(),
            });
        }
        if other.is_zero() {
            return Ok(self.clone());
        }
        let (smaller, larger) = if self.coefficients.len() > other.coefficients.len() {
            (&other.coefficients, &self.coefficients)
        } else {
            (&self.coefficients, &other.coefficients)
        };
        let length_diff = larger.len() - smaller.len();
        let mut sum_diff = larger.clone();
        for (i, &c) in smaller.iter().enumerate() {
            sum_diff[length_diff + i] ^= c;
        }
        GfPoly::new(self.field, &sum_diff)
    }

    /// Product of two polynomials over the same field
    pub fn multiply(&self, other: &GfPoly<'_>) -> Result<GfPoly<'f>> {
        self.check_field(other)?;
        if self.is_zero() || other.is_zero() {
            return Ok(self.field.zero());
        }
        let a = &self.coefficients;
        let b = &other.coefficients;
        let mut product = vec![0u8; a.len() + b.len() - 1];
        for (i, &ac) in a.iter().enumerate() {
            for (j, &bc) in b.iter().enumerate() {
                product[i + j] ^= self.field.multiply(ac, bc);
            }
        }
        GfPoly::new(self.field, &product)
    }

    /// Multiply every coefficient by `scalar`
    pub fn multiply_scalar(&self, scalar: u8) -> GfPoly<'f> {
        match scalar {
            0 => self.field.zero(),
            1 => self.clone(),
            _ => GfPoly {
                field: self.field,
                coefficients: self
                    .coefficients
                    .iter()
                    .map(|&c| self.field.multiply(c, scalar))
                    .collect(),
            },
        }
    }

    /// self * coefficient * x^degree
    pub fn multiply_by_monomial(&self, degree: usize, coefficient: u8) -> GfPoly<'f> {
        if coefficient == 0 || self.is_zero() {
            return self.field.zero();
        }
        let mut product = vec![0u8; self.coefficients.len() + degree];
        for (slot, &c) in product.iter_mut().zip(&self.coefficients) {
            *slot = self.field.multiply(c, coefficient);
        }
        GfPoly {
            field: self.field,
            coefficients: product,
        }
    }

    /// Long division, returning `(quotient, remainder)`
    pub fn divide(&self, other: &GfPoly<'_>) -> Result<(GfPoly<'f>, GfPoly<'f>)> {
        self.check_field(other)?;
        if other.is_zero() {
            return Err(QrError::InvalidArgument("divide by zero polynomial".to_string()));
        }

        let mut quotient = self.field.zero();
        let mut remainder = self.clone();

        let denominator_leading = other.coefficient(other.degree());
        let inverse_leading = self.field.inverse(denominator_leading)?;

        while remainder.degree() >= other.degree() && !remainder.is_zero() {
            let degree_difference = remainder.degree() - other.degree();
            let scale = self
                .field
                .multiply(remainder.coefficient(remainder.degree()), inverse_leading);
            let term = other.multiply_by_monomial(degree_difference, scale);
            let iteration_quotient = self.field.build_monomial(degree_difference, scale);
            quotient = quotient.add_or_subtract(&iteration_quotient)?;
            remainder = remainder.add_or_subtract(&term)?;
        }

        Ok((quotient, remainder))
    }
}

impl PartialEq for GfPoly<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.field, other.field) && self.coefficients == other.coefficients
    }
}

impl fmt::Debug for GfPoly<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GfPoly{:?}", self.coefficients)
    }
}
