//! QR code encoding modules
//!
//! This module contains all the logic for turning text into a module matrix:
//! - Mode selection and payload encoding (numeric, alphanumeric, byte, kanji)
//! - Bitstream assembly, padding and block interleaving
//! - Error correction (Reed-Solomon over GF(256), BCH for format/version info)
//! - Matrix layout, masking and mask penalty scoring

/// BCH codes for type and version info
pub mod bch;
/// Bitstream assembly (headers, terminator, interleaving)
pub mod bitstream;
/// Character sets and their ECI designators
pub mod charset;
/// Environment switches for parallel mask scoring
pub(crate) mod config;
/// GF(256) arithmetic and polynomials
pub mod gf256;
/// Function pattern and data placement
pub mod layout;
/// Data masks and penalty rules
pub mod mask;
/// Data mode encoders (numeric, alphanumeric, byte, kanji)
pub mod modes;
/// Main QR encoder that orchestrates the encoding pipeline
pub mod qr_encoder;
/// Reed-Solomon error correction codewords
pub mod reed_solomon;
/// QR specification tables (ECC codewords/blocks, alignment centers)
pub mod tables;

pub use charset::CharacterSetEci;
pub use qr_encoder::{DEFAULT_QUIET_ZONE, EncodeHints, QrEncoder};
