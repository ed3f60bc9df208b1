//! RustQR encoder - QR code generation in pure Rust
//!
//! Turns text into an ISO 18004 (Model 2) QR code symbol: mode selection,
//! Reed-Solomon error correction, block interleaving, matrix layout and
//! mask selection, plus a grayscale raster renderer.
//!
//! ```
//! use rust_qr_encoder::{ECLevel, Mode, encode};
//!
//! let symbol = encode("HELLO WORLD", ECLevel::M).unwrap();
//! assert_eq!(symbol.mode(), Mode::Alphanumeric);
//! assert_eq!(symbol.matrix_width(), 21);
//! ```

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

pub(crate) mod debug;
/// QR code encoding modules (modes, error correction, layout, masking)
pub mod encoder;
/// Error type and result alias
pub mod error;
/// Core data structures (QrSymbol, ModuleMatrix, Version, etc.)
pub mod models;
/// CLI helpers (PNG output, terminal rendering)
pub mod tools;
/// Low-level buffers (bit sequences, byte buffers)
pub mod utils;
/// Grayscale raster rendering
pub mod writer;

pub use encoder::{CharacterSetEci, DEFAULT_QUIET_ZONE, EncodeHints, QrEncoder};
pub use error::{QrError, Result};
pub use models::{BitMatrix, ECLevel, MaskPattern, Mode, Module, ModuleMatrix, QrSymbol, Version};
pub use writer::{QrWriter, Raster, render_raster};

/// Encode `text` at the given error correction level with default hints
///
/// # Errors
/// `InvalidInput` for empty text, `CapacityExceeded` when the text does not
/// fit in a version 40 symbol.
pub fn encode(text: &str, ec_level: ECLevel) -> Result<QrSymbol> {
    QrEncoder::encode(text, &EncodeHints::with_error_correction(ec_level))
}

/// Encode `text` with explicit hints (character set, minimum version, ...)
pub fn encode_with_hints(text: &str, hints: &EncodeHints) -> Result<QrSymbol> {
    QrEncoder::encode(text, hints)
}
