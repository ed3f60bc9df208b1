//! Error type shared by every encoding stage.

use thiserror::Error;

/// Errors that can occur while building a QR code symbol.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QrError {
    /// Rejected before any work was attempted (empty content, bad hint, zero size).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The content does not fit in a version 40 symbol at the requested level.
    #[error("cannot encode: {0}")]
    CapacityExceeded(String),

    /// A layout or sizing invariant was broken. Indicates a bug or a bad table.
    #[error("internal encoder error: {0}")]
    Internal(String),

    /// The request needs a capability this encoder does not have.
    #[error("unsupported: {0}")]
    Unsupported(String),

    /// Index access past the logical end of a buffer or matrix.
    #[error("index {index} out of bounds (len {len})")]
    OutOfBounds {
        /// Offending index
        index: usize,
        /// Length of the buffer or matrix
        len: usize,
    },

    /// An argument violated an operation's precondition.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, QrError>;
