//! Low-level buffers used by the encoder
//!
//! - Bit sequences (bitstream assembly, matrix rows, format/version info)
//! - Byte buffers (data and EC codeword blocks)

/// Growable bit sequence
pub mod bit_sequence;
/// Codeword block buffer
pub mod byte_buffer;

pub use bit_sequence::BitSequence;
pub use byte_buffer::ByteBuffer;
