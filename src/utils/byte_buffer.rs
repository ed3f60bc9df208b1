/// Fixed-length byte buffer used to stage codeword blocks
use crate::error::{QrError, Result};

/// Byte staging buffer for data and error correction codewords.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ByteBuffer {
    bytes: Vec<u8>,
}

impl ByteBuffer {
    /// Buffer of `len` zero bytes
    pub fn with_len(len: usize) -> Self {
        Self {
            bytes: vec![0; len],
        }
    }

    /// Number of bytes held
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// True when the buffer holds no bytes
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Byte at `i`, or `OutOfBounds`
    pub fn at(&self, i: usize) -> Result<u8> {
        self.bytes.get(i).copied().ok_or(QrError::OutOfBounds {
            index: i,
            len: self.bytes.len(),
        })
    }

    /// Replace the contents with `source[offset..offset + count]`
    pub fn copy_from(&mut self, source: &[u8], offset: usize, count: usize) -> Result<()> {
        let end = offset
            .checked_add(count)
            .filter(|&end| end <= source.len())
            .ok_or(QrError::OutOfBounds {
                index: offset.saturating_add(count),
                len: source.len(),
            })?;
        self.bytes.clear();
        self.bytes.extend_from_slice(&source[offset..end]);
        Ok(())
    }

    /// Contents as a slice
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    /// Contents as a mutable slice, for filling in place
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.bytes
    }
}
