use crate::error::{QrError, Result};
use crate::utils::BitSequence;

const WORD_BITS: usize = 32;

/// Compact bit matrix for storing binary data
///
/// Row-major; every row starts on a fresh `u32` word so a row can be copied
/// out word by word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitMatrix {
    width: usize,
    height: usize,
    row_words: usize,
    bits: Vec<u32>,
}

impl BitMatrix {
    /// Create a new bit matrix with given dimensions
    pub fn new(width: usize, height: usize) -> Self {
        let row_words = width.div_ceil(WORD_BITS);
        Self {
            width,
            height,
            row_words,
            bits: vec![0; row_words * height],
        }
    }

    /// Create a square matrix
    pub fn square(dimension: usize) -> Self {
        Self::new(dimension, dimension)
    }

    /// Get matrix width
    pub fn width(&self) -> usize {
        self.width
    }

    /// Get matrix height
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn offset(&self, x: usize, y: usize) -> usize {
        y * self.row_words + x / WORD_BITS
    }

    /// Get bit at (x, y); out-of-range reads as unset
    pub fn get(&self, x: usize, y: usize) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        (self.bits[self.offset(x, y)] >> (x % WORD_BITS)) & 1 == 1
    }

    /// Set bit at (x, y)
    pub fn set(&mut self, x: usize, y: usize, value: bool) {
        if x >= self.width || y >= self.height {
            return;
        }
        let offset = self.offset(x, y);
        let mask = 1u32 << (x % WORD_BITS);
        if value {
            self.bits[offset] |= mask;
        } else {
            self.bits[offset] &= !mask;
        }
    }

    /// Toggle bit at (x, y)
    pub fn flip(&mut self, x: usize, y: usize) {
        if x >= self.width || y >= self.height {
            return;
        }
        let offset = self.offset(x, y);
        self.bits[offset] ^= 1 << (x % WORD_BITS);
    }

    /// Clear all bits to 0
    pub fn clear(&mut self) {
        self.bits.fill(0);
    }

    /// Set every bit in the `width` x `height` rectangle at (`left`, `top`).
    pub fn set_region(&mut self, left: usize, top: usize, width: usize, height: usize) -> Result<()> {
        if width < 1 || height < 1 {
            return Err(QrError::InvalidArgument(format!(
                "region must be at least 1x1, got {}x{}",
                width, height
            )));
        }
        let right = left + width;
        let bottom = top + height;
        if right > self.width || bottom > self.height {
            return Err(QrError::InvalidArgument(format!(
                "region {}x{} at ({}, {}) does not fit in {}x{} matrix",
                width, height, left, top, self.width, self.height
            )));
        }
        for y in top..bottom {
            for x in left..right {
                let offset = self.offset(x, y);
                self.bits[offset] |= 1 << (x % WORD_BITS);
            }
        }
        Ok(())
    }

    /// Copy row `y` into a bit sequence, reusing `reuse` when it is large enough.
    pub fn row(&self, y: usize, reuse: Option<BitSequence>) -> Result<BitSequence> {
        if y >= self.height {
            return Err(QrError::OutOfBounds {
                index: y,
                len: self.height,
            });
        }
        let mut row = match reuse {
            Some(mut r) if r.size() >= self.width => {
                r.clear();
                r
            }
            _ => BitSequence::with_size(self.width),
        };
        let start = y * self.row_words;
        for w in 0..self.row_words {
            row.set_bulk(w * WORD_BITS, self.bits[start + w])?;
        }
        Ok(row)
    }

    /// Number of set bits
    pub fn count_set(&self) -> usize {
        self.bits.iter().map(|w| w.count_ones() as usize).sum()
    }
}

impl Default for BitMatrix {
    fn default() -> Self {
        Self::new(0, 0)
    }
}
