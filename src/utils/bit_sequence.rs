/// Ordered, mutable sequence of bits packed into 32-bit words
use crate::error::{QrError, Result};
use std::fmt;

const WORD_BITS: usize = 32;
/// Growable sequences start with 32 bytes of headroom.
const INITIAL_WORDS: usize = 8;

fn words_for(bits: usize) -> usize {
    bits.div_ceil(WORD_BITS)
}

/// Bit buffer with a logical length separate from its backing capacity.
///
/// Bit `i` lives in word `i / 32` at position `i % 32`. Bits past `size()` are
/// unspecified and never observable through the public API.
#[derive(Debug, Clone)]
pub struct BitSequence {
    words: Vec<u32>,
    size: usize,
}

impl BitSequence {
    /// Create an empty, growable sequence
    pub fn new() -> Self {
        Self {
            words: vec![0; INITIAL_WORDS],
            size: 0,
        }
    }

    /// Create a fixed-size sequence of `size` zero bits
    pub fn with_size(size: usize) -> Self {
        Self {
            words: vec![0; words_for(size)],
            size,
        }
    }

    /// Logical length in bits
    pub fn size(&self) -> usize {
        self.size
    }

    /// Logical length in bytes, rounded up
    pub fn size_in_bytes(&self) -> usize {
        self.size.div_ceil(8)
    }

    /// True when no bits have been appended
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    fn capacity(&self) -> usize {
        self.words.len() * WORD_BITS
    }

    fn ensure_capacity(&mut self, bits: usize) {
        if bits <= self.capacity() {
            return;
        }
        let mut words = self.words.len().max(1);
        while words * WORD_BITS < bits {
            words *= 2;
        }
        self.words.resize(words, 0);
    }

    fn check_index(&self, i: usize) -> Result<()> {
        if i >= self.size {
            return Err(QrError::OutOfBounds {
                index: i,
                len: self.size,
            });
        }
        Ok(())
    }

    #[inline]
    fn bit(&self, i: usize) -> bool {
        (self.words[i / WORD_BITS] >> (i % WORD_BITS)) & 1 == 1
    }

    #[inline]
    fn write_bit(&mut self, i: usize, value: bool) {
        let mask = 1u32 << (i % WORD_BITS);
        if value {
            self.words[i / WORD_BITS] |= mask;
        } else {
            self.words[i / WORD_BITS] &= !mask;
        }
    }

    /// Get bit `i`
    pub fn get(&self, i: usize) -> Result<bool> {
        self.check_index(i)?;
        Ok(self.bit(i))
    }

    /// Set bit `i` to `value`
    pub fn set(&mut self, i: usize, value: bool) -> Result<()> {
        self.check_index(i)?;
        self.write_bit(i, value);
        Ok(())
    }

    /// Invert bit `i`
    pub fn flip(&mut self, i: usize) -> Result<()> {
        self.check_index(i)?;
        self.words[i / WORD_BITS] ^= 1 << (i % WORD_BITS);
        Ok(())
    }

    /// Overwrite the whole 32-bit word holding bit `i`
    pub fn set_bulk(&mut self, i: usize, word: u32) -> Result<()> {
        self.check_index(i)?;
        self.words[i / WORD_BITS] = word;
        Ok(())
    }

    /// Zero every bit, keeping the logical length
    pub fn clear(&mut self) {
        self.words.fill(0);
    }

    /// Check whether bits `[start, end)` all equal `value`.
    pub fn is_range(&self, start: usize, end: usize, value: bool) -> Result<bool> {
        if end < start {
            return Err(QrError::InvalidArgument(format!(
                "range end {} before start {}",
                end, start
            )));
        }
        if end > self.size {
            return Err(QrError::OutOfBounds {
                index: end,
                len: self.size,
            });
        }
        if end == start {
            return Ok(true);
        }
        let last = end - 1;
        let first_word = start / WORD_BITS;
        let last_word = last / WORD_BITS;
        for w in first_word..=last_word {
            let first_bit = if w > first_word { 0 } else { start % WORD_BITS };
            let last_bit = if w < last_word { 31 } else { last % WORD_BITS };
            let mask = ((2u64 << last_bit) - (1u64 << first_bit)) as u32;
            let expected = if value { mask } else { 0 };
            if self.words[w] & mask != expected {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Append one bit
    pub fn append_bit(&mut self, bit: bool) {
        self.ensure_capacity(self.size + 1);
        self.write_bit(self.size, bit);
        self.size += 1;
    }

    /// Append the low `num_bits` bits of `value`, most significant first.
    pub fn append_bits(&mut self, value: u32, num_bits: usize) -> Result<()> {
        if num_bits > 32 {
            return Err(QrError::InvalidArgument(format!(
                "num_bits must be between 0 and 32, got {}",
                num_bits
            )));
        }
        self.ensure_capacity(self.size + num_bits);
        for left in (1..=num_bits).rev() {
            self.append_bit((value >> (left - 1)) & 1 == 1);
        }
        Ok(())
    }

    /// Append every bit of `other`
    pub fn append_bit_sequence(&mut self, other: &BitSequence) {
        self.ensure_capacity(self.size + other.size);
        for i in 0..other.size {
            self.append_bit(other.bit(i));
        }
    }

    /// XOR `other` into this sequence; both must have the same length.
    pub fn xor(&mut self, other: &BitSequence) -> Result<()> {
        if self.size != other.size {
            return Err(QrError::InvalidArgument(format!(
                "sizes don't match: {} vs {}",
                self.size, other.size
            )));
        }
        for w in 0..words_for(self.size) {
            self.words[w] ^= other.words[w];
        }
        Ok(())
    }

    /// Pack `num_bytes` bytes starting at `bit_offset` into `out[offset..]`, MSB first.
    pub fn to_bytes(
        &self,
        mut bit_offset: usize,
        out: &mut [u8],
        offset: usize,
        num_bytes: usize,
    ) -> Result<()> {
        if offset + num_bytes > out.len() {
            return Err(QrError::OutOfBounds {
                index: offset + num_bytes,
                len: out.len(),
            });
        }
        for slot in &mut out[offset..offset + num_bytes] {
            let mut byte = 0u8;
            for j in 0..8 {
                if self.get(bit_offset)? {
                    byte |= 1 << (7 - j);
                }
                bit_offset += 1;
            }
            *slot = byte;
        }
        Ok(())
    }

    /// Reverse bit order in place
    pub fn reverse(&mut self) {
        let mut words = vec![0u32; self.words.len()];
        for i in 0..self.size {
            if self.bit(self.size - 1 - i) {
                words[i / WORD_BITS] |= 1 << (i % WORD_BITS);
            }
        }
        self.words = words;
    }

    /// Iterate over the logical bits
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.size).map(move |i| self.bit(i))
    }
}

impl Default for BitSequence {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for BitSequence {
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size && self.iter().eq(other.iter())
    }
}

impl Eq for BitSequence {}

impl fmt::Display for BitSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.size {
            if i % 8 == 0 {
                f.write_str(" ")?;
            }
            f.write_str(if self.bit(i) { "X" } else { "." })?;
        }
        Ok(())
    }
}
