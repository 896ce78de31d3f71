//! Fixed-length bit set used for presence indicators and flag fields.

use crate::core::bitstream::BitBuffer;
use crate::error::{CodecError, Result};

const WORD_BITS: usize = 32;

/// A fixed-length set of bits, resizable by its owner
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct BitField {
    words: Vec<u32>,
    len: usize,
}

impl BitField {
    /// Create a bit field of `len` cleared bits
    pub fn new(len: usize) -> Self {
        Self {
            words: vec![0; len.div_ceil(WORD_BITS)],
            len,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Value of bit `index`; bits past the end read as clear
    pub fn get(&self, index: usize) -> bool {
        index < self.len && self.words[index / WORD_BITS] & (1 << (index % WORD_BITS)) != 0
    }

    pub fn set(&mut self, index: usize, value: bool) -> Result<()> {
        if index >= self.len {
            return Err(CodecError::BitIndexOutOfRange {
                index,
                len: self.len,
            });
        }
        let mask = 1u32 << (index % WORD_BITS);
        if value {
            self.words[index / WORD_BITS] |= mask;
        } else {
            self.words[index / WORD_BITS] &= !mask;
        }
        Ok(())
    }

    /// Clear every bit, keeping the length
    pub fn clear(&mut self) {
        self.words.iter_mut().for_each(|w| *w = 0);
    }

    /// Change the length; surviving bits keep their values, new bits are clear.
    pub fn resize(&mut self, len: usize) {
        self.words.resize(len.div_ceil(WORD_BITS), 0);
        self.len = len;
        self.mask_tail();
    }

    /// Remove bit `index`, shifting every later bit down by one
    pub fn remove(&mut self, index: usize) -> Result<bool> {
        if index >= self.len {
            return Err(CodecError::BitIndexOutOfRange {
                index,
                len: self.len,
            });
        }
        let removed = self.get(index);
        for i in index..self.len - 1 {
            let next = self.get(i + 1);
            self.set(i, next)?;
        }
        self.resize(self.len - 1);
        Ok(removed)
    }

    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len).map(move |i| self.get(i))
    }

    /// Write all bits, one 32-bit word (or the trailing remainder) at a time
    pub fn write_to<B: BitBuffer + ?Sized>(&self, stream: &mut B) -> Result<usize> {
        for (i, &word) in self.words.iter().enumerate() {
            stream.write_bits(word, self.word_len(i))?;
        }
        Ok(self.len)
    }

    /// Read `len()` bits; on failure the previous bits are kept.
    pub fn read_from<B: BitBuffer + ?Sized>(&mut self, stream: &mut B) -> Result<usize> {
        let mut words = Vec::with_capacity(self.words.len());
        for i in 0..self.words.len() {
            words.push(stream.read_bits(self.word_len(i))?);
        }
        self.words = words;
        Ok(self.len)
    }

    fn word_len(&self, word: usize) -> usize {
        (self.len - word * WORD_BITS).min(WORD_BITS)
    }

    fn mask_tail(&mut self) {
        let tail = self.len % WORD_BITS;
        if tail != 0 {
            if let Some(last) = self.words.last_mut() {
                *last &= (1u32 << tail) - 1;
            }
        }
    }
}

impl FromIterator<bool> for BitField {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        let bits: Vec<bool> = iter.into_iter().collect();
        let mut field = BitField::new(bits.len());
        for (i, bit) in bits.into_iter().enumerate() {
            if bit {
                field.words[i / WORD_BITS] |= 1 << (i % WORD_BITS);
            }
        }
        field
    }
}
