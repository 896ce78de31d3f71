//! Bit-field component: a fixed number of flag bits moved verbatim.

use super::WireComponent;
use crate::core::bitfield::BitField;
use crate::core::bitstream::BitBuffer;
use crate::error::Result;

/// Flag count of a bit-field built with `default()`
pub const DEFAULT_FLAG_COUNT: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BitFieldComponent {
    bits: BitField,
}

impl Default for BitFieldComponent {
    fn default() -> Self {
        Self::new(DEFAULT_FLAG_COUNT)
    }
}

impl BitFieldComponent {
    /// Bit-field of `num_flags` cleared bits
    pub fn new(num_flags: usize) -> Self {
        Self {
            bits: BitField::new(num_flags),
        }
    }

    pub fn get(&self) -> &BitField {
        &self.bits
    }

    /// Mutable access; the length may be changed through it.
    pub fn get_mut(&mut self) -> &mut BitField {
        &mut self.bits
    }

    pub fn set(&mut self, bits: BitField) {
        self.bits = bits;
    }
}

impl From<BitField> for BitFieldComponent {
    fn from(bits: BitField) -> Self {
        Self { bits }
    }
}

impl WireComponent for BitFieldComponent {
    fn size(&self) -> usize {
        self.bits.len()
    }

    fn clear(&mut self) {
        self.bits.clear();
    }

    fn read<B: BitBuffer + ?Sized>(&mut self, stream: &mut B) -> Result<usize> {
        self.bits.read_from(stream)
    }

    fn write<B: BitBuffer + ?Sized>(&self, stream: &mut B) -> Result<usize> {
        self.bits.write_to(stream)
    }
}
