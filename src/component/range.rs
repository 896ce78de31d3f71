//! Bounded integers packed into the fewest bits their bounds allow.
//!
//! A value in `[lower, upper]` is written as the unsigned offset `value - lower`
//! using `bits_for_span(lower, upper)` bits. Values outside the bounds are not
//! rejected: the offset wraps and only its low bits reach the wire.

use super::WireComponent;
use crate::core::bitstream::BitBuffer;
use crate::error::{CodecError, Result};
use std::cell::Cell;

/// Minimum number of bits able to represent every offset in `[0, upper - lower]`.
///
/// `lower > upper` yields 0; callers validate bounds first.
pub fn bits_for_span(lower: i32, upper: i32) -> usize {
    let span = (i64::from(upper) - i64::from(lower)).max(0) as u64;
    (u64::BITS - span.leading_zeros()) as usize
}

/// Integer constrained to an inclusive range
#[derive(Debug, Clone)]
pub struct RangeComponent {
    value: i32,
    lower: i32,
    upper: i32,
    cached_bits: Cell<Option<usize>>,
}

impl Default for RangeComponent {
    fn default() -> Self {
        Self {
            value: 0,
            lower: i32::MIN,
            upper: i32::MAX,
            cached_bits: Cell::new(None),
        }
    }
}

impl RangeComponent {
    pub fn new(value: i32, lower: i32, upper: i32) -> Result<Self> {
        check_bounds(lower, upper)?;
        Ok(Self {
            value,
            lower,
            upper,
            cached_bits: Cell::new(None),
        })
    }

    /// Range holding its canonical zero value (see [`WireComponent::clear`])
    pub fn with_bounds(lower: i32, upper: i32) -> Result<Self> {
        let mut range = Self::new(0, lower, upper)?;
        range.clear();
        Ok(range)
    }

    pub fn get(&self) -> i32 {
        self.value
    }

    pub fn set(&mut self, value: i32) {
        self.value = value;
    }

    pub fn lower(&self) -> i32 {
        self.lower
    }

    pub fn upper(&self) -> i32 {
        self.upper
    }

    /// Whether the current value lies within the bounds
    pub fn in_bounds(&self) -> bool {
        (self.lower..=self.upper).contains(&self.value)
    }

    /// Replace the bounds; the current value is kept as is.
    pub fn set_bounds(&mut self, lower: i32, upper: i32) -> Result<()> {
        check_bounds(lower, upper)?;
        self.lower = lower;
        self.upper = upper;
        self.cached_bits.set(None);
        Ok(())
    }

    fn bit_len(&self) -> usize {
        match self.cached_bits.get() {
            Some(bits) => bits,
            None => {
                let bits = bits_for_span(self.lower, self.upper);
                self.cached_bits.set(Some(bits));
                bits
            }
        }
    }
}

fn check_bounds(lower: i32, upper: i32) -> Result<()> {
    if lower > upper {
        return Err(CodecError::InvalidBounds {
            lower: i64::from(lower),
            upper: i64::from(upper),
        });
    }
    Ok(())
}

impl WireComponent for RangeComponent {
    fn size(&self) -> usize {
        self.bit_len()
    }

    /// Zero, or the bound nearest to zero when zero is out of range.
    fn clear(&mut self) {
        self.value = 0i32.clamp(self.lower, self.upper);
    }

    fn read<B: BitBuffer + ?Sized>(&mut self, stream: &mut B) -> Result<usize> {
        let bits = self.bit_len();
        let offset = stream.read_bits(bits)?;
        self.value = self.lower.wrapping_add(offset as i32);
        Ok(bits)
    }

    fn write<B: BitBuffer + ?Sized>(&self, stream: &mut B) -> Result<usize> {
        let bits = self.bit_len();
        let offset = self.value.wrapping_sub(self.lower) as u32;
        stream.write_bits(offset, bits)?;
        Ok(bits)
    }
}
