//! Fixed-width integer components.

use super::WireComponent;
use crate::core::bitstream::BitBuffer;
use crate::error::Result;
use std::fmt::Debug;

/// Integer types with a fixed wire width.
///
/// `to_wire` yields the raw bit pattern (only the low `BITS` bits are written);
/// `from_wire` reinterprets those bits, so signed types round-trip through two's
/// complement.
pub trait WireInt: Copy + Default + PartialEq + Debug {
    const BITS: usize;

    fn to_wire(self) -> u32;

    fn from_wire(raw: u32) -> Self;
}

impl WireInt for bool {
    const BITS: usize = 1;

    fn to_wire(self) -> u32 {
        u32::from(self)
    }

    fn from_wire(raw: u32) -> Self {
        raw != 0
    }
}

macro_rules! wire_int {
    ($($t:ty),*) => {
        $(
            impl WireInt for $t {
                const BITS: usize = <$t>::BITS as usize;

                fn to_wire(self) -> u32 {
                    self as u32
                }

                fn from_wire(raw: u32) -> Self {
                    raw as $t
                }
            }
        )*
    };
}

wire_int!(u8, i8, u16, i16, u32, i32);

/// Integer stored and encoded at the natural width of `T`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct IntegralComponent<T> {
    value: T,
}

pub type BoolComponent = IntegralComponent<bool>;
pub type U8Component = IntegralComponent<u8>;
pub type S8Component = IntegralComponent<i8>;
pub type U16Component = IntegralComponent<u16>;
pub type S16Component = IntegralComponent<i16>;
pub type U32Component = IntegralComponent<u32>;
pub type S32Component = IntegralComponent<i32>;

impl<T: WireInt> IntegralComponent<T> {
    pub fn new(value: T) -> Self {
        Self { value }
    }

    pub fn get(&self) -> T {
        self.value
    }

    pub fn set(&mut self, value: T) {
        self.value = value;
    }
}

impl<T: WireInt> WireComponent for IntegralComponent<T> {
    fn size(&self) -> usize {
        T::BITS
    }

    fn clear(&mut self) {
        self.value = T::default();
    }

    fn read<B: BitBuffer + ?Sized>(&mut self, stream: &mut B) -> Result<usize> {
        self.value = T::from_wire(stream.read_bits(T::BITS)?);
        Ok(T::BITS)
    }

    fn write<B: BitBuffer + ?Sized>(&self, stream: &mut B) -> Result<usize> {
        stream.write_bits(self.value.to_wire(), T::BITS)?;
        Ok(T::BITS)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::bitstream::BitStream;

    #[test]
    fn test_widths() {
        assert_eq!(BoolComponent::default().size(), 1);
        assert_eq!(U8Component::default().size(), 8);
        assert_eq!(S16Component::default().size(), 16);
        assert_eq!(U32Component::default().size(), 32);
    }

    #[test]
    fn test_signed_values_survive() {
        let mut stream = BitStream::new();
        S8Component::new(-1).write(&mut stream).unwrap();
        S16Component::new(-300).write(&mut stream).unwrap();
        S32Component::new(i32::MIN).write(&mut stream).unwrap();
        assert_eq!(stream.bits_written(), 56);

        let mut a = S8Component::default();
        let mut b = S16Component::default();
        let mut c = S32Component::default();
        a.read(&mut stream).unwrap();
        b.read(&mut stream).unwrap();
        c.read(&mut stream).unwrap();
        assert_eq!((a.get(), b.get(), c.get()), (-1, -300, i32::MIN));
    }

    #[test]
    fn test_bool_is_one_bit() {
        let mut stream = BitStream::new();
        BoolComponent::new(true).write(&mut stream).unwrap();
        BoolComponent::new(false).write(&mut stream).unwrap();
        assert_eq!(stream.as_bytes(), &[0b1000_0000]);
    }

    #[test]
    fn test_clear() {
        let mut c = U16Component::new(9000);
        c.clear();
        assert_eq!(c.get(), 0);
    }
}
