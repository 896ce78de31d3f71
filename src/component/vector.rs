//! Fixed-point vector components.
//!
//! Coordinates are 16.16 fixed-point values carried as signed 32-bit integers,
//! written in X, Y, (Z) order.

use super::WireComponent;
use crate::core::bitstream::BitBuffer;
use crate::error::Result;

/// Fractional bits of a fixed-point coordinate
pub const FRACBITS: u32 = 16;

/// Fixed-point representation of 1.0
pub const FRACUNIT: i32 = 1 << FRACBITS;

pub fn fixed_from_f32(value: f32) -> i32 {
    (value * FRACUNIT as f32) as i32
}

pub fn fixed_to_f32(value: i32) -> f32 {
    value as f32 / FRACUNIT as f32
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct V2Fixed {
    pub x: i32,
    pub y: i32,
}

impl V2Fixed {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn from_f32(x: f32, y: f32) -> Self {
        Self::new(fixed_from_f32(x), fixed_from_f32(y))
    }

    pub fn to_f32(self) -> (f32, f32) {
        (fixed_to_f32(self.x), fixed_to_f32(self.y))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct V3Fixed {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl V3Fixed {
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    pub fn from_f32(x: f32, y: f32, z: f32) -> Self {
        Self::new(fixed_from_f32(x), fixed_from_f32(y), fixed_from_f32(z))
    }

    pub fn to_f32(self) -> (f32, f32, f32) {
        (fixed_to_f32(self.x), fixed_to_f32(self.y), fixed_to_f32(self.z))
    }
}

/// Two fixed-point coordinates, 64 bits on the wire
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct V2FixedComponent {
    value: V2Fixed,
}

impl V2FixedComponent {
    pub fn new(value: V2Fixed) -> Self {
        Self { value }
    }

    pub fn get(&self) -> V2Fixed {
        self.value
    }

    pub fn set(&mut self, value: V2Fixed) {
        self.value = value;
    }
}

impl WireComponent for V2FixedComponent {
    fn size(&self) -> usize {
        2 * 32
    }

    fn clear(&mut self) {
        self.value = V2Fixed::default();
    }

    fn read<B: BitBuffer + ?Sized>(&mut self, stream: &mut B) -> Result<usize> {
        let x = stream.read_s32()?;
        let y = stream.read_s32()?;
        self.value = V2Fixed::new(x, y);
        Ok(self.size())
    }

    fn write<B: BitBuffer + ?Sized>(&self, stream: &mut B) -> Result<usize> {
        stream.write_s32(self.value.x)?;
        stream.write_s32(self.value.y)?;
        Ok(self.size())
    }
}

/// Three fixed-point coordinates, 96 bits on the wire
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct V3FixedComponent {
    value: V3Fixed,
}

impl V3FixedComponent {
    pub fn new(value: V3Fixed) -> Self {
        Self { value }
    }

    pub fn get(&self) -> V3Fixed {
        self.value
    }

    pub fn set(&mut self, value: V3Fixed) {
        self.value = value;
    }
}

impl WireComponent for V3FixedComponent {
    fn size(&self) -> usize {
        3 * 32
    }

    fn clear(&mut self) {
        self.value = V3Fixed::default();
    }

    fn read<B: BitBuffer + ?Sized>(&mut self, stream: &mut B) -> Result<usize> {
        let x = stream.read_s32()?;
        let y = stream.read_s32()?;
        let z = stream.read_s32()?;
        self.value = V3Fixed::new(x, y, z);
        Ok(self.size())
    }

    fn write<B: BitBuffer + ?Sized>(&self, stream: &mut B) -> Result<usize> {
        stream.write_s32(self.value.x)?;
        stream.write_s32(self.value.y)?;
        stream.write_s32(self.value.z)?;
        Ok(self.size())
    }
}
