//! Float and string components.

use super::WireComponent;
use crate::core::bitstream::BitBuffer;
use crate::error::Result;

const FLOAT_BITS: usize = 32;

/// 32-bit float transferred as its raw IEEE-754 bits
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FloatComponent {
    value: f32,
}

impl FloatComponent {
    pub fn new(value: f32) -> Self {
        Self { value }
    }

    pub fn get(&self) -> f32 {
        self.value
    }

    pub fn set(&mut self, value: f32) {
        self.value = value;
    }
}

impl WireComponent for FloatComponent {
    fn size(&self) -> usize {
        FLOAT_BITS
    }

    fn clear(&mut self) {
        self.value = 0.0;
    }

    fn read<B: BitBuffer + ?Sized>(&mut self, stream: &mut B) -> Result<usize> {
        self.value = stream.read_float()?;
        Ok(FLOAT_BITS)
    }

    fn write<B: BitBuffer + ?Sized>(&self, stream: &mut B) -> Result<usize> {
        stream.write_float(self.value)?;
        Ok(FLOAT_BITS)
    }
}

/// Text encoded as its bytes plus a terminator byte
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct StringComponent {
    value: String,
}

impl StringComponent {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    pub fn get(&self) -> &str {
        &self.value
    }

    pub fn set(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }
}

impl WireComponent for StringComponent {
    fn size(&self) -> usize {
        8 * (self.value.len() + 1)
    }

    fn clear(&mut self) {
        self.value.clear();
    }

    fn read<B: BitBuffer + ?Sized>(&mut self, stream: &mut B) -> Result<usize> {
        self.value = stream.read_string()?;
        Ok(self.size())
    }

    fn write<B: BitBuffer + ?Sized>(&self, stream: &mut B) -> Result<usize> {
        stream.write_string(&self.value)?;
        Ok(self.size())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::bitstream::BitStream;
    use crate::error::CodecError;

    #[test]
    fn test_float_bits_preserved() {
        let mut stream = BitStream::new();
        FloatComponent::new(f32::NAN).write(&mut stream).unwrap();
        FloatComponent::new(-0.0).write(&mut stream).unwrap();

        let mut decoded = FloatComponent::default();
        decoded.read(&mut stream).unwrap();
        assert_eq!(decoded.get().to_bits(), f32::NAN.to_bits());
        decoded.read(&mut stream).unwrap();
        assert_eq!(decoded.get().to_bits(), (-0.0f32).to_bits());
    }

    #[test]
    fn test_string_size_counts_terminator() {
        assert_eq!(StringComponent::default().size(), 8);
        assert_eq!(StringComponent::new("map01").size(), 48);
        // multi-byte characters count by encoded byte
        assert_eq!(StringComponent::new("é").size(), 24);
    }

    #[test]
    fn test_string_read_reports_decoded_size() {
        let mut stream = BitStream::new();
        StringComponent::new("hello world").write(&mut stream).unwrap();

        let mut decoded = StringComponent::new("previous");
        assert_eq!(decoded.read(&mut stream).unwrap(), 96);
        assert_eq!(decoded.get(), "hello world");
    }

    #[test]
    fn test_string_truncated_buffer_fails() {
        let mut stream = BitStream::from_bytes(b"unterminated");
        let mut decoded = StringComponent::new("keep");
        assert!(matches!(
            decoded.read(&mut stream),
            Err(CodecError::BufferUnderrun { .. })
        ));
        assert_eq!(decoded.get(), "keep");
    }
}
