//! # Bit Stream
//!
//! The bit-addressable buffer that components serialize into.
//!
//! Components only talk to the [`BitBuffer`] trait: a sequential channel that
//! moves up to 32 bits at a time plus the float, signed and string primitives
//! derived from it. [`BitStream`] is the in-memory implementation backed by
//! `BytesMut`.
//!
//! ## Bit Order
//! Bits are packed most-significant first. Writing `0b101` in 3 bits followed by
//! `0b1` in 1 bit yields the byte `0b1011_0000`.
//!
//! ## Cursors
//! The write cursor marks how many bits have been written; the read cursor how
//! many have been consumed. Reading past the write cursor is a buffer under-run.

use crate::config::StreamConfig;
use crate::error::{constants, CodecError, Result};
use bytes::{Bytes, BytesMut};

/// Largest number of bits moved by a single `read_bits`/`write_bits` call
pub const MAX_TRANSFER_BITS: usize = 32;

/// Sequential bit channel consumed by every component.
///
/// Only `read_bits` and `write_bits` are required; the remaining primitives have
/// provided implementations built on them.
pub trait BitBuffer {
    /// Read `count` bits (at most 32) as an unsigned integer.
    fn read_bits(&mut self, count: usize) -> Result<u32>;

    /// Write the low `count` bits (at most 32) of `value`.
    fn write_bits(&mut self, value: u32, count: usize) -> Result<()>;

    /// Longest string, in bytes, this buffer accepts.
    fn max_string_length(&self) -> usize {
        usize::MAX
    }

    fn read_float(&mut self) -> Result<f32> {
        Ok(f32::from_bits(self.read_bits(32)?))
    }

    fn write_float(&mut self, value: f32) -> Result<()> {
        self.write_bits(value.to_bits(), 32)
    }

    fn read_s32(&mut self) -> Result<i32> {
        Ok(self.read_bits(32)? as i32)
    }

    fn write_s32(&mut self, value: i32) -> Result<()> {
        self.write_bits(value as u32, 32)
    }

    /// Read a NUL-terminated UTF-8 string.
    fn read_string(&mut self) -> Result<String> {
        let max = self.max_string_length();
        let mut bytes = Vec::new();
        loop {
            let byte = self.read_bits(8)? as u8;
            if byte == 0 {
                break;
            }
            if bytes.len() == max {
                return Err(CodecError::StringTooLong {
                    len: bytes.len() + 1,
                    max,
                });
            }
            bytes.push(byte);
        }
        String::from_utf8(bytes)
            .map_err(|_| CodecError::InvalidString(constants::ERR_INVALID_UTF8.to_string()))
    }

    /// Write the bytes of `value` followed by a NUL terminator.
    fn write_string(&mut self, value: &str) -> Result<()> {
        let max = self.max_string_length();
        if value.len() > max {
            return Err(CodecError::StringTooLong {
                len: value.len(),
                max,
            });
        }
        if value.as_bytes().contains(&0) {
            return Err(CodecError::InvalidString(
                constants::ERR_INTERIOR_NUL.to_string(),
            ));
        }
        for &byte in value.as_bytes() {
            self.write_bits(u32::from(byte), 8)?;
        }
        self.write_bits(0, 8)
    }
}

/// In-memory bit buffer with independent read and write cursors
#[derive(Debug, Clone)]
pub struct BitStream {
    data: BytesMut,
    write_pos: usize,
    read_pos: usize,
    capacity_bits: usize,
    max_string_length: usize,
}

impl Default for BitStream {
    fn default() -> Self {
        Self::new()
    }
}

impl BitStream {
    /// Create an empty stream with the default limits
    pub fn new() -> Self {
        Self::with_config(&StreamConfig::default())
    }

    /// Create an empty stream with the given limits
    pub fn with_config(config: &StreamConfig) -> Self {
        Self {
            data: BytesMut::with_capacity(config.max_buffer_bytes.min(1024)),
            write_pos: 0,
            read_pos: 0,
            capacity_bits: config.max_buffer_bits(),
            max_string_length: config.max_string_length,
        }
    }

    /// Wrap received bytes for decoding; every bit of `bytes` is readable.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let config = StreamConfig::default();
        let data = BytesMut::from(bytes);
        let write_pos = data.len() * 8;
        Self {
            data,
            write_pos,
            read_pos: 0,
            capacity_bits: config.max_buffer_bits().max(write_pos),
            max_string_length: config.max_string_length,
        }
    }

    /// Encoded bytes; a trailing partial byte is zero-padded.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Consume the stream, returning its encoded bytes
    pub fn freeze(self) -> Bytes {
        self.data.freeze()
    }

    pub fn bits_written(&self) -> usize {
        self.write_pos
    }

    pub fn bits_read(&self) -> usize {
        self.read_pos
    }

    /// Bits written but not yet read
    pub fn bits_remaining(&self) -> usize {
        self.write_pos - self.read_pos
    }

    /// Move the read cursor back to the first bit
    pub fn rewind(&mut self) {
        self.read_pos = 0;
    }

    /// Discard all contents and reset both cursors
    pub fn clear(&mut self) {
        self.data.clear();
        self.write_pos = 0;
        self.read_pos = 0;
    }
}

impl BitBuffer for BitStream {
    fn read_bits(&mut self, count: usize) -> Result<u32> {
        if count > MAX_TRANSFER_BITS {
            return Err(CodecError::InvalidBitCount(count));
        }
        if count > self.bits_remaining() {
            return Err(CodecError::BufferUnderrun {
                requested: count,
                available: self.bits_remaining(),
            });
        }

        let mut value = 0u32;
        let mut remaining = count;
        while remaining > 0 {
            let byte = self.data[self.read_pos / 8];
            let avail = 8 - self.read_pos % 8;
            let take = avail.min(remaining);
            let chunk = (u32::from(byte) >> (avail - take)) & ((1u32 << take) - 1);
            value = (value << take) | chunk;
            self.read_pos += take;
            remaining -= take;
        }
        Ok(value)
    }

    fn write_bits(&mut self, value: u32, count: usize) -> Result<()> {
        if count > MAX_TRANSFER_BITS {
            return Err(CodecError::InvalidBitCount(count));
        }
        if self.write_pos + count > self.capacity_bits {
            return Err(CodecError::BufferOverflow {
                requested: self.write_pos + count,
                capacity: self.capacity_bits,
            });
        }

        let needed = (self.write_pos + count).div_ceil(8);
        if needed > self.data.len() {
            self.data.resize(needed, 0);
        }

        let mut remaining = count;
        while remaining > 0 {
            let free = 8 - self.write_pos % 8;
            let take = free.min(remaining);
            let chunk = (value >> (remaining - take)) & ((1u32 << take) - 1);
            self.data[self.write_pos / 8] |= (chunk << (free - take)) as u8;
            self.write_pos += take;
            remaining -= take;
        }
        Ok(())
    }

    fn max_string_length(&self) -> usize {
        self.max_string_length
    }
}
