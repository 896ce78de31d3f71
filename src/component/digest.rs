//! 128-bit hash digest (e.g. an MD5 sum of a WAD file) exposed as hex text.

use super::WireComponent;
use crate::core::bitstream::BitBuffer;
use crate::error::{CodecError, Result};
use tracing::debug;

const DIGEST_BITS: usize = 128;
const DIGEST_BYTES: usize = DIGEST_BITS / 8;

/// Raw digest bytes with a cached lowercase hex rendering
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HashDigestComponent {
    bytes: [u8; DIGEST_BYTES],
    hex: String,
}

impl Default for HashDigestComponent {
    fn default() -> Self {
        Self::from_bytes([0; DIGEST_BYTES])
    }
}

impl HashDigestComponent {
    /// Parse a digest from 32 hex digits
    pub fn new(text: &str) -> Result<Self> {
        let mut digest = Self::default();
        digest.set(text)?;
        Ok(digest)
    }

    pub fn from_bytes(bytes: [u8; DIGEST_BYTES]) -> Self {
        Self {
            bytes,
            hex: hex::encode(bytes),
        }
    }

    /// Lowercase hex form
    pub fn get(&self) -> &str {
        &self.hex
    }

    /// Replace the digest with `text`, exactly 32 hex digits in either case.
    ///
    /// Malformed text is rejected and the current digest is kept.
    pub fn set(&mut self, text: &str) -> Result<()> {
        let mut bytes = [0u8; DIGEST_BYTES];
        hex::decode_to_slice(text, &mut bytes).map_err(|e| {
            debug!(input = text, error = %e, "rejected hash digest");
            CodecError::InvalidDigest(format!("'{text}': {e}"))
        })?;
        self.set_bytes(bytes);
        Ok(())
    }

    pub fn bytes(&self) -> &[u8; DIGEST_BYTES] {
        &self.bytes
    }

    pub fn set_bytes(&mut self, bytes: [u8; DIGEST_BYTES]) {
        if bytes != self.bytes {
            self.bytes = bytes;
            self.hex = hex::encode(bytes);
        }
    }
}

impl WireComponent for HashDigestComponent {
    fn size(&self) -> usize {
        DIGEST_BITS
    }

    fn clear(&mut self) {
        self.set_bytes([0; DIGEST_BYTES]);
    }

    fn read<B: BitBuffer + ?Sized>(&mut self, stream: &mut B) -> Result<usize> {
        let mut bytes = [0u8; DIGEST_BYTES];
        for byte in bytes.iter_mut() {
            *byte = stream.read_bits(8)? as u8;
        }
        self.set_bytes(bytes);
        Ok(DIGEST_BITS)
    }

    fn write<B: BitBuffer + ?Sized>(&self, stream: &mut B) -> Result<usize> {
        for &byte in &self.bytes {
            stream.write_bits(u32::from(byte), 8)?;
        }
        Ok(DIGEST_BITS)
    }
}
