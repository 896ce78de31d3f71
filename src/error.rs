//! # Error Types
//!
//! Error handling for component encoding and decoding.
//!
//! This module defines every failure the codec can report, from a bit buffer
//! running dry mid-decode to configuration mistakes made while assembling a
//! message layout.
//!
//! ## Error Categories
//! - **Buffer Errors**: under-runs, overflows, malformed strings
//! - **Protocol Errors**: array counts outside their declared bounds
//! - **Setter Errors**: malformed input rejected before it reaches a component
//! - **Layout Errors**: duplicate or unknown field names, mismatched prototypes
//! - **Configuration Errors**: invalid or unreadable codec configuration
//!
//! A decode that fails must be abandoned as a whole; the buffer and the partially
//! populated component tree are discarded by the caller.
//!
//! ## Example Usage
//! ```rust
//! use message_components::core::bitstream::{BitBuffer, BitStream};
//! use message_components::error::{CodecError, Result};
//!
//! fn read_flags(stream: &mut BitStream) -> Result<u32> {
//!     stream.read_bits(4)
//! }
//!
//! let mut empty = BitStream::new();
//! match read_flags(&mut empty) {
//!     Err(CodecError::BufferUnderrun { requested, available }) => {
//!         assert_eq!((requested, available), (4, 0));
//!     }
//!     other => panic!("unexpected: {other:?}"),
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error message constants to reduce allocations in error paths.
pub mod constants {
    /// String primitive errors
    pub const ERR_INTERIOR_NUL: &str = "string contains an interior NUL byte";
    pub const ERR_INVALID_UTF8: &str = "string bytes are not valid UTF-8";

    /// Configuration errors
    pub const ERR_CONFIG_OPEN: &str = "Failed to open config file";
    pub const ERR_CONFIG_READ: &str = "Failed to read config file";
    pub const ERR_CONFIG_PARSE: &str = "Failed to parse TOML";
    pub const ERR_CONFIG_SERIALIZE: &str = "Failed to serialize config";
    pub const ERR_CONFIG_WRITE: &str = "Failed to write config file";
}

// CodecError is the error type for every component and buffer operation
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CodecError {
    #[error("Buffer under-run: requested {requested} bits, {available} available")]
    BufferUnderrun { requested: usize, available: usize },

    #[error("Buffer overflow: writing {requested} bits exceeds capacity of {capacity} bits")]
    BufferOverflow { requested: usize, capacity: usize },

    #[error("Invalid bit count: {0} (at most 32 bits per transfer)")]
    InvalidBitCount(usize),

    #[error("Bit index {index} out of range for bit field of {len} bits")]
    BitIndexOutOfRange { index: usize, len: usize },

    #[error("Element index {index} out of range for array of {len} elements")]
    ElementIndexOutOfRange { index: usize, len: usize },

    #[error("Invalid string: {0}")]
    InvalidString(String),

    #[error("String too long: {len} bytes (maximum: {max})")]
    StringTooLong { len: usize, max: usize },

    #[error("Invalid bounds: lower {lower} is greater than upper {upper}")]
    InvalidBounds { lower: i64, upper: i64 },

    #[error("Element count {count} outside of [{min}, {max}]")]
    CountOutOfRange { count: u64, min: u32, max: u32 },

    #[error("Invalid hash digest: {0}")]
    InvalidDigest(String),

    #[error("Duplicate field name: {0}")]
    DuplicateField(String),

    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Optional fields must be named")]
    UnnamedOptionalField,

    #[error("Field is not optional: {0}")]
    FieldNotOptional(String),

    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    #[error("Unknown message type: {0}")]
    UnknownMessageType(u8),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl CodecError {
    /// Whether this error means the bits being decoded violate the wire protocol,
    /// as opposed to a local misuse of the API.
    pub fn is_protocol_violation(&self) -> bool {
        matches!(
            self,
            CodecError::BufferUnderrun { .. }
                | CodecError::InvalidString(_)
                | CodecError::StringTooLong { .. }
                | CodecError::CountOutOfRange { .. }
                | CodecError::UnknownMessageType(_)
        )
    }
}

/// Type alias for Results using CodecError
pub type Result<T> = std::result::Result<T, CodecError>;
