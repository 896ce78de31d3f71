//! # Core Bit Plumbing
//!
//! Low-level bit buffer and bit set types every component builds on.
//!
//! ## Components
//! - **BitStream**: MSB-first bit buffer with read and write cursors
//! - **BitBuffer**: the primitive accessor trait components are written against
//! - **BitField**: fixed-length bit set used for flags and presence indicators
//!
//! ## Wire Format
//! ```text
//! byte 0      byte 1
//! [b7 .. b0]  [b7 .. b0]   <- first bit written lands in b7 of byte 0
//! ```
//!
//! ## Limits
//! - At most 32 bits per primitive transfer
//! - Buffer capacity and string length bounded by `StreamConfig`

pub mod bitfield;
pub mod bitstream;
