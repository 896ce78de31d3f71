//! # message-components
//!
//! Composable, bit-packed message components for compact network protocols.
//!
//! Messages are trees of components. Each component knows its exact size in bits
//! and how to write itself into, and read itself out of, a bit buffer. Leaves hold
//! scalar values (integers, bounded ranges, floats, strings, fixed-point vectors,
//! flag sets, hash digests); groups and arrays compose them.
//!
//! ## Modules
//! - [`core`]: bit buffer and bit set primitives
//! - [`component`]: the component contract and every component type
//! - [`protocol`]: typed messages built on groups
//! - [`config`]: buffer limits
//! - [`error`]: the crate error type
//!
//! ## Example
//! ```rust
//! use message_components::component::{Component, GroupComponent, RangeComponent, StringComponent, WireComponent};
//! use message_components::core::bitstream::BitStream;
//!
//! # fn main() -> message_components::error::Result<()> {
//! let prototype = GroupComponent::new()
//!     .with_required(Component::named("health", RangeComponent::with_bounds(0, 200)?))?
//!     .with_optional(Component::named("taunt", StringComponent::default()))?;
//!
//! let mut status = prototype.clone();
//! status.get_mut::<RangeComponent>("health")?.set(150);
//!
//! let mut stream = BitStream::new();
//! let bits = status.write(&mut stream)?;
//! assert_eq!(bits, 8 + 1);
//!
//! let mut decoded = prototype.clone();
//! decoded.read(&mut stream)?;
//! assert_eq!(decoded.get::<RangeComponent>("health")?.get(), 150);
//! # Ok(())
//! # }
//! ```

pub mod component;
pub mod config;
pub mod core;
pub mod error;
pub mod protocol;

pub use component::{Component, ComponentKind, WireComponent};
pub use crate::core::bitstream::{BitBuffer, BitStream};
pub use error::{CodecError, Result};
pub use protocol::message::{Message, MessageType};
