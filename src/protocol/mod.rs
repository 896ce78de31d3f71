//! # Messages
//!
//! Typed wrappers over component groups.
//!
//! A [`Message`](message::Message) pairs a [`MessageType`](message::MessageType) tag
//! with a group payload. The tag is for dispatch by whoever owns the mapping from
//! types to prototype messages; only the payload is encoded.

pub mod message;
