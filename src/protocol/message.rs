use crate::component::{Component, ComponentKind, GroupComponent, Variant, WireComponent};
use crate::core::bitstream::BitBuffer;
use crate::error::{CodecError, Result};
use serde::{Deserialize, Serialize};

/// Message type tags used to dispatch decoded messages
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageType {
    /// Does nothing
    NoOp = 0,
    Replication = 1,
    Ticcmd = 2,
    LoadMap = 10,
    ClientStatus = 11,
    Chat = 20,
    Obituary = 21,
}

impl MessageType {
    pub const ALL: [MessageType; 7] = [
        MessageType::NoOp,
        MessageType::Replication,
        MessageType::Ticcmd,
        MessageType::LoadMap,
        MessageType::ClientStatus,
        MessageType::Chat,
        MessageType::Obituary,
    ];

    /// Numeric tag
    pub fn id(self) -> u8 {
        self as u8
    }

    /// Look up a type from its numeric tag
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            0 => Some(MessageType::NoOp),
            1 => Some(MessageType::Replication),
            2 => Some(MessageType::Ticcmd),
            10 => Some(MessageType::LoadMap),
            11 => Some(MessageType::ClientStatus),
            20 => Some(MessageType::Chat),
            21 => Some(MessageType::Obituary),
            _ => None,
        }
    }

    /// Get human-readable name
    pub fn name(self) -> &'static str {
        match self {
            MessageType::NoOp => "NoOp",
            MessageType::Replication => "Replication",
            MessageType::Ticcmd => "Ticcmd",
            MessageType::LoadMap => "LoadMap",
            MessageType::ClientStatus => "ClientStatus",
            MessageType::Chat => "Chat",
            MessageType::Obituary => "Obituary",
        }
    }
}

impl TryFrom<u8> for MessageType {
    type Error = CodecError;

    fn try_from(id: u8) -> Result<Self> {
        MessageType::from_id(id).ok_or(CodecError::UnknownMessageType(id))
    }
}

/// A typed payload of fields.
///
/// The type tag is fixed at construction and carried through clones; it is not
/// part of the encoded payload.
#[derive(Debug, Clone)]
pub struct Message {
    message_type: MessageType,
    payload: GroupComponent,
}

impl Message {
    /// Message with no fields; encodes to zero bits
    pub fn new(message_type: MessageType) -> Self {
        Self::with_payload(message_type, GroupComponent::new())
    }

    pub fn with_payload(message_type: MessageType, payload: GroupComponent) -> Self {
        Self {
            message_type,
            payload,
        }
    }

    pub fn message_type(&self) -> MessageType {
        self.message_type
    }

    pub fn payload(&self) -> &GroupComponent {
        &self.payload
    }

    pub fn payload_mut(&mut self) -> &mut GroupComponent {
        &mut self.payload
    }

    pub fn into_payload(self) -> GroupComponent {
        self.payload
    }

    pub fn add_field(&mut self, component: impl Into<Component>, optional: bool) -> Result<()> {
        self.payload.add_field(component, optional)
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.payload.has_field(name)
    }

    pub fn field(&self, name: &str) -> Result<&Component> {
        self.payload.field(name)
    }

    pub fn field_mut(&mut self, name: &str) -> Result<&mut ComponentKind> {
        self.payload.field_mut(name)
    }

    pub fn get<T: Variant>(&self, name: &str) -> Result<&T> {
        self.payload.get(name)
    }

    pub fn get_mut<T: Variant>(&mut self, name: &str) -> Result<&mut T> {
        self.payload.get_mut(name)
    }
}

impl WireComponent for Message {
    fn size(&self) -> usize {
        self.payload.size()
    }

    fn clear(&mut self) {
        self.payload.clear();
    }

    fn read<B: BitBuffer + ?Sized>(&mut self, stream: &mut B) -> Result<usize> {
        self.payload.read(stream)
    }

    fn write<B: BitBuffer + ?Sized>(&self, stream: &mut B) -> Result<usize> {
        self.payload.write(stream)
    }
}
