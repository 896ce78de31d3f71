//! # Message Components
//!
//! Building blocks that messages are assembled from.
//!
//! Every component knows its exact encoded size in bits, how to write itself into
//! a [`BitBuffer`], and how to read itself back. Composite components ([`GroupComponent`],
//! [`ArrayComponent`]) hold other components and are encoded through the same
//! interface as scalars, so a message tree is written or read with one call on its
//! root.
//!
//! ## Components
//! - **Integral**: `bool`, `u8`/`i8`, `u16`/`i16`, `u32`/`i32` at their natural width
//! - **Range**: integer packed into the fewest bits its bounds allow
//! - **Float**, **String**, **V2Fixed**/**V3Fixed**, **BitField**, **Digest**
//! - **Array**: bounded, homogeneous list cloned from a prototype
//! - **Group**: required fields, then an optional-presence indicator, then present optional fields
//!
//! ## Prototypes
//! `Clone` is a deep copy. A decoder keeps one prototype tree per message type and
//! clones it for every message it decodes.

use crate::core::bitstream::BitBuffer;
use crate::error::{CodecError, Result};
use std::mem;

pub mod array;
pub mod digest;
pub mod flags;
pub mod group;
pub mod integral;
pub mod range;
pub mod scalar;
pub mod vector;

pub use array::ArrayComponent;
pub use digest::HashDigestComponent;
pub use flags::BitFieldComponent;
pub use group::{FieldSlot, GroupComponent};
pub use integral::{
    BoolComponent, IntegralComponent, S16Component, S32Component, S8Component, U16Component,
    U32Component, U8Component, WireInt,
};
pub use range::RangeComponent;
pub use scalar::{FloatComponent, StringComponent};
pub use vector::{V2Fixed, V2FixedComponent, V3Fixed, V3FixedComponent};

/// Encode/decode contract shared by every component.
///
/// `size()` is the exact number of bits `write()` emits and `read()` consumes for
/// the component's current state. It depends only on value and configuration.
pub trait WireComponent {
    /// Encoded length in bits
    fn size(&self) -> usize;

    /// Reset to the canonical zero or empty value
    fn clear(&mut self);

    /// Decode from `stream`, returning the number of bits consumed
    fn read<B: BitBuffer + ?Sized>(&mut self, stream: &mut B) -> Result<usize>;

    /// Encode into `stream`, returning the number of bits written
    fn write<B: BitBuffer + ?Sized>(&self, stream: &mut B) -> Result<usize>;
}

/// Concrete component types that can be extracted from a [`Component`]
pub trait Variant: Sized {
    /// Variant name used in diagnostics
    const NAME: &'static str;

    fn from_kind(kind: &ComponentKind) -> Option<&Self>;

    fn from_kind_mut(kind: &mut ComponentKind) -> Option<&mut Self>;
}

macro_rules! component_kinds {
    ($($variant:ident($ty:ty) => $label:literal;)*) => {
        /// Closed set of component variants
        #[derive(Debug, Clone)]
        pub enum ComponentKind {
            $($variant($ty),)*
        }

        impl ComponentKind {
            /// Variant name used in diagnostics
            pub fn name(&self) -> &'static str {
                match self {
                    $(ComponentKind::$variant(_) => $label,)*
                }
            }
        }

        impl WireComponent for ComponentKind {
            fn size(&self) -> usize {
                match self {
                    $(ComponentKind::$variant(c) => c.size(),)*
                }
            }

            fn clear(&mut self) {
                match self {
                    $(ComponentKind::$variant(c) => c.clear(),)*
                }
            }

            fn read<B: BitBuffer + ?Sized>(&mut self, stream: &mut B) -> Result<usize> {
                match self {
                    $(ComponentKind::$variant(c) => c.read(stream),)*
                }
            }

            fn write<B: BitBuffer + ?Sized>(&self, stream: &mut B) -> Result<usize> {
                match self {
                    $(ComponentKind::$variant(c) => c.write(stream),)*
                }
            }
        }

        $(
            impl Variant for $ty {
                const NAME: &'static str = $label;

                fn from_kind(kind: &ComponentKind) -> Option<&Self> {
                    match kind {
                        ComponentKind::$variant(c) => Some(c),
                        _ => None,
                    }
                }

                fn from_kind_mut(kind: &mut ComponentKind) -> Option<&mut Self> {
                    match kind {
                        ComponentKind::$variant(c) => Some(c),
                        _ => None,
                    }
                }
            }

            impl From<$ty> for ComponentKind {
                fn from(component: $ty) -> Self {
                    ComponentKind::$variant(component)
                }
            }

            impl From<$ty> for Component {
                fn from(component: $ty) -> Self {
                    Component::new(ComponentKind::$variant(component))
                }
            }
        )*
    };
}

component_kinds! {
    Bool(BoolComponent) => "bool";
    U8(U8Component) => "u8";
    S8(S8Component) => "s8";
    U16(U16Component) => "u16";
    S16(S16Component) => "s16";
    U32(U32Component) => "u32";
    S32(S32Component) => "s32";
    Range(RangeComponent) => "range";
    Float(FloatComponent) => "float";
    String(StringComponent) => "string";
    V2Fixed(V2FixedComponent) => "v2fixed";
    V3Fixed(V3FixedComponent) => "v3fixed";
    BitField(BitFieldComponent) => "bitfield";
    Digest(HashDigestComponent) => "digest";
    Array(ArrayComponent) => "array";
    Group(GroupComponent) => "group";
}

/// A component variant with an optional field name.
///
/// The name identifies the field inside a group and in diagnostics; it is never
/// encoded.
#[derive(Debug, Clone)]
pub struct Component {
    name: Option<String>,
    kind: ComponentKind,
}

impl Component {
    pub fn new(kind: ComponentKind) -> Self {
        Self { name: None, kind }
    }

    /// Wrap `component` under the field name `name`
    pub fn named(name: impl Into<String>, component: impl Into<Component>) -> Self {
        component.into().with_name(name)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn field_name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set_field_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    pub fn kind(&self) -> &ComponentKind {
        &self.kind
    }

    pub fn kind_mut(&mut self) -> &mut ComponentKind {
        &mut self.kind
    }

    pub fn kind_name(&self) -> &'static str {
        self.kind.name()
    }

    /// Whether both components are the same variant
    pub fn same_kind(&self, other: &Component) -> bool {
        mem::discriminant(&self.kind) == mem::discriminant(&other.kind)
    }

    /// Borrow the concrete component, failing if it is another variant
    pub fn downcast<T: Variant>(&self) -> Result<&T> {
        self.kind.downcast()
    }

    pub fn downcast_mut<T: Variant>(&mut self) -> Result<&mut T> {
        self.kind.downcast_mut()
    }
}

impl ComponentKind {
    pub fn downcast<T: Variant>(&self) -> Result<&T> {
        T::from_kind(self).ok_or_else(|| mismatch::<T>(self.name()))
    }

    pub fn downcast_mut<T: Variant>(&mut self) -> Result<&mut T> {
        let found = self.name();
        T::from_kind_mut(self).ok_or_else(|| mismatch::<T>(found))
    }

    /// Fails unless `T` is this variant
    pub(crate) fn check_variant<T: Variant>(&self) -> Result<()> {
        self.downcast::<T>().map(|_| ())
    }
}

fn mismatch<T: Variant>(found: &str) -> CodecError {
    CodecError::TypeMismatch {
        expected: T::NAME.to_string(),
        found: found.to_string(),
    }
}

impl From<ComponentKind> for Component {
    fn from(kind: ComponentKind) -> Self {
        Component::new(kind)
    }
}

impl WireComponent for Component {
    fn size(&self) -> usize {
        self.kind.size()
    }

    fn clear(&mut self) {
        self.kind.clear()
    }

    fn read<B: BitBuffer + ?Sized>(&mut self, stream: &mut B) -> Result<usize> {
        self.kind.read(stream)
    }

    fn write<B: BitBuffer + ?Sized>(&self, stream: &mut B) -> Result<usize> {
        self.kind.write(stream)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::bitstream::BitStream;

    #[test]
    fn test_named_component() {
        let c = Component::named("health", U8Component::new(100));
        assert_eq!(c.field_name(), Some("health"));
        assert_eq!(c.kind_name(), "u8");
        assert_eq!(c.size(), 8);
    }

    #[test]
    fn test_downcast() {
        let mut c = Component::from(RangeComponent::new(3, 0, 7).unwrap());
        assert_eq!(c.downcast::<RangeComponent>().unwrap().get(), 3);
        c.downcast_mut::<RangeComponent>().unwrap().set(6);
        assert_eq!(c.downcast::<RangeComponent>().unwrap().get(), 6);

        assert_eq!(
            c.downcast::<FloatComponent>().unwrap_err(),
            CodecError::TypeMismatch {
                expected: "float".into(),
                found: "range".into()
            }
        );
    }

    #[test]
    fn test_same_kind_ignores_configuration() {
        let a = Component::from(RangeComponent::new(0, 0, 1).unwrap());
        let b = Component::from(RangeComponent::new(0, -100, 100).unwrap());
        let c = Component::from(U8Component::new(0));
        assert!(a.same_kind(&b));
        assert!(!a.same_kind(&c));
    }

    #[test]
    fn test_dispatch_roundtrip() {
        let original = Component::from(StringComponent::new("fist"));
        let mut stream = BitStream::new();
        assert_eq!(original.write(&mut stream).unwrap(), original.size());

        let mut decoded = original.clone();
        decoded.clear();
        assert_eq!(decoded.read(&mut stream).unwrap(), 40);
        assert_eq!(decoded.downcast::<StringComponent>().unwrap().get(), "fist");
    }
}
