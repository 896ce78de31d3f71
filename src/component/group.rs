//! # Group Component
//!
//! Ordered, named collection of required and optional fields; the structural
//! backbone messages are built from.
//!
//! ## Wire Format
//! ```text
//! [required 0] .. [required N] [indicator: one bit per optional field] [present optional fields]
//! ```
//!
//! Presence is explicit state: an optional field is written only when its
//! indicator bit has been set, whatever value the field holds in memory. An absent
//! field costs nothing beyond its indicator bit, and decoding leaves it untouched.

use super::flags::BitFieldComponent;
use super::{Component, ComponentKind, Variant, WireComponent};
use crate::core::bitstream::BitBuffer;
use crate::error::{CodecError, Result};
use std::cell::Cell;
use std::collections::HashMap;
use tracing::{instrument, trace};

/// Position of a named field inside its group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldSlot {
    Required(usize),
    Optional(usize),
}

#[derive(Debug, Clone)]
pub struct GroupComponent {
    required: Vec<Component>,
    optional: Vec<Component>,
    indicator: BitFieldComponent,
    names: HashMap<String, FieldSlot>,
    cached_size: Cell<Option<usize>>,
}

impl Default for GroupComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl GroupComponent {
    pub fn new() -> Self {
        Self {
            required: Vec::new(),
            optional: Vec::new(),
            indicator: BitFieldComponent::new(0),
            names: HashMap::new(),
            cached_size: Cell::new(None),
        }
    }

    /// Append a field to the required or optional section.
    ///
    /// Named fields become reachable by name; a name already used in this group
    /// is rejected and the group is left unchanged. Optional fields must be named,
    /// since presence is set by name, and start absent.
    pub fn add_field(&mut self, component: impl Into<Component>, optional: bool) -> Result<()> {
        let component = component.into();
        if optional && component.field_name().is_none() {
            return Err(CodecError::UnnamedOptionalField);
        }
        if let Some(name) = component.field_name() {
            if self.names.contains_key(name) {
                return Err(CodecError::DuplicateField(name.to_string()));
            }
        }

        let slot = if optional {
            self.optional.push(component);
            self.indicator.get_mut().resize(self.optional.len());
            FieldSlot::Optional(self.optional.len() - 1)
        } else {
            self.required.push(component);
            FieldSlot::Required(self.required.len() - 1)
        };

        let added = match slot {
            FieldSlot::Required(i) => &self.required[i],
            FieldSlot::Optional(i) => &self.optional[i],
        };
        if let Some(name) = added.field_name() {
            self.names.insert(name.to_string(), slot);
        }
        self.invalidate();
        Ok(())
    }

    /// Builder form of `add_field(component, false)`
    pub fn with_required(mut self, component: impl Into<Component>) -> Result<Self> {
        self.add_field(component, false)?;
        Ok(self)
    }

    /// Builder form of `add_field(component, true)`
    pub fn with_optional(mut self, component: impl Into<Component>) -> Result<Self> {
        self.add_field(component, true)?;
        Ok(self)
    }

    /// Remove a named field, returning it
    pub fn remove_field(&mut self, name: &str) -> Result<Component> {
        let slot = self.slot_of(name)?;
        self.names.remove(name);

        let removed = match slot {
            FieldSlot::Required(index) => {
                let removed = self.required.remove(index);
                self.shift_slots(|s| match s {
                    FieldSlot::Required(i) if *i > index => Some(FieldSlot::Required(*i - 1)),
                    _ => None,
                });
                removed
            }
            FieldSlot::Optional(index) => {
                let removed = self.optional.remove(index);
                self.indicator.get_mut().remove(index)?;
                self.shift_slots(|s| match s {
                    FieldSlot::Optional(i) if *i > index => Some(FieldSlot::Optional(*i - 1)),
                    _ => None,
                });
                removed
            }
        };
        self.invalidate();
        Ok(removed)
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.names.contains_key(name)
    }

    pub fn slot(&self, name: &str) -> Option<FieldSlot> {
        self.names.get(name).copied()
    }

    pub fn field(&self, name: &str) -> Result<&Component> {
        Ok(match self.slot_of(name)? {
            FieldSlot::Required(i) => &self.required[i],
            FieldSlot::Optional(i) => &self.optional[i],
        })
    }

    /// Mutable access to a field's contents. The field name stays owned by the
    /// group so the lookup table cannot go stale.
    pub fn field_mut(&mut self, name: &str) -> Result<&mut ComponentKind> {
        let slot = self.slot_of(name)?;
        self.invalidate();
        Ok(match slot {
            FieldSlot::Required(i) => self.required[i].kind_mut(),
            FieldSlot::Optional(i) => self.optional[i].kind_mut(),
        })
    }

    /// Borrow a named field as its concrete type
    pub fn get<T: Variant>(&self, name: &str) -> Result<&T> {
        self.field(name)?.downcast()
    }

    pub fn get_mut<T: Variant>(&mut self, name: &str) -> Result<&mut T> {
        self.field_mut(name)?.downcast_mut()
    }

    /// Required fields are always present.
    pub fn is_present(&self, name: &str) -> Result<bool> {
        Ok(match self.slot_of(name)? {
            FieldSlot::Required(_) => true,
            FieldSlot::Optional(i) => self.indicator.get().get(i),
        })
    }

    /// Mark an optional field present or absent
    pub fn set_present(&mut self, name: &str, present: bool) -> Result<()> {
        match self.slot_of(name)? {
            FieldSlot::Required(_) => Err(CodecError::FieldNotOptional(name.to_string())),
            FieldSlot::Optional(i) => {
                self.indicator.get_mut().set(i, present)?;
                self.invalidate();
                Ok(())
            }
        }
    }

    /// Mark an optional field present and borrow it for assignment
    pub fn enable<T: Variant>(&mut self, name: &str) -> Result<&mut T> {
        self.field(name)?.kind().check_variant::<T>()?;
        self.set_present(name, true)?;
        self.get_mut(name)
    }

    /// Number of fields, required and optional
    pub fn len(&self) -> usize {
        self.required.len() + self.optional.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn required_fields(&self) -> &[Component] {
        &self.required
    }

    pub fn optional_fields(&self) -> &[Component] {
        &self.optional
    }

    /// Presence bits of the optional fields, in insertion order
    pub fn indicator(&self) -> &BitFieldComponent {
        &self.indicator
    }

    fn slot_of(&self, name: &str) -> Result<FieldSlot> {
        self.slot(name)
            .ok_or_else(|| CodecError::UnknownField(name.to_string()))
    }

    fn shift_slots<F>(&mut self, shift: F)
    where
        F: Fn(&FieldSlot) -> Option<FieldSlot>,
    {
        for slot in self.names.values_mut() {
            if let Some(moved) = shift(slot) {
                *slot = moved;
            }
        }
    }

    fn present_optional(&self) -> impl Iterator<Item = &Component> + '_ {
        self.optional
            .iter()
            .enumerate()
            .filter(|(i, _)| self.indicator.get().get(*i))
            .map(|(_, field)| field)
    }

    fn invalidate(&self) {
        self.cached_size.set(None);
    }
}

impl WireComponent for GroupComponent {
    fn size(&self) -> usize {
        if let Some(size) = self.cached_size.get() {
            return size;
        }
        let size = self.required.iter().map(|f| f.size()).sum::<usize>()
            + self.indicator.size()
            + self.present_optional().map(|f| f.size()).sum::<usize>();
        self.cached_size.set(Some(size));
        size
    }

    /// Clears every field and marks every optional field absent.
    fn clear(&mut self) {
        self.required.iter_mut().for_each(|f| f.clear());
        self.optional.iter_mut().for_each(|f| f.clear());
        self.indicator.clear();
        self.invalidate();
    }

    #[instrument(level = "trace", skip_all, fields(required = self.required.len(), optional = self.optional.len()))]
    fn read<B: BitBuffer + ?Sized>(&mut self, stream: &mut B) -> Result<usize> {
        // Any failure below leaves the group half-read; the caller discards it.
        self.invalidate();

        let mut bits = 0;
        for field in &mut self.required {
            bits += field.read(stream)?;
        }
        bits += self.indicator.read(stream)?;
        for (i, field) in self.optional.iter_mut().enumerate() {
            if self.indicator.get().get(i) {
                bits += field.read(stream)?;
            }
        }

        trace!(bits, "group decoded");
        Ok(bits)
    }

    #[instrument(level = "trace", skip_all, fields(required = self.required.len(), optional = self.optional.len()))]
    fn write<B: BitBuffer + ?Sized>(&self, stream: &mut B) -> Result<usize> {
        let mut bits = 0;
        for field in &self.required {
            bits += field.write(stream)?;
        }
        bits += self.indicator.write(stream)?;
        for field in self.present_optional() {
            bits += field.write(stream)?;
        }

        trace!(bits, "group encoded");
        Ok(bits)
    }
}
