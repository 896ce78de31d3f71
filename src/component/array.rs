//! # Array Component
//!
//! A bounded, homogeneous list of components.
//!
//! Elements are clones of a prototype. On the wire the element count comes first,
//! range-encoded with bounds `[min_count, max_count]`, followed by each element in
//! order:
//!
//! ```text
//! [count: bits_for_span(min, max)] [element 0] [element 1] ...
//! ```
//!
//! A decoded count outside the bounds is a protocol violation and aborts the read.

use super::range::RangeComponent;
use super::{Component, Variant, WireComponent};
use crate::config::DEFAULT_ARRAY_MAX_COUNT;
use crate::core::bitstream::BitBuffer;
use crate::error::{CodecError, Result};
use std::cell::Cell;
use tracing::{instrument, trace, warn};

const PREALLOC_LIMIT: usize = 256;

#[derive(Debug, Clone)]
pub struct ArrayComponent {
    prototype: Box<Component>,
    min_count: u32,
    max_count: u32,
    count_field: RangeComponent,
    elements: Vec<Component>,
    cached_size: Cell<Option<usize>>,
}

impl ArrayComponent {
    /// Empty array of `prototype` clones holding between `min_count` and
    /// `max_count` elements.
    pub fn new(prototype: impl Into<Component>, min_count: u32, max_count: u32) -> Result<Self> {
        if min_count > max_count || max_count > i32::MAX as u32 {
            return Err(CodecError::InvalidBounds {
                lower: i64::from(min_count),
                upper: i64::from(max_count),
            });
        }
        let count_field = RangeComponent::new(0, min_count as i32, max_count as i32)?;
        Ok(Self {
            prototype: Box::new(prototype.into()),
            min_count,
            max_count,
            count_field,
            elements: Vec::new(),
            cached_size: Cell::new(None),
        })
    }

    /// Array with the default bounds `[0, DEFAULT_ARRAY_MAX_COUNT]`
    pub fn unbounded(prototype: impl Into<Component>) -> Self {
        let count_field = RangeComponent::with_bounds(0, DEFAULT_ARRAY_MAX_COUNT as i32)
            .unwrap_or_default();
        Self {
            prototype: Box::new(prototype.into()),
            min_count: 0,
            max_count: DEFAULT_ARRAY_MAX_COUNT,
            count_field,
            elements: Vec::new(),
            cached_size: Cell::new(None),
        }
    }

    pub fn prototype(&self) -> &Component {
        &self.prototype
    }

    pub fn min_count(&self) -> u32 {
        self.min_count
    }

    pub fn max_count(&self) -> u32 {
        self.max_count
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Append a clone of the prototype and return it as its concrete type.
    ///
    /// `T` must be the prototype's variant; nothing is appended otherwise.
    pub fn push<T: Variant>(&mut self) -> Result<&mut T> {
        self.prototype.kind().check_variant::<T>()?;
        let element = (*self.prototype).clone();
        self.push_component(element)?;
        let last = self.elements.len() - 1;
        self.elements[last].downcast_mut()
    }

    /// Append `component`, which must be the prototype's variant
    pub fn push_component(&mut self, component: impl Into<Component>) -> Result<()> {
        let component = component.into();
        if !component.same_kind(&self.prototype) {
            return Err(CodecError::TypeMismatch {
                expected: self.prototype.kind_name().to_string(),
                found: component.kind_name().to_string(),
            });
        }
        if self.elements.len() >= self.max_count as usize {
            return Err(CodecError::CountOutOfRange {
                count: self.elements.len() as u64 + 1,
                min: self.min_count,
                max: self.max_count,
            });
        }
        self.elements.push(component);
        self.touch();
        Ok(())
    }

    pub fn pop(&mut self) -> Option<Component> {
        let element = self.elements.pop();
        self.touch();
        element
    }

    pub fn get(&self, index: usize) -> Option<&Component> {
        self.elements.get(index)
    }

    /// Borrow an element as its concrete type.
    ///
    /// Elements are only handed out typed, so the variant of a slot cannot change.
    pub fn get_mut<T: Variant>(&mut self, index: usize) -> Result<&mut T> {
        let len = self.elements.len();
        let element = self
            .elements
            .get_mut(index)
            .ok_or(CodecError::ElementIndexOutOfRange { index, len })?;
        self.cached_size.set(None);
        element.downcast_mut()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Component> {
        self.elements.iter()
    }

    /// Mutable iteration over the elements as their concrete type
    pub fn iter_mut<'a, T: Variant + 'a>(&'a mut self) -> Result<impl Iterator<Item = &'a mut T> + 'a> {
        self.prototype.kind().check_variant::<T>()?;
        self.cached_size.set(None);
        Ok(self
            .elements
            .iter_mut()
            .filter_map(|element| T::from_kind_mut(element.kind_mut())))
    }

    // Keeps the count field in step with the element list.
    fn touch(&mut self) {
        self.count_field.set(self.elements.len() as i32);
        self.cached_size.set(None);
    }

    fn check_count(&self, count: u64) -> Result<()> {
        if count < u64::from(self.min_count) || count > u64::from(self.max_count) {
            return Err(CodecError::CountOutOfRange {
                count,
                min: self.min_count,
                max: self.max_count,
            });
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a ArrayComponent {
    type Item = &'a Component;
    type IntoIter = std::slice::Iter<'a, Component>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl WireComponent for ArrayComponent {
    fn size(&self) -> usize {
        if let Some(size) = self.cached_size.get() {
            return size;
        }
        let size = self.count_field.size() + self.elements.iter().map(|e| e.size()).sum::<usize>();
        self.cached_size.set(Some(size));
        size
    }

    fn clear(&mut self) {
        self.elements.clear();
        self.touch();
    }

    #[instrument(level = "trace", skip_all, fields(min = self.min_count, max = self.max_count))]
    fn read<B: BitBuffer + ?Sized>(&mut self, stream: &mut B) -> Result<usize> {
        let mut count_field = self.count_field.clone();
        let mut bits = count_field.read(stream)?;

        let count = i64::from(count_field.get()).max(0) as u64;
        if let Err(e) = self.check_count(count) {
            warn!(count, "array count outside declared bounds");
            return Err(e);
        }

        // Capacity is capped so a hostile count cannot force a huge allocation.
        let mut elements = Vec::with_capacity((count as usize).min(PREALLOC_LIMIT));
        for _ in 0..count {
            let mut element = (*self.prototype).clone();
            bits += element.read(stream)?;
            elements.push(element);
        }

        self.elements = elements;
        self.touch();
        trace!(count, bits, "array decoded");
        Ok(bits)
    }

    #[instrument(level = "trace", skip_all, fields(len = self.elements.len()))]
    fn write<B: BitBuffer + ?Sized>(&self, stream: &mut B) -> Result<usize> {
        self.check_count(self.elements.len() as u64)?;

        let mut bits = self.count_field.write(stream)?;
        for element in &self.elements {
            bits += element.write(stream)?;
        }
        trace!(bits, "array encoded");
        Ok(bits)
    }
}
