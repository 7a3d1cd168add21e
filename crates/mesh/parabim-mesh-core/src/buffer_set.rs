//! AttributeBufferSet: parallel fixed-stride buffers that grow together.
//!
//! `capacity` and `size` are scalar counts. `size` is the logical length of
//! the first owned buffer; `capacity` is the allocated length every owned
//! buffer shares after a resize. Growth is amortized:
//!
//! ```text
//! needed    = size + extra_slots * stride
//! grow when trigger(needed, capacity)      (default: needed >= capacity)
//! capacity += max(needed - capacity, buffer_increase)
//! ```
//!
//! Every growth replaces each owned array with a new zero-filled one and
//! copies the logical contents across.

use log::{debug, trace};

use crate::attribute::BufferAttribute;
use crate::config::BufferConfig;
use crate::error::{MeshError, Result};
use crate::geometry::MeshGeometry;

#[derive(Clone, Debug)]
pub struct AttributeBufferSet {
    config: BufferConfig,
    geometry: MeshGeometry,
    /// Names of the buffers this set resizes, in registration order
    owned: Vec<String>,
    capacity: usize,
    next_allocation: u64,
}

impl Default for AttributeBufferSet {
    fn default() -> Self {
        Self {
            config: BufferConfig::default(),
            geometry: MeshGeometry::default(),
            owned: Vec::new(),
            capacity: 0,
            next_allocation: 1,
        }
    }
}

impl AttributeBufferSet {
    pub fn new(config: BufferConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::default()
        })
    }

    /// Set with `names` registered as empty buffers.
    pub fn with_attributes<'a>(
        config: BufferConfig,
        names: impl IntoIterator<Item = &'a str>,
    ) -> Result<Self> {
        let mut set = Self::new(config)?;
        for name in names {
            let attribute = BufferAttribute::new(set.config.stride);
            set.add_attribute(name, attribute)?;
        }
        Ok(set)
    }

    pub fn config(&self) -> &BufferConfig {
        &self.config
    }

    pub fn stride(&self) -> usize {
        self.config.stride
    }

    /// Allocated scalars per owned buffer.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Logical scalar count of the first owned buffer.
    pub fn size(&self) -> usize {
        self.owned
            .first()
            .and_then(|name| self.geometry.attribute(name))
            .map_or(0, BufferAttribute::len)
    }

    pub fn len_slots(&self) -> usize {
        self.size() / self.config.stride
    }

    pub fn geometry(&self) -> &MeshGeometry {
        &self.geometry
    }

    pub fn into_geometry(self) -> MeshGeometry {
        self.geometry
    }

    /// Current attribute under `name`. Re-fetch after every resize.
    pub fn attribute(&self, name: &str) -> Option<&BufferAttribute> {
        self.geometry.attribute(name)
    }

    pub fn owned(&self) -> impl Iterator<Item = &str> {
        self.owned.iter().map(String::as_str)
    }

    /// Register a buffer. It is not resized to the current capacity; the next
    /// growth or `push_slot` brings it in line.
    pub fn add_attribute(&mut self, name: &str, mut attribute: BufferAttribute) -> Result<()> {
        if self.geometry.has_attribute(name) {
            return Err(MeshError::DuplicateAttribute {
                name: name.to_string(),
            });
        }
        if attribute.item_size() != self.config.stride {
            return Err(MeshError::StrideMismatch {
                name: name.to_string(),
                expected: self.config.stride,
                actual: attribute.item_size(),
            });
        }
        attribute.set_allocation(self.stamp());
        self.geometry.set_attribute(name, attribute);
        self.owned.push(name.to_string());
        trace!("buffer '{name}' registered");
        Ok(())
    }

    fn stamp(&mut self) -> u64 {
        let stamp = self.next_allocation;
        self.next_allocation += 1;
        stamp
    }

    /// Make room for `extra_slots` more slots. Returns whether the buffers
    /// were replaced.
    pub fn resize_if_needed(&mut self, extra_slots: usize) -> bool {
        let needed = self.size() + extra_slots * self.config.stride;
        if !self.config.trigger.should_grow(needed, self.capacity) {
            return false;
        }
        let increment = needed
            .saturating_sub(self.capacity)
            .max(self.config.buffer_increase);
        let previous = self.capacity;
        self.capacity += increment;

        for i in 0..self.owned.len() {
            let stamp = self.stamp();
            let name = &self.owned[i];
            if let Some(attribute) = self.geometry.attribute_mut(name) {
                *attribute = attribute.reallocated(self.capacity, stamp);
            }
        }
        debug!(
            "attribute buffers grew {previous} -> {} scalars ({} buffers, needed {needed})",
            self.capacity,
            self.owned.len()
        );
        true
    }

    /// Replace every owned buffer with an empty one and drop the capacity
    /// to zero.
    pub fn reset_attributes(&mut self) {
        for i in 0..self.owned.len() {
            let stamp = self.stamp();
            let name = &self.owned[i];
            if let Some(attribute) = self.geometry.attribute_mut(name) {
                let mut empty = BufferAttribute::new(attribute.item_size());
                empty.set_allocation(stamp);
                *attribute = empty;
            }
        }
        trace!("attribute buffers reset from {} scalars", self.capacity);
        self.capacity = 0;
    }

    /// Write one slot of a named buffer. The slot must fit the capacity.
    pub fn set_slot(&mut self, name: &str, index: usize, values: &[f32]) -> Result<()> {
        let stride = self.config.stride;
        if values.len() != stride {
            return Err(MeshError::StrideMismatch {
                name: name.to_string(),
                expected: stride,
                actual: values.len(),
            });
        }
        let capacity = self.capacity;
        let attribute = self
            .geometry
            .attribute_mut(name)
            .ok_or_else(|| MeshError::unknown(name))?;
        let end = index
            .checked_add(1)
            .and_then(|n| n.checked_mul(stride));
        match end {
            Some(end) if end <= capacity && end <= attribute.capacity() => {
                attribute.write_item(index, values);
                Ok(())
            }
            _ => Err(MeshError::OutOfCapacity {
                name: name.to_string(),
                index,
                capacity,
            }),
        }
    }

    /// Append one slot to every owned buffer, growing first if needed.
    /// Buffers registered since the last growth are reallocated to the
    /// shared capacity, so all owned buffers end at the same length.
    /// `values` holds one slice per owned buffer in registration order.
    /// Returns the new slot's index.
    pub fn push_slot(&mut self, values: &[&[f32]]) -> Result<usize> {
        if values.len() != self.owned.len() {
            return Err(MeshError::SlotCountMismatch {
                expected: self.owned.len(),
                actual: values.len(),
            });
        }
        if let Some((i, v)) = values
            .iter()
            .enumerate()
            .find(|(_, v)| v.len() != self.config.stride)
        {
            return Err(MeshError::StrideMismatch {
                name: self.owned[i].clone(),
                expected: self.config.stride,
                actual: v.len(),
            });
        }
        let index = self.len_slots();
        self.resize_if_needed(1);
        self.catch_up_buffers();
        // all or nothing: check every buffer before the first write
        let end = (index + 1) * self.config.stride;
        let short = self.owned.iter().find(|name| {
            self.geometry
                .attribute(name)
                .map_or(true, |a| a.capacity() < end || end > self.capacity)
        });
        if let Some(name) = short {
            return Err(MeshError::OutOfCapacity {
                name: name.clone(),
                index,
                capacity: self.capacity,
            });
        }
        for (i, slot) in values.iter().enumerate() {
            let name = self.owned[i].clone();
            self.set_slot(&name, index, slot)?;
        }
        Ok(index)
    }

    fn catch_up_buffers(&mut self) {
        let capacity = self.capacity;
        for i in 0..self.owned.len() {
            let short = self
                .geometry
                .attribute(&self.owned[i])
                .map_or(false, |a| a.capacity() < capacity);
            if !short {
                continue;
            }
            let stamp = self.stamp();
            let name = &self.owned[i];
            if let Some(attribute) = self.geometry.attribute_mut(name) {
                *attribute = attribute.reallocated(capacity, stamp);
                trace!("buffer '{name}' caught up to {capacity} scalars");
            }
        }
    }

    /// Slot `index` of a named buffer, within its logical length.
    pub fn slot(&self, name: &str, index: usize) -> Option<&[f32]> {
        self.geometry.attribute(name)?.item(index)
    }
}
