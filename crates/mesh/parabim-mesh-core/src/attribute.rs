/// A flat numeric buffer read by the renderer.
///
/// `array` is the whole allocation; only the first `len` scalars are in use.
/// `allocation` identifies the current array: it changes whenever the owning
/// buffer set replaces the array, so consumers must re-fetch the attribute
/// instead of holding on to the old one.
#[derive(Clone, Debug, PartialEq)]
pub struct BufferAttribute {
    array: Vec<f32>,
    item_size: usize,
    len: usize,
    allocation: u64,
}

impl BufferAttribute {
    /// Empty attribute with no allocation.
    pub fn new(item_size: usize) -> Self {
        Self::with_capacity(item_size, 0)
    }

    /// Zero-filled allocation of `capacity` scalars, none in use.
    pub fn with_capacity(item_size: usize, capacity: usize) -> Self {
        Self {
            array: vec![0.0; capacity],
            item_size,
            len: 0,
            allocation: 0,
        }
    }

    /// Attribute whose whole array is in use.
    pub fn from_array(array: Vec<f32>, item_size: usize) -> Self {
        let len = array.len();
        Self {
            array,
            item_size,
            len,
            allocation: 0,
        }
    }

    pub fn item_size(&self) -> usize {
        self.item_size
    }

    /// Logical scalar count.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Logical slot count.
    pub fn count(&self) -> usize {
        if self.item_size == 0 {
            0
        } else {
            self.len / self.item_size
        }
    }

    /// Allocated scalar count.
    pub fn capacity(&self) -> usize {
        self.array.len()
    }

    pub fn allocation(&self) -> u64 {
        self.allocation
    }

    /// The full allocation, including unused tail.
    pub fn array(&self) -> &[f32] {
        &self.array
    }

    /// The scalars in use.
    pub fn as_slice(&self) -> &[f32] {
        &self.array[..self.len]
    }

    pub fn item(&self, index: usize) -> Option<&[f32]> {
        let start = index.checked_mul(self.item_size)?;
        let end = start.checked_add(self.item_size)?;
        if end > self.len {
            return None;
        }
        Some(&self.array[start..end])
    }

    /// Copy of the logical contents into a fresh zero-filled allocation.
    pub(crate) fn reallocated(&self, capacity: usize, allocation: u64) -> Self {
        let mut array = vec![0.0; capacity];
        let keep = self.len.min(capacity);
        array[..keep].copy_from_slice(&self.array[..keep]);
        Self {
            array,
            item_size: self.item_size,
            len: keep,
            allocation,
        }
    }

    /// Write one item; the caller has checked it fits the allocation.
    pub(crate) fn write_item(&mut self, index: usize, values: &[f32]) {
        let start = index * self.item_size;
        let end = start + self.item_size;
        self.array[start..end].copy_from_slice(values);
        self.len = self.len.max(end);
    }

    pub(crate) fn set_allocation(&mut self, allocation: u64) {
        self.allocation = allocation;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reallocation_keeps_logical_range() {
        let attr = BufferAttribute::from_array(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 3);
        let grown = attr.reallocated(12, 7);
        assert_eq!(grown.capacity(), 12);
        assert_eq!(grown.as_slice(), attr.as_slice());
        assert!(grown.array()[6..].iter().all(|v| *v == 0.0));
        assert_eq!(grown.allocation(), 7);
        assert_eq!(grown.count(), 2);
    }

    #[test]
    fn item_bounds() {
        let attr = BufferAttribute::from_array(vec![1.0, 2.0, 3.0], 3);
        assert_eq!(attr.item(0), Some(&[1.0, 2.0, 3.0][..]));
        assert_eq!(attr.item(1), None);
        assert_eq!(BufferAttribute::new(3).item(0), None);
    }
}
