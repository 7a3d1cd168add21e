//! Record identifiers and the per-generation allocator.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub u32);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Monotonic allocator for record ids within one generation.
/// Ids are never reused inside a generation, even after a delete. Once
/// `u32::MAX` has been handed out or observed the allocator is exhausted and
/// stays that way.
#[derive(Debug, Clone)]
pub struct IdAllocator {
    next: Option<u32>,
}

impl IdAllocator {
    pub fn starting_at(first: u32) -> Self {
        Self { next: Some(first) }
    }

    /// Resume from a snapshot's `next_id`; `None` means exhausted.
    pub fn resume(next: Option<RecordId>) -> Self {
        Self {
            next: next.map(|id| id.0),
        }
    }

    /// Next fresh id, or `None` once the id space is used up.
    #[inline]
    pub fn alloc(&mut self) -> Option<RecordId> {
        let id = self.next?;
        self.next = id.checked_add(1);
        Some(RecordId(id))
    }

    /// The id the next call to [`alloc`](Self::alloc) will hand out.
    #[inline]
    pub fn peek(&self) -> Option<RecordId> {
        self.next.map(RecordId)
    }

    pub fn is_exhausted(&self) -> bool {
        self.next.is_none()
    }

    /// Make sure `id` can never be allocated again.
    #[inline]
    pub fn observe(&mut self, id: RecordId) {
        if let Some(next) = self.next {
            if id.0 >= next {
                self.next = id.0.checked_add(1);
            }
        }
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::starting_at(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alloc_monotonic() {
        let mut alloc = IdAllocator::default();
        assert_eq!(alloc.alloc(), Some(RecordId(1)));
        assert_eq!(alloc.alloc(), Some(RecordId(2)));
        assert_eq!(alloc.peek(), Some(RecordId(3)));
    }

    #[test]
    fn observe_skips_past_external_ids() {
        let mut alloc = IdAllocator::starting_at(1);
        alloc.observe(RecordId(10));
        assert_eq!(alloc.alloc(), Some(RecordId(11)));
        alloc.observe(RecordId(4));
        assert_eq!(alloc.alloc(), Some(RecordId(12)));
    }

    #[test]
    fn never_wraps_past_max() {
        let mut alloc = IdAllocator::starting_at(u32::MAX - 1);
        assert_eq!(alloc.alloc(), Some(RecordId(u32::MAX - 1)));
        assert_eq!(alloc.alloc(), Some(RecordId(u32::MAX)));
        assert!(alloc.is_exhausted());
        assert_eq!(alloc.alloc(), None);
        assert_eq!(alloc.alloc(), None);
    }

    #[test]
    fn observing_max_exhausts() {
        let mut alloc = IdAllocator::default();
        alloc.observe(RecordId(u32::MAX));
        assert_eq!(alloc.peek(), None);
        assert_eq!(alloc.alloc(), None);
        // stays exhausted
        alloc.observe(RecordId(5));
        assert_eq!(alloc.alloc(), None);
    }
}
