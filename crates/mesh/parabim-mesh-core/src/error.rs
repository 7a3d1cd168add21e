//! Error types for attribute buffers

use serde::{Deserialize, Serialize};

pub type Result<T> = std::result::Result<T, MeshError>;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum MeshError {
    /// Slot write beyond the allocated capacity; call `resize_if_needed` first
    #[error("slot {index} of '{name}' is beyond capacity ({capacity} scalars)")]
    OutOfCapacity {
        name: String,
        index: usize,
        capacity: usize,
    },

    #[error("'{name}' expects {expected} components per slot, got {actual}")]
    StrideMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },

    #[error("unknown attribute '{name}'")]
    UnknownAttribute { name: String },

    #[error("attribute '{name}' is already registered")]
    DuplicateAttribute { name: String },

    /// `push_slot` needs one value slice per owned buffer
    #[error("expected values for {expected} buffers, got {actual}")]
    SlotCountMismatch { expected: usize, actual: usize },

    #[error("invalid buffer configuration: {reason}")]
    InvalidConfig { reason: String },
}

impl MeshError {
    pub fn unknown(name: impl Into<String>) -> Self {
        Self::UnknownAttribute { name: name.into() }
    }

    /// Error category for logging
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            MeshError::OutOfCapacity { .. } => "capacity",
            MeshError::StrideMismatch { .. } | MeshError::SlotCountMismatch { .. } => "layout",
            MeshError::UnknownAttribute { .. } | MeshError::DuplicateAttribute { .. } => {
                "registry"
            }
            MeshError::InvalidConfig { .. } => "config",
        }
    }
}
