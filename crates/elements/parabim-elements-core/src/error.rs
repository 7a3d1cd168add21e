//! Error types for element construction and update.

use parabim_store_core::{RecordStore, StoreError};

pub type Result<T> = std::result::Result<T, ElementError>;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ElementError {
    /// Store failures propagate unchanged
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Parameters or transformations that cannot describe geometry
    #[error("invalid parameters: {reason}")]
    InvalidParams { reason: String },
}

impl ElementError {
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidParams {
            reason: reason.into(),
        }
    }

    /// An id-bearing operation ran without an open generation.
    pub fn malformed_state(reason: impl Into<String>) -> Self {
        Self::Store(StoreError::MalformedState {
            reason: reason.into(),
        })
    }
}

/// Reject zero, negative and non-finite dimensions.
pub(crate) fn positive(name: &str, v: f64) -> Result<f64> {
    if v.is_finite() && v > 0.0 {
        Ok(v)
    } else {
        Err(ElementError::invalid(format!(
            "{name} must be a positive finite number, got {v}"
        )))
    }
}

/// Id-bearing operations need an open generation.
pub(crate) fn require_open(store: &RecordStore, operation: &str) -> Result<()> {
    if store.is_open() {
        Ok(())
    } else {
        Err(ElementError::malformed_state(format!(
            "{operation} requires an open store generation"
        )))
    }
}
