//! Error types for the record store

use serde::{Deserialize, Serialize};

use crate::ids::RecordId;
use crate::kind::RecordKind;

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum StoreError {
    /// Store accessed before `initialize()`, or after `close()`
    #[error("record store is not initialized")]
    NotInitialized,

    /// Handle resolution or delete target does not exist; `None` means a null target
    #[error("record not found: {}", .id.map(|id| id.to_string()).unwrap_or_else(|| "null handle".to_string()))]
    NotFound { id: Option<RecordId> },

    /// Store failed to start, or a generation failed to reopen after commit
    #[error("store initialization failed: {reason}")]
    InitializationError { reason: String },

    /// Id-bearing operation invoked without a valid generation
    #[error("malformed state: {reason}")]
    MalformedState { reason: String },

    /// Handle or read expected a different record kind
    #[error("record {id} is a {actual}, expected {expected}")]
    KindMismatch {
        id: RecordId,
        expected: RecordKind,
        actual: RecordKind,
    },

    /// Record does not match its kind's field layout
    #[error("malformed {kind} record: {reason}")]
    MalformedRecord { kind: RecordKind, reason: String },
}

impl StoreError {
    pub fn not_found(id: RecordId) -> Self {
        Self::NotFound { id: Some(id) }
    }

    pub fn null_target() -> Self {
        Self::NotFound { id: None }
    }

    pub fn initialization(reason: impl Into<String>) -> Self {
        Self::InitializationError {
            reason: reason.into(),
        }
    }

    /// Error category for logging
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::NotInitialized | Self::InitializationError { .. } => "lifecycle",
            Self::NotFound { .. } => "lookup",
            Self::MalformedState { .. } => "state",
            Self::KindMismatch { .. } | Self::MalformedRecord { .. } => "schema",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_target() {
        assert_eq!(
            StoreError::not_found(RecordId(12)).to_string(),
            "record not found: #12"
        );
        assert_eq!(
            StoreError::null_target().to_string(),
            "record not found: null handle"
        );
    }

    #[test]
    fn categories() {
        assert_eq!(StoreError::NotInitialized.category(), "lifecycle");
        assert_eq!(StoreError::not_found(RecordId(1)).category(), "lookup");
        let schema = StoreError::MalformedRecord {
            kind: RecordKind::Wall,
            reason: "x".into(),
        };
        assert_eq!(schema.category(), "schema");
    }

    #[test]
    fn serialization() {
        let error = StoreError::initialization("boom");
        let serialized = serde_json::to_string(&error).unwrap();
        let deserialized: StoreError = serde_json::from_str(&serialized).unwrap();
        assert_eq!(error, deserialized);
    }
}
