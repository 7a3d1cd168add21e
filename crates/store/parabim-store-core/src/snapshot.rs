//! Interchange form of a generation: every live record plus the bookkeeping
//! needed to reopen it. Commit round-trips through the JSON encoding.

use serde::{Deserialize, Serialize};

use crate::error::{Result, StoreError};
use crate::ids::RecordId;
use crate::record::Record;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct StoreSnapshot {
    pub generation: u32,
    /// `None` once the id space is exhausted
    pub next_id: Option<RecordId>,
    pub context: RecordId,
    /// Sorted by id.
    pub records: Vec<Record>,
}

impl StoreSnapshot {
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| StoreError::initialization(format!("snapshot serialize: {e}")))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text)
            .map_err(|e| StoreError::initialization(format!("snapshot parse: {e}")))
    }
}
