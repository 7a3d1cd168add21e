//! Store configuration.

use serde::{Deserialize, Serialize};

use crate::error::{Result, StoreError};

/// Settings for the default representation context and id allocation.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StoreConfig {
    pub context_identifier: String,
    pub context_type: String,
    /// Coordinate space dimension of the default context (2 or 3).
    pub dimension: i64,
    /// Geometric precision of the default context.
    pub precision: f64,
    /// First id handed out in generation 0. Id 0 is reserved for inline records.
    pub first_id: u32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            context_identifier: "Model".to_string(),
            context_type: "Model".to_string(),
            dimension: 3,
            precision: 1e-5,
            first_id: 1,
        }
    }
}

impl StoreConfig {
    pub(crate) fn validate(&self) -> Result<()> {
        if self.first_id == 0 {
            return Err(StoreError::initialization("first_id 0 is reserved"));
        }
        if !(2..=3).contains(&self.dimension) {
            return Err(StoreError::initialization(format!(
                "unsupported coordinate dimension {}",
                self.dimension
            )));
        }
        if !self.precision.is_finite() || self.precision <= 0.0 {
            return Err(StoreError::initialization(format!(
                "precision must be positive, got {}",
                self.precision
            )));
        }
        Ok(())
    }
}
