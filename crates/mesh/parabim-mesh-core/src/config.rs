use serde::{Deserialize, Serialize};

use crate::error::{MeshError, Result};

/// When `resize_if_needed` grows the buffers.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrowthTrigger {
    /// Grow once the needed size reaches the capacity (`needed >= capacity`),
    /// even if it would still fit exactly.
    #[default]
    AtCapacity,
    /// Grow only when the needed size exceeds the capacity.
    WhenInsufficient,
}

impl GrowthTrigger {
    #[inline]
    pub fn should_grow(&self, needed: usize, capacity: usize) -> bool {
        match self {
            GrowthTrigger::AtCapacity => needed >= capacity,
            GrowthTrigger::WhenInsufficient => needed > capacity,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BufferConfig {
    /// Scalars per slot
    pub stride: usize,
    /// Minimum growth step in scalars; a multiple of `stride`
    pub buffer_increase: usize,
    pub trigger: GrowthTrigger,
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self {
            stride: 3,
            buffer_increase: 300,
            trigger: GrowthTrigger::AtCapacity,
        }
    }
}

impl BufferConfig {
    pub(crate) fn validate(&self) -> Result<()> {
        if self.stride == 0 {
            return Err(MeshError::InvalidConfig {
                reason: "stride must be at least 1".to_string(),
            });
        }
        if self.buffer_increase == 0 || self.buffer_increase % self.stride != 0 {
            return Err(MeshError::InvalidConfig {
                reason: format!(
                    "buffer_increase {} is not a positive multiple of stride {}",
                    self.buffer_increase, self.stride
                ),
            });
        }
        Ok(())
    }
}
