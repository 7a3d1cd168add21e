//! parabim-mesh-core: named vertex attribute buffers that grow together.
//!
//! [`AttributeBufferSet`] owns a group of equal-stride buffers inside a
//! [`MeshGeometry`] and grows all of them at once with an amortized
//! increment, copying the logical contents into each new allocation.

pub mod attribute;
pub mod buffer_set;
pub mod config;
pub mod error;
pub mod geometry;

pub use attribute::BufferAttribute;
pub use buffer_set::AttributeBufferSet;
pub use config::{BufferConfig, GrowthTrigger};
pub use error::{MeshError, Result};
pub use geometry::MeshGeometry;
