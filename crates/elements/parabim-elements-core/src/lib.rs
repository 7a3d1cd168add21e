//! parabim-elements-core: parametric element types and their instances.
//!
//! An element type owns one or more geometry bodies and the shape records
//! aggregating them. Each element created from a type shares that shape and
//! owns only its placement, which is always derived from the element's
//! transformation when `update()` is called.

pub mod element;
pub mod element_type;
pub mod error;
pub mod geometry;
pub mod guid;
pub mod placement;
pub mod slab;
pub mod transform;
pub mod wall;

pub use element::{Element, ElementCore};
pub use element_type::{ElementType, TypeCore};
pub use error::{ElementError, Result};
pub use geometry::{Body, BooleanOperator, BooleanSolid, Extrusion, ExtrusionParams};
pub use guid::new_guid;
pub use placement::{Placement, PlacementFields};
pub use slab::{OpeningParams, Slab, SlabParams, SlabType};
pub use transform::{
    basis_from_euler, placement_fields, scene_to_store, store_to_scene, Basis, Transformation,
};
pub use wall::{Wall, WallParams, WallType};
pub use parabim_store_core::{Handle, RecordId, RecordKind, RecordStore};
