//! Transformation and basis utilities.
//!
//! Scene space is right-handed with Y up. The store's placement convention is
//! right-handed with Z up: scene `(x, y, z)` maps to store `(x, -z, y)`.
//! Euler angles are radians applied in XYZ order (matrix `Rx * Ry * Rz`).

use nalgebra::{Rotation3, Vector3};
use serde::{Deserialize, Serialize};

use crate::placement::PlacementFields;

/// Three orthonormal basis vectors (the columns of a rotation matrix).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Basis {
    pub x: [f64; 3],
    pub y: [f64; 3],
    pub z: [f64; 3],
}

/// Rotation matrix for an XYZ Euler triple, split into its basis vectors.
pub fn basis_from_euler(rotation: [f64; 3]) -> Basis {
    let r = Rotation3::from_axis_angle(&Vector3::x_axis(), rotation[0])
        * Rotation3::from_axis_angle(&Vector3::y_axis(), rotation[1])
        * Rotation3::from_axis_angle(&Vector3::z_axis(), rotation[2]);
    let m = r.matrix();
    let col = |i: usize| [m[(0, i)], m[(1, i)], m[(2, i)]];
    Basis {
        x: col(0),
        y: col(1),
        z: col(2),
    }
}

/// Scene (Y up) vector to store (Z up) vector.
#[inline]
pub fn scene_to_store(v: [f64; 3]) -> [f64; 3] {
    [v[0], -v[2], v[1]]
}

/// Inverse of [`scene_to_store`].
#[inline]
pub fn store_to_scene(v: [f64; 3]) -> [f64; 3] {
    [v[0], v[2], -v[1]]
}

/// Local transformation of an element, in scene space.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transformation {
    pub position: [f64; 3],
    /// Euler angles in radians, XYZ order
    pub rotation: [f64; 3],
    pub scale: [f64; 3],
}

impl Default for Transformation {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transformation {
    pub fn identity() -> Self {
        Self {
            position: [0.0; 3],
            rotation: [0.0; 3],
            scale: [1.0; 3],
        }
    }

    pub fn from_position(position: [f64; 3]) -> Self {
        Self {
            position,
            ..Self::identity()
        }
    }

    pub fn from_rotation(rotation: [f64; 3]) -> Self {
        Self {
            rotation,
            ..Self::identity()
        }
    }

    pub fn with_position(mut self, position: [f64; 3]) -> Self {
        self.position = position;
        self
    }

    pub fn with_rotation(mut self, rotation: [f64; 3]) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: [f64; 3]) -> Self {
        self.scale = scale;
        self
    }

    pub fn is_finite(&self) -> bool {
        self.position
            .iter()
            .chain(&self.rotation)
            .chain(&self.scale)
            .all(|v| v.is_finite())
    }
}

/// Placement fields as a pure function of a transformation. Scale is not part
/// of a rigid placement and is ignored here.
pub fn placement_fields(t: &Transformation) -> PlacementFields {
    let basis = basis_from_euler(t.rotation);
    PlacementFields {
        location: scene_to_store(t.position),
        axis: scene_to_store(basis.y),
        ref_direction: scene_to_store(basis.x),
    }
}
