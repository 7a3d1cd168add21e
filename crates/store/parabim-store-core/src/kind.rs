//! The fixed catalog of record kinds and their positional field layouts.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Every record kind the store knows about. The field order returned by
/// [`RecordKind::field_names`] is the on-record order and never changes.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum RecordKind {
    // Representation context
    GeometricRepresentationContext,

    // Geometry primitives
    CartesianPoint,
    Direction,
    Axis2Placement2D,
    Axis2Placement3D,
    LocalPlacement,

    // Solids
    RectangleProfileDef,
    ExtrudedAreaSolid,
    BooleanResult,

    // Shapes
    ShapeRepresentation,
    ProductDefinitionShape,

    // Element definitions (types)
    WallType,
    SlabType,

    // Element occurrences
    Wall,
    Slab,
}

const CONTEXT_FIELDS: &[&str] = &[
    "ContextIdentifier",
    "ContextType",
    "CoordinateSpaceDimension",
    "Precision",
    "WorldCoordinateSystem",
    "TrueNorth",
];
const TYPE_FIELDS: &[&str] = &[
    "GlobalId",
    "Name",
    "Description",
    "RepresentationMaps",
    "PredefinedType",
];
const OCCURRENCE_FIELDS: &[&str] = &[
    "GlobalId",
    "Name",
    "ObjectType",
    "ObjectPlacement",
    "Representation",
    "Tag",
];

impl RecordKind {
    pub fn name(&self) -> &'static str {
        match self {
            RecordKind::GeometricRepresentationContext => "GeometricRepresentationContext",
            RecordKind::CartesianPoint => "CartesianPoint",
            RecordKind::Direction => "Direction",
            RecordKind::Axis2Placement2D => "Axis2Placement2D",
            RecordKind::Axis2Placement3D => "Axis2Placement3D",
            RecordKind::LocalPlacement => "LocalPlacement",
            RecordKind::RectangleProfileDef => "RectangleProfileDef",
            RecordKind::ExtrudedAreaSolid => "ExtrudedAreaSolid",
            RecordKind::BooleanResult => "BooleanResult",
            RecordKind::ShapeRepresentation => "ShapeRepresentation",
            RecordKind::ProductDefinitionShape => "ProductDefinitionShape",
            RecordKind::WallType => "WallType",
            RecordKind::SlabType => "SlabType",
            RecordKind::Wall => "Wall",
            RecordKind::Slab => "Slab",
        }
    }

    pub fn field_names(&self) -> &'static [&'static str] {
        match self {
            RecordKind::GeometricRepresentationContext => CONTEXT_FIELDS,
            RecordKind::CartesianPoint => &["Coordinates"],
            RecordKind::Direction => &["DirectionRatios"],
            RecordKind::Axis2Placement2D => &["Location", "RefDirection"],
            RecordKind::Axis2Placement3D => &["Location", "Axis", "RefDirection"],
            RecordKind::LocalPlacement => &["PlacementRelTo", "RelativePlacement"],
            RecordKind::RectangleProfileDef => {
                &["ProfileType", "ProfileName", "Position", "XDim", "YDim"]
            }
            RecordKind::ExtrudedAreaSolid => {
                &["SweptArea", "Position", "ExtrudedDirection", "Depth"]
            }
            RecordKind::BooleanResult => &["Operator", "FirstOperand", "SecondOperand"],
            RecordKind::ShapeRepresentation => &[
                "ContextOfItems",
                "RepresentationIdentifier",
                "RepresentationType",
                "Items",
            ],
            RecordKind::ProductDefinitionShape => &["Name", "Description", "Representations"],
            RecordKind::WallType | RecordKind::SlabType => TYPE_FIELDS,
            RecordKind::Wall | RecordKind::Slab => OCCURRENCE_FIELDS,
        }
    }

    #[inline]
    pub fn arity(&self) -> usize {
        self.field_names().len()
    }

    /// Position of a named field within this kind's layout.
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.field_names().iter().position(|f| *f == name)
    }

    /// Kinds that may stand in as a solid body in a shape representation.
    pub fn is_solid(&self) -> bool {
        matches!(
            self,
            RecordKind::ExtrudedAreaSolid | RecordKind::BooleanResult
        )
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_lookup_follows_layout() {
        assert_eq!(RecordKind::Axis2Placement3D.arity(), 3);
        assert_eq!(
            RecordKind::Axis2Placement3D.field_index("RefDirection"),
            Some(2)
        );
        assert_eq!(RecordKind::Wall.field_index("ObjectPlacement"), Some(3));
        assert_eq!(RecordKind::Direction.field_index("Coordinates"), None);
    }

    #[test]
    fn kind_serializes_by_name() {
        let s = serde_json::to_string(&RecordKind::ExtrudedAreaSolid).unwrap();
        assert_eq!(s, "\"ExtrudedAreaSolid\"");
    }
}
