//! Geometry bodies: record subgraphs describing solids.
//!
//! A body owns every record it creates. Parameters live on the body and are
//! pushed into the records by [`Body::write`].

use parabim_store_core::{Handle, RecordId, RecordKind, RecordStore, Value};
use serde::{Deserialize, Serialize};

use crate::error::{positive, Result};
use crate::placement::set_reals;

/// Rectangle profile extruded along the local Z axis.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExtrusionParams {
    pub x_dim: f64,
    pub y_dim: f64,
    pub depth: f64,
    /// Location of the profile centre in body coordinates
    #[serde(default)]
    pub offset: [f64; 3],
}

impl ExtrusionParams {
    pub fn validate(&self) -> Result<()> {
        positive("x_dim", self.x_dim)?;
        positive("y_dim", self.y_dim)?;
        positive("depth", self.depth)?;
        if self.offset.iter().any(|v| !v.is_finite()) {
            return Err(crate::ElementError::invalid("offset must be finite"));
        }
        Ok(())
    }
}

#[derive(Clone, Debug)]
pub struct Extrusion {
    params: ExtrusionParams,
    solid: Handle,
    profile: Handle,
    origin: Handle,
}

impl Extrusion {
    pub fn create(store: &mut RecordStore, params: ExtrusionParams) -> Result<Self> {
        params.validate()?;
        let profile_location =
            store.insert(RecordKind::CartesianPoint, vec![Value::reals(&[0.0, 0.0])])?;
        let profile_position = store.insert(
            RecordKind::Axis2Placement2D,
            vec![Value::Ref(profile_location), Value::Null],
        )?;
        let profile = store.insert(
            RecordKind::RectangleProfileDef,
            vec![
                Value::label("AREA"),
                Value::Null,
                Value::Ref(profile_position),
                Value::Real(params.x_dim),
                Value::Real(params.y_dim),
            ],
        )?;
        let origin = store.insert(RecordKind::CartesianPoint, vec![Value::reals(&params.offset)])?;
        let position = store.insert(
            RecordKind::Axis2Placement3D,
            vec![Value::Ref(origin.clone()), Value::Null, Value::Null],
        )?;
        let direction = store.insert(RecordKind::Direction, vec![Value::reals(&[0.0, 0.0, 1.0])])?;
        let solid = store.insert(
            RecordKind::ExtrudedAreaSolid,
            vec![
                Value::Ref(profile.clone()),
                Value::Ref(position),
                Value::Ref(direction),
                Value::Real(params.depth),
            ],
        )?;
        Ok(Self {
            params,
            solid,
            profile,
            origin,
        })
    }

    pub fn params(&self) -> &ExtrusionParams {
        &self.params
    }

    /// Replace the parameters; records change on the next `write`.
    pub fn set_params(&mut self, params: ExtrusionParams) -> Result<()> {
        params.validate()?;
        self.params = params;
        Ok(())
    }

    pub fn handle(&self) -> &Handle {
        &self.solid
    }

    pub fn write(&self, store: &mut RecordStore) -> Result<()> {
        let mut profile = store
            .read_as(&self.profile, RecordKind::RectangleProfileDef)?
            .clone();
        profile.set_field("XDim", self.params.x_dim)?;
        profile.set_field("YDim", self.params.y_dim)?;
        store.write(profile)?;

        set_reals(
            store,
            &self.origin,
            RecordKind::CartesianPoint,
            "Coordinates",
            &self.params.offset,
        )?;

        let mut solid = store
            .read_as(&self.solid, RecordKind::ExtrudedAreaSolid)?
            .clone();
        solid.set_field("Depth", self.params.depth)?;
        store.write(solid)?;
        Ok(())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BooleanOperator {
    Difference,
    Union,
    Intersection,
}

impl BooleanOperator {
    pub fn label(&self) -> &'static str {
        match self {
            BooleanOperator::Difference => "DIFFERENCE",
            BooleanOperator::Union => "UNION",
            BooleanOperator::Intersection => "INTERSECTION",
        }
    }
}

/// Two bodies combined by a boolean operator.
#[derive(Clone, Debug)]
pub struct BooleanSolid {
    operator: BooleanOperator,
    first: Box<Body>,
    second: Box<Body>,
    result: Handle,
}

impl BooleanSolid {
    pub fn create(
        store: &mut RecordStore,
        operator: BooleanOperator,
        first: Body,
        second: Body,
    ) -> Result<Self> {
        let result = store.insert(
            RecordKind::BooleanResult,
            vec![
                Value::label(operator.label()),
                Value::Ref(first.handle().clone()),
                Value::Ref(second.handle().clone()),
            ],
        )?;
        Ok(Self {
            operator,
            first: Box::new(first),
            second: Box::new(second),
            result,
        })
    }

    pub fn operator(&self) -> BooleanOperator {
        self.operator
    }

    pub fn operands(&self) -> (&Body, &Body) {
        (&self.first, &self.second)
    }

    pub fn operands_mut(&mut self) -> (&mut Body, &mut Body) {
        (&mut self.first, &mut self.second)
    }

    pub fn handle(&self) -> &Handle {
        &self.result
    }

    pub fn write(&self, store: &mut RecordStore) -> Result<()> {
        self.first.write(store)?;
        self.second.write(store)?;
        let mut result = store
            .read_as(&self.result, RecordKind::BooleanResult)?
            .clone();
        result.set_field("Operator", Value::label(self.operator.label()))?;
        result.set_field("FirstOperand", self.first.handle().clone())?;
        result.set_field("SecondOperand", self.second.handle().clone())?;
        store.write(result)?;
        Ok(())
    }
}

/// A geometry owner registered in a type's `geometries` map.
#[derive(Clone, Debug)]
pub enum Body {
    Extrusion(Extrusion),
    Boolean(BooleanSolid),
}

impl Body {
    /// Root solid record.
    pub fn handle(&self) -> &Handle {
        match self {
            Body::Extrusion(e) => e.handle(),
            Body::Boolean(b) => b.handle(),
        }
    }

    pub fn id(&self) -> RecordId {
        self.handle().id()
    }

    /// "SweptSolid" or "CSG", as used in a shape representation.
    pub fn representation_type(&self) -> &'static str {
        match self {
            Body::Extrusion(_) => "SweptSolid",
            Body::Boolean(_) => "CSG",
        }
    }

    /// Push current parameters into the body's records.
    pub fn write(&self, store: &mut RecordStore) -> Result<()> {
        match self {
            Body::Extrusion(e) => e.write(store),
            Body::Boolean(b) => b.write(store),
        }
    }
}

impl From<Extrusion> for Body {
    fn from(e: Extrusion) -> Self {
        Body::Extrusion(e)
    }
}

impl From<BooleanSolid> for Body {
    fn from(b: BooleanSolid) -> Self {
        Body::Boolean(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ElementError;

    fn store() -> RecordStore {
        let mut store = RecordStore::default();
        store.initialize().unwrap();
        store
    }

    fn box_params(x: f64) -> ExtrusionParams {
        ExtrusionParams {
            x_dim: x,
            y_dim: 0.2,
            depth: 3.0,
            offset: [0.0; 3],
        }
    }

    #[test]
    fn extrusion_writes_solid_graph() {
        let mut store = store();
        let before = store.len();
        let e = Extrusion::create(&mut store, box_params(4.0)).unwrap();
        assert_eq!(store.len(), before + 7);
        let solid = store.read_as(e.handle(), RecordKind::ExtrudedAreaSolid).unwrap();
        assert_eq!(solid.field("Depth").and_then(Value::as_real), Some(3.0));
        let profile = store.read(solid.handle_field("SweptArea")).unwrap();
        assert_eq!(profile.field("XDim").and_then(Value::as_real), Some(4.0));
    }

    #[test]
    fn extrusion_rejects_degenerate_params() {
        let mut store = store();
        let err = Extrusion::create(&mut store, box_params(0.0)).unwrap_err();
        assert!(matches!(err, ElementError::InvalidParams { .. }));
        let mut e = Extrusion::create(&mut store, box_params(1.0)).unwrap();
        assert!(e.set_params(box_params(f64::INFINITY)).is_err());
        assert_eq!(e.params().x_dim, 1.0);
    }

    #[test]
    fn set_params_then_write_updates_records() {
        let mut store = store();
        let mut e = Extrusion::create(&mut store, box_params(1.0)).unwrap();
        e.set_params(ExtrusionParams {
            depth: 2.5,
            offset: [0.5, 0.1, 0.0],
            ..box_params(6.0)
        })
        .unwrap();
        e.write(&mut store).unwrap();
        let solid = store.read(e.handle()).unwrap();
        assert_eq!(solid.field("Depth").and_then(Value::as_real), Some(2.5));
        let profile = store.read(solid.handle_field("SweptArea")).unwrap();
        assert_eq!(profile.field("XDim").and_then(Value::as_real), Some(6.0));
        let position = store.read(solid.handle_field("Position")).unwrap();
        let origin = store.read(position.handle_field("Location")).unwrap();
        assert_eq!(
            origin.field("Coordinates").and_then(Value::as_reals),
            Some(vec![0.5, 0.1, 0.0])
        );
    }

    #[test]
    fn boolean_references_operands() {
        let mut store = store();
        let a = Extrusion::create(&mut store, box_params(4.0)).unwrap();
        let b = Extrusion::create(&mut store, box_params(1.0)).unwrap();
        let (a_id, b_id) = (a.handle().id(), b.handle().id());
        let body = Body::from(
            BooleanSolid::create(&mut store, BooleanOperator::Difference, a.into(), b.into())
                .unwrap(),
        );
        assert_eq!(body.representation_type(), "CSG");
        let record = store.read(body.handle()).unwrap();
        assert_eq!(record.references(), vec![a_id, b_id]);
        assert_eq!(
            record.field("Operator").and_then(Value::as_text),
            Some("DIFFERENCE")
        );
        body.write(&mut store).unwrap();
    }
}
