//! Placement records of an element.
//!
//! Graph written per element:
//! `LocalPlacement -> Axis2Placement3D -> (CartesianPoint, Direction, Direction)`.
//! The same records are rewritten in place on every update, so ids stay put.

use parabim_store_core::{Handle, RecordKind, RecordStore, Value};
use serde::{Deserialize, Serialize};

use crate::error::{ElementError, Result};

/// Origin and orientation in store convention.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlacementFields {
    pub location: [f64; 3],
    /// Local Z (up) direction
    pub axis: [f64; 3],
    /// Local X direction
    pub ref_direction: [f64; 3],
}

impl PlacementFields {
    /// Read the fields back from a `LocalPlacement` record.
    pub fn read(store: &RecordStore, local_placement: &Handle) -> Result<Self> {
        let local = store.read_as(local_placement, RecordKind::LocalPlacement)?;
        let axis2 = store.read_as(
            local.handle_field("RelativePlacement"),
            RecordKind::Axis2Placement3D,
        )?;
        let location = read_triple(store, axis2, "Location", RecordKind::CartesianPoint, "Coordinates")?;
        let axis = read_triple(store, axis2, "Axis", RecordKind::Direction, "DirectionRatios")?;
        let ref_direction = read_triple(
            store,
            axis2,
            "RefDirection",
            RecordKind::Direction,
            "DirectionRatios",
        )?;
        Ok(Self {
            location,
            axis,
            ref_direction,
        })
    }
}

fn read_triple(
    store: &RecordStore,
    owner: &parabim_store_core::Record,
    field: &str,
    kind: RecordKind,
    value_field: &str,
) -> Result<[f64; 3]> {
    let record = store.read_as(owner.handle_field(field), kind)?;
    let values = record
        .field(value_field)
        .and_then(Value::as_reals)
        .unwrap_or_default();
    <[f64; 3]>::try_from(values.as_slice()).map_err(|_| {
        ElementError::invalid(format!(
            "{} {} does not hold three components",
            record.kind, record.id
        ))
    })
}

#[derive(Clone, Debug)]
pub struct Placement {
    local: Handle,
    axis2: Handle,
    location: Handle,
    axis: Handle,
    ref_direction: Handle,
}

impl Placement {
    pub fn create(store: &mut RecordStore, fields: &PlacementFields) -> Result<Self> {
        let location = store.insert(
            RecordKind::CartesianPoint,
            vec![Value::reals(&fields.location)],
        )?;
        let axis = store.insert(RecordKind::Direction, vec![Value::reals(&fields.axis)])?;
        let ref_direction = store.insert(
            RecordKind::Direction,
            vec![Value::reals(&fields.ref_direction)],
        )?;
        let axis2 = store.insert(
            RecordKind::Axis2Placement3D,
            vec![
                Value::Ref(location.clone()),
                Value::Ref(axis.clone()),
                Value::Ref(ref_direction.clone()),
            ],
        )?;
        let local = store.insert(
            RecordKind::LocalPlacement,
            vec![Value::Null, Value::Ref(axis2.clone())],
        )?;
        Ok(Self {
            local,
            axis2,
            location,
            axis,
            ref_direction,
        })
    }

    /// The `LocalPlacement` record an element points at.
    pub fn handle(&self) -> &Handle {
        &self.local
    }

    pub fn location(&self) -> &Handle {
        &self.location
    }

    /// Overwrite every field of the placement graph.
    pub fn write(&self, store: &mut RecordStore, fields: &PlacementFields) -> Result<()> {
        set_reals(store, &self.location, RecordKind::CartesianPoint, "Coordinates", &fields.location)?;
        set_reals(store, &self.axis, RecordKind::Direction, "DirectionRatios", &fields.axis)?;
        set_reals(
            store,
            &self.ref_direction,
            RecordKind::Direction,
            "DirectionRatios",
            &fields.ref_direction,
        )?;

        let mut axis2 = store.read_as(&self.axis2, RecordKind::Axis2Placement3D)?.clone();
        axis2.set_field("Location", self.location.clone())?;
        axis2.set_field("Axis", self.axis.clone())?;
        axis2.set_field("RefDirection", self.ref_direction.clone())?;
        store.write(axis2)?;

        let mut local = store.read_as(&self.local, RecordKind::LocalPlacement)?.clone();
        local.set_field("RelativePlacement", self.axis2.clone())?;
        store.write(local)?;
        Ok(())
    }
}

pub(crate) fn set_reals(
    store: &mut RecordStore,
    handle: &Handle,
    kind: RecordKind,
    field: &str,
    values: &[f64],
) -> Result<()> {
    let mut record = store.read_as(handle, kind)?.clone();
    record.set_field(field, Value::reals(values))?;
    store.write(record)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_then_rewrite_keeps_ids() {
        let mut store = RecordStore::default();
        store.initialize().unwrap();
        let first = PlacementFields {
            location: [1.0, 2.0, 3.0],
            axis: [0.0, 0.0, 1.0],
            ref_direction: [1.0, 0.0, 0.0],
        };
        let placement = Placement::create(&mut store, &first).unwrap();
        assert_eq!(PlacementFields::read(&store, placement.handle()).unwrap(), first);

        let before = store.len();
        let second = PlacementFields {
            location: [-4.0, 0.5, 0.0],
            axis: [0.0, 1.0, 0.0],
            ref_direction: [0.0, 0.0, 1.0],
        };
        placement.write(&mut store, &second).unwrap();
        assert_eq!(store.len(), before);
        assert_eq!(PlacementFields::read(&store, placement.handle()).unwrap(), second);
    }

    #[test]
    fn write_after_delete_reports_not_found() {
        let mut store = RecordStore::default();
        store.initialize().unwrap();
        let fields = PlacementFields {
            location: [0.0; 3],
            axis: [0.0, 0.0, 1.0],
            ref_direction: [1.0, 0.0, 0.0],
        };
        let placement = Placement::create(&mut store, &fields).unwrap();
        store.delete(placement.handle(), true).unwrap();
        assert!(matches!(
            placement.write(&mut store, &fields),
            Err(ElementError::Store(parabim_store_core::StoreError::NotFound { .. }))
        ));
    }
}
