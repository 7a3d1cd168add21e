//! Element instances: a placement of their type's shared shape.

use hashbrown::HashSet;
use log::debug;
use parabim_store_core::{Handle, RecordId, RecordKind, RecordStore, Value};

use crate::element_type::TypeCore;
use crate::error::{require_open, ElementError, Result};
use crate::guid::new_guid;
use crate::placement::Placement;
use crate::transform::{placement_fields, Transformation};

/// State shared by every element kind.
#[derive(Clone, Debug)]
pub struct ElementCore {
    kind: RecordKind,
    type_definition: Handle,
    shape: Handle,
    record: Handle,
    placement: Placement,
    transformation: Transformation,
    /// Body ids of the type; the type owns them
    geometries: HashSet<RecordId>,
    global_id: String,
}

impl ElementCore {
    /// Write a placement at the identity and an element record embedding the
    /// type's shape. Fails before writing anything if the shape is missing.
    pub fn create(
        store: &mut RecordStore,
        element_type: &TypeCore,
        kind: RecordKind,
        name: &str,
    ) -> Result<Self> {
        require_open(store, "element construction")?;
        store.read_as(element_type.shape(), RecordKind::ProductDefinitionShape)?;

        let transformation = Transformation::identity();
        let placement = Placement::create(store, &placement_fields(&transformation))?;
        let global_id = new_guid();
        let record = store.insert(
            kind,
            vec![
                Value::text(global_id.as_str()),
                Value::text(name),
                Value::text(element_type.name()),
                Value::Ref(placement.handle().clone()),
                Value::Ref(element_type.shape().clone()),
                Value::Null,
            ],
        )?;
        debug!("{kind} {} created from type {}", record.id(), element_type.definition().id());
        Ok(Self {
            kind,
            type_definition: element_type.definition().clone(),
            shape: element_type.shape().clone(),
            record,
            placement,
            transformation,
            geometries: element_type.geometry_ids().collect(),
            global_id,
        })
    }

    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    pub fn record(&self) -> &Handle {
        &self.record
    }

    pub fn id(&self) -> RecordId {
        self.record.id()
    }

    pub fn type_definition(&self) -> &Handle {
        &self.type_definition
    }

    pub fn placement(&self) -> &Placement {
        &self.placement
    }

    pub fn geometries(&self) -> &HashSet<RecordId> {
        &self.geometries
    }

    pub fn global_id(&self) -> &str {
        &self.global_id
    }

    pub fn transformation(&self) -> &Transformation {
        &self.transformation
    }

    pub fn set_transformation(&mut self, transformation: Transformation) {
        self.transformation = transformation;
    }

    /// Derive the placement from the current transformation and write the
    /// placement and element records.
    pub fn update(&self, store: &mut RecordStore) -> Result<()> {
        require_open(store, "element update")?;
        if !self.transformation.is_finite() {
            return Err(ElementError::invalid(format!(
                "transformation of {} is not finite",
                self.record.id()
            )));
        }
        self.placement
            .write(store, &placement_fields(&self.transformation))?;

        let mut record = store.read_as(&self.record, self.kind)?.clone();
        record.set_field("ObjectPlacement", self.placement.handle().clone())?;
        record.set_field("Representation", self.shape.clone())?;
        store.write(record)?;
        debug!(
            "{} {} placed at {:?}",
            self.kind,
            self.record.id(),
            self.transformation.position
        );
        Ok(())
    }

    /// Delete the placement subgraph and the element record. The shared
    /// shape stays with the type.
    pub fn delete(&self, store: &mut RecordStore) -> Result<Vec<RecordId>> {
        require_open(store, "element delete")?;
        let mut deleted = store.delete(self.placement.handle(), true)?;
        deleted.extend(store.delete(&self.record, false)?);
        Ok(deleted)
    }
}

/// Capability shared by every element kind.
pub trait Element {
    fn core(&self) -> &ElementCore;
    fn core_mut(&mut self) -> &mut ElementCore;

    fn update(&self, store: &mut RecordStore) -> Result<()> {
        self.core().update(store)
    }

    fn transformation(&self) -> &Transformation {
        self.core().transformation()
    }

    /// Takes effect on the next `update`.
    fn set_transformation(&mut self, transformation: Transformation) {
        self.core_mut().set_transformation(transformation);
    }

    fn delete(&self, store: &mut RecordStore) -> Result<Vec<RecordId>> {
        self.core().delete(store)
    }
}
