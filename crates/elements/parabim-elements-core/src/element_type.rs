//! Element types: owners of shared geometry and the shape records built on it.

use indexmap::IndexMap;
use log::debug;
use parabim_store_core::{Handle, RecordId, RecordKind, RecordStore, Value};

use crate::element::Element;
use crate::error::{require_open, ElementError, Result};
use crate::geometry::Body;
use crate::guid::new_guid;

/// Records and bookkeeping shared by every element type.
///
/// Graph: `definition -> ProductDefinitionShape -> ShapeRepresentation -> bodies`.
/// The representation also references the store context, which cascading
/// deletes never touch.
#[derive(Clone, Debug)]
pub struct TypeCore {
    name: String,
    global_id: String,
    geometries: IndexMap<RecordId, Body>,
    representation: Handle,
    shape: Handle,
    definition: Handle,
    instances: Vec<RecordId>,
}

impl TypeCore {
    /// Register `bodies` and write the shape and definition records.
    pub fn build(
        store: &mut RecordStore,
        definition_kind: RecordKind,
        name: &str,
        predefined_type: &str,
        bodies: Vec<Body>,
    ) -> Result<Self> {
        require_open(store, "type construction")?;
        if bodies.is_empty() {
            return Err(ElementError::invalid("an element type needs at least one body"));
        }
        let geometries: IndexMap<RecordId, Body> =
            bodies.into_iter().map(|b| (b.id(), b)).collect();

        let context = store.context_handle()?;
        let representation = store.insert(
            RecordKind::ShapeRepresentation,
            vec![
                Value::Ref(context),
                Value::text("Body"),
                Value::text(representation_type(&geometries)),
                Value::refs(geometries.values().map(|b| b.handle().clone())),
            ],
        )?;
        let shape = store.insert(
            RecordKind::ProductDefinitionShape,
            vec![Value::Null, Value::Null, Value::refs([representation.clone()])],
        )?;
        let global_id = new_guid();
        let definition = store.insert(
            definition_kind,
            vec![
                Value::text(global_id.as_str()),
                Value::text(name),
                Value::Null,
                Value::refs([shape.clone()]),
                Value::label(predefined_type),
            ],
        )?;
        debug!(
            "{definition_kind} {} '{name}' built with {} bodies",
            definition.id(),
            geometries.len()
        );
        Ok(Self {
            name: name.to_string(),
            global_id,
            geometries,
            representation,
            shape,
            definition,
            instances: Vec::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn global_id(&self) -> &str {
        &self.global_id
    }

    pub fn definition(&self) -> &Handle {
        &self.definition
    }

    /// The product definition shape every instance embeds.
    pub fn shape(&self) -> &Handle {
        &self.shape
    }

    pub fn representation(&self) -> &Handle {
        &self.representation
    }

    pub fn geometries(&self) -> &IndexMap<RecordId, Body> {
        &self.geometries
    }

    pub fn geometry_ids(&self) -> impl Iterator<Item = RecordId> + '_ {
        self.geometries.keys().copied()
    }

    pub fn body_mut(&mut self, id: RecordId) -> Option<&mut Body> {
        self.geometries.get_mut(&id)
    }

    /// Element records created from this type, in creation order.
    pub fn instances(&self) -> &[RecordId] {
        &self.instances
    }

    pub(crate) fn register_instance(&mut self, id: RecordId) {
        self.instances.push(id);
    }

    /// Rewrite bodies, then the representation and shape records that
    /// aggregate them.
    pub fn rewrite_shape(&self, store: &mut RecordStore) -> Result<()> {
        require_open(store, "type update")?;
        for body in self.geometries.values() {
            body.write(store)?;
        }
        let mut representation = store
            .read_as(&self.representation, RecordKind::ShapeRepresentation)?
            .clone();
        representation.set_field(
            "RepresentationType",
            Value::text(representation_type(&self.geometries)),
        )?;
        representation.set_field(
            "Items",
            Value::refs(self.geometries.values().map(|b| b.handle().clone())),
        )?;
        store.write(representation)?;

        let mut shape = store
            .read_as(&self.shape, RecordKind::ProductDefinitionShape)?
            .clone();
        shape.set_field("Representations", Value::refs([self.representation.clone()]))?;
        store.write(shape)?;
        Ok(())
    }

    /// Delete every live instance (placement subgraph, then element record),
    /// then cascade from the definition record through shape and bodies.
    pub fn delete(&mut self, store: &mut RecordStore) -> Result<Vec<RecordId>> {
        require_open(store, "type delete")?;
        let mut deleted = Vec::new();
        // an instance leaves the list only once its records are gone
        for id in self.instances.clone() {
            if store.contains(id) {
                let placement = store.get(id)?.handle_field("ObjectPlacement").cloned();
                deleted.extend(store.delete(placement.as_ref(), true)?);
                deleted.extend(store.delete_id(id, false)?);
            }
            self.instances.retain(|&i| i != id);
        }
        deleted.extend(store.delete(&self.definition, true)?);
        debug!(
            "type {} '{}' deleted ({} records)",
            self.definition.id(),
            self.name,
            deleted.len()
        );
        Ok(deleted)
    }
}

fn representation_type(geometries: &IndexMap<RecordId, Body>) -> &'static str {
    let mut kinds = geometries.values().map(Body::representation_type);
    match kinds.next() {
        Some(first) if kinds.all(|k| k == first) => first,
        _ => "SolidModel",
    }
}

/// A factory for elements sharing one shape.
pub trait ElementType {
    type Element: Element;

    fn core(&self) -> &TypeCore;
    fn core_mut(&mut self) -> &mut TypeCore;

    /// Create and write a new element that references this type's shape.
    fn create_element(&mut self, store: &mut RecordStore) -> Result<Self::Element>;

    /// Re-derive shared records from the current body parameters.
    fn update(&mut self, store: &mut RecordStore) -> Result<()> {
        self.core().rewrite_shape(store)
    }

    fn delete(&mut self, store: &mut RecordStore) -> Result<Vec<RecordId>> {
        self.core_mut().delete(store)
    }
}
