//! Straight walls: a single rectangular extrusion.

use parabim_store_core::{RecordId, RecordKind, RecordStore};
use serde::{Deserialize, Serialize};

use crate::element::{Element, ElementCore};
use crate::element_type::{ElementType, TypeCore};
use crate::error::{positive, ElementError, Result};
use crate::geometry::{Body, Extrusion, ExtrusionParams};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WallParams {
    pub name: String,
    pub length: f64,
    pub thickness: f64,
    pub height: f64,
}

impl WallParams {
    pub fn validate(&self) -> Result<()> {
        positive("length", self.length)?;
        positive("thickness", self.thickness)?;
        positive("height", self.height)?;
        Ok(())
    }

    /// The wall runs along local +X from the origin and rises along +Z.
    fn extrusion(&self) -> ExtrusionParams {
        ExtrusionParams {
            x_dim: self.length,
            y_dim: self.thickness,
            depth: self.height,
            offset: [self.length / 2.0, 0.0, 0.0],
        }
    }
}

#[derive(Clone, Debug)]
pub struct WallType {
    core: TypeCore,
    params: WallParams,
    body: RecordId,
}

impl WallType {
    pub fn new(store: &mut RecordStore, params: WallParams) -> Result<Self> {
        params.validate()?;
        let body: Body = Extrusion::create(store, params.extrusion())?.into();
        let body_id = body.id();
        let core = TypeCore::build(store, RecordKind::WallType, &params.name, "STANDARD", vec![body])?;
        Ok(Self {
            core,
            params,
            body: body_id,
        })
    }

    pub fn params(&self) -> &WallParams {
        &self.params
    }

    /// Replace the parameters; records change on the next `update`.
    pub fn set_params(&mut self, params: WallParams) -> Result<()> {
        params.validate()?;
        match self.core.body_mut(self.body) {
            Some(Body::Extrusion(extrusion)) => extrusion.set_params(params.extrusion())?,
            _ => {
                return Err(ElementError::malformed_state(format!(
                    "wall type body {} is not an extrusion",
                    self.body
                )))
            }
        }
        self.params = params;
        Ok(())
    }
}

impl ElementType for WallType {
    type Element = Wall;

    fn core(&self) -> &TypeCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut TypeCore {
        &mut self.core
    }

    fn create_element(&mut self, store: &mut RecordStore) -> Result<Wall> {
        let name = format!("{} {}", self.params.name, self.core.instances().len() + 1);
        let core = ElementCore::create(store, &self.core, RecordKind::Wall, &name)?;
        self.core.register_instance(core.id());
        Ok(Wall { core })
    }
}

#[derive(Clone, Debug)]
pub struct Wall {
    core: ElementCore,
}

impl Element for Wall {
    fn core(&self) -> &ElementCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ElementCore {
        &mut self.core
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parabim_store_core::Value;

    fn params(length: f64) -> WallParams {
        WallParams {
            name: "Basic wall".into(),
            length,
            thickness: 0.2,
            height: 2.7,
        }
    }

    #[test]
    fn set_params_then_update_rewrites_body() {
        let mut store = RecordStore::default();
        store.initialize().unwrap();
        let mut wall_type = WallType::new(&mut store, params(4.0)).unwrap();
        let ids_before = store.len();
        wall_type.set_params(params(6.0)).unwrap();
        wall_type.update(&mut store).unwrap();
        assert_eq!(store.len(), ids_before);

        let body = wall_type.core().geometries().values().next().unwrap();
        let solid = store.read(body.handle()).unwrap();
        let profile = store.read(solid.handle_field("SweptArea")).unwrap();
        assert_eq!(profile.field("XDim").and_then(Value::as_real), Some(6.0));
    }

    #[test]
    fn invalid_params_leave_type_untouched() {
        let mut store = RecordStore::default();
        store.initialize().unwrap();
        let mut wall_type = WallType::new(&mut store, params(4.0)).unwrap();
        assert!(wall_type.set_params(params(-1.0)).is_err());
        assert_eq!(wall_type.params().length, 4.0);
        assert!(WallType::new(&mut store, params(0.0)).is_err());
    }

    #[test]
    fn instances_are_named_and_tracked() {
        let mut store = RecordStore::default();
        store.initialize().unwrap();
        let mut wall_type = WallType::new(&mut store, params(4.0)).unwrap();
        let a = wall_type.create_element(&mut store).unwrap();
        let b = wall_type.create_element(&mut store).unwrap();
        assert_eq!(wall_type.core().instances(), &[a.core().id(), b.core().id()]);
        let record = store.read(b.core().record()).unwrap();
        assert_eq!(
            record.field("Name").and_then(Value::as_text),
            Some("Basic wall 2")
        );
        assert_ne!(a.core().global_id(), b.core().global_id());
    }
}
