//! Slabs: a rectangular plate, optionally with a rectangular opening cut
//! through it.

use log::trace;
use parabim_store_core::{RecordKind, RecordStore};
use serde::{Deserialize, Serialize};

use crate::element::{Element, ElementCore};
use crate::element_type::{ElementType, TypeCore};
use crate::error::{positive, ElementError, Result};
use crate::geometry::{Body, BooleanOperator, BooleanSolid, Extrusion, ExtrusionParams};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OpeningParams {
    pub width: f64,
    pub length: f64,
    /// Opening centre, measured from the slab corner
    pub offset: [f64; 2],
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SlabParams {
    pub name: String,
    pub width: f64,
    pub length: f64,
    pub thickness: f64,
    #[serde(default)]
    pub opening: Option<OpeningParams>,
}

impl SlabParams {
    pub fn validate(&self) -> Result<()> {
        positive("width", self.width)?;
        positive("length", self.length)?;
        positive("thickness", self.thickness)?;
        if let Some(opening) = &self.opening {
            positive("opening width", opening.width)?;
            positive("opening length", opening.length)?;
            let [cx, cy] = opening.offset;
            let inside = cx - opening.width / 2.0 >= 0.0
                && cx + opening.width / 2.0 <= self.width
                && cy - opening.length / 2.0 >= 0.0
                && cy + opening.length / 2.0 <= self.length;
            if !inside {
                return Err(ElementError::invalid(
                    "opening must lie within the slab outline",
                ));
            }
        }
        Ok(())
    }

    /// Plate from the origin along +X (width) and +Y (length), thickness up.
    fn plate(&self) -> ExtrusionParams {
        ExtrusionParams {
            x_dim: self.width,
            y_dim: self.length,
            depth: self.thickness,
            offset: [self.width / 2.0, self.length / 2.0, 0.0],
        }
    }
}

impl OpeningParams {
    fn cutter(&self, thickness: f64) -> ExtrusionParams {
        ExtrusionParams {
            x_dim: self.width,
            y_dim: self.length,
            depth: thickness,
            offset: [self.offset[0], self.offset[1], 0.0],
        }
    }
}

/// Slab type. Its shape is fixed at construction.
#[derive(Clone, Debug)]
pub struct SlabType {
    core: TypeCore,
    params: SlabParams,
}

impl SlabType {
    pub fn new(store: &mut RecordStore, params: SlabParams) -> Result<Self> {
        params.validate()?;
        let plate: Body = Extrusion::create(store, params.plate())?.into();
        let body: Body = match &params.opening {
            Some(opening) => {
                let cutter = Extrusion::create(store, opening.cutter(params.thickness))?;
                BooleanSolid::create(store, BooleanOperator::Difference, plate, cutter.into())?
                    .into()
            }
            None => plate,
        };
        let core = TypeCore::build(store, RecordKind::SlabType, &params.name, "FLOOR", vec![body])?;
        Ok(Self { core, params })
    }

    pub fn params(&self) -> &SlabParams {
        &self.params
    }
}

impl ElementType for SlabType {
    type Element = Slab;

    fn core(&self) -> &TypeCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut TypeCore {
        &mut self.core
    }

    fn create_element(&mut self, store: &mut RecordStore) -> Result<Slab> {
        let name = format!("{} {}", self.params.name, self.core.instances().len() + 1);
        let core = ElementCore::create(store, &self.core, RecordKind::Slab, &name)?;
        self.core.register_instance(core.id());
        Ok(Slab { core })
    }

    fn update(&mut self, _store: &mut RecordStore) -> Result<()> {
        trace!("slab type {} has an immutable shape", self.core.definition().id());
        Ok(())
    }
}

#[derive(Clone, Debug)]
pub struct Slab {
    core: ElementCore,
}

impl Element for Slab {
    fn core(&self) -> &ElementCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ElementCore {
        &mut self.core
    }
}
