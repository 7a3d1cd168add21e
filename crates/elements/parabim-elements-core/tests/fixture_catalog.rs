use approx::assert_relative_eq;
use parabim_elements_core::{
    Element, ElementType, PlacementFields, RecordStore, SlabParams, SlabType, Transformation,
    WallParams, WallType,
};
use parabim_test_fixtures::{element_types, transformations};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", content = "params", rename_all = "lowercase")]
enum CatalogEntry {
    Wall(WallParams),
    Slab(SlabParams),
}

#[derive(Debug, Deserialize)]
struct Step {
    label: String,
    transformation: Transformation,
    expected: PlacementFields,
}

fn open_store() -> RecordStore {
    let mut store = RecordStore::default();
    store.initialize().expect("initialize");
    store
}

#[test]
fn every_catalog_type_builds_and_places() {
    let mut store = open_store();
    for key in element_types().keys() {
        let entry: CatalogEntry = element_types().load(&key).expect("catalog entry");
        let before = store.len();
        let placement = match entry {
            CatalogEntry::Wall(params) => {
                let mut ty = WallType::new(&mut store, params).expect("wall type");
                let mut wall = ty.create_element(&mut store).expect("wall");
                wall.set_transformation(Transformation::from_position([1.0, 0.0, 0.0]));
                wall.update(&mut store).expect("update");
                wall.core().placement().handle().clone()
            }
            CatalogEntry::Slab(params) => {
                let mut ty = SlabType::new(&mut store, params).expect("slab type");
                let mut slab = ty.create_element(&mut store).expect("slab");
                slab.set_transformation(Transformation::from_position([1.0, 0.0, 0.0]));
                slab.update(&mut store).expect("update");
                slab.core().placement().handle().clone()
            }
        };
        assert!(store.len() > before, "{key} wrote no records");
        let fields = PlacementFields::read(&store, &placement).expect("placement");
        assert_relative_eq!(fields.location[0], 1.0, epsilon = 1e-12);
    }
}

#[test]
fn transformation_sequence_matches_expected_placements() {
    let steps: Vec<Step> = transformations().load("placement-sequence").expect("sequence");
    assert!(!steps.is_empty());

    let mut store = open_store();
    let params: WallParams = match element_types().load("wall-basic").expect("wall") {
        CatalogEntry::Wall(p) => p,
        other => panic!("expected a wall entry, got {other:?}"),
    };
    let mut ty = WallType::new(&mut store, params).expect("wall type");
    let mut wall = ty.create_element(&mut store).expect("wall");

    for step in steps {
        wall.set_transformation(step.transformation);
        wall.update(&mut store).expect("update");
        let stored = PlacementFields::read(&store, wall.core().placement().handle())
            .expect("placement");
        for i in 0..3 {
            assert_relative_eq!(stored.location[i], step.expected.location[i], epsilon = 1e-9);
            assert_relative_eq!(stored.axis[i], step.expected.axis[i], epsilon = 1e-9);
            assert_relative_eq!(
                stored.ref_direction[i],
                step.expected.ref_direction[i],
                epsilon = 1e-9
            );
        }
        println!("ok: {}", step.label);
    }
}
