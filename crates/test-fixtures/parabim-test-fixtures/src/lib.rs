//! Shared JSON fixtures for the parabim test suites.
//!
//! `fixtures/manifest.json` maps each catalog (a top-level section) to its
//! entries, each entry naming a file relative to `fixtures/`.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;

type Manifest = HashMap<String, BTreeMap<String, String>>;

static MANIFEST: Lazy<Manifest> = Lazy::new(|| {
    let raw = include_str!("../../../../fixtures/manifest.json");
    serde_json::from_str(raw).expect("fixtures manifest should parse")
});

fn fixtures_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../../fixtures")
}

/// One manifest section.
#[derive(Clone, Copy, Debug)]
pub struct Catalog {
    section: &'static str,
    label: &'static str,
}

/// Element type entries: `{ "kind": "wall" | "slab", "params": {..} }`.
pub fn element_types() -> Catalog {
    Catalog {
        section: "element-types",
        label: "element type",
    }
}

/// Transformation sequences with the placement each step must produce.
pub fn transformations() -> Catalog {
    Catalog {
        section: "transformations",
        label: "transformation",
    }
}

impl Catalog {
    fn entries(&self) -> Option<&'static BTreeMap<String, String>> {
        MANIFEST.get(self.section)
    }

    /// Entry names, sorted.
    pub fn keys(&self) -> Vec<String> {
        self.entries()
            .map(|entries| entries.keys().cloned().collect())
            .unwrap_or_default()
    }

    pub fn path(&self, name: &str) -> Result<PathBuf> {
        let rel = self
            .entries()
            .and_then(|entries| entries.get(name))
            .ok_or_else(|| anyhow!("unknown {} fixture '{name}'", self.label))?;
        Ok(fixtures_root().join(rel))
    }

    pub fn json(&self, name: &str) -> Result<String> {
        let path = self.path(name)?;
        fs::read_to_string(&path)
            .with_context(|| format!("failed to read fixture at {}", path.display()))
    }

    pub fn load<T: DeserializeOwned>(&self, name: &str) -> Result<T> {
        let text = self.json(name)?;
        serde_json::from_str(&text)
            .with_context(|| format!("failed to parse {} fixture '{name}'", self.label))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manifest_entries_exist_on_disk() {
        for catalog in [element_types(), transformations()] {
            let keys = catalog.keys();
            assert!(!keys.is_empty(), "{}", catalog.section);
            for key in keys {
                assert!(catalog.path(&key).unwrap().is_file(), "{key}");
            }
        }
    }

    #[test]
    fn keys_are_sorted() {
        let keys = element_types().keys();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
    }

    #[test]
    fn unknown_fixture_is_an_error() {
        let err = element_types().json("no-such-type").unwrap_err();
        assert!(err.to_string().contains("element type"));
        assert!(transformations().path("wall-basic").is_err());
    }
}
