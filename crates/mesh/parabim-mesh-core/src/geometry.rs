use indexmap::IndexMap;

use crate::attribute::BufferAttribute;

/// Named attributes of a renderable mesh, kept in insertion order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshGeometry {
    attributes: IndexMap<String, BufferAttribute>,
}

impl MeshGeometry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace; returns the previous attribute under `name`.
    pub fn set_attribute(
        &mut self,
        name: impl Into<String>,
        attribute: BufferAttribute,
    ) -> Option<BufferAttribute> {
        self.attributes.insert(name.into(), attribute)
    }

    pub fn attribute(&self, name: &str) -> Option<&BufferAttribute> {
        self.attributes.get(name)
    }

    pub(crate) fn attribute_mut(&mut self, name: &str) -> Option<&mut BufferAttribute> {
        self.attributes.get_mut(name)
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    /// Removal keeps the order of the remaining attributes.
    pub fn remove_attribute(&mut self, name: &str) -> Option<BufferAttribute> {
        self.attributes.shift_remove(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.attributes.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BufferAttribute)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_insertion_order() {
        let mut g = MeshGeometry::new();
        g.set_attribute("position", BufferAttribute::new(3));
        g.set_attribute("normal", BufferAttribute::new(3));
        g.set_attribute("uv", BufferAttribute::new(2));
        g.remove_attribute("normal");
        assert_eq!(g.names().collect::<Vec<_>>(), vec!["position", "uv"]);
    }
}
