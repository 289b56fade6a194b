//! Resource Store: owns every byte of loaded source text and optional
//! pre-existing source maps.
//!
//! `register` transfers ownership of the passed buffers to the store;
//! nothing outside the store may free them. Dropping the store (normal
//! Rust drop glue on its owning `Vec`) is the Rust equivalent of the
//! "frees all buffers on Context destruction" contract in §4.2 — there is
//! no separate destructor to write.

use crate::span::{PathId, ResourceIndex};

/// `(contents, srcmap)`: two owned byte buffers plus the interned path
/// they were loaded from.
#[derive(Debug)]
pub struct Resource {
    pub path: PathId,
    pub contents: Vec<u8>,
    pub srcmap: Option<Vec<u8>>,
}

/// Append-only, index-stable store of every [`Resource`] read during a
/// compile.
///
/// Indices are dense starting from zero and equal insertion order;
/// emitter source maps index into this order (§3 invariants).
#[derive(Default, Debug)]
pub struct ResourceStore {
    resources: Vec<Resource>,
}

impl ResourceStore {
    pub fn new() -> Self {
        ResourceStore::default()
    }

    /// Append a resource, returning its stable index.
    pub fn register(&mut self, path: PathId, contents: Vec<u8>, srcmap: Option<Vec<u8>>) -> ResourceIndex {
        let index = ResourceIndex::new(u32::try_from(self.resources.len()).unwrap_or(u32::MAX));
        self.resources.push(Resource {
            path,
            contents,
            srcmap,
        });
        index
    }

    pub fn get(&self, index: ResourceIndex) -> &Resource {
        &self.resources[index.as_usize()]
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ResourceIndex, &Resource)> {
        self.resources
            .iter()
            .enumerate()
            .map(|(i, r)| (ResourceIndex::new(i as u32), r))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::span::PathId;

    #[test]
    fn indices_are_dense_and_stable() {
        let mut store = ResourceStore::new();
        let i0 = store.register(PathId::new(0), b"a".to_vec(), None);
        let i1 = store.register(PathId::new(1), b"b".to_vec(), None);
        assert_eq!(i0.as_usize(), 0);
        assert_eq!(i1.as_usize(), 1);
        assert_eq!(store.get(i0).contents, b"a");
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn srcmap_is_optional() {
        let mut store = ResourceStore::new();
        let i = store.register(PathId::new(0), b"x".to_vec(), Some(b"{}".to_vec()));
        assert_eq!(store.get(i).srcmap.as_deref(), Some(&b"{}"[..]));
    }
}
