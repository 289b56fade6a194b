//! The Sheet Registry (§3, §4.5): a map from absolute filesystem path to
//! the parsed `StyleSheet` for that path, populated by the Loader
//! Pipeline and consulted during Expand.
//!
//! Insertion is idempotent under the filesystem-only regime: re-inserting
//! the same `abs_path` replaces the previous entry rather than erroring,
//! since custom importers mean a path can legitimately be re-resolved to
//! different content across a compile (§4.5 "non-short-circuiting when
//! custom importers are present").

use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;
use sass_parse::StyleSheet;

#[derive(Default)]
pub struct SheetRegistry {
    sheets: FxHashMap<PathBuf, StyleSheet>,
}

impl SheetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, abs_path: PathBuf, sheet: StyleSheet) {
        self.sheets.insert(abs_path, sheet);
    }

    pub fn get(&self, abs_path: &Path) -> Option<&StyleSheet> {
        self.sheets.get(abs_path)
    }

    pub fn contains(&self, abs_path: &Path) -> bool {
        self.sheets.contains_key(abs_path)
    }

    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Path, &StyleSheet)> {
        self.sheets.iter().map(|(path, sheet)| (path.as_path(), sheet))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sass_ir::ResourceIndex;

    fn empty_sheet() -> StyleSheet {
        StyleSheet {
            resource: ResourceIndex::new(0),
            root: Vec::new(),
        }
    }

    #[test]
    fn reinserting_same_path_replaces_entry() {
        let mut reg = SheetRegistry::new();
        let path = PathBuf::from("/a.scss");
        reg.insert(path.clone(), empty_sheet());
        assert_eq!(reg.len(), 1);
        reg.insert(path.clone(), empty_sheet());
        assert_eq!(reg.len(), 1);
        assert!(reg.contains(&path));
    }
}
