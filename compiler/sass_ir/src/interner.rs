//! Interned-path list.
//!
//! Paths referenced from `SourceSpan`s must outlive the AST nodes that
//! reference them (§3 invariants). Rather than pointer arithmetic into a
//! bump arena, this stores paths in an append-only `Vec<PathBuf>` behind
//! stable [`PathId`] handles, with a reverse map for deduplication.

use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;

use crate::span::PathId;

/// Append-only table of interned paths, owned by the [`crate::Context`]
/// for the duration of one compile.
#[derive(Default, Debug)]
pub struct PathInterner {
    paths: Vec<PathBuf>,
    by_path: FxHashMap<PathBuf, PathId>,
}

impl PathInterner {
    pub fn new() -> Self {
        PathInterner::default()
    }

    /// Intern `path`, returning its stable handle. Calling this twice with
    /// an equal path returns the same handle.
    pub fn intern(&mut self, path: &Path) -> PathId {
        if let Some(id) = self.by_path.get(path) {
            return *id;
        }
        let id = PathId::new(u32::try_from(self.paths.len()).unwrap_or(u32::MAX));
        self.paths.push(path.to_path_buf());
        self.by_path.insert(path.to_path_buf(), id);
        id
    }

    pub fn lookup(&self, id: PathId) -> &Path {
        &self.paths[id.0 as usize]
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intern_dedups() {
        let mut interner = PathInterner::new();
        let a = interner.intern(Path::new("/a.scss"));
        let b = interner.intern(Path::new("/a.scss"));
        let c = interner.intern(Path::new("/b.scss"));
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(interner.lookup(a), Path::new("/a.scss"));
    }

    #[test]
    fn len_counts_unique_paths() {
        let mut interner = PathInterner::new();
        interner.intern(Path::new("/a.scss"));
        interner.intern(Path::new("/a.scss"));
        interner.intern(Path::new("/b.scss"));
        assert_eq!(interner.len(), 2);
    }
}
