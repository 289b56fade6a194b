//! Filesystem candidate search (§4.1 "Search order").

use std::path::{Path, PathBuf};

use sass_ir::{Importer, Include};

use crate::candidates::candidate_names;

/// Canonicalise a path for comparison (collapse `.`/`..`, normalise
/// separators) without requiring the path to exist — `Path::canonicalize`
/// requires existence, so candidate paths that do exist are canonicalised
/// through it and the handful that don't are left for the caller to
/// discard (they were only ever probed, never returned).
fn canonicalise_existing(path: &Path) -> Option<PathBuf> {
    path.canonicalize().ok()
}

/// Probe every candidate name for `imp_path` rooted at `dir`, returning
/// the ones that exist on disk, canonicalised, in priority order.
fn probe_dir(dir: &Path, imp_path: &str) -> Vec<PathBuf> {
    candidate_names(imp_path)
        .into_iter()
        .filter_map(|name| canonicalise_existing(&dir.join(name)))
        .collect()
}

/// Resolve `(base_dir, imp_path)` into every candidate `Include` found at
/// the first directory (base, then each configured include path in
/// registration order) that produces any match. Returns an empty vector
/// when nothing is found anywhere; never fails.
pub fn resolve(base_dir: &Path, imp_path: &str, include_paths: &[PathBuf]) -> Vec<Include> {
    let importer = Importer::new(imp_path, base_dir);

    let in_base = probe_dir(base_dir, imp_path);
    if !in_base.is_empty() {
        return to_includes(importer, in_base);
    }

    for include_dir in include_paths {
        let found = probe_dir(include_dir, imp_path);
        if !found.is_empty() {
            return to_includes(importer, found);
        }
    }

    Vec::new()
}

fn to_includes(importer: Importer, paths: Vec<PathBuf>) -> Vec<Include> {
    paths
        .into_iter()
        .map(|p| Include::resolved(importer.clone(), p))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn resolves_against_base_dir_first() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("_b.scss"), ".y{color:blue}").unwrap();
        let includes = resolve(dir.path(), "b", &[]);
        assert_eq!(includes.len(), 1);
        assert!(includes[0].abs_path.ends_with("_b.scss"));
    }

    #[test]
    fn falls_back_to_include_paths_in_order() {
        let base = tempdir().unwrap();
        let inc1 = tempdir().unwrap();
        let inc2 = tempdir().unwrap();
        fs::write(inc2.path().join("b.scss"), ".y{}").unwrap();

        let includes = resolve(
            base.path(),
            "b",
            &[inc1.path().to_path_buf(), inc2.path().to_path_buf()],
        );
        assert_eq!(includes.len(), 1);
        assert!(includes[0].abs_path.starts_with(inc2.path().canonicalize().unwrap()));
    }

    #[test]
    fn returns_all_ambiguous_candidates_at_chosen_dir() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("x.scss"), "").unwrap();
        fs::write(dir.path().join("_x.scss"), "").unwrap();
        let includes = resolve(dir.path(), "x", &[]);
        assert_eq!(includes.len(), 2);
    }

    #[test]
    fn returns_empty_when_nothing_found() {
        let dir = tempdir().unwrap();
        assert!(resolve(dir.path(), "missing", &[]).is_empty());
    }
}
