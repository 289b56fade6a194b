//! Host callback shapes (§6), expressed as Rust trait objects rather
//! than the C ABI's null-terminated struct arrays. Ownership transfer at
//! the C boundary becomes ordinary `Vec`/`String` moves here.

use std::path::PathBuf;

/// One entry returned by a header loader or importer (§6 "Host loader
/// callback shape"). Exactly one of `source` or `error_message` is
/// meaningful per entry; `abs_path` alone (no `source`) signals a
/// path-only re-classification request (§4.4c).
#[derive(Clone, Debug, Default)]
pub struct LoaderEntry {
    pub imp_path: String,
    pub abs_path: Option<PathBuf>,
    pub source: Option<String>,
    pub srcmap: Option<String>,
    pub error_message: Option<String>,
    pub error_line: Option<u32>,
    pub error_column: Option<u32>,
}

impl LoaderEntry {
    pub fn path_only(imp_path: impl Into<String>, abs_path: PathBuf) -> Self {
        Self {
            imp_path: imp_path.into(),
            abs_path: Some(abs_path),
            ..Self::default()
        }
    }

    pub fn with_source(imp_path: impl Into<String>, abs_path: PathBuf, source: String) -> Self {
        Self {
            imp_path: imp_path.into(),
            abs_path: Some(abs_path),
            source: Some(source),
            ..Self::default()
        }
    }

    pub fn error(imp_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            imp_path: imp_path.into(),
            error_message: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn is_error(&self) -> bool {
        self.error_message.is_some()
    }
}

/// A registered header or importer loader plus its descending-sort
/// priority. Headers receive only the entry's `base_path`; importers
/// additionally receive the unquoted specifier.
pub struct PrioritizedLoader<F> {
    pub priority: i32,
    pub callback: F,
}

pub type HeaderLoaderFn = dyn Fn(&std::path::Path) -> Vec<LoaderEntry> + Send + Sync;
pub type ImporterFn = dyn Fn(&str, &std::path::Path) -> Vec<LoaderEntry> + Send + Sync;

/// Insert `loader` into `list` keeping it sorted by strictly descending
/// priority (§3 invariant: "kept sorted... at every insertion").
pub fn insert_sorted<F>(list: &mut Vec<PrioritizedLoader<F>>, loader: PrioritizedLoader<F>) {
    let pos = list
        .iter()
        .position(|existing| existing.priority < loader.priority)
        .unwrap_or(list.len());
    list.insert(pos, loader);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_sorted_keeps_descending_priority() {
        let mut list: Vec<PrioritizedLoader<i32>> = Vec::new();
        insert_sorted(&mut list, PrioritizedLoader { priority: 1, callback: 0 });
        insert_sorted(&mut list, PrioritizedLoader { priority: 5, callback: 1 });
        insert_sorted(&mut list, PrioritizedLoader { priority: 3, callback: 2 });
        let priorities: Vec<i32> = list.iter().map(|l| l.priority).collect();
        assert_eq!(priorities, vec![5, 3, 1]);
    }
}
