//! The Loader Pipeline (§4.4): header phase, raw-specifier
//! classification, and the custom-importer phase.

use std::path::Path;

use crate::host::{insert_sorted, HeaderLoaderFn, ImporterFn, LoaderEntry, PrioritizedLoader};

/// The outcome of classifying an `@import` target (§4.4b).
#[derive(Debug, PartialEq, Eq)]
pub enum Classification {
    /// Preserve verbatim as a CSS `@import` rule; never touches the
    /// filesystem.
    CssImport(String),
    /// Resolve `specifier` against the filesystem via the Path Resolver.
    Filesystem(String),
}

/// Classify a raw, unquoted `@import` target.
pub fn classify(target: &str, has_media_or_supports: bool) -> Classification {
    if has_media_or_supports {
        return Classification::CssImport(format!("@import \"{target}\";"));
    }
    if has_foreign_scheme(target) || target.starts_with("//") {
        return Classification::CssImport(format!("@import url(\"{target}\");"));
    }
    if target.ends_with(".css") {
        return Classification::CssImport(format!("@import url(\"{target}\");"));
    }
    Classification::Filesystem(target.to_string())
}

fn has_foreign_scheme(target: &str) -> bool {
    match target.find("://") {
        Some(idx) => &target[..idx] != "file",
        None => false,
    }
}

#[derive(Default)]
pub struct LoaderPipeline {
    headers: Vec<PrioritizedLoader<Box<HeaderLoaderFn>>>,
    importers: Vec<PrioritizedLoader<Box<ImporterFn>>>,
    only_one: bool,
}

impl LoaderPipeline {
    pub fn new(only_one: bool) -> Self {
        Self {
            headers: Vec::new(),
            importers: Vec::new(),
            only_one,
        }
    }

    pub fn register_header(&mut self, priority: i32, callback: Box<HeaderLoaderFn>) {
        insert_sorted(&mut self.headers, PrioritizedLoader { priority, callback });
    }

    pub fn register_importer(&mut self, priority: i32, callback: Box<ImporterFn>) {
        insert_sorted(&mut self.importers, PrioritizedLoader { priority, callback });
    }

    pub fn has_importers(&self) -> bool {
        !self.importers.is_empty()
    }

    /// Header phase (§4.4a): run every registered header, in descending
    /// priority order, once at entry.
    pub fn run_headers(&self, entry_base: &Path) -> Vec<LoaderEntry> {
        let mut out = Vec::new();
        for loader in &self.headers {
            out.extend((loader.callback)(entry_base));
        }
        out
    }

    /// Custom-importer phase (§4.4c): descending priority, stopping at
    /// the first non-empty result when `only_one` is set.
    pub fn run_importers(&self, specifier: &str, base_dir: &Path) -> Vec<LoaderEntry> {
        let mut out = Vec::new();
        for loader in &self.importers {
            let entries = (loader.callback)(specifier, base_dir);
            if entries.is_empty() {
                continue;
            }
            let stop = self.only_one;
            out.extend(entries);
            if stop {
                break;
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_qualified_import_is_css_passthrough() {
        let c = classify("foo", true);
        assert_eq!(c, Classification::CssImport("@import \"foo\";".to_string()));
    }

    #[test]
    fn foreign_scheme_is_css_passthrough() {
        let c = classify("https://example.com/x.css", false);
        assert_eq!(
            c,
            Classification::CssImport("@import url(\"https://example.com/x.css\");".to_string())
        );
    }

    #[test]
    fn css_suffixed_target_is_url_rewrite_without_fs_lookup() {
        let c = classify("foo.css", false);
        assert_eq!(
            c,
            Classification::CssImport("@import url(\"foo.css\");".to_string())
        );
    }

    #[test]
    fn bare_name_is_filesystem_import() {
        let c = classify("foo", false);
        assert_eq!(c, Classification::Filesystem("foo".to_string()));
    }

    #[test]
    fn only_one_stops_after_first_non_empty_importer() {
        let mut pipeline = LoaderPipeline::new(true);
        pipeline.register_importer(
            10,
            Box::new(|spec, _base| vec![LoaderEntry::path_only(spec, "/first".into())]),
        );
        pipeline.register_importer(
            5,
            Box::new(|spec, _base| vec![LoaderEntry::path_only(spec, "/second".into())]),
        );
        let entries = pipeline.run_importers("x", Path::new("/"));
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].abs_path, Some("/first".into()));
    }
}
