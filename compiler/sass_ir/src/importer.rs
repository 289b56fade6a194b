//! Importer and Include: the data model for one `@import` resolution.

use std::path::PathBuf;

/// `(imp_path, base_path)`.
///
/// `imp_path` is the specifier as written in source (unquoted). `base_path`
/// is the absolute path of the file in which the import appeared, or the
/// process working directory for the entry.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Importer {
    pub imp_path: String,
    pub base_path: PathBuf,
}

impl Importer {
    pub fn new(imp_path: impl Into<String>, base_path: impl Into<PathBuf>) -> Self {
        Importer {
            imp_path: imp_path.into(),
            base_path: base_path.into(),
        }
    }
}

/// The result of resolving an [`Importer`]: `(importer, abs_path)`.
///
/// An empty `abs_path` signals "unresolved — defer to CSS `@import`
/// passthrough."
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Include {
    pub importer: Importer,
    pub abs_path: PathBuf,
}

impl Include {
    pub fn resolved(importer: Importer, abs_path: PathBuf) -> Self {
        Include { importer, abs_path }
    }

    pub fn unresolved(importer: Importer) -> Self {
        Include {
            importer,
            abs_path: PathBuf::new(),
        }
    }

    /// True when this Include carries no filesystem path — the CSS
    /// `@import` passthrough case.
    pub fn is_unresolved(&self) -> bool {
        self.abs_path.as_os_str().is_empty()
    }
}
