//! Error kinds for the compilation driver (§7).

use std::fmt;

/// The kind of a driver-level error.
///
/// Each kind carries a `SourceSpan` and a snapshot of the `Trace` at the
/// time of failure — see [`crate::SassError`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorKind {
    /// Entry file unreadable after include-path fallback.
    EntryNotFound,
    /// Path Resolver returned multiple candidates.
    AmbiguousImport,
    /// Import Stack detected a repeat `abs_path`.
    ImportLoop,
    /// Resolved to nothing and no loader provided content.
    ImportNotFound,
    /// Parser error.
    InvalidSyntax,
    /// Non-optional `@extend` matched nothing.
    UnsatisfiedExtend,
    /// Emission encountered a value that is not valid CSS.
    InvalidValue,
    /// Propagated verbatim from a user loader.
    LoaderError,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::EntryNotFound => "EntryNotFound",
            ErrorKind::AmbiguousImport => "AmbiguousImport",
            ErrorKind::ImportLoop => "ImportLoop",
            ErrorKind::ImportNotFound => "ImportNotFound",
            ErrorKind::InvalidSyntax => "InvalidSyntax",
            ErrorKind::UnsatisfiedExtend => "UnsatisfiedExtend",
            ErrorKind::InvalidValue => "InvalidValue",
            ErrorKind::LoaderError => "LoaderError",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_name() {
        assert_eq!(ErrorKind::ImportLoop.to_string(), "ImportLoop");
    }
}
