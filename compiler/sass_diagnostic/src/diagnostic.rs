//! `SassError`: the single error type returned across every driver crate
//! boundary.
//!
//! Hand-rolled `Display`/`std::error::Error` impls, matching the host
//! crate's own error types (`ori_parse::ImportError`) rather than reaching
//! for `thiserror` — the host crate doesn't use it at this layer either.

use std::fmt;

use sass_ir::SourceSpan;

use crate::error_code::ErrorKind;

/// A driver-level error: a kind, a human-readable message, the span where
/// it was raised, and a snapshot of the import `Trace` at that moment.
#[derive(Clone, Debug)]
pub struct SassError {
    pub kind: ErrorKind,
    pub message: String,
    pub span: SourceSpan,
    pub trace: Vec<SourceSpan>,
}

impl SassError {
    pub fn new(kind: ErrorKind, message: impl Into<String>, span: SourceSpan) -> Self {
        SassError {
            kind,
            message: message.into(),
            span,
            trace: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_trace(mut self, trace: Vec<SourceSpan>) -> Self {
        self.trace = trace;
        self
    }

    pub fn entry_not_found(message: impl Into<String>, span: SourceSpan) -> Self {
        SassError::new(ErrorKind::EntryNotFound, message, span)
    }

    pub fn ambiguous_import(message: impl Into<String>, span: SourceSpan) -> Self {
        SassError::new(ErrorKind::AmbiguousImport, message, span)
    }

    pub fn import_loop(message: impl Into<String>, span: SourceSpan) -> Self {
        SassError::new(ErrorKind::ImportLoop, message, span)
    }

    pub fn import_not_found(message: impl Into<String>, span: SourceSpan) -> Self {
        SassError::new(ErrorKind::ImportNotFound, message, span)
    }

    pub fn invalid_syntax(message: impl Into<String>, span: SourceSpan) -> Self {
        SassError::new(ErrorKind::InvalidSyntax, message, span)
    }

    pub fn unsatisfied_extend(message: impl Into<String>, span: SourceSpan) -> Self {
        SassError::new(ErrorKind::UnsatisfiedExtend, message, span)
    }

    pub fn invalid_value(message: impl Into<String>, span: SourceSpan) -> Self {
        SassError::new(ErrorKind::InvalidValue, message, span)
    }

    pub fn loader_error(message: impl Into<String>, span: SourceSpan) -> Self {
        SassError::new(ErrorKind::LoaderError, message, span)
    }
}

impl fmt::Display for SassError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for SassError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_kind_and_message() {
        let err = SassError::import_loop("a.scss imports b.scss", SourceSpan::synthetic());
        assert_eq!(err.to_string(), "ImportLoop: a.scss imports b.scss");
    }

    #[test]
    fn with_trace_attaches_snapshot() {
        let err = SassError::entry_not_found("nope", SourceSpan::synthetic())
            .with_trace(vec![SourceSpan::synthetic()]);
        assert_eq!(err.trace.len(), 1);
    }
}
