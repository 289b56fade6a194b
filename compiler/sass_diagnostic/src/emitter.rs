//! Human-readable rendering of a [`SassError`], including the import chain
//! that produced it.
//!
//! Grounded on the host crate's `TerminalEmitter`: a small `colors` module
//! of raw ANSI escapes plus a color-mode switch, rather than pulling in a
//! terminal-styling crate for a handful of constants.

use sass_ir::{PathInterner, SourceSpan};

use crate::diagnostic::SassError;

mod colors {
    pub const ERROR: &str = "\x1b[1;31m";
    pub const BOLD: &str = "\x1b[1m";
    pub const RESET: &str = "\x1b[0m";
}

/// Color output mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    fn enabled(self) -> bool {
        match self {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => std::io::IsTerminal::is_terminal(&std::io::stderr()),
        }
    }
}

/// Render `error` as a human-readable message, including the "imports"
/// chain for `ImportLoop` and the rendered candidate list for
/// `AmbiguousImport` (both already folded into `error.message` by the
/// driver at raise time — this emitter only adds presentation).
pub fn render(error: &SassError, interner: &PathInterner, color: ColorMode) -> String {
    let color = color.enabled();
    let mut out = String::new();

    if color {
        out.push_str(colors::ERROR);
        out.push_str(colors::BOLD);
    }
    out.push_str("error");
    if color {
        out.push_str(colors::RESET);
    }
    out.push_str(&format!("[{}]: {}\n", error.kind, error.message));

    let path = interner.lookup(error.span.path);
    out.push_str(&format!("  --> {}\n", path.display()));

    if !error.trace.is_empty() {
        out.push_str("note: import chain:\n");
        for frame in &error.trace {
            let p = interner.lookup(frame.path);
            out.push_str(&format!("  - {}\n", p.display()));
        }
    }

    out
}

/// Render just the "imports" arrow chain used by `ImportLoop` messages,
/// one edge per line: `a.scss imports b.scss`.
pub fn render_import_chain(chain: &[SourceSpan], interner: &PathInterner) -> String {
    chain
        .windows(2)
        .map(|w| {
            format!(
                "{} imports {}",
                interner.lookup(w[0].path).display(),
                interner.lookup(w[1].path).display()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use sass_ir::{ByteSpan, PathId, ResourceIndex};
    use std::path::Path;

    #[test]
    fn render_includes_kind_and_path() {
        let mut interner = PathInterner::new();
        let path = interner.intern(Path::new("/a.scss"));
        let span = SourceSpan::new(path, ResourceIndex::new(0), ByteSpan::new(0, 1));
        let err = SassError::import_loop("cycle detected", span);
        let rendered = render(&err, &interner, ColorMode::Never);
        assert!(rendered.contains("ImportLoop"));
        assert!(rendered.contains("/a.scss"));
    }

    #[test]
    fn import_chain_formats_one_arrow_per_edge() {
        let mut interner = PathInterner::new();
        let pa = interner.intern(Path::new("/a.scss"));
        let pb = interner.intern(Path::new("/b.scss"));
        let sa = SourceSpan::new(pa, ResourceIndex::new(0), ByteSpan::new(0, 1));
        let sb = SourceSpan::new(pb, ResourceIndex::new(1), ByteSpan::new(0, 1));
        let chain = render_import_chain(&[sa, sb], &interner);
        assert_eq!(chain, "/a.scss imports /b.scss");
    }
}
