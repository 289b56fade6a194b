//! AST node kinds produced by [`crate::parse`].
//!
//! A `StyleSheet`, once inserted into the Sheet Registry, is never
//! mutated — later pipeline stages (expand, cssize, emit) build new trees
//! rather than editing in place, matching §3's "never mutated; it may be
//! walked by multiple visitors."

use std::path::PathBuf;

use sass_ir::{ByteSpan, ResourceIndex};

/// `(resource, root_block)`.
#[derive(Clone, Debug)]
pub struct StyleSheet {
    pub resource: ResourceIndex,
    pub root: Vec<Stmt>,
}

/// One statement inside a stylesheet or rule body.
#[derive(Clone, Debug)]
pub enum Stmt {
    Rule(Rule),
    Declaration(Declaration),
    AtImport(AtImport),
    /// `@import` text already classified as CSS passthrough by the Loader
    /// Pipeline (§4.4b) — a scheme/media-qualified/`.css`-suffixed
    /// target. Carries the literal `@import ...;` text to emit verbatim.
    CssImport(String),
    AtMedia(AtMedia),
    AtExtend(AtExtend),
    Comment(CommentNode),
    /// Inserted by the Loader Pipeline in place of a successfully
    /// resolved filesystem `@import`; replaced during Expand by splicing
    /// in the target sheet's (already-expanded) statements.
    ImportStub(ImportStub),
    /// Any at-rule not otherwise modeled (`@charset`, `@font-face`, ...);
    /// passed through to Cssize/Emit unchanged.
    Raw(String),
}

#[derive(Clone, Debug)]
pub struct Rule {
    pub selector: String,
    pub body: Vec<Stmt>,
    pub span: ByteSpan,
}

#[derive(Clone, Debug)]
pub struct Declaration {
    pub property: String,
    pub value: Value,
    pub span: ByteSpan,
}

/// A declaration's right-hand side, tracked precisely enough to implement
/// the Emit-time "declaration-visibility filtering" rule (§4.7): a
/// declaration is invisible when its value is a quoted string with empty
/// content and no surviving quote mark, or a non-bracketed list whose
/// items are all invisible.
#[derive(Clone, Debug)]
pub enum Value {
    Plain(String),
    QuotedString { has_quotes: bool, content: String },
    List { items: Vec<Value>, bracketed: bool },
}

impl Value {
    /// A declaration carrying this value should be skipped by Emit. This
    /// is a visual-printability rule, not an evaluation rule: the
    /// declaration still exists in the tree and still influences
    /// inheritance in Cssize.
    pub fn is_invisible(&self) -> bool {
        match self {
            Value::QuotedString {
                has_quotes,
                content,
            } => !has_quotes && content.is_empty(),
            Value::List { items, bracketed } => !bracketed && items.iter().all(Value::is_invisible),
            Value::Plain(_) => false,
        }
    }

    pub fn render(&self) -> String {
        match self {
            Value::Plain(s) => s.clone(),
            Value::QuotedString {
                has_quotes,
                content,
            } => {
                if *has_quotes {
                    format!("\"{content}\"")
                } else {
                    content.clone()
                }
            }
            Value::List { items, bracketed } => {
                let inner = items
                    .iter()
                    .map(Value::render)
                    .collect::<Vec<_>>()
                    .join(", ");
                if *bracketed {
                    format!("[{inner}]")
                } else {
                    inner
                }
            }
        }
    }
}

#[derive(Clone, Debug)]
pub struct AtImport {
    /// One specifier per comma-separated target in the `@import`
    /// statement, unquoted, as written in source.
    pub specifiers: Vec<String>,
    /// Trailing media/supports qualifier text, if any (e.g. the `screen`
    /// in `@import "foo" screen;`). Its presence forces CSS `@import`
    /// passthrough (§4.4b) regardless of what the target looks like.
    pub query: Option<String>,
    pub span: ByteSpan,
}

#[derive(Clone, Debug)]
pub struct AtMedia {
    pub query: String,
    pub body: Vec<Stmt>,
    pub span: ByteSpan,
}

#[derive(Clone, Debug)]
pub struct AtExtend {
    pub selector: String,
    pub optional: bool,
    pub span: ByteSpan,
}

#[derive(Clone, Debug)]
pub struct CommentNode {
    pub text: String,
    /// `/*! ... */` or `/*important*/`-style comments that must survive
    /// minification and be buffered ahead of the body when they appear
    /// before any other output (§4.7 "Top-level node handling in Emit").
    pub important: bool,
    pub span: ByteSpan,
}

#[derive(Clone, Debug)]
pub struct ImportStub {
    pub abs_path: PathBuf,
    pub resource: ResourceIndex,
    pub span: ByteSpan,
}
