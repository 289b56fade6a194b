//! Core data model for the Sass compilation driver.
//!
//! Spans, interned paths, the Resource Store, and the Importer/Include
//! pair that every other driver crate builds on.

mod importer;
mod interner;
mod resource;
mod span;
mod trace;

pub use importer::{Importer, Include};
pub use interner::PathInterner;
pub use resource::{Resource, ResourceStore};
pub use span::{ByteSpan, PathId, ResourceIndex, SourceSpan};
pub use trace::{Trace, TraceGuard};
