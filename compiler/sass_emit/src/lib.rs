//! Output-style rendering, the two-pass prelude/body emitter, and
//! source-map v3 JSON generation — the external emitter's contract
//! (§4.7), fulfilled in-process rather than through a C ABI boundary.

mod emitter;
mod srcmap;
mod style;
mod visitor;

pub use emitter::{Emitter, OutputBuffer};
pub use srcmap::{render_srcmap, Mapping};
pub use style::OutputStyle;
pub use visitor::Visitor;
