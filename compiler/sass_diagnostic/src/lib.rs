//! Error kinds and diagnostic rendering for the Sass compilation driver.

mod diagnostic;
mod emitter;
mod error_code;

pub use diagnostic::SassError;
pub use emitter::{render, render_import_chain, ColorMode};
pub use error_code::ErrorKind;
