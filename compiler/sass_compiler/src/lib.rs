//! The compilation driver: ingests an entry (file or in-memory string),
//! walks its imports transitively, and runs the transformation pipeline
//! (§4.6).

mod context;
mod driver;
mod host;
mod import_stack;
mod load;
mod options;
mod pipeline;
pub mod tracing_setup;

pub use context::Context;
pub use driver::{compile_file, compile_string, run_pipeline, CompileResult};
pub use host::{HeaderLoaderFn, ImporterFn, LoaderEntry};
pub use import_stack::{ImportCycle, ImportStack, ImportStackFrame, ImportStackGuard};
pub use options::CompileOptions;
pub use pipeline::{classify, Classification, LoaderPipeline};
