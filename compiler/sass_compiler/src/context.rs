//! The Context (§3): process-wide per-compile state. Constructed from
//! user options, consumes one entry, performs one compile, and is
//! dropped — ordinary Rust ownership gives the "destruction frees every
//! Resource buffer, every interned path, and every pending import-stack
//! frame" lifecycle (§3 "Lifecycle") for free, without a manual
//! destructor.

use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::RwLock;
use sass_eval::{Environment, SheetRegistry};
use sass_ir::{PathInterner, ResourceStore, Trace};

use crate::import_stack::ImportStack;
use crate::options::CompileOptions;
use crate::pipeline::LoaderPipeline;

/// Shared, read-mostly compiler state that may need to be handed to
/// evaluation callbacks (built-in and host functions may be invoked
/// re-entrantly from within a value expression); wrapped the same way
/// the host compiler shares its pattern/type registries (`SharedRegistry`
/// over `parking_lot::RwLock`).
pub struct Context {
    pub options: CompileOptions,
    pub environment: Arc<RwLock<Environment>>,
    pub resources: ResourceStore,
    pub interner: PathInterner,
    pub import_stack: ImportStack,
    pub sheet_registry: SheetRegistry,
    pub trace: Trace,
    pub pipeline: LoaderPipeline,
    pub working_dir: PathBuf,
    /// Number of Resources registered by the header phase (§4.4a),
    /// immediately following the entry resource. Backs
    /// `get_included_files`'s header elision (§6/§8).
    pub header_count: usize,
}

impl Context {
    pub fn new(options: CompileOptions, working_dir: PathBuf) -> Self {
        let mut environment = Environment::new();
        sass_eval::install_builtins(&mut environment);
        let only_one = options.only_one_importer_result;
        Self {
            options,
            environment: Arc::new(RwLock::new(environment)),
            resources: ResourceStore::default(),
            interner: PathInterner::default(),
            import_stack: ImportStack::new(),
            sheet_registry: SheetRegistry::new(),
            trace: Trace::default(),
            pipeline: LoaderPipeline::new(only_one),
            working_dir,
            header_count: 0,
        }
    }

    /// The Included-files query (§6 "External Interfaces", §8 testable
    /// property): the deduplicated, sorted list of absolute paths
    /// actually read. Header-origin resources registered immediately
    /// after the entry are always elided; `skip_entry` additionally
    /// elides the entry path itself.
    ///
    /// Mirrors the reference driver's `get_included_files(skip,
    /// headers)`: resource registration order places the entry at index
    /// 0 and header resources immediately after it, so both are removed
    /// by a single prefix slice before the remainder is deduplicated
    /// (consecutive duplicates only, matching `std::unique`) and sorted.
    pub fn get_included_files(&self, skip_entry: bool) -> Vec<PathBuf> {
        let mut paths: Vec<PathBuf> = self
            .resources
            .iter()
            .map(|(_, res)| self.interner.lookup(res.path).to_path_buf())
            .collect();

        if paths.is_empty() {
            return paths;
        }

        let header_end = (1 + self.header_count).min(paths.len());
        if skip_entry {
            paths.drain(0..header_end);
            paths.dedup();
            paths.sort();
        } else {
            paths.drain(1..header_end);
            paths.dedup();
            paths[1..].sort();
        }
        paths
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    #[test]
    fn new_context_has_builtins_preinstalled() {
        let ctx = Context::new(CompileOptions::default(), PathBuf::from("/"));
        assert!(ctx.environment.read().lookup("rgba", 4).is_some());
    }

    #[test]
    fn get_included_files_empty_without_resources() {
        let ctx = Context::new(CompileOptions::default(), PathBuf::from("/"));
        assert!(ctx.get_included_files(false).is_empty());
        assert!(ctx.get_included_files(true).is_empty());
    }

    #[test]
    fn get_included_files_elides_headers_and_optionally_the_entry() {
        let mut ctx = Context::new(CompileOptions::default(), PathBuf::from("/"));
        let entry_id = ctx.interner.intern(Path::new("/entry.scss"));
        let header_id = ctx.interner.intern(Path::new("/header.scss"));
        let b_id = ctx.interner.intern(Path::new("/b.scss"));
        ctx.resources.register(entry_id, Vec::new(), None);
        ctx.resources.register(header_id, Vec::new(), None);
        ctx.resources.register(b_id, Vec::new(), None);
        ctx.header_count = 1;

        let with_entry = ctx.get_included_files(false);
        assert_eq!(with_entry, vec![PathBuf::from("/entry.scss"), PathBuf::from("/b.scss")]);

        let without_entry = ctx.get_included_files(true);
        assert_eq!(without_entry, vec![PathBuf::from("/b.scss")]);
    }
}
