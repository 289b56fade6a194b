//! Recursive sheet loading: read → lex → parse → resolve nested
//! `@import`s → register. This is where `ImportStub` nodes (§4.4c,
//! `sass_parse::ast::ImportStub`) get created, and where the Import
//! Stack's cycle guard is entered around each parse.

use std::fs;
use std::path::{Path, PathBuf};

use sass_diagnostic::SassError;
use sass_ir::{ByteSpan, ResourceIndex, SourceSpan};
use sass_parse::ast::{AtMedia, Rule, Stmt, StyleSheet};

use crate::context::Context;
use crate::host::LoaderEntry;
use crate::import_stack::{ImportStackFrame, ImportStackGuard};
use crate::pipeline::Classification;

/// Header phase (§4.4a): run every registered header loader against
/// `entry_base`, turn each returned entry into an `ImportStub`/resource
/// exactly like a custom importer's results, and record how many
/// resources it contributed so `Context::get_included_files` can elide
/// them later.
pub fn run_header_phase(
    ctx: &mut Context,
    entry_base: &Path,
    span: SourceSpan,
) -> Result<Vec<Stmt>, SassError> {
    let entries = ctx.pipeline.run_headers(entry_base);
    if entries.is_empty() {
        ctx.header_count = 0;
        return Ok(Vec::new());
    }
    let spec = entry_base.display().to_string();
    let stmts = process_loader_entries(ctx, &spec, entries, span)?;
    ctx.header_count = stmts.len();
    Ok(stmts)
}

/// Entry-specific load (§4.6), used by both `compile_file` and
/// `compile_string`. Registers the entry's own Resource *before* running
/// the header phase, so header resources land immediately after it in
/// registration order (§4.4a) — the invariant `Context::get_included_files`
/// relies on to elide them — then parses and resolves the entry's own
/// imports, which register at yet higher indices.
pub fn load_entry(
    ctx: &mut Context,
    abs_path: &Path,
    raw_contents: &str,
    indented: bool,
) -> Result<StyleSheet, SassError> {
    let path_id = ctx.interner.intern(abs_path);
    let bracketed = if indented {
        sass_parse::indented_to_bracketed(raw_contents)
    } else {
        raw_contents.to_string()
    };

    let resource = ctx.resources.register(path_id, bracketed.as_bytes().to_vec(), None);
    let span = SourceSpan::new(path_id, resource, ByteSpan::DUMMY);
    let base_dir = abs_path.parent().unwrap_or(Path::new(".")).to_path_buf();

    let header_stmts = run_header_phase(ctx, &base_dir, span)?;

    let tokens = sass_lexer::lex(&bracketed);
    let parsed = sass_parse::parse(&tokens, resource)
        .map_err(|e| SassError::invalid_syntax(e.message, SourceSpan::new(path_id, resource, e.span)))?;

    let own_root = resolve_imports(ctx, &base_dir, resource, path_id, parsed.root)?;

    let mut root = header_stmts;
    root.extend(own_root);

    let sheet = StyleSheet { resource, root };
    ctx.sheet_registry.insert(abs_path.to_path_buf(), sheet.clone());
    Ok(sheet)
}

/// Load, parse, and fully resolve the imports of the file at `abs_path`,
/// returning its `StyleSheet`. Idempotent by absolute path when no
/// custom importer is registered (§4.5); otherwise always reparsed,
/// since a custom importer may legitimately return different content on
/// each call (§4.4c).
pub fn load_sheet(ctx: &mut Context, abs_path: &Path) -> Result<StyleSheet, SassError> {
    if !ctx.pipeline.has_importers() {
        if let Some(existing) = ctx.sheet_registry.get(abs_path) {
            return Ok(existing.clone());
        }
    }

    let path_id = ctx.interner.intern(abs_path);
    let pre_register_span = SourceSpan::new(path_id, ResourceIndex::new(0), ByteSpan::DUMMY);

    let frame = ImportStackFrame {
        include: sass_ir::Include::resolved(
            sass_ir::Importer::new(abs_path.to_string_lossy().to_string(), abs_path),
            abs_path.to_path_buf(),
        ),
        abs_path: abs_path.to_path_buf(),
    };

    let cwd = ctx.working_dir.clone();
    let guard = ImportStackGuard::enter(&mut ctx.import_stack, frame)
        .map_err(|cycle| SassError::import_loop(cycle.render(&cwd), pre_register_span))?;

    let contents = fs::read_to_string(abs_path).map_err(|e| {
        SassError::import_not_found(
            format!("could not read {}: {e}", abs_path.display()),
            pre_register_span,
        )
    })?;

    let sheet = parse_and_resolve(ctx, abs_path, &contents)?;
    ctx.sheet_registry.insert(abs_path.to_path_buf(), sheet.clone());

    drop(guard);
    Ok(sheet)
}

/// Parse raw `contents` sourced from `abs_path` and resolve every
/// `@import` it contains, recursively.
pub fn parse_and_resolve(
    ctx: &mut Context,
    abs_path: &Path,
    contents: &str,
) -> Result<StyleSheet, SassError> {
    let path_id = ctx.interner.intern(abs_path);
    let bracketed = if abs_path.extension().and_then(|e| e.to_str()) == Some("sass") {
        sass_parse::indented_to_bracketed(contents)
    } else {
        contents.to_string()
    };

    let resource = ctx
        .resources
        .register(path_id, bracketed.as_bytes().to_vec(), None);

    let tokens = sass_lexer::lex(&bracketed);
    let parsed = sass_parse::parse(&tokens, resource)
        .map_err(|e| SassError::invalid_syntax(e.message, SourceSpan::new(path_id, resource, e.span)))?;

    let base_dir = abs_path.parent().unwrap_or(Path::new("."));
    let root = resolve_imports(ctx, base_dir, resource, path_id, parsed.root)?;
    Ok(StyleSheet { resource, root })
}

/// Recursively replace every `@import` node in `stmts` with either a
/// `CssImport` passthrough or an `ImportStub` pointing at a freshly
/// loaded sheet.
fn resolve_imports(
    ctx: &mut Context,
    base_dir: &Path,
    resource: ResourceIndex,
    path_id: sass_ir::PathId,
    stmts: Vec<Stmt>,
) -> Result<Vec<Stmt>, SassError> {
    let mut out = Vec::with_capacity(stmts.len());
    for stmt in stmts {
        match stmt {
            Stmt::AtImport(at_import) => {
                let has_query = at_import.query.is_some();
                for specifier in &at_import.specifiers {
                    let span = SourceSpan::new(path_id, resource, at_import.span);
                    match crate::pipeline::classify(specifier, has_query) {
                        Classification::CssImport(text) => out.push(Stmt::CssImport(text)),
                        Classification::Filesystem(spec) => {
                            out.extend(resolve_filesystem_import(ctx, base_dir, &spec, span)?);
                        }
                    }
                }
            }
            Stmt::Rule(rule) => {
                let body = resolve_imports(ctx, base_dir, resource, path_id, rule.body)?;
                out.push(Stmt::Rule(Rule { body, ..rule }));
            }
            Stmt::AtMedia(media) => {
                let body = resolve_imports(ctx, base_dir, resource, path_id, media.body)?;
                out.push(Stmt::AtMedia(AtMedia { body, ..media }));
            }
            other => out.push(other),
        }
    }
    Ok(out)
}

fn resolve_filesystem_import(
    ctx: &mut Context,
    base_dir: &Path,
    spec: &str,
    span: SourceSpan,
) -> Result<Vec<Stmt>, SassError> {
    if ctx.pipeline.has_importers() {
        let entries = ctx.pipeline.run_importers(spec, base_dir);
        if !entries.is_empty() {
            return process_loader_entries(ctx, spec, entries, span);
        }
    }

    let includes = sass_resolve::resolve(base_dir, spec, &ctx.options.include_paths);
    match includes.len() {
        0 => Err(SassError::import_not_found(
            format!("no such file or import target: \"{spec}\""),
            span,
        )),
        1 => {
            let abs_path = includes[0].abs_path.clone();
            let sheet = load_sheet(ctx, &abs_path)?;
            Ok(vec![Stmt::ImportStub(sass_parse::ast::ImportStub {
                abs_path,
                resource: sheet.resource,
                span: span.span,
            })])
        }
        _ => {
            let candidates = includes
                .iter()
                .map(|i| i.abs_path.display().to_string())
                .collect::<Vec<_>>()
                .join(", ");
            Err(SassError::ambiguous_import(
                format!("ambiguous import \"{spec}\": candidates [{candidates}]"),
                span,
            ))
        }
    }
}

/// Turn every entry a header loader or custom importer returned into one
/// `ImportStub` apiece (§4.4c), rather than keeping only the first and
/// silently discarding the rest. When more than one entry comes back,
/// entries without their own `abs_path` are registered under a
/// `"{spec}-{index}"` synthesised key (§4.4c "a synthesised unique key
/// derived from the specifier + a running counter").
pub(crate) fn process_loader_entries(
    ctx: &mut Context,
    spec: &str,
    entries: Vec<LoaderEntry>,
    span: SourceSpan,
) -> Result<Vec<Stmt>, SassError> {
    let multi = entries.len() > 1;
    let mut out = Vec::with_capacity(entries.len());

    for (index, entry) in entries.into_iter().enumerate() {
        if entry.is_error() {
            return Err(SassError::loader_error(
                entry.error_message.unwrap_or_default(),
                span,
            ));
        }

        if let Some(source) = entry.source {
            let abs_path = entry.abs_path.unwrap_or_else(|| {
                if multi {
                    PathBuf::from(format!("{spec}-{index}"))
                } else {
                    PathBuf::from(format!("{spec}#importer"))
                }
            });
            let sheet = parse_and_resolve(ctx, &abs_path, &source)?;
            ctx.sheet_registry.insert(abs_path.clone(), sheet.clone());
            out.push(Stmt::ImportStub(sass_parse::ast::ImportStub {
                abs_path,
                resource: sheet.resource,
                span: span.span,
            }));
            continue;
        }

        if let Some(abs_path) = entry.abs_path {
            let sheet = load_sheet(ctx, &abs_path)?;
            out.push(Stmt::ImportStub(sass_parse::ast::ImportStub {
                abs_path,
                resource: sheet.resource,
                span: span.span,
            }));
            continue;
        }

        return Err(SassError::loader_error(
            format!("importer returned an empty entry for \"{spec}\""),
            span,
        ));
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;
    use crate::options::CompileOptions;

    #[test]
    fn loads_and_inlines_simple_import() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.scss"), "@import \"b\"; .x{color:red}").unwrap();
        fs::write(dir.path().join("b.scss"), ".y{color:blue}").unwrap();

        let mut ctx = Context::new(CompileOptions::default(), dir.path().to_path_buf());
        let abs_path = dir.path().join("a.scss").canonicalize().unwrap();
        let sheet = load_sheet(&mut ctx, &abs_path).expect("loads");
        assert_eq!(sheet.root.len(), 2);
        assert!(matches!(sheet.root[0], Stmt::ImportStub(_)));
    }

    #[test]
    fn detects_cyclic_imports() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.scss"), "@import \"b\";").unwrap();
        fs::write(dir.path().join("b.scss"), "@import \"a\";").unwrap();

        let mut ctx = Context::new(CompileOptions::default(), dir.path().to_path_buf());
        let abs_path = dir.path().join("a.scss").canonicalize().unwrap();
        let err = load_sheet(&mut ctx, &abs_path).unwrap_err();
        assert_eq!(err.kind, sass_diagnostic::ErrorKind::ImportLoop);
    }

    #[test]
    fn missing_import_is_not_found() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.scss"), "@import \"missing\";").unwrap();

        let mut ctx = Context::new(CompileOptions::default(), dir.path().to_path_buf());
        let abs_path = dir.path().join("a.scss").canonicalize().unwrap();
        let err = load_sheet(&mut ctx, &abs_path).unwrap_err();
        assert_eq!(err.kind, sass_diagnostic::ErrorKind::ImportNotFound);
    }

    #[test]
    fn ambiguous_import_lists_candidates() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.scss"), "@import \"x\";").unwrap();
        fs::write(dir.path().join("x.scss"), "").unwrap();
        fs::write(dir.path().join("_x.scss"), "").unwrap();

        let mut ctx = Context::new(CompileOptions::default(), dir.path().to_path_buf());
        let abs_path = dir.path().join("a.scss").canonicalize().unwrap();
        let err = load_sheet(&mut ctx, &abs_path).unwrap_err();
        assert_eq!(err.kind, sass_diagnostic::ErrorKind::AmbiguousImport);
    }

    #[test]
    fn load_entry_registers_entry_resource_at_index_zero() {
        let dir = tempdir().unwrap();
        let entry = dir.path().join("a.scss");
        fs::write(&entry, ".x{color:red}").unwrap();

        let mut ctx = Context::new(CompileOptions::default(), dir.path().to_path_buf());
        let abs_path = entry.canonicalize().unwrap();
        let sheet = load_entry(&mut ctx, &abs_path, ".x{color:red}", false).expect("loads");
        assert_eq!(ctx.header_count, 0);
        assert_eq!(ctx.resources.len(), 1);
        assert_eq!(sheet.root.len(), 1);
    }

    #[test]
    fn load_entry_splices_header_phase_resources_before_own_imports() {
        let dir = tempdir().unwrap();
        let entry = dir.path().join("a.scss");
        let header_target = dir.path().join("_header.scss");
        fs::write(&entry, "@import \"b\";").unwrap();
        fs::write(dir.path().join("b.scss"), ".y{color:blue}").unwrap();
        fs::write(&header_target, ".h{color:green}").unwrap();

        let mut ctx = Context::new(CompileOptions::default(), dir.path().to_path_buf());
        ctx.pipeline.register_header(
            0,
            Box::new(move |_base| vec![LoaderEntry::path_only("header", header_target.clone())]),
        );

        let abs_path = entry.canonicalize().unwrap();
        let sheet = load_entry(&mut ctx, &abs_path, "@import \"b\";", false).expect("loads");

        assert_eq!(ctx.header_count, 1);
        // entry (index 0), header (index 1), "b" import (index 2).
        assert_eq!(ctx.resources.len(), 3);
        assert_eq!(sheet.root.len(), 2);
        assert!(matches!(sheet.root[0], Stmt::ImportStub(_)));
        assert!(matches!(sheet.root[1], Stmt::ImportStub(_)));

        let included = ctx.get_included_files(false);
        assert!(!included.iter().any(|p| p.ends_with("_header.scss")));
    }

    #[test]
    fn multi_entry_importer_splices_one_stub_per_entry() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.scss"), "@import \"x\";").unwrap();

        let mut ctx = Context::new(CompileOptions::default(), dir.path().to_path_buf());
        ctx.pipeline.register_importer(
            0,
            Box::new(|spec, _base| {
                vec![
                    LoaderEntry {
                        imp_path: spec.to_string(),
                        source: Some(".one{color:red}".into()),
                        ..Default::default()
                    },
                    LoaderEntry {
                        imp_path: spec.to_string(),
                        source: Some(".two{color:blue}".into()),
                        ..Default::default()
                    },
                ]
            }),
        );

        let abs_path = dir.path().join("a.scss").canonicalize().unwrap();
        let sheet = load_sheet(&mut ctx, &abs_path).expect("loads");
        assert_eq!(sheet.root.len(), 2);
        for stmt in &sheet.root {
            match stmt {
                Stmt::ImportStub(stub) => {
                    let path = stub.abs_path.display().to_string();
                    assert!(path == "x-0" || path == "x-1", "unexpected key: {path}");
                }
                other => panic!("expected ImportStub, got {other:?}"),
            }
        }
    }

    #[test]
    fn media_qualified_import_reaches_classify_through_real_parse() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.scss"), "@import \"foo\" screen;").unwrap();

        let mut ctx = Context::new(CompileOptions::default(), dir.path().to_path_buf());
        let abs_path = dir.path().join("a.scss").canonicalize().unwrap();
        let sheet = load_sheet(&mut ctx, &abs_path).expect("loads");
        assert_eq!(sheet.root.len(), 1);
        assert!(matches!(&sheet.root[0], Stmt::CssImport(text) if text == "@import \"foo\";"));
    }
}
