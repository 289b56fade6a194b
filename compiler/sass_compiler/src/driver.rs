//! The Compilation Driver (§4.6): `compile_file`, `compile_string`, and
//! `run_pipeline`, plus output assembly (§4.6 "Output assembly").

use std::path::{Path, PathBuf};

use sass_diagnostic::SassError;
use sass_emit::{Emitter, OutputBuffer};
use sass_ir::{ByteSpan, ResourceIndex, SourceSpan};
use sass_parse::ast::{AtExtend, Stmt, StyleSheet};

use crate::context::Context;
use crate::load::load_entry;

/// The result of a successful compile: the rendered CSS plus, when
/// configured, its source map JSON.
pub struct CompileResult {
    pub css: String,
    pub source_map: Option<String>,
}

/// `compile_file` (§4.6): resolve the entry against the working
/// directory, falling back to each include path, then run the pipeline.
pub fn compile_file(ctx: &mut Context, entry_path: &Path) -> Result<CompileResult, SassError> {
    let abs_path = resolve_entry(ctx, entry_path)?;
    tracing::debug!(path = %abs_path.display(), "compiling entry file");
    let contents = std::fs::read_to_string(&abs_path)
        .map_err(|e| entry_not_found(entry_path, &e.to_string()))?;
    let indented = abs_path.extension().and_then(|e| e.to_str()) == Some("sass");
    let sheet = load_entry(ctx, &abs_path, &contents, indented)?;
    run_pipeline(ctx, sheet)
}

fn resolve_entry(ctx: &Context, entry_path: &Path) -> Result<PathBuf, SassError> {
    let candidate = ctx.working_dir.join(entry_path);
    if candidate.is_file() {
        return candidate
            .canonicalize()
            .map_err(|e| entry_not_found(entry_path, &e.to_string()));
    }
    for include_dir in &ctx.options.include_paths {
        let candidate = include_dir.join(entry_path);
        if candidate.is_file() {
            return candidate
                .canonicalize()
                .map_err(|e| entry_not_found(entry_path, &e.to_string()));
        }
    }
    Err(entry_not_found(entry_path, "not found in working directory or include paths"))
}

fn entry_not_found(entry_path: &Path, detail: &str) -> SassError {
    SassError::entry_not_found(
        format!("entry file {} could not be found: {detail}", entry_path.display()),
        SourceSpan::synthetic(),
    )
}

/// `compile_string` (§4.6): synthesise an entry from in-memory source,
/// applying the indented-syntax preprocessor first when requested.
pub fn compile_string(
    ctx: &mut Context,
    source: &str,
    input_path: Option<&Path>,
) -> Result<CompileResult, SassError> {
    let abs_path = input_path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("stdin"));

    let sheet = load_entry(ctx, &abs_path, source, ctx.options.indented_syntax)?;
    run_pipeline(ctx, sheet)
}

/// The 8-stage pipeline (§4.6 `run_pipeline`). The function-environment
/// registration stage already ran in [`Context::new`]; everything else
/// happens here, in order, aborting on the first error.
pub fn run_pipeline(ctx: &mut Context, entry: StyleSheet) -> Result<CompileResult, SassError> {
    for (_, sheet) in ctx.sheet_registry.iter() {
        sass_eval::check_top_level(&sheet.root).map_err(|msg| nest_check_error(msg, sheet.resource))?;
    }

    let expanded = sass_eval::expand(entry.root, &ctx.sheet_registry)
        .map_err(|msg| SassError::invalid_syntax(msg, SourceSpan::synthetic()))?;

    sass_eval::check_extends(&expanded)
        .map_err(|msg| SassError::unsatisfied_extend(msg, SourceSpan::synthetic()))?;

    sass_eval::check_top_level(&expanded).map_err(|msg| nest_check_error(msg, entry.resource))?;

    let cssized = sass_cssize::cssize(expanded);

    let used_placeholders = collect_extend_targets(&cssized);
    let final_tree = sass_cssize::remove_unused_placeholders(cssized, &used_placeholders);

    let buffer = emit(ctx, &final_tree);
    Ok(assemble_output(ctx, buffer))
}

fn nest_check_error(message: String, resource: ResourceIndex) -> SassError {
    SassError::invalid_syntax(
        message,
        SourceSpan::new(sass_ir::PathId::new(0), resource, ByteSpan::DUMMY),
    )
}

fn collect_extend_targets(stmts: &[Stmt]) -> Vec<String> {
    let mut out = Vec::new();
    collect_extend_targets_inner(stmts, &mut out);
    out
}

fn collect_extend_targets_inner(stmts: &[Stmt], out: &mut Vec<String>) {
    for stmt in stmts {
        match stmt {
            Stmt::AtExtend(AtExtend { selector, .. }) => out.push(selector.clone()),
            Stmt::Rule(rule) => collect_extend_targets_inner(&rule.body, out),
            Stmt::AtMedia(media) => collect_extend_targets_inner(&media.body, out),
            _ => {}
        }
    }
}

fn emit(ctx: &Context, stmts: &[Stmt]) -> OutputBuffer {
    let mut emitter = Emitter::new(ctx.options.output_style);
    if let Some(map_file) = &ctx.options.source_map_file {
        emitter.set_filename(&map_file.display().to_string());
    }
    for i in 0..ctx.resources.len() {
        emitter.add_source_index(i as u32);
    }
    emitter.render(stmts);
    emitter.get_buffer()
}

/// Output assembly (§4.6 "Output assembly"): `sourceMappingURL` comment
/// plus `@charset`/BOM prepending.
fn assemble_output(ctx: &Context, buffer: OutputBuffer) -> CompileResult {
    let mut css = buffer.buffer;
    let is_compressed = matches!(ctx.options.output_style, sass_emit::OutputStyle::Compressed);

    let source_map = if ctx.options.source_map_file.is_some() || ctx.options.source_map_embed {
        let sources: Vec<String> = (0..ctx.resources.len())
            .map(|i| {
                ctx.interner
                    .lookup(ctx.resources.get(ResourceIndex::new(i as u32)).path)
                    .display()
                    .to_string()
            })
            .collect();
        Some(sass_emit::render_srcmap(
            ctx.options
                .source_map_file
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "stdout.css".to_string())
                .as_str(),
            &sources,
            &buffer.mappings,
        ))
    } else {
        None
    };

    if !ctx.options.omit_source_map_url {
        if ctx.options.source_map_embed {
            if let Some(map) = &source_map {
                let encoded = base64_encode(map.trim_end());
                css.push_str(&format!(
                    "/*# sourceMappingURL=data:application/json;base64,{encoded} */\n"
                ));
            }
        } else if let Some(map_file) = &ctx.options.source_map_file {
            css.push_str(&format!(
                "/*# sourceMappingURL={} */\n",
                map_file.display()
            ));
        }
    }

    if css.bytes().any(|b| b >= 0x80) {
        if is_compressed {
            let mut with_bom = String::from('\u{feff}');
            with_bom.push_str(&css);
            css = with_bom;
        } else {
            css = format!("@charset \"UTF-8\";\n{css}");
        }
    }

    CompileResult {
        css,
        source_map,
    }
}

const BASE64_ALPHABET: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

fn base64_encode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = String::with_capacity(bytes.len().div_ceil(3) * 4);
    for chunk in bytes.chunks(3) {
        let b0 = chunk[0];
        let b1 = chunk.get(1).copied();
        let b2 = chunk.get(2).copied();

        out.push(BASE64_ALPHABET[(b0 >> 2) as usize] as char);
        out.push(BASE64_ALPHABET[(((b0 & 0x03) << 4) | (b1.unwrap_or(0) >> 4)) as usize] as char);
        out.push(match b1 {
            Some(b1) => BASE64_ALPHABET[(((b1 & 0x0f) << 2) | (b2.unwrap_or(0) >> 6)) as usize] as char,
            None => '=',
        });
        out.push(match b2 {
            Some(b2) => BASE64_ALPHABET[(b2 & 0x3f) as usize] as char,
            None => '=',
        });
    }
    out
}
