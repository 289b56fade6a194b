//! Compile-time configuration (§3 Context fields, §6 path-list option
//! syntax).

use std::path::{Path, PathBuf};

use sass_emit::OutputStyle;

#[derive(Clone, Debug)]
pub struct CompileOptions {
    pub output_style: OutputStyle,
    pub indented_syntax: bool,
    pub include_paths: Vec<PathBuf>,
    pub plugin_paths: Vec<PathBuf>,
    pub source_map_file: Option<PathBuf>,
    pub source_map_embed: bool,
    pub omit_source_map_url: bool,
    pub only_one_importer_result: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            output_style: OutputStyle::Nested,
            indented_syntax: false,
            include_paths: Vec::new(),
            plugin_paths: Vec::new(),
            source_map_file: None,
            source_map_embed: false,
            omit_source_map_url: false,
            only_one_importer_result: false,
        }
    }
}

impl CompileOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_output_style(mut self, style: OutputStyle) -> Self {
        self.output_style = style;
        self
    }

    pub fn with_indented_syntax(mut self, indented: bool) -> Self {
        self.indented_syntax = indented;
        self
    }

    /// Parse a path-list option value: either a single platform-separated
    /// string or a pre-split list, each element trim-normalised to end
    /// in `/` (§6 "Path-list option syntax").
    pub fn with_include_paths(mut self, raw: &str) -> Self {
        self.include_paths = split_path_list(raw);
        self
    }

    pub fn push_include_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.include_paths.push(normalise_trailing_slash(path.into()));
        self
    }
}

#[cfg(unix)]
const PLATFORM_SEPARATOR: char = ':';
#[cfg(windows)]
const PLATFORM_SEPARATOR: char = ';';

fn split_path_list(raw: &str) -> Vec<PathBuf> {
    raw.split(PLATFORM_SEPARATOR)
        .filter(|s| !s.is_empty())
        .map(|s| normalise_trailing_slash(PathBuf::from(s)))
        .collect()
}

fn normalise_trailing_slash(path: PathBuf) -> PathBuf {
    let s = path.to_string_lossy();
    if s.ends_with(std::path::MAIN_SEPARATOR) || s.ends_with('/') {
        path
    } else {
        PathBuf::from(format!("{s}/"))
    }
}

/// Make `path` relative to `base` for rendering in diagnostics and
/// `sourceMappingURL` comments; falls back to the absolute path when
/// `path` doesn't live under `base`.
pub fn relative_to(path: &Path, base: &Path) -> PathBuf {
    path.strip_prefix(base).unwrap_or(path).to_path_buf()
}
