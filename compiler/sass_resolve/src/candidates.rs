//! Candidate generation: the Sass file-extension and partial-name
//! conventions (§4.1).

const EXTENSIONS: [&str; 3] = ["scss", "sass", "css"];

/// True when `imp_path`'s final component already carries a recognised
/// Sass/CSS extension.
fn has_recognised_extension(imp_path: &str) -> bool {
    let basename = imp_path.rsplit('/').next().unwrap_or(imp_path);
    EXTENSIONS
        .iter()
        .any(|ext| basename.ends_with(&format!(".{ext}")))
}

/// Split `imp_path` into its directory prefix (including a trailing `/`,
/// or empty) and its final path component.
fn split_basename(imp_path: &str) -> (&str, &str) {
    match imp_path.rfind('/') {
        Some(idx) => (&imp_path[..=idx], &imp_path[idx + 1..]),
        None => ("", imp_path),
    }
}

/// Generate the candidate relative-path strings for one import specifier,
/// in priority order. Does not touch the filesystem.
///
/// For a bare name `foo`: `foo`, `_foo`, `foo.scss`, `_foo.scss`,
/// `foo.sass`, `_foo.sass`, `foo.css`, `_foo.css`, then the same set under
/// `foo/index` for the directory-index convention. For a name already
/// carrying a recognised extension, only that exact path is returned.
pub fn candidate_names(imp_path: &str) -> Vec<String> {
    if has_recognised_extension(imp_path) {
        return vec![imp_path.to_string()];
    }

    let (dir, base) = split_basename(imp_path);
    let mut out = Vec::with_capacity(10);
    push_variants(&mut out, dir, base);

    // Directory-index convention: foo/index, foo/_index, ...
    let index_dir = format!("{dir}{base}/");
    push_variants(&mut out, &index_dir, "index");

    out
}

fn push_variants(out: &mut Vec<String>, dir: &str, base: &str) {
    out.push(format!("{dir}{base}"));
    out.push(format!("{dir}_{base}"));
    for ext in EXTENSIONS {
        out.push(format!("{dir}{base}.{ext}"));
        out.push(format!("{dir}_{base}.{ext}"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_name_generates_full_convention_set() {
        let names = candidate_names("foo");
        assert_eq!(
            names,
            vec![
                "foo",
                "_foo",
                "foo.scss",
                "_foo.scss",
                "foo.sass",
                "_foo.sass",
                "foo.css",
                "_foo.css",
                "foo/index",
                "foo/_index",
                "foo/index.scss",
                "foo/_index.scss",
                "foo/index.sass",
                "foo/_index.sass",
                "foo/index.css",
                "foo/_index.css",
            ]
        );
    }

    #[test]
    fn recognised_extension_does_not_speculate() {
        assert_eq!(candidate_names("foo.scss"), vec!["foo.scss".to_string()]);
        assert_eq!(candidate_names("dir/foo.css"), vec!["dir/foo.css".to_string()]);
    }

    #[test]
    fn nested_path_preserves_directory_prefix() {
        let names = candidate_names("partials/foo");
        assert!(names.contains(&"partials/foo.scss".to_string()));
        assert!(names.contains(&"partials/_foo.scss".to_string()));
        assert!(names.contains(&"partials/foo/index.scss".to_string()));
    }
}
