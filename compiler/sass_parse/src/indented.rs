//! Indented-syntax → bracketed-syntax preprocessing.
//!
//! A pure textual transform the driver invokes as a black box (§1). If
//! `source` already looks bracketed (contains a `{`), it is returned
//! unchanged — this also satisfies the idempotence property in §8: "a
//! file already in bracketed syntax passes through the indented-syntax
//! preprocessor unchanged."

/// Convert indentation-delimited Sass into brace-delimited SCSS.
pub fn indented_to_bracketed(source: &str) -> String {
    if source.contains('{') {
        return source.to_string();
    }

    let mut out = String::new();
    let mut indent_stack: Vec<usize> = Vec::new();

    for raw_line in source.lines() {
        let trimmed = raw_line.trim_end();
        if trimmed.trim().is_empty() {
            continue;
        }
        let indent = trimmed.len() - trimmed.trim_start().len();
        let content = trimmed.trim();

        while let Some(&top) = indent_stack.last() {
            if indent <= top {
                out.push_str("}\n");
                indent_stack.pop();
            } else {
                break;
            }
        }

        if content.ends_with(':') && !content.starts_with('@') {
            // Bare property shorthand (`font:`) is out of scope; treat
            // any line not otherwise classified as a potential nested
            // selector only when a deeper-indented line follows it.
            out.push_str(content);
            out.push_str(" {\n");
            indent_stack.push(indent);
            continue;
        }

        if looks_like_declaration(content) {
            out.push_str(content);
            if !content.ends_with(';') {
                out.push(';');
            }
            out.push('\n');
        } else if content.starts_with("//") {
            out.push_str(content);
            out.push('\n');
        } else {
            out.push_str(content);
            out.push_str(" {\n");
            indent_stack.push(indent);
        }
    }

    for _ in indent_stack {
        out.push_str("}\n");
    }

    out
}

/// Heuristic: a line is a declaration when it contains a top-level `:`
/// before any `(` and isn't an at-rule or a pseudo-selector-bearing
/// selector segment. Good enough for the subset this driver parses.
fn looks_like_declaration(content: &str) -> bool {
    if content.starts_with('@') || content.starts_with('.') || content.starts_with('#') {
        return false;
    }
    content.contains(':')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bracketed_input_is_unchanged() {
        let src = ".x{color:red}";
        assert_eq!(indented_to_bracketed(src), src);
    }

    #[test]
    fn converts_simple_nesting() {
        let src = ".x\n  color: red\n";
        let converted = indented_to_bracketed(src);
        assert!(converted.contains(".x {"));
        assert!(converted.contains("color: red;"));
        assert!(converted.trim_end().ends_with('}'));
    }
}
