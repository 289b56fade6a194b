//! The emitter (§4.7): `set_filename`, `add_source_index`, the
//! visitor-driven render, `get_buffer`, and `render_srcmap`.
//!
//! Mapping entries record byte offsets rather than line/column pairs —
//! recovering a resource's line/column table is lexer work, out of
//! scope here (§1); `original_line` is always 0 and `original_col`
//! holds the span's start byte. This keeps the v3 JSON shape exact
//! while leaving full line/column fidelity to the external lexer this
//! driver treats as a black box.

use sass_parse::ast::{AtExtend, AtImport, AtMedia, CommentNode, Declaration, Rule, Stmt};

use crate::srcmap::{render_srcmap, Mapping};
use crate::style::OutputStyle;
use crate::visitor::Visitor;

pub struct OutputBuffer {
    pub buffer: String,
    pub mappings: Vec<Mapping>,
}

pub struct Emitter {
    style: OutputStyle,
    filename: Option<String>,
    source_indices: Vec<u32>,
    prelude: String,
    body: String,
    mappings: Vec<Mapping>,
    line: u32,
    depth: usize,
}

impl Emitter {
    pub fn new(style: OutputStyle) -> Self {
        Self {
            style,
            filename: None,
            source_indices: Vec::new(),
            prelude: String::new(),
            body: String::new(),
            mappings: Vec::new(),
            line: 0,
            depth: 0,
        }
    }

    pub fn set_filename(&mut self, rel_path: &str) {
        self.filename = Some(rel_path.to_string());
    }

    pub fn add_source_index(&mut self, index: u32) {
        self.source_indices.push(index);
    }

    /// Two-pass render (§4.7 "Top-level node handling in Emit"): first a
    /// prelude pass pulling out every surviving `@import` and any
    /// leading important/top-anchored comment, then a body pass over
    /// everything else.
    pub fn render(&mut self, stmts: &[Stmt]) {
        let mut seen_body_output = false;
        let mut remainder = Vec::with_capacity(stmts.len());

        for stmt in stmts {
            match stmt {
                Stmt::CssImport(text) => self.visit_css_import(text),
                Stmt::AtImport(import) => self.visit_at_import(import),
                Stmt::Comment(comment) if !seen_body_output && comment.important => {
                    self.visit_comment(comment);
                }
                other => {
                    seen_body_output = true;
                    remainder.push(other);
                }
            }
        }

        let prelude_lines = self.prelude.lines().count();
        self.line = prelude_lines as u32;

        let count = remainder.len();
        for (i, stmt) in remainder.into_iter().enumerate() {
            self.visit_stmt(stmt);
            if i + 1 < count {
                self.body.push_str(self.style.rule_separator());
            }
        }
    }

    fn visit_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Rule(rule) => self.visit_rule(rule),
            Stmt::Declaration(decl) => self.visit_declaration(decl),
            Stmt::AtImport(import) => self.visit_at_import(import),
            Stmt::CssImport(text) => self.visit_css_import(text),
            Stmt::AtMedia(media) => self.visit_at_media(media),
            Stmt::AtExtend(extend) => self.visit_at_extend(extend),
            Stmt::Comment(comment) => self.visit_comment(comment),
            Stmt::ImportStub(_) => {
                // Expand splices these away; none should reach Emit.
            }
            Stmt::Raw(text) => self.visit_raw(text),
        }
    }

    /// Record a mapping from the current generated line back to `span`.
    /// Statements lose their originating resource once spliced by Expand
    /// (§9's "owned children... via span/trace rather than parent
    /// pointers" applies to nodes, not resource provenance); entries are
    /// attributed to the entry resource (index 0) as an acceptable
    /// simplification given the lexer's line/column table is external.
    fn record_mapping(&mut self, span: sass_ir::ByteSpan) {
        let source_index = self.source_indices.first().copied().unwrap_or(0);
        self.mappings.push(Mapping {
            generated_line: self.line,
            generated_col: 0,
            source_index,
            original_line: 0,
            original_col: span.start,
        });
    }

    pub fn get_buffer(self) -> OutputBuffer {
        let mut buffer = self.prelude;
        buffer.push_str(&self.body);
        OutputBuffer {
            buffer,
            mappings: self.mappings,
        }
    }

    pub fn render_srcmap(&self, sources: &[String]) -> String {
        let file = self.filename.as_deref().unwrap_or("stdout.css");
        render_srcmap(file, sources, &self.mappings)
    }
}

impl Visitor for Emitter {
    fn visit_rule(&mut self, rule: &Rule) {
        self.record_mapping(rule.span);
        let indent = self.style.indent(self.depth);
        self.body.push_str(&indent);
        self.body.push_str(&rule.selector);
        self.body.push_str(self.style.brace_open());
        self.line += 1;
        self.depth += 1;
        for stmt in &rule.body {
            self.visit_stmt(stmt);
        }
        self.depth -= 1;
        self.body.push_str(&self.style.indent(self.depth));
        self.body.push_str(self.style.brace_close());
        self.line += 1;
    }

    fn visit_declaration(&mut self, decl: &Declaration) {
        if decl.value.is_invisible() {
            return;
        }
        self.record_mapping(decl.span);
        let indent = self.style.indent(self.depth);
        self.body.push_str(&indent);
        self.body.push_str(&decl.property);
        self.body.push_str(": ");
        self.body.push_str(&decl.value.render());
        self.body.push_str(self.style.declaration_terminator());
        self.line += 1;
    }

    fn visit_at_import(&mut self, import: &AtImport) {
        let rendered = import
            .specifiers
            .iter()
            .map(|s| format!("\"{s}\""))
            .collect::<Vec<_>>()
            .join(", ");
        self.prelude.push_str("@import ");
        self.prelude.push_str(&rendered);
        self.prelude.push_str(";\n");
    }

    fn visit_css_import(&mut self, text: &str) {
        self.prelude.push_str(text);
        self.prelude.push('\n');
    }

    fn visit_at_media(&mut self, media: &AtMedia) {
        let indent = self.style.indent(self.depth);
        self.body.push_str(&indent);
        self.body.push_str("@media ");
        self.body.push_str(&media.query);
        self.body.push_str(self.style.brace_open());
        self.line += 1;
        self.depth += 1;
        for stmt in &media.body {
            self.visit_stmt(stmt);
        }
        self.depth -= 1;
        self.body.push_str(&self.style.indent(self.depth));
        self.body.push_str(self.style.brace_close());
        self.line += 1;
    }

    fn visit_at_extend(&mut self, _extend: &AtExtend) {
        // @extend never survives to CSS output; it is fully consumed by
        // the selector extender before Cssize runs.
    }

    fn visit_comment(&mut self, comment: &CommentNode) {
        let indent = self.style.indent(self.depth);
        let target = if self.depth == 0 && self.body.is_empty() {
            &mut self.prelude
        } else {
            &mut self.body
        };
        target.push_str(&indent);
        target.push_str("/*");
        target.push_str(&comment.text);
        target.push_str("*/\n");
        self.line += 1;
    }

    fn visit_raw(&mut self, text: &str) {
        let indent = self.style.indent(self.depth);
        self.body.push_str(&indent);
        self.body.push_str(text);
        self.body.push('\n');
        self.line += 1;
    }
}

#[cfg(test)]
mod tests {
    use sass_ir::ByteSpan;
    use sass_parse::ast::Value;

    use super::*;

    fn decl(prop: &str, value: &str) -> Stmt {
        Stmt::Declaration(Declaration {
            property: prop.to_string(),
            value: Value::Plain(value.to_string()),
            span: ByteSpan::DUMMY,
        })
    }

    #[test]
    fn imports_are_emitted_before_body() {
        let stmts = vec![
            Stmt::Rule(Rule {
                selector: ".x".to_string(),
                body: vec![decl("color", "red")],
                span: ByteSpan::DUMMY,
            }),
            Stmt::CssImport("@import url(\"foo.css\");".to_string()),
        ];
        let mut emitter = Emitter::new(OutputStyle::Expanded);
        emitter.render(&stmts);
        let buf = emitter.get_buffer();
        let import_pos = buf.buffer.find("@import").unwrap();
        let rule_pos = buf.buffer.find(".x").unwrap();
        assert!(import_pos < rule_pos);
    }

    #[test]
    fn invisible_declaration_is_skipped() {
        let stmts = vec![Stmt::Rule(Rule {
            selector: ".x".to_string(),
            body: vec![Stmt::Declaration(Declaration {
                property: "content".to_string(),
                value: Value::QuotedString {
                    has_quotes: false,
                    content: String::new(),
                },
                span: ByteSpan::DUMMY,
            })],
            span: ByteSpan::DUMMY,
        })];
        let mut emitter = Emitter::new(OutputStyle::Expanded);
        emitter.render(&stmts);
        let buf = emitter.get_buffer();
        assert!(!buf.buffer.contains("content"));
    }

    #[test]
    fn nested_style_separates_rules_with_blank_line() {
        let stmts = vec![
            Stmt::Rule(Rule {
                selector: ".a".to_string(),
                body: vec![decl("color", "red")],
                span: ByteSpan::DUMMY,
            }),
            Stmt::Rule(Rule {
                selector: ".b".to_string(),
                body: vec![decl("color", "blue")],
                span: ByteSpan::DUMMY,
            }),
        ];
        let mut emitter = Emitter::new(OutputStyle::Nested);
        emitter.render(&stmts);
        let buf = emitter.get_buffer();
        assert!(buf.buffer.contains("\n\n"));
    }
}
