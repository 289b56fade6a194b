//! Recursive-descent parser from [`sass_lexer::Token`]s to [`crate::ast`]
//! nodes.
//!
//! Deliberately small: full CSS value grammar is out of scope for the
//! compilation driver (§1) — this parser exists to give the driver a
//! working black-box producer of `StyleSheet`s, not to be a conformant
//! Sass grammar.

use sass_ir::{ByteSpan, ResourceIndex};
use sass_lexer::{Token, TokenKind};

use crate::ast::{AtExtend, AtImport, AtMedia, CommentNode, Declaration, Rule, Stmt, StyleSheet, Value};

/// A parse failure, with the byte span where it occurred. The driver
/// attaches the resource's interned path and wraps this into a
/// `SassError::invalid_syntax`.
#[derive(Clone, Debug)]
pub struct ParseError {
    pub message: String,
    pub span: ByteSpan,
}

impl ParseError {
    fn new(message: impl Into<String>, span: ByteSpan) -> Self {
        ParseError {
            message: message.into(),
            span,
        }
    }
}

pub fn parse(tokens: &[Token], resource: ResourceIndex) -> Result<StyleSheet, ParseError> {
    let mut parser = Parser { tokens, pos: 0 };
    let root = parser.parse_block(false)?;
    Ok(StyleSheet { resource, root })
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn bump(&mut self) -> Option<&Token> {
        let tok = self.tokens.get(self.pos);
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    fn eof_span(&self) -> ByteSpan {
        self.tokens.last().map_or(ByteSpan::DUMMY, |t| t.span)
    }

    /// Parse statements until end-of-input (`in_block == false`) or a
    /// closing `}` is consumed (`in_block == true`).
    fn parse_block(&mut self, in_block: bool) -> Result<Vec<Stmt>, ParseError> {
        let mut stmts = Vec::new();
        loop {
            match self.peek() {
                None => {
                    if in_block {
                        return Err(ParseError::new("unclosed block: expected '}'", self.eof_span()));
                    }
                    return Ok(stmts);
                }
                Some(tok) if tok.kind == TokenKind::RBrace => {
                    if in_block {
                        self.bump();
                        return Ok(stmts);
                    }
                    return Err(ParseError::new("unexpected '}'", tok.span));
                }
                Some(_) => stmts.push(self.parse_stmt()?),
            }
        }
    }

    fn parse_stmt(&mut self) -> Result<Stmt, ParseError> {
        let tok = self.peek().expect("checked by caller").clone();
        match &tok.kind {
            TokenKind::LineComment(text) => {
                self.bump();
                Ok(Stmt::Comment(CommentNode {
                    text: text.clone(),
                    important: false,
                    span: tok.span,
                }))
            }
            TokenKind::BlockComment(text) => {
                self.bump();
                let important = text.trim_start().starts_with('!');
                Ok(Stmt::Comment(CommentNode {
                    text: text.clone(),
                    important,
                    span: tok.span,
                }))
            }
            TokenKind::At(name) if name == "import" => self.parse_import(tok.span),
            TokenKind::At(name) if name == "media" => self.parse_media(tok.span),
            TokenKind::At(name) if name == "extend" => self.parse_extend(tok.span),
            TokenKind::At(_) => self.parse_raw_at_rule(tok.span),
            _ => self.parse_rule_or_declaration(),
        }
    }

    /// Parses `@import <specifier> [, <specifier>]* [<query>];`. Tokens
    /// seen after a specifier and before the next comma or `;` are a
    /// trailing media/supports qualifier (e.g. the `screen` in
    /// `@import "foo" screen;`), not additional specifiers — §4.4b's
    /// first classification rule depends on this qualifier surviving
    /// into the AST.
    fn parse_import(&mut self, start: ByteSpan) -> Result<Stmt, ParseError> {
        self.bump(); // consume @import
        let mut specifiers = Vec::new();
        let mut query_parts: Vec<String> = Vec::new();
        let mut expect_specifier = true;
        loop {
            match self.bump() {
                Some(t) => match &t.kind {
                    TokenKind::QuotedString(_, content) if expect_specifier => {
                        specifiers.push(content.clone());
                        expect_specifier = false;
                    }
                    TokenKind::Chunk(text) if expect_specifier => {
                        specifiers.push(text.clone());
                        expect_specifier = false;
                    }
                    TokenKind::Comma => expect_specifier = true,
                    TokenKind::Semi => break,
                    _ if !expect_specifier => query_parts.push(render_token(&t.kind)),
                    _ => return Err(ParseError::new("malformed @import", t.span)),
                },
                None => return Err(ParseError::new("unterminated @import", start)),
            }
        }
        if specifiers.is_empty() {
            return Err(ParseError::new("@import with no target", start));
        }
        let query = if query_parts.is_empty() {
            None
        } else {
            Some(query_parts.join(" ").trim().to_string())
        };
        Ok(Stmt::AtImport(AtImport {
            specifiers,
            query,
            span: start,
        }))
    }

    fn parse_media(&mut self, start: ByteSpan) -> Result<Stmt, ParseError> {
        self.bump(); // consume @media
        let mut query_parts = Vec::new();
        loop {
            match self.peek() {
                Some(t) if t.kind == TokenKind::LBrace => {
                    self.bump();
                    break;
                }
                Some(t) => {
                    query_parts.push(render_token(&t.kind));
                    self.bump();
                }
                None => return Err(ParseError::new("unterminated @media", start)),
            }
        }
        let body = self.parse_block(true)?;
        Ok(Stmt::AtMedia(AtMedia {
            query: query_parts.join(" ").trim().to_string(),
            body,
            span: start,
        }))
    }

    fn parse_extend(&mut self, start: ByteSpan) -> Result<Stmt, ParseError> {
        self.bump(); // consume @extend
        let mut parts = Vec::new();
        loop {
            match self.bump() {
                Some(t) if t.kind == TokenKind::Semi => break,
                Some(t) => parts.push(render_token(&t.kind)),
                None => return Err(ParseError::new("unterminated @extend", start)),
            }
        }
        let mut selector = parts.join(" ").trim().to_string();
        let optional = selector.ends_with("!optional");
        if optional {
            selector = selector
                .trim_end_matches("!optional")
                .trim_end()
                .to_string();
        }
        Ok(Stmt::AtExtend(AtExtend {
            selector,
            optional,
            span: start,
        }))
    }

    /// Any at-rule the driver doesn't model specially: passed through
    /// verbatim to Cssize/Emit.
    fn parse_raw_at_rule(&mut self, start: ByteSpan) -> Result<Stmt, ParseError> {
        let name = match &self.bump().expect("checked by caller").kind {
            TokenKind::At(n) => n.clone(),
            _ => unreachable!("parse_raw_at_rule only called on At token"),
        };
        let mut text = format!("@{name}");
        loop {
            match self.peek() {
                Some(t) if t.kind == TokenKind::Semi => {
                    self.bump();
                    text.push(';');
                    break;
                }
                Some(t) if t.kind == TokenKind::LBrace => {
                    self.bump();
                    text.push_str(" { ");
                    let body = self.parse_block(true)?;
                    for stmt in &body {
                        text.push_str(&render_stmt(stmt));
                        text.push(' ');
                    }
                    text.push('}');
                    break;
                }
                Some(t) => {
                    text.push(' ');
                    text.push_str(&render_token(&t.kind));
                    self.bump();
                }
                None => return Err(ParseError::new("unterminated at-rule", start)),
            }
        }
        Ok(Stmt::Raw(text))
    }

    fn parse_rule_or_declaration(&mut self) -> Result<Stmt, ParseError> {
        let start = self.peek().expect("checked by caller").span;
        let mut header = Vec::new();
        loop {
            match self.peek() {
                Some(t) if matches!(t.kind, TokenKind::LBrace | TokenKind::Semi | TokenKind::RBrace) => break,
                Some(t) => {
                    header.push(t.clone());
                    self.bump();
                }
                None => return Err(ParseError::new("unterminated statement", start)),
            }
        }

        match self.peek() {
            Some(t) if t.kind == TokenKind::LBrace => {
                self.bump();
                let selector = render_header(&header);
                let body = self.parse_block(true)?;
                Ok(Stmt::Rule(Rule {
                    selector,
                    body,
                    span: start,
                }))
            }
            Some(t) if t.kind == TokenKind::Semi => {
                self.bump();
                self.build_declaration(&header, start)
            }
            _ => Err(ParseError::new(
                "expected '{' or ';' after selector/declaration",
                start,
            )),
        }
    }

    fn build_declaration(&self, header: &[Token], start: ByteSpan) -> Result<Stmt, ParseError> {
        for (i, tok) in header.iter().enumerate() {
            if let TokenKind::Chunk(text) = &tok.kind {
                if let Some(colon) = text.find(':') {
                    let mut property = String::new();
                    for prev in &header[..i] {
                        property.push_str(&render_token(&prev.kind));
                        property.push(' ');
                    }
                    property.push_str(&text[..colon]);
                    let property = property.trim().to_string();

                    let mut value_tokens: Vec<Token> = Vec::new();
                    let rest = text[colon + 1..].trim();
                    if !rest.is_empty() {
                        value_tokens.push(Token::new(TokenKind::Chunk(rest.to_string()), tok.span));
                    }
                    value_tokens.extend_from_slice(&header[i + 1..]);

                    return Ok(Stmt::Declaration(Declaration {
                        property,
                        value: build_value(&value_tokens),
                        span: start,
                    }));
                }
            }
        }
        Err(ParseError::new(
            "declaration is missing ':' between property and value",
            start,
        ))
    }
}

fn build_value(tokens: &[Token]) -> Value {
    if tokens.len() == 1 {
        if let TokenKind::QuotedString(_, content) = &tokens[0].kind {
            return Value::QuotedString {
                has_quotes: true,
                content: content.clone(),
            };
        }
    }

    if tokens.iter().any(|t| t.kind == TokenKind::Comma) {
        let items: Vec<Value> = tokens
            .split(|t| t.kind == TokenKind::Comma)
            .map(build_value)
            .collect();
        return Value::List {
            items,
            bracketed: false,
        };
    }

    let rendered = tokens
        .iter()
        .map(|t| render_token(&t.kind))
        .collect::<Vec<_>>()
        .join(" ");
    Value::Plain(rendered.trim().to_string())
}

fn render_header(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(|t| render_token(&t.kind))
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

fn render_token(kind: &TokenKind) -> String {
    match kind {
        TokenKind::Chunk(s) => s.clone(),
        TokenKind::Comma => ",".to_string(),
        TokenKind::QuotedString(q, s) => format!("{q}{s}{q}"),
        TokenKind::At(name) => format!("@{name}"),
        TokenKind::LineComment(s) => format!("//{s}"),
        TokenKind::BlockComment(s) => format!("/*{s}*/"),
        TokenKind::LBrace => "{".to_string(),
        TokenKind::RBrace => "}".to_string(),
        TokenKind::Semi => ";".to_string(),
    }
}

fn render_stmt(stmt: &Stmt) -> String {
    match stmt {
        Stmt::Declaration(d) => format!("{}: {};", d.property, d.value.render()),
        Stmt::Raw(text) => text.clone(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sass_lexer::lex;

    fn parse_src(src: &str) -> StyleSheet {
        let tokens = lex(src);
        parse(&tokens, ResourceIndex::new(0)).expect("parse should succeed")
    }

    #[test]
    fn parses_simple_rule() {
        let sheet = parse_src(".x{color:red}");
        assert_eq!(sheet.root.len(), 1);
        match &sheet.root[0] {
            Stmt::Rule(rule) => {
                assert_eq!(rule.selector, ".x");
                assert_eq!(rule.body.len(), 1);
            }
            other => panic!("expected Rule, got {other:?}"),
        }
    }

    #[test]
    fn parses_import_with_quoted_specifier() {
        let sheet = parse_src(r#"@import "b";"#);
        match &sheet.root[0] {
            Stmt::AtImport(import) => {
                assert_eq!(import.specifiers, vec!["b".to_string()]);
                assert_eq!(import.query, None);
            }
            other => panic!("expected AtImport, got {other:?}"),
        }
    }

    #[test]
    fn parses_import_with_trailing_media_query() {
        let sheet = parse_src(r#"@import "foo" screen;"#);
        match &sheet.root[0] {
            Stmt::AtImport(import) => {
                assert_eq!(import.specifiers, vec!["foo".to_string()]);
                assert_eq!(import.query.as_deref(), Some("screen"));
            }
            other => panic!("expected AtImport, got {other:?}"),
        }
    }

    #[test]
    fn parses_media_block() {
        let sheet = parse_src("@media screen { .x{color:red} }");
        match &sheet.root[0] {
            Stmt::AtMedia(media) => {
                assert_eq!(media.query, "screen");
                assert_eq!(media.body.len(), 1);
            }
            other => panic!("expected AtMedia, got {other:?}"),
        }
    }

    #[test]
    fn parses_extend_with_optional_flag() {
        let sheet = parse_src("@extend .warning !optional;");
        match &sheet.root[0] {
            Stmt::AtExtend(ext) => {
                assert_eq!(ext.selector, ".warning");
                assert!(ext.optional);
            }
            other => panic!("expected AtExtend, got {other:?}"),
        }
    }

    #[test]
    fn declaration_missing_colon_is_a_parse_error() {
        let tokens = lex(".x{oops}");
        let err = parse(&tokens, ResourceIndex::new(0)).unwrap_err();
        assert!(err.message.contains(':'));
    }

    #[test]
    fn quoted_string_value_tracks_quotedness() {
        let sheet = parse_src(r#".x{content:""}"#);
        match &sheet.root[0] {
            Stmt::Rule(rule) => match &rule.body[0] {
                Stmt::Declaration(decl) => {
                    assert!(matches!(
                        decl.value,
                        Value::QuotedString { has_quotes: true, .. }
                    ));
                    assert!(!decl.value.is_invisible());
                }
                other => panic!("expected Declaration, got {other:?}"),
            },
            other => panic!("expected Rule, got {other:?}"),
        }
    }
}
