//! Drives `logos` over a source buffer, converting `RawToken`s into owned,
//! span-carrying [`Token`]s.

use logos::Logos;

use sass_ir::ByteSpan;

use crate::raw_token::RawToken;
use crate::token::{Token, TokenKind};

/// Tokenize `source` (already in bracketed syntax — see
/// `sass_parse::indented` for the indented-syntax preprocessor).
pub fn lex(source: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut lexer = RawToken::lexer(source);

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let byte_span = ByteSpan::new(span.start as u32, span.end as u32);
        let text = lexer.slice();
        let Ok(raw) = result else {
            // Lexing error (unrecognised character): fold it into a
            // single-character Chunk so the parser can surface a
            // location-accurate InvalidSyntax error instead of silently
            // dropping input.
            tokens.push(Token::new(TokenKind::Chunk(text.to_string()), byte_span));
            continue;
        };

        let kind = match raw {
            RawToken::LBrace => TokenKind::LBrace,
            RawToken::RBrace => TokenKind::RBrace,
            RawToken::Semi => TokenKind::Semi,
            RawToken::Comma => TokenKind::Comma,
            RawToken::LineComment => TokenKind::LineComment(text.trim_start_matches("//").to_string()),
            RawToken::BlockComment => TokenKind::BlockComment(
                text.trim_start_matches("/*")
                    .trim_end_matches("*/")
                    .to_string(),
            ),
            RawToken::DoubleQuotedString => {
                TokenKind::QuotedString('"', unescape(&text[1..text.len() - 1]))
            }
            RawToken::SingleQuotedString => {
                TokenKind::QuotedString('\'', unescape(&text[1..text.len() - 1]))
            }
            RawToken::At => TokenKind::At(text[1..].to_string()),
            RawToken::Chunk => TokenKind::Chunk(text.to_string()),
        };
        tokens.push(Token::new(kind, byte_span));
    }

    tokens
}

fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(next) = chars.next() {
                out.push(next);
            }
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lexes_import_statement() {
        let tokens = lex(r#"@import "b";"#);
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0].kind, TokenKind::At("import".to_string()));
        assert_eq!(
            tokens[1].kind,
            TokenKind::QuotedString('"', "b".to_string())
        );
        assert_eq!(tokens[2].kind, TokenKind::Semi);
    }

    #[test]
    fn lexes_rule_with_declaration() {
        let tokens = lex(".x{color:red}");
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind.clone()).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Chunk(".x".to_string()),
                TokenKind::LBrace,
                TokenKind::Chunk("color:red".to_string()),
                TokenKind::RBrace,
            ]
        );
    }

    #[test]
    fn unescapes_quoted_strings() {
        let tokens = lex(r#""a\"b""#);
        assert_eq!(tokens[0].kind, TokenKind::QuotedString('"', "a\"b".to_string()));
    }
}
