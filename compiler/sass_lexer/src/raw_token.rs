//! Raw token definition for bracketed Sass/SCSS syntax.
//!
//! Grounded on the host crate's own `logos`-derived `RawToken`: a flat
//! `#[derive(Logos)]` enum with whitespace skipped at the lexer level,
//! converted to owned [`crate::token::Token`]s with spans by the caller.

use logos::Logos;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n]+")]
pub(crate) enum RawToken {
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token(";")]
    Semi,
    #[token(",")]
    Comma,

    #[regex(r"//[^\n]*")]
    LineComment,
    #[regex(r"/\*([^*]|\*[^/])*\*/")]
    BlockComment,

    #[regex(r#""([^"\\]|\\.)*""#)]
    DoubleQuotedString,
    #[regex(r"'([^'\\]|\\.)*'")]
    SingleQuotedString,

    #[regex(r"@[A-Za-z-]+")]
    At,

    /// Catch-all run of characters for selectors, property names, and
    /// values — the driver's consumers split this on `:` and whitespace
    /// rather than the lexer producing a fully-classified CSS token
    /// stream (tokenizing every CSS value shape is out of scope here).
    #[regex(r#"[^{}; ,\t\r\n"']+"#)]
    Chunk,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lexes_braces_and_semicolons() {
        let toks: Vec<_> = RawToken::lexer(".x{color:red;}")
            .filter_map(Result::ok)
            .collect();
        assert_eq!(
            toks,
            vec![
                RawToken::Chunk,
                RawToken::LBrace,
                RawToken::Chunk,
                RawToken::Semi,
                RawToken::RBrace,
            ]
        );
    }

    #[test]
    fn lexes_line_comment_as_one_token() {
        let toks: Vec<_> = RawToken::lexer("// a comment\n.x{}")
            .filter_map(Result::ok)
            .collect();
        assert_eq!(toks[0], RawToken::LineComment);
    }
}
