//! Minimal tokenizer for bracketed Sass/SCSS syntax.
//!
//! Out of scope per the driver spec (only a black-box stand-in is
//! needed): this does not attempt full CSS value tokenization, just
//! enough structural punctuation plus opaque text chunks for the parser
//! to build a workable AST from.

mod lexer;
mod raw_token;
mod token;

pub use lexer::lex;
pub use token::{Token, TokenKind};
