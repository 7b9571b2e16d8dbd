//! Lexer module for tokenization

pub mod cursor;
pub mod json;
pub mod token;

pub use cursor::Cursor;
pub use json::JsonLexer;
pub use token::{Token, TokenKind};
