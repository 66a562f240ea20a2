//! Lexical layer: token records and the input scanner.

pub mod token;
pub mod tokenizer;

pub use token::{Token, TokenKind};
pub use tokenizer::Tokenizer;
