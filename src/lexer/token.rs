//! Lexical tokens produced by scanning raw input.

use serde::Serialize;

/// Classification of one scanned token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenKind {
    /// A child-command name; shifts the tokenization context.
    Command,
    /// A single argument name (prefix still attached in `raw`).
    ArgumentName,
    /// A bundle of single-character flag names, e.g. `-abc`.
    ArgumentNameList,
    /// A raw value, attached by the parser to a name or positional slot.
    ArgumentValue,
    /// Opening tuple delimiter.
    TupleOpen,
    /// Closing tuple delimiter.
    TupleClose,
    /// Verbatim remainder after the forwarding marker.
    ForwardValue,
}

impl TokenKind {
    /// Argument-name tokens end value collection for a preceding argument.
    pub fn is_argument_specifier(self) -> bool {
        matches!(self, TokenKind::ArgumentName | TokenKind::ArgumentNameList)
    }

    pub fn is_tuple_delimiter(self) -> bool {
        matches!(self, TokenKind::TupleOpen | TokenKind::TupleClose)
    }
}

/// One immutable scanned unit: kind, raw text and char offset into the input
/// line (for diagnostics).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub raw: String,
    pub source_index: usize,
}

impl Token {
    pub fn new(kind: TokenKind, raw: impl Into<String>, source_index: usize) -> Self {
        Self {
            kind,
            raw: raw.into(),
            source_index,
        }
    }
}
