//! Per-tree parse options.
//!
//! Compiled defaults match the conventional CLI surface: `-` prefixes,
//! square-bracket tuples, suggestion distance 2. A tree may override any of
//! them at construction time; the struct round-trips through serde so
//! embedders can persist a configuration alongside their own.

use serde::{Deserialize, Serialize};

use crate::model::error::{BuildError, BuildResult};

/// Lexical configuration applied to every parse run of one tree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ParseOptions {
    /// Characters recognized as argument-name prefixes.
    pub prefixes: Vec<char>,
    /// Opening delimiter of a value tuple.
    pub tuple_open: char,
    /// Closing delimiter of a value tuple.
    pub tuple_close: char,
    /// Maximum edit distance for "did you mean" suggestions.
    pub max_suggestion_distance: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            prefixes: vec!['-'],
            tuple_open: '[',
            tuple_close: ']',
            max_suggestion_distance: 2,
        }
    }
}

impl ParseOptions {
    pub fn is_prefix(&self, c: char) -> bool {
        self.prefixes.contains(&c)
    }

    /// Reject delimiter configurations the tokenizer cannot scan.
    pub fn validate(&self) -> BuildResult<()> {
        if self.prefixes.is_empty() {
            return Err(BuildError::InvalidOptions(
                "at least one prefix character is required".into(),
            ));
        }
        if self.tuple_open == self.tuple_close {
            return Err(BuildError::InvalidOptions(
                "tuple delimiters must be two distinct characters".into(),
            ));
        }
        for c in [self.tuple_open, self.tuple_close] {
            if c == '\'' || c == '"' || c.is_whitespace() {
                return Err(BuildError::InvalidOptions(format!(
                    "tuple delimiter '{c}' collides with quoting or whitespace"
                )));
            }
        }
        if self
            .prefixes
            .iter()
            .any(|&p| p == self.tuple_open || p == self.tuple_close)
        {
            return Err(BuildError::InvalidOptions(
                "prefix characters must not collide with tuple delimiters".into(),
            ));
        }
        Ok(())
    }
}
