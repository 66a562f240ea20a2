//! Definition-time errors (caller misuse of the build surface).
//!
//! These fail fast: a duplicate or dangling name while assembling the tree is
//! a programming defect in the calling code, not a user-input problem, so it
//! is returned as an `Err` instead of being collected as a diagnostic.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("command '{0}' already exists in '{1}'")]
    CommandAlreadyExists(String, String),

    #[error("command not found: {0}")]
    CommandNotFound(String),

    #[error("argument '{0}' already exists in command '{1}'")]
    ArgumentAlreadyExists(String, String),

    #[error("argument not found in command '{command}': {name}")]
    ArgumentNotFound { command: String, name: String },

    #[error("group '{0}' already exists in command '{1}'")]
    GroupAlreadyExists(String, String),

    #[error("group not found in command '{command}': {name}")]
    GroupNotFound { command: String, name: String },

    #[error("argument '{0}' already belongs to group '{1}'")]
    ArgumentAlreadyInGroup(String, String),

    #[error("invalid name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    #[error("invalid arity: {0}")]
    InvalidArity(String),

    #[error("invalid parse options: {0}")]
    InvalidOptions(String),

    #[error("invalid resolver configuration: {0}")]
    InvalidResolver(String),
}

pub type BuildResult<T> = Result<T, BuildError>;
