//! Per-argument strategies that turn raw value tokens into typed values.
//!
//! A resolver is either one of the built-in variants below (selected directly
//! or inferred from a [`ValueKind`] tag) or a caller-supplied
//! [`CustomResolver`] behind dynamic dispatch. Resolution is pure with
//! respect to parse state: the same raw tokens always produce the same
//! result. Configuration (numeric bounds, choice sets) is fixed at
//! definition time.

use std::collections::BTreeMap;
use std::fmt;
use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

use crate::model::argument::Arity;
use crate::types::value::{Value, ValueKind};

/// Typed-value coercion failure. The parser turns these into `ArgumentType`
/// diagnostics carrying the offending token position.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("invalid {expected} value: '{raw}'")]
    Invalid { expected: &'static str, raw: String },

    #[error("value {raw} is out of range ({bounds})")]
    OutOfRange { raw: String, bounds: String },

    #[error("'{raw}' is not one of: {}", choices.join(", "))]
    NotAChoice { raw: String, choices: Vec<String> },

    #[error("invalid key-value pair: '{0}'")]
    InvalidKeyValue(String),

    #[error("key cannot be empty in pair: '{0}'")]
    EmptyKey(String),

    #[error("duplicate key: '{0}'")]
    DuplicateKey(String),

    #[error("a value is required but none was supplied")]
    MissingValue,

    #[error("failed to read stdin: {0}")]
    Stdin(String),

    #[error("{0}")]
    Custom(String),
}

/// Caller-supplied resolution strategy for value shapes outside the built-in
/// set.
pub trait CustomResolver: fmt::Debug + Send + Sync {
    /// How many raw value tokens this resolver consumes.
    fn arity(&self) -> Arity;

    /// Coerce the raw tokens into a typed value. Must be pure.
    fn resolve(&self, raw: &[&str]) -> Result<Value, ResolveError>;
}

/// Resolution strategy for one argument, each variant carrying its own
/// configuration.
#[derive(Debug, Clone)]
pub enum Resolver {
    /// Arity-zero; resolves to `Bool(true)` when the argument was used.
    Flag,
    /// Arity-zero; resolves to the number of uses.
    Counter,
    Bool,
    Integer { min: Option<i64>, max: Option<i64> },
    Float { min: Option<f64>, max: Option<f64> },
    Text,
    Choice { choices: Vec<String> },
    FilePath,
    /// Variadic; every raw token resolved with the element resolver.
    List { element: Box<Resolver> },
    /// Variadic `key=value` pairs; values resolved with the inner resolver.
    KeyValues { value: Box<Resolver> },
    /// Arity-zero; one blocking read of stdin when the value is resolved.
    Stdin,
    Custom(Arc<dyn CustomResolver>),
}

impl Resolver {
    /// Fixed inference table from value-type tags to built-in resolvers.
    pub fn infer(kind: &ValueKind) -> Resolver {
        match kind {
            ValueKind::Bool => Resolver::Bool,
            ValueKind::Integer => Resolver::Integer {
                min: None,
                max: None,
            },
            ValueKind::Float => Resolver::Float {
                min: None,
                max: None,
            },
            ValueKind::String => Resolver::Text,
            ValueKind::Path => Resolver::FilePath,
            ValueKind::Choice(choices) => Resolver::Choice {
                choices: choices.clone(),
            },
            ValueKind::List(element) => Resolver::List {
                element: Box::new(Resolver::infer(element)),
            },
            ValueKind::KeyValues(value) => Resolver::KeyValues {
                value: Box::new(Resolver::infer(value)),
            },
            ValueKind::Counter => Resolver::Counter,
            ValueKind::Stdin => Resolver::Stdin,
        }
    }

    /// How many value tokens this resolver consumes by default. An explicit
    /// arity on the argument definition overrides this.
    pub fn arity(&self) -> Arity {
        match self {
            Resolver::Flag | Resolver::Counter | Resolver::Stdin => Arity::zero(),
            Resolver::List { .. } | Resolver::KeyValues { .. } => Arity::at_least(1),
            Resolver::Custom(custom) => custom.arity(),
            _ => Arity::exactly(1),
        }
    }

    /// Coerce raw value tokens into a typed value.
    ///
    /// Value-consuming variants need at least one token; given none they
    /// return [`ResolveError::MissingValue`].
    pub fn resolve(&self, raw: &[&str]) -> Result<Value, ResolveError> {
        match self {
            Resolver::Flag | Resolver::Counter | Resolver::Stdin => self.resolve_uses(1),
            Resolver::Custom(custom) => custom.resolve(raw),
            _ if raw.is_empty() => Err(ResolveError::MissingValue),
            Resolver::Bool => match raw[0] {
                "true" | "yes" | "1" => Ok(Value::Bool(true)),
                "false" | "no" | "0" => Ok(Value::Bool(false)),
                other => Err(ResolveError::Invalid {
                    expected: "boolean",
                    raw: other.to_string(),
                }),
            },
            Resolver::Integer { min, max } => {
                let parsed: i64 = raw[0].parse().map_err(|_| ResolveError::Invalid {
                    expected: "integer",
                    raw: raw[0].to_string(),
                })?;
                if min.is_some_and(|lo| parsed < lo) || max.is_some_and(|hi| parsed > hi) {
                    return Err(ResolveError::OutOfRange {
                        raw: raw[0].to_string(),
                        bounds: bounds_label(*min, *max),
                    });
                }
                Ok(Value::Int(parsed))
            }
            Resolver::Float { min, max } => {
                let parsed: f64 = raw[0].parse().map_err(|_| ResolveError::Invalid {
                    expected: "float",
                    raw: raw[0].to_string(),
                })?;
                if min.is_some_and(|lo| parsed < lo) || max.is_some_and(|hi| parsed > hi) {
                    return Err(ResolveError::OutOfRange {
                        raw: raw[0].to_string(),
                        bounds: bounds_label(*min, *max),
                    });
                }
                Ok(Value::Float(parsed))
            }
            Resolver::Text => Ok(Value::Str(raw[0].to_string())),
            Resolver::Choice { choices } => {
                if choices.iter().any(|c| c == raw[0]) {
                    Ok(Value::Str(raw[0].to_string()))
                } else {
                    Err(ResolveError::NotAChoice {
                        raw: raw[0].to_string(),
                        choices: choices.clone(),
                    })
                }
            }
            Resolver::FilePath => Ok(Value::Path(PathBuf::from(raw[0]))),
            Resolver::List { element } => {
                let items = raw
                    .iter()
                    .map(|token| element.resolve(&[token]))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Value::List(items))
            }
            Resolver::KeyValues { value } => {
                let mut map = BTreeMap::new();
                for token in raw {
                    let (key, rest) = token
                        .split_once('=')
                        .ok_or_else(|| ResolveError::InvalidKeyValue(token.to_string()))?;
                    if key.is_empty() {
                        return Err(ResolveError::EmptyKey(token.to_string()));
                    }
                    if map.contains_key(key) {
                        return Err(ResolveError::DuplicateKey(key.to_string()));
                    }
                    map.insert(key.to_string(), value.resolve(&[rest])?);
                }
                Ok(Value::Map(map))
            }
        }
    }

    /// Resolution path for arity-zero resolvers: the value is derived from
    /// the number of uses instead of from tokens.
    pub fn resolve_uses(&self, uses: u32) -> Result<Value, ResolveError> {
        match self {
            Resolver::Counter => Ok(Value::Count(u64::from(uses))),
            Resolver::Stdin => {
                let mut buf = String::new();
                std::io::stdin()
                    .read_to_string(&mut buf)
                    .map_err(|e| ResolveError::Stdin(e.to_string()))?;
                Ok(Value::Str(buf))
            }
            Resolver::Custom(custom) => custom.resolve(&[]),
            // Flag and any non-zero-arity resolver forced to arity zero
            _ => Ok(Value::Bool(true)),
        }
    }
}

fn bounds_label<T: fmt::Display>(min: Option<T>, max: Option<T>) -> String {
    match (min, max) {
        (Some(lo), Some(hi)) => format!("{lo}..={hi}"),
        (Some(lo), None) => format!(">= {lo}"),
        (None, Some(hi)) => format!("<= {hi}"),
        (None, None) => "unbounded".to_string(),
    }
}
