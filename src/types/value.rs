//! Typed value containers produced by argument resolution.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Serialize;

/// A typed value produced by resolving one argument's raw value tokens.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Path(PathBuf),
    List(Vec<Value>),
    Map(BTreeMap<String, Value>),
    Count(u64),
}

impl Value {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_path(&self) -> Option<&PathBuf> {
        match self {
            Value::Path(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_count(&self) -> Option<u64> {
        match self {
            Value::Count(n) => Some(*n),
            _ => None,
        }
    }
}

/// Closed set of value-type tags for resolver inference.
///
/// Each tag maps to exactly one built-in resolver; anything outside this set
/// needs an explicit [`crate::types::Resolver::Custom`].
#[derive(Debug, Clone, PartialEq)]
pub enum ValueKind {
    Bool,
    Integer,
    Float,
    String,
    Path,
    /// One value out of a fixed set of allowed strings.
    Choice(Vec<String>),
    /// One or more values of the element kind, aggregated into a list.
    List(Box<ValueKind>),
    /// `key=value` pairs, values resolved with the given kind.
    KeyValues(Box<ValueKind>),
    /// Arity-zero; the resolved value is the number of uses.
    Counter,
    /// Arity-zero; captures stdin once when the value is resolved.
    Stdin,
}
