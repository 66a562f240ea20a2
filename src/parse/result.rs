//! Typed parse results mirroring the command tree.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::diag::{Diagnostic, Severity};
use crate::types::value::Value;

/// Per-command slice of a parse result: whether the command was reached and
/// the resolved value for each of its arguments.
///
/// Every declared command gets a result entry, so callers can distinguish
/// "not invoked" from "invoked with no arguments".
#[derive(Debug, Clone, Default, Serialize)]
pub struct CommandResult {
    pub invoked: bool,
    values: BTreeMap<String, Value>,
    use_counts: BTreeMap<String, u32>,
}

impl CommandResult {
    pub(crate) fn record_value(&mut self, name: &str, value: Value) {
        self.values.insert(name.to_string(), value);
    }

    /// Count one use; returns the new total.
    pub(crate) fn record_use(&mut self, name: &str) -> u32 {
        let count = self.use_counts.entry(name.to_string()).or_insert(0);
        *count += 1;
        *count
    }

    pub fn use_count(&self, name: &str) -> u32 {
        self.use_counts.get(name).copied().unwrap_or(0)
    }

    /// Whether the argument resolved to a value (used, or defaulted).
    pub fn is_present(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn get_int(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(Value::as_int)
    }

    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(Value::as_bool)
    }

    pub fn get_float(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(Value::as_float)
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    pub fn get_count(&self, name: &str) -> Option<u64> {
        self.get(name).and_then(Value::as_count)
    }
}

/// Top-level parse result: per-command results addressable by dotted path
/// plus the forwarded remainder, if any.
#[derive(Debug, Clone, Serialize)]
pub struct ParseResultRoot {
    root: CommandResult,
    commands: BTreeMap<String, CommandResult>,
    forwarded: Vec<String>,
}

impl ParseResultRoot {
    pub(crate) fn new(
        root: CommandResult,
        commands: BTreeMap<String, CommandResult>,
        forwarded: Vec<String>,
    ) -> Self {
        Self {
            root,
            commands,
            forwarded,
        }
    }

    pub fn root(&self) -> &CommandResult {
        &self.root
    }

    /// Result slice for a dotted command path; "" addresses the root.
    pub fn command(&self, path: &str) -> Option<&CommandResult> {
        if path.is_empty() {
            Some(&self.root)
        } else {
            self.commands.get(path)
        }
    }

    pub fn was_invoked(&self, path: &str) -> bool {
        self.command(path).map_or(false, |c| c.invoked)
    }

    /// Lookup one argument value by command path and argument name.
    pub fn value(&self, path: &str, argument: &str) -> Option<&Value> {
        self.command(path)?.get(argument)
    }

    /// Verbatim remainder after the forwarding marker.
    pub fn forwarded(&self) -> &[String] {
        &self.forwarded
    }
}

/// Everything one parse invocation produces: the result tree and the ordered
/// diagnostics.
#[derive(Debug)]
pub struct ParseOutcome {
    pub result: ParseResultRoot,
    pub diagnostics: Vec<Diagnostic>,
}

impl ParseOutcome {
    pub(crate) fn new(result: ParseResultRoot, diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            result,
            diagnostics,
        }
    }

    /// Usable while no diagnostic reached [`Severity::Error`].
    pub fn is_usable(&self) -> bool {
        !self
            .diagnostics
            .iter()
            .any(|d| d.severity >= Severity::Error)
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity >= Severity::Error)
    }
}
