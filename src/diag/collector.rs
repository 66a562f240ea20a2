//! Ordered accumulation of diagnostics for one parse invocation.

use tracing::debug;

use crate::diag::diagnostic::{Diagnostic, Severity};

/// Collects every diagnostic emitted during one tokenize + parse run.
///
/// Diagnostics are kept in emission order and never discarded. The overall
/// result is considered usable only while [`DiagnosticCollector::has_errors`]
/// stays false.
#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    items: Vec<Diagnostic>,
}

impl DiagnosticCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        debug!(kind = ?diagnostic.kind, severity = %diagnostic.severity, "{}", diagnostic.message);
        self.items.push(diagnostic);
    }

    /// True if any collected diagnostic is at [`Severity::Error`] or above.
    pub fn has_errors(&self) -> bool {
        self.items.iter().any(|d| d.severity >= Severity::Error)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.items
    }
}
