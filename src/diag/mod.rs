//! Error pipeline: diagnostic records, ordered collection, suggestions and
//! terminal rendering.
//!
//! User-input problems never abort a parse. The tokenizer and parser record
//! everything they find into a [`DiagnosticCollector`] and keep going, so a
//! single invocation reports the complete set of problems.

pub mod collector;
pub mod diagnostic;
pub mod formatter;
pub mod suggest;

pub use collector::DiagnosticCollector;
pub use diagnostic::{Diagnostic, DiagnosticKind, Severity};
pub use formatter::DiagnosticFormatter;
