//! Terminal rendering of collected diagnostics.
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically (via `colored`).
//! The library never prints; callers take the rendered string to stderr or
//! wherever they present errors.

use std::fmt::Write;

use colored::Colorize;

use crate::diag::diagnostic::{Diagnostic, Severity};

/// Renders diagnostics one per line with a colored severity prefix and an
/// optional caret line pointing into the offending input.
#[derive(Debug, Default)]
pub struct DiagnosticFormatter {
    /// The input line the diagnostics refer to, for caret rendering.
    input: Option<String>,
}

impl DiagnosticFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach the tokenized input line so `source_index` positions can be
    /// rendered as caret lines.
    pub fn with_input(mut self, input: impl Into<String>) -> Self {
        self.input = Some(input.into());
        self
    }

    pub fn format(&self, diagnostics: &[Diagnostic]) -> String {
        let mut out = String::new();
        for diagnostic in diagnostics {
            out.push_str(&self.format_one(diagnostic));
        }
        out
    }

    fn format_one(&self, diagnostic: &Diagnostic) -> String {
        let prefix = match diagnostic.severity {
            Severity::Error => "error".red().bold().to_string(),
            Severity::Warning => "warning".yellow().to_string(),
            Severity::Info => "info".cyan().to_string(),
        };

        let mut line = format!("{}: {}", prefix, diagnostic.message);
        if !diagnostic.command_path.is_empty() {
            let _ = write!(line, " (in command '{}')", diagnostic.command_path);
        }
        line.push('\n');

        if let (Some(input), Some(index)) = (&self.input, diagnostic.source_index) {
            if index <= input.chars().count() {
                let _ = writeln!(line, "  {}", input);
                let _ = writeln!(line, "  {}{}", " ".repeat(index), "^".red().bold());
            }
        }

        line
    }
}
