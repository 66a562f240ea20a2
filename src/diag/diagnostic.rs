//! Diagnostic records emitted by the tokenizer and parser.
//!
//! A diagnostic never aborts a parse. Tokenizing and parsing always run to
//! completion; everything they find is recorded and handed back to the
//! caller in emission order.

use std::fmt;

use serde::Serialize;

/// How bad a diagnostic is. Ordered: `Info < Warning < Error`.
///
/// Only diagnostics at [`Severity::Error`] make a parse result unusable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// Every problem the tokenizer or parser can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiagnosticKind {
    // tokenize-time
    /// A quoted region was still open at end of input.
    StringNotClosed,
    /// A tuple was opened while another tuple was already open.
    TupleAlreadyOpen,
    /// A tuple close delimiter appeared with no prior open.
    UnexpectedTupleClose,
    /// A tuple was still open at end of input.
    TupleNotClosed,
    /// A token matched both a full argument name and a flag bundle; a
    /// separating space would disambiguate.
    SpaceRequired,

    // parse-time
    /// A token matched neither a command, an argument, nor a positional slot.
    UnmatchedToken,
    /// An argument name did not match any argument of the current command.
    ArgumentNotFound,
    /// A character inside a flag bundle named no known argument.
    UnmatchedInArgNameList,
    /// An unknown argument name is close to a known one.
    SimilarArgument,
    /// The number of supplied values is outside the argument's arity range.
    IncorrectValueNumber,
    /// A value failed type coercion.
    ArgumentType,
    /// A required argument was never used.
    RequiredArgumentNotUsed,
    /// An argument declared unique was used more than once.
    UniqueArgumentUsed,
    /// More than one member of a mutually exclusive group was used.
    MultipleArgsInRestrictedGroup,
    /// No member of a require-one group was used.
    RequiredGroupNotUsed,
}

impl DiagnosticKind {
    /// The severity this kind is reported at unless overridden.
    pub fn default_severity(self) -> Severity {
        match self {
            DiagnosticKind::SpaceRequired | DiagnosticKind::SimilarArgument => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

/// One recorded problem: classification, location and human-readable message.
///
/// The serialized shape is stable:
/// `{severity, kind, message, source_index?, command_path}`.
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub kind: DiagnosticKind,
    pub message: String,
    /// Char offset into the tokenized input line, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_index: Option<usize>,
    /// Dotted path of the command context ("" for the root command).
    pub command_path: String,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            severity: kind.default_severity(),
            kind,
            message: message.into(),
            source_index: None,
            command_path: String::new(),
        }
    }

    pub fn at(mut self, source_index: usize) -> Self {
        self.source_index = Some(source_index);
        self
    }

    pub fn in_command(mut self, path: impl Into<String>) -> Self {
        self.command_path = path.into();
        self
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)
    }
}
