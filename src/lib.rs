//! Declarative command-line argument parsing with error accumulation.
//!
//! A [`CommandTree`] is declared once: commands, typed arguments and
//! restriction groups, all validated fail-fast at build time. Parsing then
//! never fails: user input is scanned and matched in full and every problem
//! becomes a [`Diagnostic`] in the returned [`ParseOutcome`], so one
//! invocation reports all of its mistakes at once.
//!
//! ```
//! use argtree::model::{ArgumentDef, CommandSpec, CommandTree};
//! use argtree::types::ValueKind;
//!
//! # fn main() -> argtree::model::BuildResult<()> {
//! let mut tree = CommandTree::new("app")?;
//! let root = tree.root();
//! tree.add_argument(
//!     root,
//!     ArgumentDef::new("count").alias("c").value_kind(ValueKind::Integer),
//! )?;
//! let build = tree.add_command(root, CommandSpec::new("build"))?;
//! tree.add_argument(build, ArgumentDef::flag("verbose").alias("v"))?;
//!
//! let outcome = tree.parse_line("-c 5 build -v");
//! assert!(outcome.is_usable());
//! assert_eq!(outcome.result.root().get_int("count"), Some(5));
//! assert!(outcome.result.was_invoked("build"));
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod diag;
pub mod lexer;
pub mod model;
pub mod parse;
pub mod types;

pub use config::ParseOptions;
pub use diag::{Diagnostic, DiagnosticFormatter, DiagnosticKind, Severity};
pub use model::{
    ArgumentDef, Arity, BuildError, BuildResult, CommandSpec, CommandTree, GroupDef,
    GroupRestriction,
};
pub use parse::{CommandResult, ParseOutcome, ParseResultRoot};
pub use types::{CustomResolver, ResolveError, Resolver, Value, ValueKind};
