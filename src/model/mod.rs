//! Static command/argument/group model: the caller-declared grammar that
//! token sequences are matched against.
//!
//! Built once before parsing, immutable during parsing. Definition-time
//! misuse fails fast with [`error::BuildError`]; user-input problems are
//! never surfaced here.

pub mod arena;
pub mod argument;
pub mod error;
pub mod group;
pub mod tree;

pub use arena::{CommandArena, CommandNode};
pub use argument::{Argument, ArgumentDef, Arity};
pub use error::{BuildError, BuildResult};
pub use group::{Group, GroupDef, GroupMember, GroupRestriction};
pub use tree::{CommandSpec, CommandTree};
