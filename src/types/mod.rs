//! Typed-value resolution: value containers, the closed value-kind tag set
//! and per-argument resolvers.

pub mod resolver;
pub mod value;

pub use resolver::{CustomResolver, ResolveError, Resolver};
pub use value::{Value, ValueKind};
