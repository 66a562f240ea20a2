//! Argument definitions: names, prefix, arity, constraints and resolver.

use std::fmt;

use serde::Serialize;

use crate::model::error::{BuildError, BuildResult};
use crate::types::resolver::Resolver;
use crate::types::value::{Value, ValueKind};

/// How many value tokens an argument consumes. `max == None` is variadic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Arity {
    min: usize,
    max: Option<usize>,
}

impl Arity {
    /// A pure flag: consumes no values.
    pub fn zero() -> Self {
        Self {
            min: 0,
            max: Some(0),
        }
    }

    pub fn exactly(n: usize) -> Self {
        Self {
            min: n,
            max: Some(n),
        }
    }

    pub fn at_least(n: usize) -> Self {
        Self { min: n, max: None }
    }

    pub fn between(min: usize, max: usize) -> BuildResult<Self> {
        if min > max {
            return Err(BuildError::InvalidArity(format!(
                "min {min} exceeds max {max}"
            )));
        }
        Ok(Self {
            min,
            max: Some(max),
        })
    }

    pub fn min(&self) -> usize {
        self.min
    }

    pub fn max(&self) -> Option<usize> {
        self.max
    }

    pub fn is_zero(&self) -> bool {
        self.max == Some(0)
    }

    pub fn is_variadic(&self) -> bool {
        self.max.is_none()
    }

    pub fn contains(&self, n: usize) -> bool {
        n >= self.min && self.max.map_or(true, |hi| n <= hi)
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.max {
            Some(hi) if hi == self.min => write!(f, "{}", self.min),
            Some(hi) => write!(f, "{}..={}", self.min, hi),
            None => write!(f, "at least {}", self.min),
        }
    }
}

/// Caller-facing argument definition, consumed by
/// [`crate::model::tree::CommandTree::add_argument`].
///
/// Either an explicit [`Resolver`] or a [`ValueKind`] tag may be supplied;
/// with neither, the argument is a plain text option of arity 1.
#[derive(Debug, Clone)]
pub struct ArgumentDef {
    name: String,
    aliases: Vec<String>,
    prefix: char,
    required: bool,
    unique: bool,
    positional: bool,
    default: Option<Value>,
    description: Option<String>,
    resolver: Option<Resolver>,
    kind: Option<ValueKind>,
    arity: Option<Arity>,
}

impl ArgumentDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            aliases: Vec::new(),
            prefix: '-',
            required: false,
            unique: false,
            positional: false,
            default: None,
            description: None,
            resolver: None,
            kind: None,
            arity: None,
        }
    }

    /// A convenience constructor for arity-zero boolean flags.
    pub fn flag(name: impl Into<String>) -> Self {
        Self::new(name).resolver(Resolver::Flag)
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    pub fn prefix(mut self, prefix: char) -> Self {
        self.prefix = prefix;
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Usable at most once per invocation.
    pub fn unique(mut self, unique: bool) -> Self {
        self.unique = unique;
        self
    }

    /// Receives values without a preceding name token, in declaration order.
    pub fn positional(mut self, positional: bool) -> Self {
        self.positional = positional;
        self
    }

    pub fn default_value(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Infer the resolver from a value-type tag.
    pub fn value_kind(mut self, kind: ValueKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Supply an explicit resolver. Takes precedence over `value_kind`.
    pub fn resolver(mut self, resolver: Resolver) -> Self {
        self.resolver = Some(resolver);
        self
    }

    /// Override the resolver's default arity.
    pub fn arity(mut self, arity: Arity) -> Self {
        self.arity = Some(arity);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn build(self) -> BuildResult<Argument> {
        let resolver = match (self.resolver, self.kind) {
            (Some(resolver), _) => resolver,
            (None, Some(kind)) => Resolver::infer(&kind),
            (None, None) => Resolver::Text,
        };
        let arity = self.arity.unwrap_or_else(|| resolver.arity());

        if self.positional && arity.is_zero() {
            return Err(BuildError::InvalidArity(format!(
                "positional argument '{}' cannot have arity zero",
                self.name
            )));
        }

        // A default for a choice argument must itself be a valid choice.
        if let (Resolver::Choice { choices }, Some(Value::Str(default))) =
            (&resolver, &self.default)
        {
            if !choices.iter().any(|c| c == default) {
                return Err(BuildError::InvalidResolver(format!(
                    "default '{default}' for argument '{}' is not one of its choices",
                    self.name
                )));
            }
        }

        Ok(Argument {
            name: self.name,
            aliases: self.aliases,
            prefix: self.prefix,
            arity,
            required: self.required,
            unique: self.unique,
            positional: self.positional,
            default: self.default,
            description: self.description,
            resolver,
            group: None,
        })
    }
}

/// A finalized argument as stored on a command node.
#[derive(Debug, Clone)]
pub struct Argument {
    pub name: String,
    pub aliases: Vec<String>,
    pub prefix: char,
    pub arity: Arity,
    pub required: bool,
    pub unique: bool,
    pub positional: bool,
    pub default: Option<Value>,
    pub description: Option<String>,
    pub resolver: Resolver,
    /// Index into the owning command's group list, at most one.
    pub group: Option<usize>,
}

impl Argument {
    /// Does `name` (already stripped of prefix characters) address this
    /// argument?
    pub fn matches(&self, name: &str) -> bool {
        self.name == name || self.aliases.iter().any(|a| a == name)
    }

    /// Single-character names usable inside a flag bundle.
    pub fn short_names(&self) -> impl Iterator<Item = char> + '_ {
        std::iter::once(self.name.as_str())
            .chain(self.aliases.iter().map(String::as_str))
            .filter_map(|n| {
                let mut chars = n.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Some(c),
                    _ => None,
                }
            })
    }

    /// All names this argument answers to (canonical first).
    pub fn all_names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.aliases.iter().map(String::as_str))
    }
}
