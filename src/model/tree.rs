//! The caller-facing build surface and parse entry points.
//!
//! A `CommandTree` is assembled once, before parsing, and is immutable while
//! parsing: `parse` borrows the tree read-only and keeps all per-parse state
//! in the parser, so the same tree can be reused by sequential parses with no
//! reset step. Definition-time misuse (duplicate or dangling names) fails
//! fast with a [`BuildError`].

use generational_arena::Index;
use regex::Regex;
use tracing::instrument;

use crate::config::ParseOptions;
use crate::diag::DiagnosticCollector;
use crate::lexer::tokenizer::Tokenizer;
use crate::model::arena::{CommandArena, CommandNode};
use crate::model::argument::ArgumentDef;
use crate::model::error::{BuildError, BuildResult};
use crate::model::group::{Group, GroupDef, GroupMember, MemberRef};
use crate::parse::parser::Parser;
use crate::parse::result::ParseOutcome;

const NAME_PATTERN: &str = r"^[A-Za-z0-9][A-Za-z0-9_-]*$";

/// Caller-facing command definition: canonical name, aliases, description.
#[derive(Debug, Clone)]
pub struct CommandSpec {
    name: String,
    aliases: Vec<String>,
    description: Option<String>,
}

impl CommandSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            aliases: Vec::new(),
            description: None,
        }
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// The static, caller-declared grammar: a tree of commands with their
/// arguments and restriction groups.
#[derive(Debug)]
pub struct CommandTree {
    arena: CommandArena,
    options: ParseOptions,
    name_regex: Regex,
}

impl CommandTree {
    /// A tree with default [`ParseOptions`] and a root command of the given
    /// name.
    pub fn new(name: impl Into<String>) -> BuildResult<Self> {
        Self::with_options(CommandSpec::new(name), ParseOptions::default())
    }

    pub fn with_options(spec: CommandSpec, options: ParseOptions) -> BuildResult<Self> {
        options.validate()?;
        let name_regex = Regex::new(NAME_PATTERN).expect("valid name pattern");
        Self::check_spec_names(&name_regex, &spec)?;

        let mut root = CommandNode::new(spec.name);
        root.aliases = spec.aliases;
        root.description = spec.description;

        Ok(Self {
            arena: CommandArena::new(root),
            options,
            name_regex,
        })
    }

    pub fn root(&self) -> Index {
        self.arena.root()
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    pub fn node(&self, idx: Index) -> Option<&CommandNode> {
        self.arena.get(idx)
    }

    pub fn arena(&self) -> &CommandArena {
        &self.arena
    }

    /// Add a child command under `parent`. Duplicate names or aliases within
    /// the parent's scope fail fast.
    pub fn add_command(&mut self, parent: Index, spec: CommandSpec) -> BuildResult<Index> {
        Self::check_spec_names(&self.name_regex, &spec)?;

        let parent_node = self
            .arena
            .get(parent)
            .ok_or_else(|| BuildError::CommandNotFound(format!("{parent:?}")))?;
        let parent_name = parent_node.name.clone();

        for name in std::iter::once(&spec.name).chain(spec.aliases.iter()) {
            let taken = parent_node.children.iter().any(|&child| {
                self.arena
                    .get(child)
                    .is_some_and(|node| node.matches(name))
            });
            if taken {
                return Err(BuildError::CommandAlreadyExists(name.clone(), parent_name));
            }
        }

        let mut node = CommandNode::new(spec.name);
        node.aliases = spec.aliases;
        node.description = spec.description;

        self.arena
            .insert_child(parent, node)
            .ok_or_else(|| BuildError::CommandNotFound(format!("{parent:?}")))
    }

    /// Add an argument to a command. Names and aliases must be unique among
    /// the command's arguments.
    pub fn add_argument(&mut self, command: Index, def: ArgumentDef) -> BuildResult<()> {
        let argument = {
            let node = self
                .arena
                .get(command)
                .ok_or_else(|| BuildError::CommandNotFound(format!("{command:?}")))?;

            let argument = def.build()?;
            for name in argument.all_names() {
                if !self.name_regex.is_match(name) {
                    return Err(BuildError::InvalidName {
                        name: name.to_string(),
                        reason: "names are alphanumeric with '-' or '_'".into(),
                    });
                }
                if node.find_argument(name).is_some() {
                    return Err(BuildError::ArgumentAlreadyExists(
                        name.to_string(),
                        node.name.clone(),
                    ));
                }
            }
            argument
        };

        if let Some(node) = self.arena.get_mut(command) {
            node.arguments.push(argument);
        }
        Ok(())
    }

    /// Add a restriction group to a command. Members are referenced by name
    /// and must already exist on the same command; an argument may belong to
    /// at most one group. Sub-groups must be added before the group that
    /// contains them.
    pub fn add_group(&mut self, command: Index, def: GroupDef) -> BuildResult<()> {
        let (name, restriction, member_refs) = def.into_parts();

        let node = self
            .arena
            .get(command)
            .ok_or_else(|| BuildError::CommandNotFound(format!("{command:?}")))?;
        let command_name = node.name.clone();

        if node.find_group(&name).is_some() {
            return Err(BuildError::GroupAlreadyExists(name, command_name));
        }

        let group_index = node.groups.len();
        let mut members = Vec::with_capacity(member_refs.len());
        let mut claimed_arguments = Vec::new();

        for member in member_refs {
            match member {
                MemberRef::Argument(arg_name) => {
                    let position = node.argument_position(&arg_name).ok_or_else(|| {
                        BuildError::ArgumentNotFound {
                            command: command_name.clone(),
                            name: arg_name.clone(),
                        }
                    })?;
                    if node.arguments[position].group.is_some() {
                        return Err(BuildError::ArgumentAlreadyInGroup(arg_name, name));
                    }
                    claimed_arguments.push(position);
                    members.push(GroupMember::Argument(position));
                }
                MemberRef::Group(group_name) => {
                    let position = node.find_group(&group_name).ok_or_else(|| {
                        BuildError::GroupNotFound {
                            command: command_name.clone(),
                            name: group_name.clone(),
                        }
                    })?;
                    members.push(GroupMember::Group(position));
                }
            }
        }

        if let Some(node) = self.arena.get_mut(command) {
            for position in claimed_arguments {
                node.arguments[position].group = Some(group_index);
            }
            node.groups.push(Group {
                name,
                restriction,
                members,
            });
        }
        Ok(())
    }

    /// Look up a command by dotted path; the empty path is the root.
    pub fn command_at_path(&self, path: &str) -> Option<Index> {
        let mut current = self.arena.root();
        if path.is_empty() {
            return Some(current);
        }
        for segment in path.split('.') {
            current = self.arena.find_child(current, segment)?;
        }
        Some(current)
    }

    /// Dotted path of a command, "" for the root.
    pub fn path_of(&self, idx: Index) -> String {
        self.arena.path_of(idx)
    }

    /// Parse a pre-split argument sequence (e.g. `std::env::args().skip(1)`).
    ///
    /// Elements containing whitespace or quote characters are re-quoted,
    /// with embedded quotes and backslashes escaped, so they survive the
    /// joined lexical pass unchanged as single value tokens.
    pub fn parse<I, S>(&self, args: I) -> ParseOutcome
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let line = args
            .into_iter()
            .map(|arg| quote_if_needed(arg.as_ref()))
            .collect::<Vec<_>>()
            .join(" ");
        self.parse_line(&line)
    }

    /// Parse a single raw command line against this tree.
    ///
    /// Never fails: every problem found is recorded in the returned
    /// [`ParseOutcome::diagnostics`] while scanning and parsing continue.
    #[instrument(level = "debug", skip(self))]
    pub fn parse_line(&self, input: &str) -> ParseOutcome {
        let mut collector = DiagnosticCollector::new();
        let tokens = Tokenizer::new(self).tokenize(input, &mut collector);
        let result = Parser::new(self, tokens).run(&mut collector);
        ParseOutcome::new(result, collector.into_vec())
    }

    fn check_spec_names(name_regex: &Regex, spec: &CommandSpec) -> BuildResult<()> {
        for name in std::iter::once(&spec.name).chain(spec.aliases.iter()) {
            if !name_regex.is_match(name) {
                return Err(BuildError::InvalidName {
                    name: name.clone(),
                    reason: "names are alphanumeric with '-' or '_'".into(),
                });
            }
        }
        Ok(())
    }
}

/// Quote one argv element so the joined lexical pass reproduces it exactly.
/// Elements that would be re-interpreted (whitespace splits, quote chars
/// opening a region) are wrapped in double quotes with `"` and `\` escaped.
fn quote_if_needed(arg: &str) -> String {
    let needs_quoting = arg
        .chars()
        .any(|c| c.is_whitespace() || c == '"' || c == '\'');
    if needs_quoting {
        let escaped = arg.replace('\\', "\\\\").replace('"', "\\\"");
        format!("\"{escaped}\"")
    } else {
        arg.to_string()
    }
}
