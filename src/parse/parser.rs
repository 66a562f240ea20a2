//! The token walk: matching a token sequence against the command tree.
//!
//! The walk never aborts. Every problem becomes a diagnostic and parsing
//! continues at the next token, so one invocation reports as many input
//! mistakes as possible. Constraint checks (required, unique, groups) run
//! after the walk, once per invoked command.

use std::collections::{BTreeMap, HashMap};

use generational_arena::Index;
use itertools::Itertools;
use tracing::{debug, instrument};

use crate::diag::{suggest, Diagnostic, DiagnosticCollector, DiagnosticKind};
use crate::lexer::token::{Token, TokenKind};
use crate::model::arena::CommandNode;
use crate::model::argument::Argument;
use crate::model::group::{Group, GroupMember, GroupRestriction};
use crate::model::tree::CommandTree;
use crate::parse::result::{CommandResult, ParseResultRoot};
use crate::types::value::Value;

/// Per-command accumulation while the walk is in flight.
#[derive(Default)]
struct CommandState {
    result: CommandResult,
    /// Next positional slot to fill, in declaration order.
    positional_cursor: usize,
}

/// One token walk over one input line.
pub struct Parser<'a> {
    tree: &'a CommandTree,
    tokens: Vec<Token>,
    pos: usize,
    states: HashMap<Index, CommandState>,
    forwarded: Vec<String>,
}

impl<'a> Parser<'a> {
    pub fn new(tree: &'a CommandTree, tokens: Vec<Token>) -> Self {
        Self {
            tree,
            tokens,
            pos: 0,
            states: HashMap::new(),
            forwarded: Vec::new(),
        }
    }

    /// Walk the token sequence, then finalize every invoked command.
    #[instrument(level = "debug", skip_all)]
    pub fn run(mut self, collector: &mut DiagnosticCollector) -> ParseResultRoot {
        let mut current = self.tree.root();
        self.mark_invoked(current);

        while self.pos < self.tokens.len() {
            let token = self.tokens[self.pos].clone();
            match token.kind {
                TokenKind::Command => {
                    self.pos += 1;
                    if let Some(child) = self.tree.arena().find_child(current, &token.raw) {
                        current = child;
                        self.mark_invoked(current);
                        debug!(command = %token.raw, "descending into child command");
                    }
                }
                TokenKind::ArgumentName => {
                    self.pos += 1;
                    self.handle_name(current, &token, collector);
                }
                TokenKind::ArgumentNameList => {
                    self.pos += 1;
                    self.handle_bundle(current, &token, collector);
                }
                TokenKind::ArgumentValue | TokenKind::TupleOpen => {
                    self.handle_positional(current, &token, collector);
                }
                // Paired closes are consumed during value collection; a
                // close reaching here is left over from error recovery.
                TokenKind::TupleClose => {
                    self.pos += 1;
                }
                TokenKind::ForwardValue => {
                    self.pos += 1;
                    self.forwarded.push(token.raw);
                }
            }
        }

        self.finalize(collector)
    }

    /// A single argument name token: look it up on the current command and
    /// collect its values, or report it with a near-miss suggestion.
    fn handle_name(&mut self, command: Index, token: &Token, collector: &mut DiagnosticCollector) {
        let tree = self.tree;
        let options = tree.options();
        let stripped = token
            .raw
            .trim_start_matches(|c| options.is_prefix(c))
            .to_string();
        let node = match tree.node(command) {
            Some(node) => node,
            None => return,
        };

        match node.find_argument(&stripped) {
            Some(argument) => {
                let argument = argument.clone();
                self.consume_values(command, &argument, token, collector);
            }
            None => {
                let path = tree.path_of(command);
                collector.push(
                    Diagnostic::new(
                        DiagnosticKind::ArgumentNotFound,
                        format!("unknown argument '{}'", token.raw),
                    )
                    .at(token.source_index)
                    .in_command(path.clone()),
                );
                let candidates = node.arguments.iter().flat_map(Argument::all_names);
                if let Some(suggestion) =
                    suggest::closest(&stripped, candidates, options.max_suggestion_distance)
                {
                    // Render the suggestion with its argument's own prefix.
                    let prefix = node
                        .find_argument(suggestion)
                        .map_or('-', |argument| argument.prefix);
                    collector.push(
                        Diagnostic::new(
                            DiagnosticKind::SimilarArgument,
                            format!("did you mean '{prefix}{suggestion}'?"),
                        )
                        .at(token.source_index)
                        .in_command(path),
                    );
                }
            }
        }
    }

    /// A flag bundle: each character is one single-character argument name.
    /// A member that consumes values must be the final character, since the
    /// values can only follow the bundle as a whole.
    fn handle_bundle(&mut self, command: Index, token: &Token, collector: &mut DiagnosticCollector) {
        let tree = self.tree;
        let options = tree.options();
        let stripped: Vec<char> = token
            .raw
            .trim_start_matches(|c| options.is_prefix(c))
            .chars()
            .collect();
        let node = match tree.node(command) {
            Some(node) => node,
            None => return,
        };
        let path = tree.path_of(command);
        let last = stripped.len().saturating_sub(1);

        for (position, c) in stripped.iter().enumerate() {
            match node.find_short(*c) {
                None => {
                    collector.push(
                        Diagnostic::new(
                            DiagnosticKind::UnmatchedInArgNameList,
                            format!("unknown flag '{c}' in '{}'", token.raw),
                        )
                        .at(token.source_index)
                        .in_command(path.clone()),
                    );
                }
                Some(argument) => {
                    if argument.arity.is_zero() {
                        let name = argument.name.clone();
                        self.record_use(command, &name);
                    } else if position == last {
                        let argument = argument.clone();
                        self.consume_values(command, &argument, token, collector);
                    } else {
                        collector.push(
                            Diagnostic::new(
                                DiagnosticKind::IncorrectValueNumber,
                                format!(
                                    "argument '{c}' in '{}' expects {} value(s); place it last in the bundle or use it separately",
                                    token.raw, argument.arity
                                ),
                            )
                            .at(token.source_index)
                            .in_command(path.clone()),
                        );
                        let name = argument.name.clone();
                        self.record_use(command, &name);
                    }
                }
            }
        }
    }

    /// A value token with no preceding name: feed the next positional slot,
    /// or report it as unmatched.
    fn handle_positional(
        &mut self,
        command: Index,
        token: &Token,
        collector: &mut DiagnosticCollector,
    ) {
        let tree = self.tree;
        let node = match tree.node(command) {
            Some(node) => node,
            None => {
                self.pos += 1;
                return;
            }
        };

        let cursor = self
            .states
            .get(&command)
            .map_or(0, |s| s.positional_cursor);
        let positional = node.positional_arguments().nth(cursor).cloned();

        match positional {
            Some(argument) => {
                self.states.entry(command).or_default().positional_cursor += 1;
                self.consume_values(command, &argument, token, collector);
            }
            None => {
                collector.push(
                    Diagnostic::new(
                        DiagnosticKind::UnmatchedToken,
                        format!("unmatched token '{}'", token.raw),
                    )
                    .at(token.source_index)
                    .in_command(tree.path_of(command)),
                );
                self.skip_value_region(token);
            }
        }
    }

    /// Skip past the token that produced an unmatched-token diagnostic. For
    /// a tuple open this swallows the whole tuple, so one stray tuple yields
    /// one diagnostic instead of one per element.
    fn skip_value_region(&mut self, token: &Token) {
        self.pos += 1;
        if token.kind != TokenKind::TupleOpen {
            return;
        }
        while let Some(t) = self.tokens.get(self.pos) {
            let done = t.kind == TokenKind::TupleClose;
            self.pos += 1;
            if done {
                break;
            }
        }
    }

    /// Collect value tokens for `argument` starting at the current position,
    /// then resolve them. `anchor` locates diagnostics when no value token
    /// exists to point at.
    fn consume_values(
        &mut self,
        command: Index,
        argument: &Argument,
        anchor: &Token,
        collector: &mut DiagnosticCollector,
    ) {
        let path = self.tree.path_of(command);

        if argument.arity.is_zero() {
            // Value comes from the use count, resolved at finalization.
            self.record_use(command, &argument.name);
            return;
        }

        let in_tuple = self
            .tokens
            .get(self.pos)
            .is_some_and(|t| t.kind == TokenKind::TupleOpen);
        if in_tuple {
            self.pos += 1;
        }

        let mut raws: Vec<(String, usize)> = Vec::new();
        while let Some(token) = self.tokens.get(self.pos) {
            if in_tuple {
                if token.kind == TokenKind::TupleClose {
                    self.pos += 1;
                    break;
                }
                raws.push((token.raw.clone(), token.source_index));
                self.pos += 1;
            } else {
                if token.kind != TokenKind::ArgumentValue {
                    break;
                }
                if argument.arity.max().is_some_and(|hi| raws.len() >= hi) {
                    break;
                }
                raws.push((token.raw.clone(), token.source_index));
                self.pos += 1;
            }
        }

        // The argument counts as used even when its values are wrong, so a
        // required-argument diagnostic is not stacked on top.
        self.record_use(command, &argument.name);

        if !argument.arity.contains(raws.len()) {
            collector.push(
                Diagnostic::new(
                    DiagnosticKind::IncorrectValueNumber,
                    format!(
                        "argument '{}' expects {} value(s), got {}",
                        argument.name,
                        argument.arity,
                        raws.len()
                    ),
                )
                .at(anchor.source_index)
                .in_command(path),
            );
            return;
        }

        // An arity that admits zero values may leave nothing to resolve.
        if raws.is_empty() {
            return;
        }

        let texts: Vec<&str> = raws.iter().map(|(raw, _)| raw.as_str()).collect();
        match argument.resolver.resolve(&texts) {
            Ok(value) => {
                self.record_value(command, &argument.name, value);
            }
            Err(error) => {
                let at = raws
                    .first()
                    .map_or(anchor.source_index, |(_, index)| *index);
                collector.push(
                    Diagnostic::new(
                        DiagnosticKind::ArgumentType,
                        format!("argument '{}': {error}", argument.name),
                    )
                    .at(at)
                    .in_command(path),
                );
            }
        }
    }

    fn mark_invoked(&mut self, command: Index) {
        self.states.entry(command).or_default().result.invoked = true;
    }

    fn record_use(&mut self, command: Index, name: &str) -> u32 {
        self.states
            .entry(command)
            .or_default()
            .result
            .record_use(name)
    }

    fn record_value(&mut self, command: Index, name: &str, value: Value) {
        self.states
            .entry(command)
            .or_default()
            .result
            .record_value(name, value);
    }

    /// Post-walk pass: apply defaults, resolve use-counted arguments and
    /// check required/unique/group constraints on every invoked command.
    /// Non-invoked commands keep an empty result entry.
    fn finalize(mut self, collector: &mut DiagnosticCollector) -> ParseResultRoot {
        let mut root = CommandResult::default();
        let mut commands = BTreeMap::new();

        for (index, node) in self.tree.arena().iter() {
            let path = self.tree.path_of(index);
            let mut state = self.states.remove(&index).unwrap_or_default();

            if state.result.invoked {
                check_arguments(node, &mut state.result, collector, &path);
                check_groups(node, &state.result, collector, &path);
            }

            if path.is_empty() {
                root = state.result;
            } else {
                commands.insert(path, state.result);
            }
        }

        ParseResultRoot::new(root, commands, self.forwarded)
    }
}

fn check_arguments(
    node: &CommandNode,
    result: &mut CommandResult,
    collector: &mut DiagnosticCollector,
    path: &str,
) {
    for argument in &node.arguments {
        let uses = result.use_count(&argument.name);

        if argument.unique && uses > 1 {
            collector.push(
                Diagnostic::new(
                    DiagnosticKind::UniqueArgumentUsed,
                    format!("argument '{}' may be used at most once", argument.name),
                )
                .in_command(path.to_string()),
            );
        }

        if uses == 0 {
            if let Some(default) = &argument.default {
                result.record_value(&argument.name, default.clone());
            } else if argument.required {
                collector.push(
                    Diagnostic::new(
                        DiagnosticKind::RequiredArgumentNotUsed,
                        format!("required argument '{}' was not used", argument.name),
                    )
                    .in_command(path.to_string()),
                );
            }
        } else if argument.arity.is_zero() {
            match argument.resolver.resolve_uses(uses) {
                Ok(value) => result.record_value(&argument.name, value),
                Err(error) => collector.push(
                    Diagnostic::new(
                        DiagnosticKind::ArgumentType,
                        format!("argument '{}': {error}", argument.name),
                    )
                    .in_command(path.to_string()),
                ),
            }
        }
    }
}

fn check_groups(
    node: &CommandNode,
    result: &CommandResult,
    collector: &mut DiagnosticCollector,
    path: &str,
) {
    for group in &node.groups {
        let used = used_member_names(node, group, result);
        match group.restriction {
            // One diagnostic per violated group, naming all used members.
            GroupRestriction::Exclusive if used.len() > 1 => {
                collector.push(
                    Diagnostic::new(
                        DiagnosticKind::MultipleArgsInRestrictedGroup,
                        format!(
                            "group '{}' allows only one of its members; got {}",
                            group.name,
                            used.iter().map(|n| format!("'{n}'")).join(", ")
                        ),
                    )
                    .in_command(path.to_string()),
                );
            }
            GroupRestriction::RequireOne if used.is_empty() => {
                collector.push(
                    Diagnostic::new(
                        DiagnosticKind::RequiredGroupNotUsed,
                        format!("group '{}' requires at least one of its members", group.name),
                    )
                    .in_command(path.to_string()),
                );
            }
            _ => {}
        }
    }
}

/// Names of the group's used argument members, nested sub-groups included.
/// Sub-groups always precede their parent in the group list, so recursion
/// terminates.
fn used_member_names<'n>(
    node: &'n CommandNode,
    group: &Group,
    result: &CommandResult,
) -> Vec<&'n str> {
    let mut used = Vec::new();
    for member in &group.members {
        match member {
            GroupMember::Argument(i) => {
                if let Some(argument) = node.arguments.get(*i) {
                    if result.use_count(&argument.name) > 0 {
                        used.push(argument.name.as_str());
                    }
                }
            }
            GroupMember::Group(i) => {
                if let Some(inner) = node.groups.get(*i) {
                    used.extend(used_member_names(node, inner, result));
                }
            }
        }
    }
    used
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Tokenizer;
    use crate::model::argument::{ArgumentDef, Arity};
    use crate::model::group::GroupDef;
    use crate::model::tree::{CommandSpec, CommandTree};
    use crate::types::resolver::Resolver;
    use crate::types::value::{Value, ValueKind};

    fn sample_tree() -> CommandTree {
        let mut tree = CommandTree::new("app").unwrap();
        let root = tree.root();
        tree.add_argument(
            root,
            ArgumentDef::new("count")
                .alias("c")
                .value_kind(ValueKind::Integer),
        )
        .unwrap();
        tree.add_argument(root, ArgumentDef::flag("quiet").alias("q"))
            .unwrap();
        let build = tree.add_command(root, CommandSpec::new("build")).unwrap();
        tree.add_argument(build, ArgumentDef::flag("verbose").alias("v"))
            .unwrap();
        tree
    }

    fn parse(tree: &CommandTree, input: &str) -> (ParseResultRoot, Vec<Diagnostic>) {
        let mut collector = DiagnosticCollector::new();
        let tokens = Tokenizer::new(tree).tokenize(input, &mut collector);
        let result = Parser::new(tree, tokens).run(&mut collector);
        (result, collector.into_vec())
    }

    fn kinds(diagnostics: &[Diagnostic]) -> Vec<DiagnosticKind> {
        diagnostics.iter().map(|d| d.kind).collect()
    }

    #[test]
    fn named_argument_value_is_resolved() {
        let tree = sample_tree();
        let (result, diagnostics) = parse(&tree, "-c 5");
        assert!(diagnostics.is_empty());
        assert_eq!(result.root().get_int("count"), Some(5));
    }

    #[test]
    fn child_command_arguments_resolve_in_child_context() {
        let tree = sample_tree();
        let (result, diagnostics) = parse(&tree, "build -v");
        assert!(diagnostics.is_empty());
        assert!(result.was_invoked("build"));
        assert_eq!(result.value("build", "verbose"), Some(&Value::Bool(true)));
    }

    #[test]
    fn unknown_argument_gets_error_and_suggestion() {
        let tree = sample_tree();
        let (_, diagnostics) = parse(&tree, "--cuont 5");
        assert_eq!(
            kinds(&diagnostics)[..2],
            [
                DiagnosticKind::ArgumentNotFound,
                DiagnosticKind::SimilarArgument
            ]
        );
        assert!(diagnostics[1].message.contains("count"));
    }

    #[test]
    fn unknown_argument_far_from_candidates_gets_no_suggestion() {
        let tree = sample_tree();
        let (_, diagnostics) = parse(&tree, "--frobnicate");
        assert_eq!(kinds(&diagnostics), [DiagnosticKind::ArgumentNotFound]);
    }

    #[test]
    fn bundle_uses_each_flag_once() {
        let mut tree = CommandTree::new("app").unwrap();
        let root = tree.root();
        tree.add_argument(root, ArgumentDef::flag("a")).unwrap();
        tree.add_argument(root, ArgumentDef::flag("b")).unwrap();
        let (result, diagnostics) = parse(&tree, "-ab");
        assert!(diagnostics.is_empty());
        assert_eq!(result.root().get_bool("a"), Some(true));
        assert_eq!(result.root().get_bool("b"), Some(true));
    }

    #[test]
    fn bundle_member_needing_values_must_be_last() {
        let tree = sample_tree();
        // c expects a value but x follows it within the bundle.
        let (_, diagnostics) = parse(&tree, "-cx");
        assert!(kinds(&diagnostics).contains(&DiagnosticKind::IncorrectValueNumber));
        assert!(kinds(&diagnostics).contains(&DiagnosticKind::UnmatchedInArgNameList));
    }

    #[test]
    fn bundle_trailing_member_collects_values() {
        let tree = sample_tree();
        let (result, diagnostics) = parse(&tree, "-qc 5");
        assert!(diagnostics.is_empty());
        assert_eq!(result.root().get_bool("quiet"), Some(true));
        assert_eq!(result.root().get_int("count"), Some(5));
    }

    #[test]
    fn missing_value_is_an_incorrect_value_number() {
        let tree = sample_tree();
        let (_, diagnostics) = parse(&tree, "-c");
        assert_eq!(kinds(&diagnostics), [DiagnosticKind::IncorrectValueNumber]);
    }

    #[test]
    fn unresolvable_value_is_a_type_diagnostic() {
        let tree = sample_tree();
        let (_, diagnostics) = parse(&tree, "-c abc");
        assert_eq!(kinds(&diagnostics), [DiagnosticKind::ArgumentType]);
    }

    #[test]
    fn repeated_non_unique_argument_keeps_the_last_value() {
        let tree = sample_tree();
        let (result, diagnostics) = parse(&tree, "-c 1 -c 2");
        assert!(diagnostics.is_empty());
        assert_eq!(result.root().get_int("count"), Some(2));
        assert_eq!(result.root().use_count("count"), 2);
    }

    #[test]
    fn unique_argument_used_twice_is_reported_once() {
        let mut tree = CommandTree::new("app").unwrap();
        let root = tree.root();
        tree.add_argument(
            root,
            ArgumentDef::new("mode").unique(true).value_kind(ValueKind::String),
        )
        .unwrap();
        let (_, diagnostics) = parse(&tree, "--mode a --mode b");
        assert_eq!(kinds(&diagnostics), [DiagnosticKind::UniqueArgumentUsed]);
    }

    #[test]
    fn required_argument_missing_is_reported_for_invoked_commands_only() {
        let mut tree = sample_tree();
        let root = tree.root();
        tree.add_argument(
            root,
            ArgumentDef::new("name").required(true).value_kind(ValueKind::String),
        )
        .unwrap();
        let build = tree.command_at_path("build").unwrap();
        tree.add_argument(
            build,
            ArgumentDef::new("target").required(true).value_kind(ValueKind::String),
        )
        .unwrap();

        // build not invoked: only the root requirement fires.
        let (_, diagnostics) = parse(&tree, "-c 5");
        assert_eq!(kinds(&diagnostics), [DiagnosticKind::RequiredArgumentNotUsed]);
    }

    #[test]
    fn default_value_fills_unused_argument() {
        let mut tree = CommandTree::new("app").unwrap();
        let root = tree.root();
        tree.add_argument(
            root,
            ArgumentDef::new("level")
                .value_kind(ValueKind::Integer)
                .default_value(Value::Int(3)),
        )
        .unwrap();
        let (result, diagnostics) = parse(&tree, "");
        assert!(diagnostics.is_empty());
        assert_eq!(result.root().get_int("level"), Some(3));
    }

    #[test]
    fn unused_flag_is_absent_from_the_result() {
        let tree = sample_tree();
        let (result, _) = parse(&tree, "-c 5");
        assert!(!result.root().is_present("quiet"));
        assert_eq!(result.root().get("quiet"), None);
    }

    #[test]
    fn counter_flag_accumulates_uses() {
        let mut tree = CommandTree::new("app").unwrap();
        let root = tree.root();
        tree.add_argument(
            root,
            ArgumentDef::new("verbose").alias("v").resolver(Resolver::Counter),
        )
        .unwrap();
        let (result, diagnostics) = parse(&tree, "-v -v -v");
        assert!(diagnostics.is_empty());
        assert_eq!(result.root().get_count("verbose"), Some(3));
    }

    #[test]
    fn positional_values_fill_slots_in_declaration_order() {
        let mut tree = CommandTree::new("app").unwrap();
        let root = tree.root();
        tree.add_argument(
            root,
            ArgumentDef::new("source").positional(true).value_kind(ValueKind::String),
        )
        .unwrap();
        tree.add_argument(
            root,
            ArgumentDef::new("dest").positional(true).value_kind(ValueKind::String),
        )
        .unwrap();
        let (result, diagnostics) = parse(&tree, "in.txt out.txt");
        assert!(diagnostics.is_empty());
        assert_eq!(result.root().get_str("source"), Some("in.txt"));
        assert_eq!(result.root().get_str("dest"), Some("out.txt"));
    }

    #[test]
    fn value_with_no_positional_slot_is_unmatched() {
        let tree = sample_tree();
        let (_, diagnostics) = parse(&tree, "stray");
        assert_eq!(kinds(&diagnostics), [DiagnosticKind::UnmatchedToken]);
    }

    #[test]
    fn stray_tuple_is_one_unmatched_diagnostic() {
        let tree = sample_tree();
        let (_, diagnostics) = parse(&tree, "[1 2 3]");
        assert_eq!(kinds(&diagnostics), [DiagnosticKind::UnmatchedToken]);
    }

    #[test]
    fn tuple_feeds_variadic_argument() {
        let mut tree = CommandTree::new("app").unwrap();
        let root = tree.root();
        tree.add_argument(
            root,
            ArgumentDef::new("files").value_kind(ValueKind::List(Box::new(ValueKind::String))),
        )
        .unwrap();
        let (result, diagnostics) = parse(&tree, "--files [a b c]");
        assert!(diagnostics.is_empty());
        let value = result.root().get("files");
        assert!(matches!(value, Some(Value::List(items)) if items.len() == 3));
    }

    #[test]
    fn too_many_tuple_values_is_an_incorrect_value_number() {
        let mut tree = CommandTree::new("app").unwrap();
        let root = tree.root();
        tree.add_argument(
            root,
            ArgumentDef::new("pair")
                .value_kind(ValueKind::List(Box::new(ValueKind::String)))
                .arity(Arity::exactly(2)),
        )
        .unwrap();
        let (_, diagnostics) = parse(&tree, "--pair [a b c]");
        assert_eq!(kinds(&diagnostics), [DiagnosticKind::IncorrectValueNumber]);
    }

    #[test]
    fn exclusive_group_reports_one_diagnostic_for_two_members() {
        let mut tree = sample_tree();
        let root = tree.root();
        tree.add_group(
            root,
            GroupDef::exclusive("volume").argument("count").argument("quiet"),
        )
        .unwrap();
        let (_, diagnostics) = parse(&tree, "-c 5 -q");
        assert_eq!(
            kinds(&diagnostics),
            [DiagnosticKind::MultipleArgsInRestrictedGroup]
        );
        assert!(diagnostics[0].message.contains("'count'"));
        assert!(diagnostics[0].message.contains("'quiet'"));
    }

    #[test]
    fn require_one_group_reports_when_no_member_used() {
        let mut tree = sample_tree();
        let root = tree.root();
        tree.add_group(
            root,
            GroupDef::require_one("volume").argument("count").argument("quiet"),
        )
        .unwrap();
        let (_, diagnostics) = parse(&tree, "");
        assert_eq!(kinds(&diagnostics), [DiagnosticKind::RequiredGroupNotUsed]);
    }

    #[test]
    fn nested_group_member_counts_toward_the_outer_group() {
        let mut tree = CommandTree::new("app").unwrap();
        let root = tree.root();
        tree.add_argument(root, ArgumentDef::flag("a")).unwrap();
        tree.add_argument(root, ArgumentDef::flag("b")).unwrap();
        tree.add_argument(root, ArgumentDef::flag("c")).unwrap();
        tree.add_group(root, GroupDef::exclusive("inner").argument("a").argument("b"))
            .unwrap();
        tree.add_group(
            root,
            GroupDef::exclusive("outer").group("inner").argument("c"),
        )
        .unwrap();

        // a through the inner group plus c directly violates the outer group.
        let (_, diagnostics) = parse(&tree, "-a -c");
        assert_eq!(
            kinds(&diagnostics),
            [DiagnosticKind::MultipleArgsInRestrictedGroup]
        );
        assert!(diagnostics[0].message.contains("outer"));
    }

    #[test]
    fn forwarded_tokens_bypass_matching() {
        let tree = sample_tree();
        let (result, diagnostics) = parse(&tree, "-c 5 -- --not-an-arg [raw");
        assert!(diagnostics.is_empty());
        assert_eq!(result.forwarded(), ["--not-an-arg", "[raw"]);
    }

    #[test]
    fn diagnostics_carry_the_command_path() {
        let tree = sample_tree();
        let (_, diagnostics) = parse(&tree, "build --nope");
        assert_eq!(diagnostics[0].command_path, "build");
    }
}
