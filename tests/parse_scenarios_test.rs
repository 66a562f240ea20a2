//! End-to-end parse scenarios over one shared command tree.

mod common;

use argtree::model::{ArgumentDef, CommandSpec, CommandTree, GroupDef};
use argtree::types::ValueKind;
use argtree::DiagnosticKind;

use common::init_test_setup;

/// Root: required `--count`/`-c` (integer, arity 1) and flag `--quiet`/`-q`,
/// mutually exclusive with each other. Sub-command `build` with flag
/// `--verbose`/`-v`.
fn scenario_tree() -> CommandTree {
    let mut tree = CommandTree::new("app").unwrap();
    let root = tree.root();
    tree.add_argument(
        root,
        ArgumentDef::new("count")
            .alias("c")
            .value_kind(ValueKind::Integer)
            .required(true),
    )
    .unwrap();
    tree.add_argument(root, ArgumentDef::flag("quiet").alias("q"))
        .unwrap();
    tree.add_group(
        root,
        GroupDef::exclusive("volume").argument("count").argument("quiet"),
    )
    .unwrap();
    let build = tree.add_command(root, CommandSpec::new("build")).unwrap();
    tree.add_argument(build, ArgumentDef::flag("verbose").alias("v"))
        .unwrap();
    tree
}

// ============================================================
// Clean Input
// ============================================================

#[test]
fn given_valid_count_when_parsing_then_result_is_usable() {
    init_test_setup();
    let tree = scenario_tree();

    let outcome = tree.parse_line("-c 5");

    assert!(outcome.is_usable(), "diagnostics: {:?}", outcome.diagnostics);
    assert_eq!(outcome.result.root().get_int("count"), Some(5));
    assert!(!outcome.result.was_invoked("build"));
}

#[test]
fn given_sub_command_flag_when_parsing_then_value_lands_on_sub_command() {
    init_test_setup();
    let tree = scenario_tree();

    let outcome = tree.parse_line("-c 1 build -v");

    assert!(outcome.is_usable(), "diagnostics: {:?}", outcome.diagnostics);
    assert!(outcome.result.was_invoked("build"));
    assert_eq!(outcome.result.command("build").unwrap().get_bool("verbose"), Some(true));
    // The flag never leaks onto the root.
    assert!(!outcome.result.root().is_present("verbose"));
}

// ============================================================
// Constraint Violations
// ============================================================

#[test]
fn given_missing_required_argument_when_sub_command_reached_then_root_requirement_still_fires() {
    init_test_setup();
    let tree = scenario_tree();

    let outcome = tree.parse_line("build -v");

    assert!(!outcome.is_usable());
    let kinds: Vec<_> = outcome.diagnostics.iter().map(|d| d.kind).collect();
    assert_eq!(kinds, vec![DiagnosticKind::RequiredArgumentNotUsed]);
    assert!(outcome.diagnostics[0].message.contains("count"));
    assert_eq!(outcome.diagnostics[0].command_path, "");
    // The walk itself succeeded; build is still marked invoked.
    assert!(outcome.result.was_invoked("build"));
}

#[test]
fn given_both_exclusive_members_when_parsing_then_group_violation_is_reported() {
    init_test_setup();
    let tree = scenario_tree();

    let outcome = tree.parse_line("-c 5 -q");

    assert!(!outcome.is_usable());
    let kinds: Vec<_> = outcome.diagnostics.iter().map(|d| d.kind).collect();
    assert_eq!(
        kinds,
        vec![DiagnosticKind::MultipleArgsInRestrictedGroup]
    );
    assert!(outcome.diagnostics[0].message.contains("volume"));
}

#[test]
fn given_non_numeric_value_when_parsing_integer_argument_then_type_diagnostic_is_reported() {
    init_test_setup();
    let tree = scenario_tree();

    let outcome = tree.parse_line("-c abc");

    assert!(!outcome.is_usable());
    let kinds: Vec<_> = outcome.diagnostics.iter().map(|d| d.kind).collect();
    assert_eq!(kinds, vec![DiagnosticKind::ArgumentType]);
    assert!(outcome.diagnostics[0].message.contains("count"));
}

// ============================================================
// Quoted Values and Positionals
// ============================================================

#[test]
fn given_quoted_value_without_positional_slot_when_parsing_then_token_is_unmatched() {
    init_test_setup();
    let tree = scenario_tree();

    let outcome = tree.parse_line("-c 1 \"a b\" build");

    let kinds: Vec<_> = outcome.diagnostics.iter().map(|d| d.kind).collect();
    assert_eq!(kinds, vec![DiagnosticKind::UnmatchedToken]);
    assert!(outcome.diagnostics[0].message.contains("a b"));
    // The quoted value never shadows the command name that follows it.
    assert!(outcome.result.was_invoked("build"));
}

#[test]
fn given_quoted_value_with_positional_slot_when_parsing_then_slot_receives_it_whole() {
    init_test_setup();
    let mut tree = scenario_tree();
    let root = tree.root();
    tree.add_argument(
        root,
        ArgumentDef::new("label").positional(true).value_kind(ValueKind::String),
    )
    .unwrap();

    let outcome = tree.parse_line("-c 1 \"a b\" build");

    assert!(outcome.is_usable(), "diagnostics: {:?}", outcome.diagnostics);
    assert_eq!(outcome.result.root().get_str("label"), Some("a b"));
    assert!(outcome.result.was_invoked("build"));
}

// ============================================================
// Bundles
// ============================================================

#[test]
fn given_bundle_with_value_taking_member_not_last_when_parsing_then_value_number_is_incorrect() {
    init_test_setup();
    let tree = scenario_tree();

    // c expects a value; inside "-cx" nothing can follow it.
    let outcome = tree.parse_line("-cx");

    assert!(!outcome.is_usable());
    let kinds: Vec<_> = outcome.diagnostics.iter().map(|d| d.kind).collect();
    assert!(kinds.contains(&DiagnosticKind::IncorrectValueNumber));
}

#[test]
fn given_bundle_ending_in_value_taking_member_when_parsing_then_following_value_is_consumed() {
    init_test_setup();
    let tree = scenario_tree();

    let outcome = tree.parse_line("-qc 5");

    // Both flags land; the group violation is the only complaint.
    let kinds: Vec<_> = outcome.diagnostics.iter().map(|d| d.kind).collect();
    assert_eq!(
        kinds,
        vec![DiagnosticKind::MultipleArgsInRestrictedGroup]
    );
    assert_eq!(outcome.result.root().get_int("count"), Some(5));
    assert_eq!(outcome.result.root().get_bool("quiet"), Some(true));
}

// ============================================================
// Error Accumulation
// ============================================================

#[test]
fn given_several_mistakes_when_parsing_then_all_are_reported_in_one_pass() {
    init_test_setup();
    let tree = scenario_tree();

    let outcome = tree.parse_line("--coutn 5 stray -q build --nope");

    let kinds: Vec<_> = outcome.diagnostics.iter().map(|d| d.kind).collect();
    assert!(kinds.contains(&DiagnosticKind::ArgumentNotFound));
    assert!(kinds.contains(&DiagnosticKind::SimilarArgument));
    assert!(kinds.contains(&DiagnosticKind::UnmatchedToken));
    assert!(kinds.contains(&DiagnosticKind::RequiredArgumentNotUsed));
    assert!(kinds.iter().filter(|k| **k == DiagnosticKind::ArgumentNotFound).count() >= 2);
}

#[test]
fn given_pre_split_arguments_when_parsing_then_whitespace_survives_in_values() {
    init_test_setup();
    let mut tree = CommandTree::new("app").unwrap();
    let root = tree.root();
    tree.add_argument(root, ArgumentDef::new("name").value_kind(ValueKind::String))
        .unwrap();

    let outcome = tree.parse(["--name", "two words"]);

    assert!(outcome.is_usable(), "diagnostics: {:?}", outcome.diagnostics);
    assert_eq!(outcome.result.root().get_str("name"), Some("two words"));
}

#[test]
fn given_pre_split_element_with_embedded_quotes_when_parsing_then_value_round_trips() {
    init_test_setup();
    let mut tree = CommandTree::new("app").unwrap();
    let root = tree.root();
    tree.add_argument(root, ArgumentDef::new("name").value_kind(ValueKind::String))
        .unwrap();

    // An argv element may mix both quote kinds and backslashes freely.
    let outcome = tree.parse(["--name", r#"it's a "mix" of \ both"#]);

    assert!(outcome.is_usable(), "diagnostics: {:?}", outcome.diagnostics);
    assert_eq!(
        outcome.result.root().get_str("name"),
        Some(r#"it's a "mix" of \ both"#)
    );
}

#[test]
fn given_pre_split_element_with_quotes_but_no_whitespace_when_parsing_then_value_round_trips() {
    init_test_setup();
    let mut tree = CommandTree::new("app").unwrap();
    let root = tree.root();
    tree.add_argument(root, ArgumentDef::new("name").value_kind(ValueKind::String))
        .unwrap();

    let outcome = tree.parse(["--name", "it's"]);

    assert!(outcome.is_usable(), "diagnostics: {:?}", outcome.diagnostics);
    assert_eq!(outcome.result.root().get_str("name"), Some("it's"));
}
