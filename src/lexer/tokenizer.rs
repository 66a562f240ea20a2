//! Scanning raw input into an ordered token sequence.
//!
//! The scan never aborts: malformed regions (unterminated quotes, stray
//! tuple delimiters) are recorded as diagnostics and scanning continues at
//! the next recoverable boundary. Classification of prefixed words and
//! command names is relative to the *current* command context, which shifts
//! whenever a child-command name is scanned.

use generational_arena::Index;
use tracing::{instrument, trace};

use crate::diag::{Diagnostic, DiagnosticCollector, DiagnosticKind};
use crate::lexer::token::{Token, TokenKind};
use crate::model::tree::CommandTree;

/// Scans one input line against a command tree.
pub struct Tokenizer<'a> {
    tree: &'a CommandTree,
    /// Command context for name/command classification.
    current: Index,
}

struct Word {
    text: String,
    start: usize,
    /// Quoted words are always values, never names or commands.
    quoted: bool,
}

impl<'a> Tokenizer<'a> {
    pub fn new(tree: &'a CommandTree) -> Self {
        Self {
            tree,
            current: tree.root(),
        }
    }

    /// Scan `input` into tokens, recording tokenize-time diagnostics.
    #[instrument(level = "debug", skip(self, collector))]
    pub fn tokenize(mut self, input: &str, collector: &mut DiagnosticCollector) -> Vec<Token> {
        let options = self.tree.options().clone();
        let chars: Vec<char> = input.chars().collect();
        let mut tokens = Vec::new();
        let mut tuple_open_at: Option<usize> = None;
        let mut i = 0;

        while i < chars.len() {
            let c = chars[i];

            if c.is_whitespace() {
                i += 1;
                continue;
            }

            if c == options.tuple_open {
                if tuple_open_at.is_some() {
                    collector.push(
                        Diagnostic::new(
                            DiagnosticKind::TupleAlreadyOpen,
                            format!("tuple opened at {i} while another tuple is still open"),
                        )
                        .at(i)
                        .in_command(self.tree.path_of(self.current)),
                    );
                } else {
                    tuple_open_at = Some(i);
                    tokens.push(Token::new(TokenKind::TupleOpen, c.to_string(), i));
                }
                i += 1;
                continue;
            }

            if c == options.tuple_close {
                if tuple_open_at.is_none() {
                    collector.push(
                        Diagnostic::new(
                            DiagnosticKind::UnexpectedTupleClose,
                            "tuple close with no matching open".to_string(),
                        )
                        .at(i)
                        .in_command(self.tree.path_of(self.current)),
                    );
                } else {
                    tuple_open_at = None;
                    tokens.push(Token::new(TokenKind::TupleClose, c.to_string(), i));
                }
                i += 1;
                continue;
            }

            let word = self.scan_word(&chars, &mut i, &options, collector);

            // Forwarding marker: the rest of the input belongs verbatim to a
            // later consumer.
            if !word.quoted && is_forward_marker(&word.text, &options.prefixes) {
                self.emit_forward_values(&chars, i, &mut tokens);
                break;
            }

            if tuple_open_at.is_some() || word.quoted {
                tokens.push(Token::new(TokenKind::ArgumentValue, word.text, word.start));
            } else {
                tokens.push(self.classify(word, collector));
            }
        }

        if let Some(open_at) = tuple_open_at {
            collector.push(
                Diagnostic::new(
                    DiagnosticKind::TupleNotClosed,
                    "tuple still open at end of input".to_string(),
                )
                .at(open_at)
                .in_command(self.tree.path_of(self.current)),
            );
        }

        trace!(count = tokens.len(), "tokenized");
        tokens
    }

    /// Scan one word starting at `*i`, handling embedded quoted regions.
    fn scan_word(
        &self,
        chars: &[char],
        i: &mut usize,
        options: &crate::config::ParseOptions,
        collector: &mut DiagnosticCollector,
    ) -> Word {
        let start = *i;
        let mut text = String::new();
        let mut quoted = false;

        while *i < chars.len() {
            let c = chars[*i];
            if c.is_whitespace() || c == options.tuple_open || c == options.tuple_close {
                break;
            }
            if c == '\'' || c == '"' {
                quoted = true;
                let quote_at = *i;
                *i += 1;
                let mut closed = false;
                while *i < chars.len() {
                    // A backslash escapes the active quote char and itself;
                    // before anything else it is an ordinary character.
                    if chars[*i] == '\\'
                        && chars.get(*i + 1).is_some_and(|&next| next == c || next == '\\')
                    {
                        text.push(chars[*i + 1]);
                        *i += 2;
                        continue;
                    }
                    if chars[*i] == c {
                        *i += 1;
                        closed = true;
                        break;
                    }
                    text.push(chars[*i]);
                    *i += 1;
                }
                if !closed {
                    // Recoverable: the rest of the input becomes the value.
                    collector.push(
                        Diagnostic::new(
                            DiagnosticKind::StringNotClosed,
                            format!("quote opened at {quote_at} is never closed"),
                        )
                        .at(quote_at)
                        .in_command(self.tree.path_of(self.current)),
                    );
                }
                continue;
            }
            text.push(c);
            *i += 1;
        }

        Word {
            text,
            start,
            quoted,
        }
    }

    /// Classify an unquoted word relative to the current command context.
    fn classify(&mut self, word: Word, collector: &mut DiagnosticCollector) -> Token {
        let tree = self.tree;
        let options = tree.options();
        let node = match tree.node(self.current) {
            Some(node) => node,
            None => return Token::new(TokenKind::ArgumentValue, word.text, word.start),
        };

        let starts_with_prefix = word
            .text
            .chars()
            .next()
            .map_or(false, |c| options.is_prefix(c));

        if starts_with_prefix {
            let stripped = word.text.trim_start_matches(|c| options.is_prefix(c));
            if stripped.is_empty() {
                return Token::new(TokenKind::ArgumentValue, word.text, word.start);
            }

            let full_match = node.find_argument(stripped).is_some();
            // A bundle is recognized by its leading character; later unknown
            // characters are reported per-character at parse time.
            let bundle = stripped.chars().count() > 1
                && stripped.chars().next().map_or(false, |c| node.has_short(c));

            return match (full_match, bundle) {
                (true, true) => {
                    // Longest single-name match wins; ask the user to
                    // separate with spaces to get the bundle instead.
                    collector.push(
                        Diagnostic::new(
                            DiagnosticKind::SpaceRequired,
                            format!(
                                "'{}' matches both argument '{}' and a flag bundle; separate flags with spaces to bundle them",
                                word.text, stripped
                            ),
                        )
                        .at(word.start)
                        .in_command(tree.path_of(self.current)),
                    );
                    Token::new(TokenKind::ArgumentName, word.text, word.start)
                }
                (true, false) => Token::new(TokenKind::ArgumentName, word.text, word.start),
                (false, true) => Token::new(TokenKind::ArgumentNameList, word.text, word.start),
                // Unknown names are still name tokens; the parser reports
                // them with a near-miss suggestion.
                (false, false) => Token::new(TokenKind::ArgumentName, word.text, word.start),
            };
        }

        if let Some(child) = tree.arena().find_child(self.current, &word.text) {
            self.current = child;
            return Token::new(TokenKind::Command, word.text, word.start);
        }

        Token::new(TokenKind::ArgumentValue, word.text, word.start)
    }

    /// Emit the remainder of the input verbatim as forward-value tokens,
    /// split on whitespace only (no quote or tuple processing).
    fn emit_forward_values(&self, chars: &[char], from: usize, tokens: &mut Vec<Token>) {
        let mut i = from;
        while i < chars.len() {
            if chars[i].is_whitespace() {
                i += 1;
                continue;
            }
            let start = i;
            let mut text = String::new();
            while i < chars.len() && !chars[i].is_whitespace() {
                text.push(chars[i]);
                i += 1;
            }
            tokens.push(Token::new(TokenKind::ForwardValue, text, start));
        }
    }
}

/// A word consisting of exactly two identical prefix characters (`--` with
/// default options) forwards the rest of the input.
fn is_forward_marker(word: &str, prefixes: &[char]) -> bool {
    let mut chars = word.chars();
    match (chars.next(), chars.next(), chars.next()) {
        (Some(a), Some(b), None) => a == b && prefixes.contains(&a),
        _ => false,
    }
}
