//! Arena-backed command tree storage.
//!
//! Commands reference their parent and children by arena index instead of
//! back-pointers, so the tree is acyclic by construction and traversal
//! carries an explicit index path.

use generational_arena::{Arena, Index};
use tracing::instrument;

use crate::model::argument::Argument;
use crate::model::group::Group;

/// One command node: names, owned arguments and groups, tree links.
#[derive(Debug)]
pub struct CommandNode {
    pub name: String,
    pub aliases: Vec<String>,
    pub description: Option<String>,
    /// Index of the parent command, None for the root
    pub parent: Option<Index>,
    /// Indices of child commands in the arena
    pub children: Vec<Index>,
    pub arguments: Vec<Argument>,
    pub groups: Vec<Group>,
}

impl CommandNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            aliases: Vec::new(),
            description: None,
            parent: None,
            children: Vec::new(),
            arguments: Vec::new(),
            groups: Vec::new(),
        }
    }

    /// Does `name` address this command (canonical name or alias)?
    pub fn matches(&self, name: &str) -> bool {
        self.name == name || self.aliases.iter().any(|a| a == name)
    }

    pub fn find_argument(&self, name: &str) -> Option<&Argument> {
        self.arguments.iter().find(|a| a.matches(name))
    }

    pub fn argument_position(&self, name: &str) -> Option<usize> {
        self.arguments.iter().position(|a| a.matches(name))
    }

    /// The argument answering to the single-character name `c`, for bundles.
    pub fn find_short(&self, c: char) -> Option<&Argument> {
        self.arguments
            .iter()
            .find(|a| a.short_names().any(|s| s == c))
    }

    pub fn has_short(&self, c: char) -> bool {
        self.find_short(c).is_some()
    }

    /// Positional arguments in declaration order.
    pub fn positional_arguments(&self) -> impl Iterator<Item = &Argument> {
        self.arguments.iter().filter(|a| a.positional)
    }

    pub fn find_group(&self, name: &str) -> Option<usize> {
        self.groups.iter().position(|g| g.name == name)
    }
}

/// Arena storage for one command tree.
#[derive(Debug)]
pub struct CommandArena {
    arena: Arena<CommandNode>,
    root: Index,
}

impl CommandArena {
    /// Create an arena holding only the given root node.
    pub fn new(root_node: CommandNode) -> Self {
        let mut arena = Arena::new();
        let root = arena.insert(root_node);
        Self { arena, root }
    }

    pub fn root(&self) -> Index {
        self.root
    }

    #[instrument(level = "trace", skip(self, node))]
    pub fn insert_child(&mut self, parent: Index, mut node: CommandNode) -> Option<Index> {
        node.parent = Some(parent);
        let child = self.arena.insert(node);
        match self.arena.get_mut(parent) {
            Some(parent_node) => {
                parent_node.children.push(child);
                Some(child)
            }
            None => {
                self.arena.remove(child);
                None
            }
        }
    }

    pub fn get(&self, idx: Index) -> Option<&CommandNode> {
        self.arena.get(idx)
    }

    pub fn get_mut(&mut self, idx: Index) -> Option<&mut CommandNode> {
        self.arena.get_mut(idx)
    }

    /// The child of `parent` addressed by `name` (aliases included).
    pub fn find_child(&self, parent: Index, name: &str) -> Option<Index> {
        let parent = self.arena.get(parent)?;
        parent
            .children
            .iter()
            .copied()
            .find(|&child| self.arena.get(child).is_some_and(|node| node.matches(name)))
    }

    /// Dotted path of canonical names from (but excluding) the root.
    /// The root itself is the empty path.
    pub fn path_of(&self, idx: Index) -> String {
        let mut segments = Vec::new();
        let mut current = Some(idx);
        while let Some(i) = current {
            if i == self.root {
                break;
            }
            match self.arena.get(i) {
                Some(node) => {
                    segments.push(node.name.clone());
                    current = node.parent;
                }
                None => break,
            }
        }
        segments.reverse();
        segments.join(".")
    }

    /// Pre-order iteration over the whole tree.
    pub fn iter(&self) -> CommandIterator<'_> {
        CommandIterator {
            arena: self,
            stack: vec![self.root],
        }
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }
}

pub struct CommandIterator<'a> {
    arena: &'a CommandArena,
    stack: Vec<Index>,
}

impl<'a> Iterator for CommandIterator<'a> {
    type Item = (Index, &'a CommandNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current) = self.stack.pop() {
            if let Some(node) = self.arena.get(current) {
                // Push children in reverse order for left-to-right traversal
                for &child in node.children.iter().rev() {
                    self.stack.push(child);
                }
                return Some((current, node));
            }
        }
        None
    }
}
