//! Restriction groups over arguments and sub-groups within one command.

use serde::Serialize;

/// What a group restricts about its members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GroupRestriction {
    /// At most one member may be used per invocation.
    Exclusive,
    /// At least one member must be used per invocation.
    RequireOne,
}

/// A resolved group member: an index into the owning command's argument list
/// or its group list. Groups may nest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupMember {
    Argument(usize),
    Group(usize),
}

/// A finalized group as stored on a command node. Members always belong to
/// the same owning command.
#[derive(Debug, Clone)]
pub struct Group {
    pub name: String,
    pub restriction: GroupRestriction,
    pub members: Vec<GroupMember>,
}

/// Caller-facing group definition: members are referenced by name and
/// resolved (fail-fast) when the group is added to its command.
#[derive(Debug, Clone)]
pub struct GroupDef {
    name: String,
    restriction: GroupRestriction,
    members: Vec<MemberRef>,
}

#[derive(Debug, Clone)]
pub(crate) enum MemberRef {
    Argument(String),
    Group(String),
}

impl GroupDef {
    /// A mutually exclusive group: at most one member may be used.
    pub fn exclusive(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            restriction: GroupRestriction::Exclusive,
            members: Vec::new(),
        }
    }

    /// A require-one group: at least one member must be used.
    pub fn require_one(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            restriction: GroupRestriction::RequireOne,
            members: Vec::new(),
        }
    }

    /// Add an argument of the owning command as a member.
    pub fn argument(mut self, name: impl Into<String>) -> Self {
        self.members.push(MemberRef::Argument(name.into()));
        self
    }

    /// Add a previously added group of the owning command as a member.
    pub fn group(mut self, name: impl Into<String>) -> Self {
        self.members.push(MemberRef::Group(name.into()));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn into_parts(self) -> (String, GroupRestriction, Vec<MemberRef>) {
        (self.name, self.restriction, self.members)
    }
}
