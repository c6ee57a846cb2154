//! Named constraint groups and ordered group sequences.

use serde::Serialize;
use std::fmt;

/// A named tag partitioning constraints so only a subset is evaluated per call.
///
/// Constraints that do not name a group belong to [`Group::DEFAULT`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Group(&'static str);

impl Group {
    /// The implicit group of every constraint declared without groups.
    pub const DEFAULT: Group = Group("Default");

    pub const fn named(name: &'static str) -> Self {
        Self(name)
    }

    pub fn name(&self) -> &'static str {
        self.0
    }

    pub fn is_default(&self) -> bool {
        *self == Self::DEFAULT
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// An ordered list of groups addressed by its own group name.
///
/// When a sequence is requested, its members are validated one after the
/// other and evaluation stops after the first member that reports any
/// violation. Members may themselves name other registered sequences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupSequence {
    name: Group,
    members: Vec<Group>,
}

impl GroupSequence {
    pub fn new(name: Group, members: impl IntoIterator<Item = Group>) -> Self {
        Self {
            name,
            members: members.into_iter().collect(),
        }
    }

    pub fn name(&self) -> Group {
        self.name
    }

    pub fn members(&self) -> &[Group] {
        &self.members
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_group_is_named_default() {
        assert_eq!(Group::DEFAULT.name(), "Default");
        assert!(Group::DEFAULT.is_default());
        assert!(!Group::named("Checks").is_default());
    }

    #[test]
    fn sequence_keeps_member_order() {
        let first = Group::named("First");
        let second = Group::named("Second");
        let sequence = GroupSequence::new(Group::named("Order"), [second, first]);
        assert_eq!(sequence.members(), &[second, first]);
        assert_eq!(sequence.name().to_string(), "Order");
    }
}
