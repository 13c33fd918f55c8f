//! Built-in property catalogue used when no schema is supplied.

use std::fmt;

use chrono::NaiveDate;

use crate::{
    registry::{ChoiceSet, FakeKind, ValueGenerator, date},
    value::PropertyValue,
};

/// Default node label outside schema mode.
pub const DEFAULT_NODE_LABEL: &str = "Person";
/// Default edge label outside schema mode.
pub const DEFAULT_EDGE_LABEL: &str = "knows";

/// Every built-in node property, in catalogue order.
pub const NODE_PROPERTIES: [&str; 9] = [
    "firstName",
    "lastName",
    "company",
    "job",
    "phoneNumber",
    "favoriteColor",
    "postalAddress",
    "friendCount",
    "preferredContactMethod",
];

/// Every built-in edge property, in catalogue order.
pub const EDGE_PROPERTIES: [&str; 4] = [
    "strength",
    "lastMeetingCity",
    "lastMeetingDate",
    "meetingCount",
];

/// Built-in edge properties kept equal across reciprocal edges.
pub const SYMMETRIC_EDGE_PROPERTIES: [&str; 3] =
    ["lastMeetingCity", "lastMeetingDate", "meetingCount"];

/// Node properties used when the caller does not choose any.
pub const DEFAULT_NODE_PROPERTIES: [&str; 2] = ["firstName", "lastName"];
/// Edge properties used when the caller does not choose any.
pub const DEFAULT_EDGE_PROPERTIES: [&str; 2] = ["strength", "lastMeetingDate"];

const CONTACT_METHODS: [&str; 7] = [
    "inPerson",
    "email",
    "postalMail",
    "phone",
    "textMessage",
    "videoCall",
    "noPreference",
];

const MEETING_START: NaiveDate = date(1955, 1, 1);
const MEETING_END: NaiveDate = date(2025, 6, 28);

/// Which element kind a property belongs to.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum PropertyTarget {
    /// Node property.
    Node,
    /// Edge property.
    Edge,
}

impl PropertyTarget {
    /// Lower-case name used in messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Node => "node",
            Self::Edge => "edge",
        }
    }

    /// Catalogue entries for this target.
    #[must_use]
    pub const fn catalogue(self) -> &'static [&'static str] {
        match self {
            Self::Node => &NODE_PROPERTIES,
            Self::Edge => &EDGE_PROPERTIES,
        }
    }
}

impl fmt::Display for PropertyTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns the generator behind a built-in property, or `None` when the
/// name is not in the catalogue for `target`.
pub(crate) fn builtin_generator(target: PropertyTarget, name: &str) -> Option<ValueGenerator> {
    let generator = match (target, name) {
        (PropertyTarget::Node, "firstName") => ValueGenerator::Fake(FakeKind::FirstName),
        (PropertyTarget::Node, "lastName") => ValueGenerator::Fake(FakeKind::LastName),
        (PropertyTarget::Node, "company") => ValueGenerator::Fake(FakeKind::Company),
        (PropertyTarget::Node, "job") => ValueGenerator::Fake(FakeKind::Job),
        (PropertyTarget::Node, "phoneNumber") => ValueGenerator::Fake(FakeKind::Phone),
        (PropertyTarget::Node, "favoriteColor") => ValueGenerator::Fake(FakeKind::Color),
        (PropertyTarget::Node, "postalAddress") => ValueGenerator::Fake(FakeKind::Address),
        (PropertyTarget::Node, "friendCount") => ValueGenerator::Integer { min: 1, max: 1000 },
        (PropertyTarget::Node, "preferredContactMethod") => ValueGenerator::Choice(
            ChoiceSet::new(CONTACT_METHODS.map(PropertyValue::from).to_vec())?,
        ),
        (PropertyTarget::Edge, "strength") => ValueGenerator::Integer { min: 1, max: 100 },
        (PropertyTarget::Edge, "lastMeetingCity") => ValueGenerator::Fake(FakeKind::City),
        (PropertyTarget::Edge, "lastMeetingDate") => ValueGenerator::Date {
            start: MEETING_START,
            end: MEETING_END,
        },
        (PropertyTarget::Edge, "meetingCount") => ValueGenerator::Integer { min: 1, max: 10_000 },
        _ => return None,
    };
    Some(generator)
}

/// Returns whether a built-in edge property is symmetric.
pub(crate) fn is_symmetric_builtin(name: &str) -> bool {
    SYMMETRIC_EDGE_PROPERTIES.contains(&name)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::node(PropertyTarget::Node)]
    #[case::edge(PropertyTarget::Edge)]
    fn every_catalogue_entry_has_a_generator(#[case] target: PropertyTarget) {
        for name in target.catalogue() {
            assert!(builtin_generator(target, name).is_some(), "{target} {name}");
        }
    }

    #[rstest]
    #[case::node_name_on_edge(PropertyTarget::Edge, "firstName")]
    #[case::edge_name_on_node(PropertyTarget::Node, "strength")]
    #[case::unknown(PropertyTarget::Node, "salary")]
    fn rejects_names_outside_the_target(#[case] target: PropertyTarget, #[case] name: &str) {
        assert!(builtin_generator(target, name).is_none());
    }

    #[rstest]
    fn symmetric_set_is_a_subset_of_edges() {
        for name in SYMMETRIC_EDGE_PROPERTIES {
            assert!(EDGE_PROPERTIES.contains(&name));
            assert!(is_symmetric_builtin(name));
        }
        assert!(!is_symmetric_builtin("strength"));
    }
}
