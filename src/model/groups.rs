//! Groups and group sequences used by the demo records.

use crate::validation::{Group, GroupSequence, ValidationResult, Validator};

/// Constraints checked first by [`VALIDATION_ORDER`].
pub const FIRST_GROUP: Group = Group::named("FirstGroup");

/// Constraints checked only when every [`FIRST_GROUP`] constraint holds.
pub const SECOND_GROUP: Group = Group::named("SecondGroup");

/// Registration-specific checks, also reached through group conversion.
pub const REGISTRATION_CHECKS: Group = Group::named("RegistrationChecks");

pub const VALIDATION_ORDER: Group = Group::named("ValidationOrder");

pub fn validation_order() -> GroupSequence {
    GroupSequence::new(VALIDATION_ORDER, [FIRST_GROUP, SECOND_GROUP])
}

/// Validator with every sequence the demo records rely on.
pub fn demo_validator() -> ValidationResult<Validator> {
    Validator::builder()
        .group_sequence(validation_order())
        .build()
}
