use super::group::Group;
use thiserror::Error;

/// Result type for validator calls
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Errors raised by the validator itself.
///
/// These describe broken rule declarations or misuse of the validator; a
/// value that merely fails its constraints is reported as a violation.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("type '{type_name}' has no constrained property '{property}'")]
    UnknownProperty {
        type_name: &'static str,
        property: String,
    },

    #[error("type '{type_name}' declares property '{property}' but does not expose its value")]
    MissingPropertyValue {
        type_name: &'static str,
        property: &'static str,
    },

    #[error("type '{type_name}' has no constrained method '{method}'")]
    UnknownExecutable {
        type_name: &'static str,
        method: String,
    },

    #[error("method '{type_name}::{method}' takes {expected} parameter(s) but {actual} were supplied")]
    ParameterCountMismatch {
        type_name: &'static str,
        method: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("constraint {constraint} cannot validate a {kind} value at '{path}'")]
    UnsupportedValue {
        constraint: &'static str,
        kind: &'static str,
        path: String,
    },

    #[error("group sequence '{group}' is cyclic: {chain}")]
    CyclicGroupSequence { group: Group, chain: String },

    #[error("group sequence '{group}' is registered more than once")]
    DuplicateGroupSequence { group: Group },

    #[error("group sequence '{group}' cannot be named Default")]
    DefaultGroupSequence { group: Group },
}
