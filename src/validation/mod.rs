//! Group-aware constraint validation for immutable records.
//!
//! This module provides a small validation engine with:
//! - Declarative per-type rules ([`TypeRules`]) built once per model type
//! - Named groups and ordered group sequences
//! - Cascaded validation into nested records, with group conversion
//! - Property-only and free-value validation
//! - Method parameter and return value validation
//!
//! # Usage
//!
//! ```rust
//! use record_validation_demo::model::Person;
//! use record_validation_demo::validation::Validator;
//!
//! let validator = Validator::new();
//! let violations = validator.validate(&Person::new(None), &[])?;
//! assert_eq!(violations.len(), 1);
//! assert_eq!(violations.iter().next().unwrap().path().to_string(), "name");
//! # Ok::<(), record_validation_demo::validation::ValidationError>(())
//! ```

pub mod constraint;
pub mod engine;
pub mod error;
pub mod group;
pub mod rules;
pub mod value;
pub mod violation;

pub use constraint::{Constraint, ConstraintKind, UNBOUNDED, is_well_formed_email};
pub use engine::{ExecutableValidator, Validator, ValidatorBuilder};
pub use error::{ValidationError, ValidationResult};
pub use group::{Group, GroupSequence};
pub use rules::{ExecutableRule, ParameterRule, PropertyRule, TypeRules, TypeRulesBuilder};
pub use value::{Constrained, Value};
pub use violation::{ConstraintViolation, PathNode, PropertyPath, Violations};
