//! Immutable demo records and the constraint rules attached to them.

pub mod company;
pub mod email_address;
pub mod employee;
pub mod groups;
pub mod person;
pub mod registration;
pub mod signup_form;

pub use company::Company;
pub use email_address::EmailAddress;
pub use employee::Employee;
pub use groups::{
    FIRST_GROUP, REGISTRATION_CHECKS, SECOND_GROUP, VALIDATION_ORDER, demo_validator,
    validation_order,
};
pub use person::Person;
pub use registration::Registration;
pub use signup_form::SignupForm;
