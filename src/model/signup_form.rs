use super::groups::{FIRST_GROUP, SECOND_GROUP};
use crate::validation::{Constrained, Constraint, PropertyRule, TypeRules, Value};
use once_cell::sync::Lazy;
use serde::Serialize;

static SIGNUP_FORM_RULES: Lazy<TypeRules> = Lazy::new(|| {
    TypeRules::builder("SignupForm")
        .property(
            PropertyRule::new("first_name").constraint(
                Constraint::not_blank()
                    .with_message("Name cannot be blank")
                    .in_groups([FIRST_GROUP]),
            ),
        )
        .property(
            PropertyRule::new("age").constraint(
                Constraint::min(18)
                    .with_message("Age must be at least 18")
                    .in_groups([SECOND_GROUP]),
            ),
        )
        .build()
});

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SignupForm {
    first_name: String,
    age: i32,
}

impl SignupForm {
    pub fn new(first_name: impl Into<String>, age: i32) -> Self {
        Self {
            first_name: first_name.into(),
            age,
        }
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn age(&self) -> i32 {
        self.age
    }
}

impl Constrained for SignupForm {
    fn type_rules() -> &'static TypeRules {
        &SIGNUP_FORM_RULES
    }

    fn rules(&self) -> &'static TypeRules {
        &SIGNUP_FORM_RULES
    }

    fn property(&self, name: &str) -> Option<Value<'_>> {
        match name {
            "first_name" => Some(self.first_name.as_str().into()),
            "age" => Some(self.age.into()),
            _ => None,
        }
    }
}
