use crate::validation::{Constrained, Constraint, PropertyRule, TypeRules, Value};
use once_cell::sync::Lazy;
use serde::Serialize;

static EMAIL_ADDRESS_RULES: Lazy<TypeRules> = Lazy::new(|| {
    TypeRules::builder("EmailAddress")
        .property(
            PropertyRule::new("value")
                .constraint(Constraint::email())
                .constraint(Constraint::size(3, 100)),
        )
        .build()
});

/// An email holder: well-formed and between 3 and 100 characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct EmailAddress {
    value: Option<String>,
}

impl EmailAddress {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
        }
    }

    pub fn missing() -> Self {
        Self { value: None }
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

impl Constrained for EmailAddress {
    fn type_rules() -> &'static TypeRules {
        &EMAIL_ADDRESS_RULES
    }

    fn rules(&self) -> &'static TypeRules {
        &EMAIL_ADDRESS_RULES
    }

    fn property(&self, name: &str) -> Option<Value<'_>> {
        match name {
            "value" => Some(self.value().into()),
            _ => None,
        }
    }
}
