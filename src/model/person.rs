use crate::validation::{
    Constrained, Constraint, ExecutableRule, PropertyRule, TypeRules, Value,
};
use once_cell::sync::Lazy;
use serde::Serialize;

static PERSON_RULES: Lazy<TypeRules> = Lazy::new(|| {
    TypeRules::builder("Person")
        .property(PropertyRule::new("name").constraint(Constraint::not_null()))
        // accessor constraint, merged into the same property
        .property(PropertyRule::new("name").constraint(Constraint::size_min(6)))
        .executable(
            ExecutableRule::new("check_name_size").parameter("x", [Constraint::size_max(10)]),
        )
        .executable(ExecutableRule::new("name").returns([Constraint::size_min(6)]))
        .build()
});

/// A name holder. `name` must be present; its accessor requires at least
/// six characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Person {
    name: Option<String>,
}

impl Person {
    pub fn new(name: Option<String>) -> Self {
        Self { name }
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self::new(Some(name.into()))
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Parameter `x` is limited to ten characters.
    pub fn check_name_size(&self, x: &str) -> String {
        format!("{x}String value")
    }
}

impl Constrained for Person {
    fn type_rules() -> &'static TypeRules {
        &PERSON_RULES
    }

    fn rules(&self) -> &'static TypeRules {
        &PERSON_RULES
    }

    fn property(&self, name: &str) -> Option<Value<'_>> {
        match name {
            "name" => Some(self.name().into()),
            _ => None,
        }
    }
}
