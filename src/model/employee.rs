use super::email_address::EmailAddress;
use crate::validation::{Constrained, Constraint, PropertyRule, TypeRules, Value};
use once_cell::sync::Lazy;
use serde::Serialize;

static EMPLOYEE_RULES: Lazy<TypeRules> = Lazy::new(|| {
    TypeRules::builder("Employee")
        .property(PropertyRule::new("empid").constraint(Constraint::not_null()))
        .property(PropertyRule::new("email").cascade())
        .build()
});

/// Container record cascading validation into its [`EmailAddress`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Employee {
    empid: Option<String>,
    email: Option<EmailAddress>,
}

impl Employee {
    pub fn new(empid: Option<String>, email: Option<EmailAddress>) -> Self {
        Self { empid, email }
    }

    pub fn empid(&self) -> Option<&str> {
        self.empid.as_deref()
    }

    pub fn email(&self) -> Option<&EmailAddress> {
        self.email.as_ref()
    }
}

impl Constrained for Employee {
    fn type_rules() -> &'static TypeRules {
        &EMPLOYEE_RULES
    }

    fn rules(&self) -> &'static TypeRules {
        &EMPLOYEE_RULES
    }

    fn property(&self, name: &str) -> Option<Value<'_>> {
        match name {
            "empid" => Some(self.empid().into()),
            "email" => Some(Value::bean(self.email())),
            _ => None,
        }
    }
}
