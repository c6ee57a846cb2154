use super::groups::REGISTRATION_CHECKS;
use super::registration::Registration;
use crate::validation::{Constrained, Constraint, Group, PropertyRule, TypeRules, Value};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static COMPANY_RULES: Lazy<TypeRules> = Lazy::new(|| {
    let leading_non_space = Regex::new(r"^\S").expect("company name pattern compiles");
    TypeRules::builder("Company")
        .property(
            PropertyRule::new("company_name")
                .constraint(Constraint::not_null())
                .constraint(
                    Constraint::pattern(leading_non_space)
                        .with_message("Company name must not start with whitespace")
                        .in_groups([REGISTRATION_CHECKS]),
                ),
        )
        .property(
            PropertyRule::new("registration").convert_group(Group::DEFAULT, REGISTRATION_CHECKS),
        )
        .build()
});

/// Container record whose nested [`Registration`] is validated under
/// [`REGISTRATION_CHECKS`] when the company is validated under Default.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Company {
    company_name: Option<String>,
    registration: Option<Registration>,
}

impl Company {
    pub fn new(company_name: Option<String>, registration: Option<Registration>) -> Self {
        Self {
            company_name,
            registration,
        }
    }

    pub fn company_name(&self) -> Option<&str> {
        self.company_name.as_deref()
    }

    pub fn registration(&self) -> Option<&Registration> {
        self.registration.as_ref()
    }
}

impl Constrained for Company {
    fn type_rules() -> &'static TypeRules {
        &COMPANY_RULES
    }

    fn rules(&self) -> &'static TypeRules {
        &COMPANY_RULES
    }

    fn property(&self, name: &str) -> Option<Value<'_>> {
        match name {
            "company_name" => Some(self.company_name().into()),
            "registration" => Some(Value::bean(self.registration())),
            _ => None,
        }
    }
}
