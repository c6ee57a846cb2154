use super::groups::REGISTRATION_CHECKS;
use crate::validation::{Constrained, Constraint, PropertyRule, TypeRules, Value};
use once_cell::sync::Lazy;
use serde::Serialize;

static REGISTRATION_RULES: Lazy<TypeRules> = Lazy::new(|| {
    TypeRules::builder("Registration")
        .property(PropertyRule::new("companyid").constraint(Constraint::not_null()))
        .property(
            PropertyRule::new("is_registered").constraint(
                Constraint::assert_true()
                    .with_message("Company should be registered")
                    .in_groups([REGISTRATION_CHECKS]),
            ),
        )
        .build()
});

/// A registration holder. The registered flag is only checked under
/// [`REGISTRATION_CHECKS`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Registration {
    companyid: Option<String>,
    is_registered: bool,
}

impl Registration {
    pub fn new(companyid: Option<String>, is_registered: bool) -> Self {
        Self {
            companyid,
            is_registered,
        }
    }

    pub fn companyid(&self) -> Option<&str> {
        self.companyid.as_deref()
    }

    pub fn is_registered(&self) -> bool {
        self.is_registered
    }
}

impl Constrained for Registration {
    fn type_rules() -> &'static TypeRules {
        &REGISTRATION_RULES
    }

    fn rules(&self) -> &'static TypeRules {
        &REGISTRATION_RULES
    }

    fn property(&self, name: &str) -> Option<Value<'_>> {
        match name {
            "companyid" => Some(self.companyid().into()),
            "is_registered" => Some(self.is_registered.into()),
            _ => None,
        }
    }
}
