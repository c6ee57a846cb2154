use assert_matches::assert_matches;
use record_validation_demo::model::{
    Company, EmailAddress, Employee, FIRST_GROUP, Person, REGISTRATION_CHECKS, Registration,
    SECOND_GROUP, SignupForm, VALIDATION_ORDER, demo_validator,
};
use once_cell::sync::Lazy;
use record_validation_demo::validation::{
    Constrained, Constraint, Group, PropertyRule, TypeRules, ValidationError, Validator, Value,
    Violations,
};

fn validator() -> Validator {
    demo_validator().expect("demo validator")
}

fn paths(violations: &Violations) -> Vec<String> {
    violations.iter().map(|v| v.path().to_string()).collect()
}

#[test]
fn person_with_name_is_valid() {
    let violations = validator()
        .validate(&Person::named("SampleName"), &[])
        .expect("validate");
    assert!(violations.is_empty());
}

#[test]
fn person_without_name_has_one_violation_at_name() {
    let violations = validator().validate(&Person::new(None), &[]).expect("validate");
    assert_eq!(violations.len(), 1);
    let violation = violations.iter().next().expect("violation");
    assert_eq!(violation.path().to_string(), "name");
    assert_eq!(violation.message(), "must not be null");
    assert_eq!(violation.root_type(), "Person");
    assert_eq!(violation.group(), Group::DEFAULT);
}

#[test]
fn short_person_name_violates_size() {
    let violations = validator().validate(&Person::named("x"), &[]).expect("validate");
    assert_eq!(violations.len(), 1);
    let violation = violations.iter().next().expect("violation");
    assert_eq!(violation.constraint(), "Size");
    assert_eq!(violation.message(), "size must be at least 6");
}

#[test]
fn property_and_value_validation_agree_on_null() {
    let validator = validator();
    let property = validator
        .validate_property(&Person::new(None), "name", &[])
        .expect("property");
    let value = validator
        .validate_value::<Person>("name", Value::Null, &[])
        .expect("value");
    assert_eq!(property.len(), 1);
    assert_eq!(value.len(), 1);
    assert_eq!(paths(&property), paths(&value));
}

#[test]
fn unknown_property_is_reported() {
    assert_matches!(
        validator().validate_value::<Person>("age", Value::Int(3), &[]),
        Err(ValidationError::UnknownProperty { type_name: "Person", ref property }) if property == "age"
    );
}

#[test]
fn parameter_over_max_length_has_one_violation() {
    let person = Person::named("x");
    let arguments = [Value::Text("Maxallowedvaluesis10")];
    let violations = validator()
        .for_executables()
        .validate_parameters(&person, "check_name_size", &arguments, &[])
        .expect("parameters");
    assert_eq!(paths(&violations), vec!["check_name_size.x"]);
    assert_eq!(
        violations.iter().next().map(|v| v.message()),
        Some("size must be at most 10")
    );
}

#[test]
fn parameter_within_max_length_is_valid() {
    let person = Person::named("x");
    let arguments = [Value::Text("short")];
    let violations = validator()
        .for_executables()
        .validate_parameters(&person, "check_name_size", &arguments, &[])
        .expect("parameters");
    assert!(violations.is_empty());
}

#[test]
fn return_value_under_min_length_has_one_violation() {
    let person = Person::named("x");
    let violations = validator()
        .for_executables()
        .validate_return_value(&person, "name", person.name().into(), &[])
        .expect("return value");
    assert_eq!(paths(&violations), vec!["name.<return value>"]);
}

#[test]
fn executable_errors() {
    let validator = validator();
    let person = Person::named("x");
    assert_matches!(
        validator
            .for_executables()
            .validate_parameters(&person, "check_name_size", &[], &[]),
        Err(ValidationError::ParameterCountMismatch { expected: 1, actual: 0, .. })
    );
    assert_matches!(
        validator
            .for_executables()
            .validate_return_value(&person, "rename", Value::Null, &[]),
        Err(ValidationError::UnknownExecutable { .. })
    );
}

#[test]
fn cascade_reports_outer_violation() {
    let employee = Employee::new(None, Some(EmailAddress::new("emp1@example.com")));
    let violations = validator().validate(&employee, &[]).expect("validate");
    assert_eq!(paths(&violations), vec!["empid"]);
}

#[test]
fn cascade_reports_inner_violation() {
    let employee = Employee::new(Some("validId".into()), Some(EmailAddress::new("invalid")));
    let violations = validator().validate(&employee, &[]).expect("validate");
    assert_eq!(paths(&violations), vec!["email.value"]);
    assert_eq!(
        violations.iter().next().map(|v| v.root_type()),
        Some("Employee")
    );
}

#[test]
fn cascade_skips_missing_nested_record() {
    let employee = Employee::new(Some("validId".into()), None);
    assert!(validator().validate(&employee, &[]).expect("validate").is_empty());
}

/// Holds its nested bean as the first and only field.
#[derive(Debug)]
struct Mailbox {
    email: Option<EmailAddress>,
}

static MAILBOX_RULES: Lazy<TypeRules> = Lazy::new(|| {
    TypeRules::builder("Mailbox")
        .property(PropertyRule::new("email").cascade())
        .build()
});

impl Constrained for Mailbox {
    fn type_rules() -> &'static TypeRules {
        &MAILBOX_RULES
    }

    fn rules(&self) -> &'static TypeRules {
        &MAILBOX_RULES
    }

    fn property(&self, name: &str) -> Option<Value<'_>> {
        match name {
            "email" => Some(Value::bean(self.email.as_ref())),
            _ => None,
        }
    }
}

/// Two nested beans of the same type.
#[derive(Debug)]
struct Contact {
    primary: EmailAddress,
    backup: EmailAddress,
}

static CONTACT_RULES: Lazy<TypeRules> = Lazy::new(|| {
    TypeRules::builder("Contact")
        .property(PropertyRule::new("primary").cascade())
        .property(PropertyRule::new("backup").cascade())
        .build()
});

impl Constrained for Contact {
    fn type_rules() -> &'static TypeRules {
        &CONTACT_RULES
    }

    fn rules(&self) -> &'static TypeRules {
        &CONTACT_RULES
    }

    fn property(&self, name: &str) -> Option<Value<'_>> {
        match name {
            "primary" => Some(Value::bean(Some(&self.primary))),
            "backup" => Some(Value::bean(Some(&self.backup))),
            _ => None,
        }
    }
}

/// Outer property shares its name with the nested bean's property.
#[derive(Debug)]
struct Envelope {
    value: Option<EmailAddress>,
}

static ENVELOPE_RULES: Lazy<TypeRules> = Lazy::new(|| {
    TypeRules::builder("Envelope")
        .property(
            PropertyRule::new("value")
                .constraint(Constraint::not_null())
                .cascade(),
        )
        .build()
});

impl Constrained for Envelope {
    fn type_rules() -> &'static TypeRules {
        &ENVELOPE_RULES
    }

    fn rules(&self) -> &'static TypeRules {
        &ENVELOPE_RULES
    }

    fn property(&self, name: &str) -> Option<Value<'_>> {
        match name {
            "value" => Some(Value::bean(self.value.as_ref())),
            _ => None,
        }
    }
}

#[test]
fn cascade_validates_bean_stored_as_first_field() {
    let validator = validator();
    let email = EmailAddress::new("invalid");
    let direct = validator.validate(&email, &[]).expect("validate");
    let mailbox = Mailbox {
        email: Some(email.clone()),
    };
    let cascaded = validator.validate(&mailbox, &[]).expect("validate");
    assert_eq!(direct.len(), 1);
    assert_eq!(cascaded.len(), direct.len());
    assert_eq!(paths(&cascaded), vec!["email.value"]);
    assert_eq!(cascaded.iter().next().map(|v| v.root_type()), Some("Mailbox"));
}

#[test]
fn cascade_validates_each_nested_bean_of_same_type() {
    let contact = Contact {
        primary: EmailAddress::new("invalid"),
        backup: EmailAddress::new("x"),
    };
    let violations = validator().validate(&contact, &[]).expect("validate");
    let mut found = paths(&violations);
    found.sort();
    assert_eq!(
        found,
        vec!["backup.value", "backup.value", "primary.value"]
    );
}

#[test]
fn cascade_nested_beans_fire_once_across_groups() {
    let contact = Contact {
        primary: EmailAddress::new("invalid"),
        backup: EmailAddress::new("invalid"),
    };
    let violations = validator()
        .validate(&contact, &[Group::DEFAULT, Group::DEFAULT])
        .expect("validate");
    assert_eq!(paths(&violations), vec!["primary.value", "backup.value"]);
}

#[test]
fn cascade_keeps_outer_and_inner_properties_with_same_name_apart() {
    let validator = validator();
    let missing = validator
        .validate(&Envelope { value: None }, &[])
        .expect("validate");
    assert_eq!(paths(&missing), vec!["value"]);

    let invalid = validator
        .validate(
            &Envelope {
                value: Some(EmailAddress::new("invalid")),
            },
            &[],
        )
        .expect("validate");
    assert_eq!(paths(&invalid), vec!["value.value"]);
}

#[test]
fn default_group_ignores_registration_checks() {
    let registration = Registration::new(Some("x1asas".into()), false);
    assert!(validator().validate(&registration, &[]).expect("validate").is_empty());
}

#[test]
fn registration_checks_group_activates_tagged_constraints() {
    let registration = Registration::new(Some("x1asas".into()), false);
    let company = Company::new(Some(" sds".into()), Some(registration));
    let violations = validator()
        .validate(&company, &[REGISTRATION_CHECKS])
        .expect("validate");
    let mut found = paths(&violations);
    found.sort();
    assert_eq!(found, vec!["company_name", "registration.is_registered"]);
    assert!(violations.at("registration.is_registered").all(|v| v.message() == "Company should be registered"));
}

#[test]
fn default_group_converts_when_cascading_into_registration() {
    let registration = Registration::new(Some("x1asas".into()), false);
    let company = Company::new(Some("Acme".into()), Some(registration));
    let violations = validator().validate(&company, &[]).expect("validate");
    assert_eq!(paths(&violations), vec!["registration.is_registered"]);
    assert_eq!(
        violations.iter().next().map(|v| v.group()),
        Some(REGISTRATION_CHECKS)
    );
}

#[test]
fn sequence_short_circuits_at_first_failing_group() {
    let violations = validator()
        .validate(&SignupForm::new("", 15), &[VALIDATION_ORDER])
        .expect("validate");
    assert_eq!(paths(&violations), vec!["first_name"]);
    assert_eq!(
        violations.iter().next().map(|v| v.message()),
        Some("Name cannot be blank")
    );
}

#[test]
fn sequence_reaches_second_group_when_first_passes() {
    let violations = validator()
        .validate(&SignupForm::new("John Doe", 15), &[VALIDATION_ORDER])
        .expect("validate");
    assert_eq!(paths(&violations), vec!["age"]);
    assert_eq!(violations.iter().next().map(|v| v.group()), Some(SECOND_GROUP));
}

#[test]
fn plain_groups_do_not_short_circuit() {
    let violations = validator()
        .validate(&SignupForm::new("  ", 15), &[FIRST_GROUP, SECOND_GROUP])
        .expect("validate");
    assert_eq!(violations.len(), 2);
}

#[test]
fn valid_signup_form_passes_sequence() {
    let violations = validator()
        .validate(&SignupForm::new("John Doe", 25), &[VALIDATION_ORDER])
        .expect("validate");
    assert!(violations.is_empty());
}
