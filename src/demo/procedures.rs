use super::DemoReport;
use crate::model::{
    Company, EmailAddress, Employee, Person, REGISTRATION_CHECKS, Registration, SignupForm,
    VALIDATION_ORDER,
};
use crate::validation::{ValidationResult, Validator, Value};

const UNEXPECTED_RESULTS: &str = "Validation did not produce expected results";

pub(super) fn basic_record(validator: &Validator, report: &mut DemoReport) -> ValidationResult<()> {
    let valid = Person::named("SampleName");
    let invalid = Person::new(None);

    let valid_violations = validator.validate(&valid, &[])?;
    let invalid_violations = validator.validate(&invalid, &[])?;

    report.note(format!("Person(\"SampleName\") violations: {}", valid_violations.len()));
    report.note(format!("Person(null) violations: {}", invalid_violations.len()));

    if !valid_violations.is_empty() || invalid_violations.len() != 1 {
        report.fail(UNEXPECTED_RESULTS);
    }
    report.violations("Violation", &invalid_violations);
    Ok(())
}

pub(super) fn property_and_value(
    validator: &Validator,
    report: &mut DemoReport,
) -> ValidationResult<()> {
    let person = Person::new(None);
    let property_violations = validator.validate_property(&person, "name", &[])?;
    let value_violations = validator.validate_value::<Person>("name", Value::Null, &[])?;

    report.note(format!(
        "validate_property violations: {}",
        property_violations.len()
    ));
    report.note(format!("validate_value violations: {}", value_violations.len()));

    if property_violations.len() != 1 || value_violations.len() != 1 {
        report.fail(UNEXPECTED_RESULTS);
    }
    report.violations("Property Violation", &property_violations);
    report.violations("Value Violation", &value_violations);
    Ok(())
}

pub(super) fn record_parameters(
    validator: &Validator,
    report: &mut DemoReport,
) -> ValidationResult<()> {
    let person = Person::named("x");
    let executables = validator.for_executables();

    let arguments = [Value::Text("Maxallowedvaluesis10")];
    let parameter_violations =
        executables.validate_parameters(&person, "check_name_size", &arguments, &[])?;

    let returned = person.name();
    let return_violations =
        executables.validate_return_value(&person, "name", returned.into(), &[])?;

    report.note(format!("Parameter violations: {}", parameter_violations.len()));
    report.note(format!("Return value violations: {}", return_violations.len()));

    if parameter_violations.len() != 1 || return_violations.len() != 1 {
        report.fail(UNEXPECTED_RESULTS);
    }
    report.violations("Parameter Violation", &parameter_violations);
    report.violations("Return Value Violation", &return_violations);
    Ok(())
}

pub(super) fn nested_records(
    validator: &Validator,
    report: &mut DemoReport,
) -> ValidationResult<()> {
    let missing_id = Employee::new(None, Some(EmailAddress::new("emp1@example.com")));
    let violations = validator.validate(&missing_id, &[])?;
    report.note(format!(
        "Employee(null, EmailAddress) violations: {}",
        violations.len()
    ));
    report.expect_count(violations.len(), 1, UNEXPECTED_RESULTS);
    report.violations("Violation", &violations);

    let bad_email = Employee::new(Some("validId".into()), Some(EmailAddress::new("invalid")));
    let cascaded = validator.validate(&bad_email, &[])?;
    report.note(format!(
        "Employee(validId, invalid EmailAddress) violations: {}",
        cascaded.len()
    ));
    report.expect_count(
        cascaded.len(),
        1,
        "Cascade validation did not produce expected results",
    );
    report.violations("Cascade Violation", &cascaded);
    Ok(())
}

pub(super) fn convert_groups(
    validator: &Validator,
    report: &mut DemoReport,
) -> ValidationResult<()> {
    let registration = Registration::new(Some("x1asas".into()), false);
    let default_violations = validator.validate(&registration, &[])?;
    report.note(format!(
        "Registration(valid, false) default group violations: {}",
        default_violations.len()
    ));

    let company = Company::new(Some(" sds".into()), Some(registration));
    let group_violations = validator.validate(&company, &[REGISTRATION_CHECKS])?;
    report.note(format!(
        "Company(valid, Registration) with RegistrationChecks group violations: {}",
        group_violations.len()
    ));

    if !default_violations.is_empty() || group_violations.len() != 2 {
        report.fail("Group conversion did not produce expected results");
    }
    report.violations("Group Conversion Violation", &group_violations);
    Ok(())
}

pub(super) fn group_sequence(
    validator: &Validator,
    report: &mut DemoReport,
) -> ValidationResult<()> {
    let valid = SignupForm::new("John Doe", 25);
    let invalid = SignupForm::new("", 15);

    let valid_violations = validator.validate(&valid, &[VALIDATION_ORDER])?;
    report.note(format!(
        "Valid SignupForm with ValidationOrder group violations: {}",
        valid_violations.len()
    ));

    let invalid_violations = validator.validate(&invalid, &[VALIDATION_ORDER])?;
    report.note(format!(
        "Invalid SignupForm with ValidationOrder group violations: {}",
        invalid_violations.len()
    ));

    if !valid_violations.is_empty() || invalid_violations.len() != 1 {
        report.fail("Group sequence did not produce expected results");
    }
    report.violations("Group Sequence Violation", &invalid_violations);
    Ok(())
}
