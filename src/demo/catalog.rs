//! Static text shown alongside each demo: an HTML description, the record
//! declarations being exercised, and the validator calls made.

use super::DemoId;

/// HTML fragment describing the demo. Trusted markup, rendered unescaped.
pub fn description(demo: DemoId) -> &'static str {
    match demo {
        DemoId::BasicRecord => concat!(
            "<p>This demo shows basic validation constraints on an immutable record. ",
            "It validates a <code>Person</code> record with a <code>NotNull</code> constraint on the <code>name</code> property.</p>",
            "<p>The demo creates two instances:</p>",
            "<ul>",
            "<li>A valid instance with a present name</li>",
            "<li>An invalid instance with no name</li>",
            "</ul>",
            "<p>The valid instance is expected to have no violations and the invalid instance exactly one.</p>",
        ),
        DemoId::PropertyAndValue => concat!(
            "<p>This demo shows <code>validate_property</code> and <code>validate_value</code> on a record.</p>",
            "<p><code>validate_property</code> checks one property of an existing instance, while <code>validate_value</code> checks ",
            "a free value against the constraints a type declares for one of its properties.</p>",
            "<p>Both calls check the <code>name</code> property of <code>Person</code> with a missing value.</p>",
        ),
        DemoId::RecordParameters => concat!(
            "<p>This demo shows validation of method parameters and return values through the executable validator.</p>",
            "<p>It validates:</p>",
            "<ul>",
            "<li>A method parameter with a <code>Size(max = 10)</code> constraint</li>",
            "<li>A method return value with a <code>Size(min = 6)</code> constraint</li>",
            "</ul>",
            "<p>Both checks are expected to fail with exactly one violation each.</p>",
        ),
        DemoId::NestedRecords => concat!(
            "<p>This demo shows cascaded validation of nested records.</p>",
            "<p>It validates an <code>Employee</code> record that contains an <code>EmailAddress</code> record. ",
            "The <code>email</code> property is marked for cascading, so the rules of <code>EmailAddress</code> are applied too.</p>",
            "<p>The demo creates two instances:</p>",
            "<ul>",
            "<li>An instance with a missing employee id (violating <code>NotNull</code>)</li>",
            "<li>An instance with a malformed email (violating <code>Email</code>)</li>",
            "</ul>",
        ),
        DemoId::ConvertGroups => concat!(
            "<p>This demo shows validation groups and group conversion on records.</p>",
            "<p>It validates a <code>Company</code> record that contains a <code>Registration</code> record. ",
            "The <code>registration</code> property converts the <code>Default</code> group to <code>RegistrationChecks</code> when cascading.</p>",
            "<p>Constraints outside the requested group stay inactive; constraints tagged with the group are activated on both records.</p>",
        ),
        DemoId::GroupSequence => concat!(
            "<p>This demo shows group sequence validation on records.</p>",
            "<p>It validates a <code>SignupForm</code> record using <code>ValidationOrder</code>, a sequence of ",
            "<code>FirstGroup</code> followed by <code>SecondGroup</code>.</p>",
            "<p>Validation stops at the first group in the sequence that reports a violation, so constraints in later groups are not checked.</p>",
        ),
    }
}

/// Record declarations and sample data for the demo.
pub fn code_snippet(demo: DemoId) -> &'static str {
    match demo {
        DemoId::BasicRecord => r#"// Person record with a NotNull constraint
TypeRules::builder("Person")
    .property(PropertyRule::new("name").constraint(Constraint::not_null()))
    .build()

// Demo code
let valid = Person::named("SampleName");
let invalid = Person::new(None);"#,

        DemoId::PropertyAndValue => r#"// Validate a specific property of an object
let person = Person::new(None);
let property_violations =
    validator.validate_property(&person, "name", &[])?;

// Validate a value against constraints of a property
let value_violations =
    validator.validate_value::<Person>("name", Value::Null, &[])?;"#,

        DemoId::RecordParameters => r#"// Person record with method constraints
TypeRules::builder("Person")
    .property(PropertyRule::new("name").constraint(Constraint::not_null()))
    .executable(
        ExecutableRule::new("check_name_size").parameter("x", [Constraint::size_max(10)]),
    )
    .executable(ExecutableRule::new("name").returns([Constraint::size_min(6)]))
    .build()

// Validate method parameters
let arguments = [Value::Text("Maxallowedvaluesis10")];
validator
    .for_executables()
    .validate_parameters(&person, "check_name_size", &arguments, &[])?;

// Validate method return value
let returned = person.name();
validator
    .for_executables()
    .validate_return_value(&person, "name", returned.into(), &[])?;"#,

        DemoId::NestedRecords => r#"// Email record with validation constraints
TypeRules::builder("EmailAddress")
    .property(
        PropertyRule::new("value")
            .constraint(Constraint::email())
            .constraint(Constraint::size(3, 100)),
    )
    .build()

// Employee record with cascaded validation
TypeRules::builder("Employee")
    .property(PropertyRule::new("empid").constraint(Constraint::not_null()))
    .property(PropertyRule::new("email").cascade())
    .build()

// Demo code
let emp1 = Employee::new(None, Some(EmailAddress::new("emp1@example.com")));
let emp2 = Employee::new(Some("validId".into()), Some(EmailAddress::new("invalid")));"#,

        DemoId::ConvertGroups => r#"// Group
pub const REGISTRATION_CHECKS: Group = Group::named("RegistrationChecks");

// Registration record with a group-specific constraint
TypeRules::builder("Registration")
    .property(PropertyRule::new("companyid").constraint(Constraint::not_null()))
    .property(PropertyRule::new("is_registered").constraint(
        Constraint::assert_true()
            .with_message("Company should be registered")
            .in_groups([REGISTRATION_CHECKS]),
    ))
    .build()

// Company record with group conversion
TypeRules::builder("Company")
    .property(
        PropertyRule::new("company_name")
            .constraint(Constraint::not_null())
            .constraint(
                Constraint::pattern(Regex::new(r"^\S")?)
                    .with_message("Company name must not start with whitespace")
                    .in_groups([REGISTRATION_CHECKS]),
            ),
    )
    .property(
        PropertyRule::new("registration").convert_group(Group::DEFAULT, REGISTRATION_CHECKS),
    )
    .build()

// Demo code
let registration = Registration::new(Some("x1asas".into()), false);
let company = Company::new(Some(" sds".into()), Some(registration));
validator.validate(&company, &[REGISTRATION_CHECKS])?;"#,

        DemoId::GroupSequence => r#"// Groups
pub const FIRST_GROUP: Group = Group::named("FirstGroup");
pub const SECOND_GROUP: Group = Group::named("SecondGroup");

// Group sequence definition
GroupSequence::new(VALIDATION_ORDER, [FIRST_GROUP, SECOND_GROUP])

// SignupForm record with grouped constraints
TypeRules::builder("SignupForm")
    .property(PropertyRule::new("first_name").constraint(
        Constraint::not_blank()
            .with_message("Name cannot be blank")
            .in_groups([FIRST_GROUP]),
    ))
    .property(PropertyRule::new("age").constraint(
        Constraint::min(18)
            .with_message("Age must be at least 18")
            .in_groups([SECOND_GROUP]),
    ))
    .build()

// Demo code
let valid = SignupForm::new("John Doe", 25);
let invalid = SignupForm::new("", 15);
validator.validate(&invalid, &[VALIDATION_ORDER])?;"#,
    }
}

/// The validator API calls the demo makes.
pub fn api_usage(demo: DemoId) -> &'static str {
    match demo {
        DemoId::BasicRecord => r#"// Basic validation API
let violations: Violations = validator.validate(&person, &[])?;"#,

        DemoId::PropertyAndValue => r#"// Property validation API
let property_violations = validator.validate_property(&person, "name", &[])?;

// Value validation API
let value_violations = validator.validate_value::<Person>("name", Value::Null, &[])?;"#,

        DemoId::RecordParameters => r#"// Method parameter validation API
let parameter_violations = validator
    .for_executables()
    .validate_parameters(&object, method, &arguments, &[])?;

// Method return value validation API
let return_value_violations = validator
    .for_executables()
    .validate_return_value(&object, method, return_value, &[])?;"#,

        DemoId::NestedRecords => r#"// Cascaded validation API (property marked with cascade())
let violations = validator.validate(&employee, &[])?;"#,

        DemoId::ConvertGroups => r#"// Default group validation API
let violations1 = validator.validate(&registration, &[])?;

// Group-specific validation API with group conversion
let violations2 = validator.validate(&company, &[REGISTRATION_CHECKS])?;"#,

        DemoId::GroupSequence => r#"// Group sequence validation API
let violations = validator.validate(&signup_form, &[VALIDATION_ORDER])?;"#,
    }
}
