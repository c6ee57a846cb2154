use record_validation_demo::demo::{DemoId, DemoRequest, DetailLine, run_demo};
use record_validation_demo::model::demo_validator;
use record_validation_demo::validation::Validator;

fn notes(lines: &[DetailLine]) -> Vec<&str> {
    lines
        .iter()
        .filter_map(|line| match line {
            DetailLine::Note { text } => Some(text.as_str()),
            DetailLine::Violation { .. } => None,
        })
        .collect()
}

fn violations(lines: &[DetailLine]) -> Vec<(&str, &str)> {
    lines
        .iter()
        .filter_map(|line| match line {
            DetailLine::Violation { kind, path, .. } => Some((kind.as_str(), path.as_str())),
            DetailLine::Note { .. } => None,
        })
        .collect()
}

#[test]
fn every_demo_passes() {
    let validator = demo_validator().expect("validator");
    for demo in DemoId::all() {
        let report = run_demo(&validator, demo);
        assert!(report.success, "{demo} failed: {}", report.message);
        assert!(report.message.is_empty());
        assert!(!report.details.is_empty(), "{demo} produced no details");
    }
}

#[test]
fn basic_record_details() {
    let report = run_demo(&demo_validator().expect("validator"), DemoId::BasicRecord);
    assert_eq!(
        notes(&report.details),
        vec![
            "Person(\"SampleName\") violations: 0",
            "Person(null) violations: 1"
        ]
    );
    assert_eq!(violations(&report.details), vec![("Violation", "name")]);
}

#[test]
fn nested_records_label_cascade_violations() {
    let report = run_demo(&demo_validator().expect("validator"), DemoId::NestedRecords);
    assert_eq!(
        violations(&report.details),
        vec![("Violation", "empid"), ("Cascade Violation", "email.value")]
    );
}

#[test]
fn convert_groups_reports_two_violations() {
    let report = run_demo(&demo_validator().expect("validator"), DemoId::ConvertGroups);
    assert_eq!(report.violation_rows(), 2);
    assert!(
        violations(&report.details)
            .iter()
            .all(|(kind, _)| *kind == "Group Conversion Violation")
    );
}

#[test]
fn group_sequence_reports_only_first_group() {
    let report = run_demo(&demo_validator().expect("validator"), DemoId::GroupSequence);
    assert_eq!(
        violations(&report.details),
        vec![("Group Sequence Violation", "first_name")]
    );
}

#[test]
fn missing_sequence_degrades_to_failure() {
    // Without the registered sequence, ValidationOrder is a plain group with no constraints
    let report = run_demo(&Validator::new(), DemoId::GroupSequence);
    assert!(!report.success);
    assert_eq!(report.message, "Group sequence did not produce expected results");
}

#[test]
fn unknown_names_resolve_without_error() {
    assert_eq!(DemoRequest::resolve(None), DemoRequest::Missing);
    assert_eq!(
        DemoRequest::resolve(Some("getClass")),
        DemoRequest::Unknown("getClass".to_string())
    );
    assert_eq!(
        DemoRequest::resolve(Some("GroupSequenceRecordsTest")),
        DemoRequest::Known(DemoId::GroupSequence)
    );
}

#[test]
fn report_serializes_with_wire_names() {
    let report = run_demo(&demo_validator().expect("validator"), DemoId::PropertyAndValue);
    let json = serde_json::to_value(&report).expect("json");
    assert_eq!(json["demo"], "recordValidatePropertyAndValueTest");
    assert_eq!(json["success"], true);
    assert_eq!(json["details"][0]["type"], "note");
    assert_eq!(json["details"][2]["type"], "violation");
    assert_eq!(json["details"][2]["kind"], "Property Violation");
}
