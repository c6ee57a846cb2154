//! Demo dispatcher.
//!
//! A closed set of demo identifiers maps to procedures that build sample
//! records, run the validator and compare violation counts against fixed
//! expectations. Validator errors never escape a procedure: they turn the
//! report into a failure carrying the error text and its cause chain.

pub mod catalog;
mod procedures;

use crate::error::ErrorCode;
use crate::metrics::METRICS;
use crate::validation::{ConstraintViolation, ValidationError, Validator, Violations};
use serde::{Serialize, Serializer};
use std::error::Error as _;
use std::time::Instant;
use strum::{EnumCount, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};
use tracing::{info, warn};

/// The fixed demo identifiers, keyed by their query-string names.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, EnumIter, EnumCount, IntoStaticStr,
)]
pub enum DemoId {
    #[strum(serialize = "basicRecordTest")]
    BasicRecord,
    #[strum(serialize = "recordValidatePropertyAndValueTest")]
    PropertyAndValue,
    #[strum(serialize = "validateRecordParametersTest")]
    RecordParameters,
    #[strum(serialize = "nestedRecordsTest")]
    NestedRecords,
    #[strum(serialize = "convertGroupsRecordsTest")]
    ConvertGroups,
    #[strum(serialize = "GroupSequenceRecordsTest")]
    GroupSequence,
}

impl DemoId {
    pub fn parse(name: &str) -> Option<Self> {
        name.parse().ok()
    }

    pub fn all() -> impl Iterator<Item = DemoId> {
        Self::iter()
    }

    /// Query-string identifier, e.g. `basicRecordTest`.
    pub fn name(&self) -> &'static str {
        (*self).into()
    }

    /// Display title, e.g. `Basic Record Test`.
    pub fn title(&self) -> String {
        format_demo_name(self.name())
    }
}

impl std::fmt::Display for DemoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for DemoId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// Upper-cases the first character and puts a space before every later
/// upper-case character.
pub fn format_demo_name(name: &str) -> String {
    let mut formatted = String::with_capacity(name.len() + 8);
    for (index, ch) in name.chars().enumerate() {
        if index == 0 {
            formatted.extend(ch.to_uppercase());
        } else if ch.is_uppercase() {
            formatted.push(' ');
            formatted.push(ch);
        } else {
            formatted.push(ch);
        }
    }
    formatted
}

/// How a requested demo name resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DemoRequest {
    Missing,
    Unknown(String),
    Known(DemoId),
}

impl DemoRequest {
    pub fn resolve(name: Option<&str>) -> Self {
        match name {
            None | Some("") => DemoRequest::Missing,
            Some(name) => match DemoId::parse(name) {
                Some(id) => DemoRequest::Known(id),
                None => DemoRequest::Unknown(name.to_string()),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DetailLine {
    Note {
        text: String,
    },
    Violation {
        kind: String,
        path: String,
        message: String,
    },
}

/// Outcome of one demo run.
#[derive(Debug, Clone, Serialize)]
pub struct DemoReport {
    pub demo: DemoId,
    pub success: bool,
    pub message: String,
    pub details: Vec<DetailLine>,
}

impl DemoReport {
    pub fn new(demo: DemoId) -> Self {
        Self {
            demo,
            success: true,
            message: String::new(),
            details: Vec::new(),
        }
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.success = false;
        self.message = message.into();
    }

    pub fn note(&mut self, text: impl Into<String>) {
        self.details.push(DetailLine::Note { text: text.into() });
    }

    pub fn violation(&mut self, kind: &str, violation: &ConstraintViolation) {
        self.details.push(DetailLine::Violation {
            kind: kind.to_string(),
            path: violation.path().to_string(),
            message: violation.message().to_string(),
        });
    }

    pub fn violations(&mut self, kind: &str, violations: &Violations) {
        for violation in violations {
            self.violation(kind, violation);
        }
    }

    /// Compares `actual` with `expected`, failing the report with `message` on a mismatch.
    pub fn expect_count(&mut self, actual: usize, expected: usize, message: &str) {
        if actual != expected {
            self.fail(message);
        }
    }

    pub fn violation_rows(&self) -> usize {
        self.details
            .iter()
            .filter(|line| matches!(line, DetailLine::Violation { .. }))
            .count()
    }

    fn record_error(&mut self, error: &ValidationError) {
        self.fail(format!("Exception occurred: {error}"));
        self.note(format!("{error:?}"));
        let mut source = error.source();
        while let Some(cause) = source {
            self.note(format!("caused by: {cause}"));
            source = cause.source();
        }
    }
}

/// Runs one demo against `validator`.
pub fn run_demo(validator: &Validator, demo: DemoId) -> DemoReport {
    let started = Instant::now();
    let mut report = DemoReport::new(demo);

    let outcome = match demo {
        DemoId::BasicRecord => procedures::basic_record(validator, &mut report),
        DemoId::PropertyAndValue => procedures::property_and_value(validator, &mut report),
        DemoId::RecordParameters => procedures::record_parameters(validator, &mut report),
        DemoId::NestedRecords => procedures::nested_records(validator, &mut report),
        DemoId::ConvertGroups => procedures::convert_groups(validator, &mut report),
        DemoId::GroupSequence => procedures::group_sequence(validator, &mut report),
    };

    if let Err(error) = outcome {
        let code = ErrorCode::from(&error);
        warn!(demo = %demo, error = %error, code = %code, "demo raised a validator error");
        METRICS.record_validation_error(code.category());
        report.record_error(&error);
    }

    let outcome_label = if report.success { "passed" } else { "failed" };
    METRICS.record_demo_run(demo.name(), outcome_label, started.elapsed());
    info!(
        demo = %demo,
        outcome = outcome_label,
        violations = report.violation_rows(),
        "demo finished"
    );
    report
}
