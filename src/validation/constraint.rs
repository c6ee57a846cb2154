//! Constraint kinds and their evaluation rules.
//!
//! A null value satisfies every constraint except [`ConstraintKind::NotNull`],
//! [`ConstraintKind::NotEmpty`] and [`ConstraintKind::NotBlank`]. Applying a
//! constraint to a kind of value it does not understand (for example `Size`
//! on a boolean) is a definition error reported by the validator, never a
//! violation.

use super::group::Group;
use super::value::Value;
use once_cell::sync::Lazy;
use regex::Regex;

/// Upper bound used by `Size` when no maximum is declared.
pub const UNBOUNDED: usize = usize::MAX;

const MAX_EMAIL_LOCAL_PART: usize = 64;
const MAX_EMAIL_DOMAIN_PART: usize = 255;

static EMAIL_LOCAL_PART: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r##"^(?:[a-zA-Z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[a-zA-Z0-9!#$%&'*+/=?^_`{|}~-]+)*|"(?:[^"\\]|\\.)*")$"##,
    )
    .expect("email local part pattern compiles")
});

static EMAIL_DOMAIN_PART: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?:[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*|\[[0-9a-fA-F:.]+\])$",
    )
    .expect("email domain pattern compiles")
});

#[derive(Debug, Clone)]
pub enum ConstraintKind {
    NotNull,
    NotEmpty,
    NotBlank,
    Size { min: usize, max: usize },
    Min(i64),
    Max(i64),
    AssertTrue,
    AssertFalse,
    Email,
    Pattern(Regex),
}

impl ConstraintKind {
    pub fn name(&self) -> &'static str {
        match self {
            ConstraintKind::NotNull => "NotNull",
            ConstraintKind::NotEmpty => "NotEmpty",
            ConstraintKind::NotBlank => "NotBlank",
            ConstraintKind::Size { .. } => "Size",
            ConstraintKind::Min(_) => "Min",
            ConstraintKind::Max(_) => "Max",
            ConstraintKind::AssertTrue => "AssertTrue",
            ConstraintKind::AssertFalse => "AssertFalse",
            ConstraintKind::Email => "Email",
            ConstraintKind::Pattern(_) => "Pattern",
        }
    }

    pub fn default_message(&self) -> String {
        match self {
            ConstraintKind::NotNull => "must not be null".to_string(),
            ConstraintKind::NotEmpty => "must not be empty".to_string(),
            ConstraintKind::NotBlank => "must not be blank".to_string(),
            ConstraintKind::Size { min, max } if *max == UNBOUNDED => {
                format!("size must be at least {min}")
            }
            ConstraintKind::Size { min: 0, max } => format!("size must be at most {max}"),
            ConstraintKind::Size { min, max } => format!("size must be between {min} and {max}"),
            ConstraintKind::Min(value) => format!("must be greater than or equal to {value}"),
            ConstraintKind::Max(value) => format!("must be less than or equal to {value}"),
            ConstraintKind::AssertTrue => "must be true".to_string(),
            ConstraintKind::AssertFalse => "must be false".to_string(),
            ConstraintKind::Email => "must be a well-formed email address".to_string(),
            ConstraintKind::Pattern(regex) => format!("must match \"{}\"", regex.as_str()),
        }
    }

    /// Evaluates the constraint.
    ///
    /// Returns `None` when the constraint cannot be applied to this kind of value.
    pub fn check(&self, value: &Value<'_>) -> Option<bool> {
        match (self, value) {
            (ConstraintKind::NotNull, value) => Some(!value.is_null()),

            (ConstraintKind::NotEmpty | ConstraintKind::NotBlank, Value::Null) => Some(false),
            (ConstraintKind::NotEmpty, Value::Text(text)) => Some(!text.is_empty()),
            (ConstraintKind::NotBlank, Value::Text(text)) => Some(!text.trim().is_empty()),

            (_, Value::Null) => Some(true),

            (ConstraintKind::Size { min, max }, Value::Text(text)) => {
                let length = text.chars().count();
                Some(length >= *min && length <= *max)
            }
            (ConstraintKind::Min(bound), Value::Int(number)) => Some(number >= bound),
            (ConstraintKind::Max(bound), Value::Int(number)) => Some(number <= bound),
            (ConstraintKind::AssertTrue, Value::Bool(flag)) => Some(*flag),
            (ConstraintKind::AssertFalse, Value::Bool(flag)) => Some(!*flag),
            (ConstraintKind::Email, Value::Text(text)) => Some(is_well_formed_email(text)),
            (ConstraintKind::Pattern(regex), Value::Text(text)) => Some(regex.is_match(text)),

            _ => None,
        }
    }
}

/// Checks `local@domain` shape; the empty string is accepted.
pub fn is_well_formed_email(text: &str) -> bool {
    if text.is_empty() {
        return true;
    }
    let Some(split) = text.rfind('@') else {
        return false;
    };
    let (local, domain) = (&text[..split], &text[split + 1..]);
    if local.is_empty() || local.len() > MAX_EMAIL_LOCAL_PART {
        return false;
    }
    if domain.is_empty() || domain.len() > MAX_EMAIL_DOMAIN_PART {
        return false;
    }
    EMAIL_LOCAL_PART.is_match(local) && EMAIL_DOMAIN_PART.is_match(domain)
}

/// A constraint kind with its optional message override and groups.
#[derive(Debug, Clone)]
pub struct Constraint {
    kind: ConstraintKind,
    message: Option<String>,
    groups: Vec<Group>,
}

impl Constraint {
    pub fn new(kind: ConstraintKind) -> Self {
        Self {
            kind,
            message: None,
            groups: vec![Group::DEFAULT],
        }
    }

    pub fn not_null() -> Self {
        Self::new(ConstraintKind::NotNull)
    }

    pub fn not_empty() -> Self {
        Self::new(ConstraintKind::NotEmpty)
    }

    pub fn not_blank() -> Self {
        Self::new(ConstraintKind::NotBlank)
    }

    pub fn size(min: usize, max: usize) -> Self {
        Self::new(ConstraintKind::Size { min, max })
    }

    pub fn size_min(min: usize) -> Self {
        Self::size(min, UNBOUNDED)
    }

    pub fn size_max(max: usize) -> Self {
        Self::size(0, max)
    }

    pub fn min(bound: i64) -> Self {
        Self::new(ConstraintKind::Min(bound))
    }

    pub fn max(bound: i64) -> Self {
        Self::new(ConstraintKind::Max(bound))
    }

    pub fn assert_true() -> Self {
        Self::new(ConstraintKind::AssertTrue)
    }

    pub fn assert_false() -> Self {
        Self::new(ConstraintKind::AssertFalse)
    }

    pub fn email() -> Self {
        Self::new(ConstraintKind::Email)
    }

    pub fn pattern(regex: Regex) -> Self {
        Self::new(ConstraintKind::Pattern(regex))
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Replaces the constraint's groups. An empty set falls back to Default.
    pub fn in_groups(mut self, groups: impl IntoIterator<Item = Group>) -> Self {
        self.groups = groups.into_iter().collect();
        if self.groups.is_empty() {
            self.groups.push(Group::DEFAULT);
        }
        self
    }

    pub fn kind(&self) -> &ConstraintKind {
        &self.kind
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn applies_to(&self, group: Group) -> bool {
        self.groups.contains(&group)
    }

    pub fn message(&self) -> String {
        self.message
            .clone()
            .unwrap_or_else(|| self.kind.default_message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_only_fails_presence_constraints() {
        let null = Value::Null;
        assert_eq!(ConstraintKind::NotNull.check(&null), Some(false));
        assert_eq!(ConstraintKind::NotBlank.check(&null), Some(false));
        assert_eq!(ConstraintKind::NotEmpty.check(&null), Some(false));
        assert_eq!(Constraint::size_min(6).kind().check(&null), Some(true));
        assert_eq!(ConstraintKind::Email.check(&null), Some(true));
        assert_eq!(ConstraintKind::AssertTrue.check(&null), Some(true));
        assert_eq!(ConstraintKind::Min(18).check(&null), Some(true));
    }

    #[test]
    fn size_counts_characters() {
        let size = ConstraintKind::Size { min: 3, max: 5 };
        assert_eq!(size.check(&Value::Text("ab")), Some(false));
        assert_eq!(size.check(&Value::Text("abc")), Some(true));
        assert_eq!(size.check(&Value::Text("äöüßé")), Some(true));
        assert_eq!(size.check(&Value::Text("abcdef")), Some(false));
    }

    #[test]
    fn not_blank_trims_whitespace() {
        assert_eq!(ConstraintKind::NotBlank.check(&Value::Text("   ")), Some(false));
        assert_eq!(ConstraintKind::NotBlank.check(&Value::Text(" a ")), Some(true));
        assert_eq!(ConstraintKind::NotEmpty.check(&Value::Text("   ")), Some(true));
    }

    #[test]
    fn numeric_bounds_are_inclusive() {
        assert_eq!(ConstraintKind::Min(18).check(&Value::Int(18)), Some(true));
        assert_eq!(ConstraintKind::Min(18).check(&Value::Int(15)), Some(false));
        assert_eq!(ConstraintKind::Max(10).check(&Value::Int(10)), Some(true));
        assert_eq!(ConstraintKind::Max(10).check(&Value::Int(11)), Some(false));
    }

    #[test]
    fn mismatched_value_kinds_are_unsupported() {
        assert_eq!(ConstraintKind::Size { min: 0, max: 1 }.check(&Value::Bool(true)), None);
        assert_eq!(ConstraintKind::Min(1).check(&Value::Text("1")), None);
        assert_eq!(ConstraintKind::AssertTrue.check(&Value::Int(1)), None);
        assert_eq!(ConstraintKind::NotBlank.check(&Value::Int(1)), None);
    }

    #[test]
    fn email_shape() {
        assert!(is_well_formed_email("emp1@example.com"));
        assert!(is_well_formed_email("first.last+tag@sub.example.org"));
        assert!(is_well_formed_email("user@[127.0.0.1]"));
        assert!(is_well_formed_email(""));
        assert!(!is_well_formed_email("invalid"));
        assert!(!is_well_formed_email("@example.com"));
        assert!(!is_well_formed_email("user@"));
        assert!(!is_well_formed_email("user@-example.com"));
        assert!(!is_well_formed_email("us er@example.com"));
        assert!(!is_well_formed_email("user..name@example.com"));
    }

    #[test]
    fn pattern_uses_find_semantics() {
        let regex = Regex::new(r"\d").expect("regex");
        let kind = ConstraintKind::Pattern(regex);
        assert_eq!(kind.check(&Value::Text("abc1")), Some(true));
        assert_eq!(kind.check(&Value::Text("abc")), Some(false));
    }

    #[test]
    fn messages_prefer_override() {
        assert_eq!(Constraint::not_null().message(), "must not be null");
        assert_eq!(Constraint::size_min(6).message(), "size must be at least 6");
        assert_eq!(Constraint::size_max(10).message(), "size must be at most 10");
        assert_eq!(Constraint::size(3, 100).message(), "size must be between 3 and 100");
        assert_eq!(
            Constraint::min(18).with_message("Age must be at least 18").message(),
            "Age must be at least 18"
        );
    }

    #[test]
    fn groups_default_when_empty() {
        let checks = Group::named("Checks");
        assert!(Constraint::not_null().applies_to(Group::DEFAULT));
        let grouped = Constraint::not_null().in_groups([checks]);
        assert!(grouped.applies_to(checks));
        assert!(!grouped.applies_to(Group::DEFAULT));
        assert_eq!(Constraint::not_null().in_groups([]).groups(), &[Group::DEFAULT]);
    }
}
