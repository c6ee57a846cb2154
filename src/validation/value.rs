use super::rules::TypeRules;
use std::fmt;

/// A borrowed view of a value handed to the validator.
#[derive(Debug, Clone, Copy)]
pub enum Value<'a> {
    Null,
    Bool(bool),
    Int(i64),
    Text(&'a str),
    Bean(&'a dyn Constrained),
}

impl<'a> Value<'a> {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Short name of the value's kind, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Int(_) => "integer",
            Value::Text(_) => "text",
            Value::Bean(_) => "bean",
        }
    }

    pub fn as_bean(&self) -> Option<&'a dyn Constrained> {
        match self {
            Value::Bean(bean) => Some(*bean),
            _ => None,
        }
    }

    /// Wraps an optional nested bean, mapping `None` to [`Value::Null`].
    pub fn bean<T: Constrained>(bean: Option<&'a T>) -> Self {
        match bean {
            Some(bean) => Value::Bean(bean),
            None => Value::Null,
        }
    }
}

impl fmt::Display for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(value) => write!(f, "{value}"),
            Value::Int(value) => write!(f, "{value}"),
            Value::Text(value) => f.write_str(value),
            Value::Bean(bean) => write!(f, "{}", bean.rules().type_name()),
        }
    }
}

impl From<bool> for Value<'_> {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i32> for Value<'_> {
    fn from(value: i32) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<i64> for Value<'_> {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl<'a> From<&'a str> for Value<'a> {
    fn from(value: &'a str) -> Self {
        Value::Text(value)
    }
}

impl<'a> From<&'a String> for Value<'a> {
    fn from(value: &'a String) -> Self {
        Value::Text(value.as_str())
    }
}

impl<'a> From<Option<&'a str>> for Value<'a> {
    fn from(value: Option<&'a str>) -> Self {
        value.map_or(Value::Null, Value::Text)
    }
}

/// Implemented by every type that carries constraint rules.
///
/// `property` must return a value for every property listed in the type's
/// rules; the validator reports a definition error otherwise.
pub trait Constrained: fmt::Debug + Send + Sync {
    /// Rules of the implementing type, reachable without an instance.
    fn type_rules() -> &'static TypeRules
    where
        Self: Sized;

    fn rules(&self) -> &'static TypeRules;

    fn property(&self, name: &str) -> Option<Value<'_>>;
}
