use super::constraint::Constraint;
use super::group::Group;
use super::value::Value;
use serde::{Serialize, Serializer};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathNode {
    Property(&'static str),
    Method(&'static str),
    Parameter { name: &'static str, index: usize },
    ReturnValue,
}

impl fmt::Display for PathNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathNode::Property(name) | PathNode::Method(name) => f.write_str(name),
            PathNode::Parameter { name, .. } => f.write_str(name),
            PathNode::ReturnValue => f.write_str("<return value>"),
        }
    }
}

/// Location of a violation relative to the validated root.
///
/// Renders as dot-joined nodes: `name`, `email.value`, `check_name_size.x`,
/// `name.<return value>`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct PropertyPath(Vec<PathNode>);

impl PropertyPath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn child(&self, node: PathNode) -> Self {
        let mut nodes = self.0.clone();
        nodes.push(node);
        Self(nodes)
    }

    pub fn nodes(&self) -> &[PathNode] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for PropertyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, node) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str(".")?;
            }
            write!(f, "{node}")?;
        }
        Ok(())
    }
}

impl Serialize for PropertyPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A constraint that failed for a specific value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConstraintViolation {
    root_type: &'static str,
    path: PropertyPath,
    message: String,
    constraint: &'static str,
    group: Group,
    invalid_value: String,
}

impl ConstraintViolation {
    pub(crate) fn new(
        root_type: &'static str,
        path: PropertyPath,
        constraint: &Constraint,
        group: Group,
        value: &Value<'_>,
    ) -> Self {
        Self {
            root_type,
            path,
            message: constraint.message(),
            constraint: constraint.kind().name(),
            group,
            invalid_value: value.to_string(),
        }
    }

    pub fn root_type(&self) -> &'static str {
        self.root_type
    }

    pub fn path(&self) -> &PropertyPath {
        &self.path
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn constraint(&self) -> &'static str {
        self.constraint
    }

    /// Group that was active when the constraint failed.
    pub fn group(&self) -> Group {
        self.group
    }

    pub fn invalid_value(&self) -> &str {
        &self.invalid_value
    }
}

impl fmt::Display for ConstraintViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Violations of one validation call, in evaluation order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Violations(Vec<ConstraintViolation>);

impl Violations {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ConstraintViolation> {
        self.0.iter()
    }

    /// Violations whose rendered path equals `path`.
    pub fn at<'a>(&'a self, path: &'a str) -> impl Iterator<Item = &'a ConstraintViolation> + 'a {
        self.0
            .iter()
            .filter(move |violation| violation.path.to_string() == path)
    }

    pub(crate) fn push(&mut self, violation: ConstraintViolation) {
        self.0.push(violation);
    }
}

impl IntoIterator for Violations {
    type Item = ConstraintViolation;
    type IntoIter = std::vec::IntoIter<ConstraintViolation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Violations {
    type Item = &'a ConstraintViolation;
    type IntoIter = std::slice::Iter<'a, ConstraintViolation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_renders_dot_joined_nodes() {
        let nested = PropertyPath::root()
            .child(PathNode::Property("email"))
            .child(PathNode::Property("value"));
        assert_eq!(nested.to_string(), "email.value");

        let parameter = PropertyPath::root()
            .child(PathNode::Method("check_name_size"))
            .child(PathNode::Parameter { name: "x", index: 0 });
        assert_eq!(parameter.to_string(), "check_name_size.x");

        let returned = PropertyPath::root()
            .child(PathNode::Method("name"))
            .child(PathNode::ReturnValue);
        assert_eq!(returned.to_string(), "name.<return value>");

        assert!(PropertyPath::root().is_root());
        assert_eq!(PropertyPath::root().to_string(), "");
    }

    #[test]
    fn violation_serializes_path_as_string() {
        let violation = ConstraintViolation::new(
            "Person",
            PropertyPath::root().child(PathNode::Property("name")),
            &Constraint::not_null(),
            Group::DEFAULT,
            &Value::Null,
        );
        let json = serde_json::to_value(&violation).expect("serialize");
        assert_eq!(json["path"], "name");
        assert_eq!(json["message"], "must not be null");
        assert_eq!(json["constraint"], "NotNull");
        assert_eq!(json["group"], "Default");
        assert_eq!(json["invalid_value"], "null");
    }
}
