//! The validator: evaluates type rules for beans, properties, free values
//! and method signatures under a set of groups.

use super::constraint::Constraint;
use super::error::{ValidationError, ValidationResult};
use super::group::{Group, GroupSequence};
use super::rules::{ExecutableRule, TypeRules};
use super::value::{Constrained, Value};
use super::violation::{ConstraintViolation, PathNode, PropertyPath, Violations};
use std::collections::{HashMap, HashSet};
use tracing::trace;

/// Identifies the declaration a constraint belongs to within one owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Slot {
    Property(&'static str),
    Parameter(&'static str, usize),
    ReturnValue(&'static str),
}

/// One step of a validation plan.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Step {
    Single(Group),
    Sequence(Vec<Group>),
}

/// Bookkeeping for a single validation call.
struct Pass {
    root_type: &'static str,
    violations: Violations,
    // keyed on the owner's path from the root
    evaluated: HashSet<(PropertyPath, Slot, usize)>,
    visited: HashSet<(PropertyPath, Group)>,
}

impl Pass {
    fn new(root_type: &'static str) -> Self {
        Self {
            root_type,
            violations: Violations::default(),
            evaluated: HashSet::new(),
            visited: HashSet::new(),
        }
    }

    fn check(
        &mut self,
        owner: &PropertyPath,
        slot: Slot,
        constraints: &[Constraint],
        value: &Value<'_>,
        group: Group,
        path: &PropertyPath,
    ) -> ValidationResult<()> {
        for (index, constraint) in constraints.iter().enumerate() {
            if !constraint.applies_to(group) {
                continue;
            }
            // a constraint reachable through several requested groups fires once
            if !self.evaluated.insert((owner.clone(), slot, index)) {
                continue;
            }
            let valid = constraint.kind().check(value).ok_or_else(|| {
                ValidationError::UnsupportedValue {
                    constraint: constraint.kind().name(),
                    kind: value.kind(),
                    path: path.to_string(),
                }
            })?;
            if !valid {
                trace!(path = %path, constraint = constraint.kind().name(), %group, "constraint violated");
                self.violations.push(ConstraintViolation::new(
                    self.root_type,
                    path.clone(),
                    constraint,
                    group,
                    value,
                ));
            }
        }
        Ok(())
    }

    fn bean(
        &mut self,
        bean: &dyn Constrained,
        group: Group,
        path: &PropertyPath,
    ) -> ValidationResult<()> {
        if !self.visited.insert((path.clone(), group)) {
            return Ok(());
        }
        let rules = bean.rules();
        for rule in rules.properties() {
            let value = bean.property(rule.name()).ok_or(
                ValidationError::MissingPropertyValue {
                    type_name: rules.type_name(),
                    property: rule.name(),
                },
            )?;
            let property_path = path.child(PathNode::Property(rule.name()));
            self.check(
                path,
                Slot::Property(rule.name()),
                rule.constraints(),
                &value,
                group,
                &property_path,
            )?;
            if rule.is_cascaded() {
                if let Some(nested) = value.as_bean() {
                    self.bean(nested, rule.converted(group), &property_path)?;
                }
            }
        }
        Ok(())
    }
}

/// Evaluates constraint rules.
///
/// Immutable after construction and safe to share between threads. Every
/// operation takes a set of groups; an empty set means [`Group::DEFAULT`].
#[derive(Debug, Clone, Default)]
pub struct Validator {
    sequences: HashMap<Group, GroupSequence>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> ValidatorBuilder {
        ValidatorBuilder::default()
    }

    pub fn group_sequence(&self, group: Group) -> Option<&GroupSequence> {
        self.sequences.get(&group)
    }

    /// Validates every property of `bean`, cascading into nested beans.
    pub fn validate(&self, bean: &dyn Constrained, groups: &[Group]) -> ValidationResult<Violations> {
        self.run(bean.rules().type_name(), groups, |pass, group| {
            pass.bean(bean, group, &PropertyPath::root())
        })
    }

    /// Validates one property of `bean` without cascading.
    pub fn validate_property(
        &self,
        bean: &dyn Constrained,
        property: &str,
        groups: &[Group],
    ) -> ValidationResult<Violations> {
        let rules = bean.rules();
        let rule = rules
            .property(property)
            .ok_or_else(|| ValidationError::UnknownProperty {
                type_name: rules.type_name(),
                property: property.to_string(),
            })?;
        let value = bean
            .property(rule.name())
            .ok_or(ValidationError::MissingPropertyValue {
                type_name: rules.type_name(),
                property: rule.name(),
            })?;
        let root = PropertyPath::root();
        let path = root.child(PathNode::Property(rule.name()));
        self.run(rules.type_name(), groups, |pass, group| {
            pass.check(&root, Slot::Property(rule.name()), rule.constraints(), &value, group, &path)
        })
    }

    /// Validates `value` against the constraints `T` declares for `property`.
    pub fn validate_value<T: Constrained>(
        &self,
        property: &str,
        value: Value<'_>,
        groups: &[Group],
    ) -> ValidationResult<Violations> {
        let rules = T::type_rules();
        let rule = rules
            .property(property)
            .ok_or_else(|| ValidationError::UnknownProperty {
                type_name: rules.type_name(),
                property: property.to_string(),
            })?;
        let root = PropertyPath::root();
        let path = root.child(PathNode::Property(rule.name()));
        self.run(rules.type_name(), groups, |pass, group| {
            pass.check(&root, Slot::Property(rule.name()), rule.constraints(), &value, group, &path)
        })
    }

    pub fn for_executables(&self) -> ExecutableValidator<'_> {
        ExecutableValidator { validator: self }
    }

    fn run<F>(&self, root_type: &'static str, groups: &[Group], mut step: F) -> ValidationResult<Violations>
    where
        F: FnMut(&mut Pass, Group) -> ValidationResult<()>,
    {
        let plan = self.plan(groups)?;
        let mut pass = Pass::new(root_type);
        for entry in plan {
            match entry {
                Step::Single(group) => step(&mut pass, group)?,
                Step::Sequence(members) => {
                    for group in members {
                        let before = pass.violations.len();
                        step(&mut pass, group)?;
                        if pass.violations.len() > before {
                            trace!(%group, "group sequence stopped at failing group");
                            break;
                        }
                    }
                }
            }
        }
        Ok(pass.violations)
    }

    /// Plain groups run first, then each requested sequence in order.
    fn plan(&self, groups: &[Group]) -> ValidationResult<Vec<Step>> {
        let requested: &[Group] = if groups.is_empty() {
            &[Group::DEFAULT]
        } else {
            groups
        };
        let mut singles = Vec::new();
        let mut sequences = Vec::new();
        for group in requested {
            if self.sequences.contains_key(group) {
                sequences.push(Step::Sequence(self.expand(*group, &mut Vec::new())?));
            } else if !singles.contains(&Step::Single(*group)) {
                singles.push(Step::Single(*group));
            }
        }
        singles.extend(sequences);
        Ok(singles)
    }

    fn expand(&self, group: Group, stack: &mut Vec<Group>) -> ValidationResult<Vec<Group>> {
        if stack.contains(&group) {
            let chain = stack
                .iter()
                .chain(std::iter::once(&group))
                .map(Group::name)
                .collect::<Vec<_>>()
                .join(" -> ");
            return Err(ValidationError::CyclicGroupSequence { group, chain });
        }
        let Some(sequence) = self.sequences.get(&group) else {
            return Ok(vec![group]);
        };
        stack.push(group);
        let mut members = Vec::new();
        for member in sequence.members() {
            for expanded in self.expand(*member, stack)? {
                if !members.contains(&expanded) {
                    members.push(expanded);
                }
            }
        }
        stack.pop();
        Ok(members)
    }
}

#[derive(Debug, Default)]
pub struct ValidatorBuilder {
    sequences: Vec<GroupSequence>,
}

impl ValidatorBuilder {
    pub fn group_sequence(mut self, sequence: GroupSequence) -> Self {
        self.sequences.push(sequence);
        self
    }

    /// Builds the validator, rejecting duplicate or cyclic sequences.
    pub fn build(self) -> ValidationResult<Validator> {
        let mut sequences = HashMap::new();
        for sequence in self.sequences {
            let group = sequence.name();
            if group.is_default() {
                return Err(ValidationError::DefaultGroupSequence { group });
            }
            if sequences.insert(group, sequence).is_some() {
                return Err(ValidationError::DuplicateGroupSequence { group });
            }
        }
        let validator = Validator { sequences };
        for group in validator.sequences.keys() {
            validator.expand(*group, &mut Vec::new())?;
        }
        Ok(validator)
    }
}

/// Validates method parameters and return values against declared rules.
#[derive(Debug, Clone, Copy)]
pub struct ExecutableValidator<'v> {
    validator: &'v Validator,
}

impl ExecutableValidator<'_> {
    pub fn validate_parameters(
        &self,
        bean: &dyn Constrained,
        method: &str,
        arguments: &[Value<'_>],
        groups: &[Group],
    ) -> ValidationResult<Violations> {
        let rules = bean.rules();
        let executable = lookup(rules, method)?;
        let parameters = executable.parameters();
        if parameters.len() != arguments.len() {
            return Err(ValidationError::ParameterCountMismatch {
                type_name: rules.type_name(),
                method: executable.name(),
                expected: parameters.len(),
                actual: arguments.len(),
            });
        }
        let root = PropertyPath::root();
        let method_path = root.child(PathNode::Method(executable.name()));
        self.validator.run(rules.type_name(), groups, |pass, group| {
            for (index, (parameter, argument)) in parameters.iter().zip(arguments).enumerate() {
                let path = method_path.child(PathNode::Parameter {
                    name: parameter.name(),
                    index,
                });
                pass.check(
                    &root,
                    Slot::Parameter(executable.name(), index),
                    parameter.constraints(),
                    argument,
                    group,
                    &path,
                )?;
            }
            Ok(())
        })
    }

    pub fn validate_return_value(
        &self,
        bean: &dyn Constrained,
        method: &str,
        value: Value<'_>,
        groups: &[Group],
    ) -> ValidationResult<Violations> {
        let rules = bean.rules();
        let executable = lookup(rules, method)?;
        let root = PropertyPath::root();
        let path = root
            .child(PathNode::Method(executable.name()))
            .child(PathNode::ReturnValue);
        self.validator.run(rules.type_name(), groups, |pass, group| {
            pass.check(
                &root,
                Slot::ReturnValue(executable.name()),
                executable.return_value(),
                &value,
                group,
                &path,
            )
        })
    }
}

fn lookup<'r>(rules: &'r TypeRules, method: &str) -> ValidationResult<&'r ExecutableRule> {
    rules
        .executable(method)
        .ok_or_else(|| ValidationError::UnknownExecutable {
            type_name: rules.type_name(),
            method: method.to_string(),
        })
}
