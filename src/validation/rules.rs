//! Per-type constraint declarations.
//!
//! Every model type owns one [`TypeRules`] value, usually built once in a
//! lazily initialized static:
//!
//! ```rust
//! use record_validation_demo::validation::{Constraint, PropertyRule, TypeRules};
//!
//! let rules = TypeRules::builder("Person")
//!     .property(PropertyRule::new("name").constraint(Constraint::not_null()))
//!     .build();
//! assert!(rules.property("name").is_some());
//! ```

use super::constraint::Constraint;
use super::group::Group;
use indexmap::IndexMap;

/// Constraints, cascade flag and group conversions of one property.
#[derive(Debug, Clone)]
pub struct PropertyRule {
    name: &'static str,
    constraints: Vec<Constraint>,
    cascade: bool,
    conversions: Vec<(Group, Group)>,
}

impl PropertyRule {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            constraints: Vec::new(),
            cascade: false,
            conversions: Vec::new(),
        }
    }

    pub fn constraint(mut self, constraint: Constraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    /// Marks the property for cascaded validation of the nested value.
    pub fn cascade(mut self) -> Self {
        self.cascade = true;
        self
    }

    /// Converts `from` into `to` when cascading. Implies [`Self::cascade`].
    pub fn convert_group(mut self, from: Group, to: Group) -> Self {
        self.cascade = true;
        self.conversions.retain(|(existing, _)| *existing != from);
        self.conversions.push((from, to));
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    pub fn is_cascaded(&self) -> bool {
        self.cascade
    }

    /// Group used for the nested value when validating under `group`.
    pub fn converted(&self, group: Group) -> Group {
        self.conversions
            .iter()
            .find(|(from, _)| *from == group)
            .map(|(_, to)| *to)
            .unwrap_or(group)
    }
}

#[derive(Debug, Clone)]
pub struct ParameterRule {
    name: &'static str,
    constraints: Vec<Constraint>,
}

impl ParameterRule {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }
}

/// Parameter and return value constraints of one method.
#[derive(Debug, Clone)]
pub struct ExecutableRule {
    name: &'static str,
    parameters: Vec<ParameterRule>,
    return_value: Vec<Constraint>,
}

impl ExecutableRule {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            parameters: Vec::new(),
            return_value: Vec::new(),
        }
    }

    /// Appends the next positional parameter.
    pub fn parameter(
        mut self,
        name: &'static str,
        constraints: impl IntoIterator<Item = Constraint>,
    ) -> Self {
        self.parameters.push(ParameterRule {
            name,
            constraints: constraints.into_iter().collect(),
        });
        self
    }

    pub fn returns(mut self, constraints: impl IntoIterator<Item = Constraint>) -> Self {
        self.return_value.extend(constraints);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn parameters(&self) -> &[ParameterRule] {
        &self.parameters
    }

    pub fn return_value(&self) -> &[Constraint] {
        &self.return_value
    }
}

/// All constraint declarations of a type, in declaration order.
#[derive(Debug, Clone)]
pub struct TypeRules {
    type_name: &'static str,
    properties: IndexMap<&'static str, PropertyRule>,
    executables: IndexMap<&'static str, ExecutableRule>,
}

impl TypeRules {
    pub fn builder(type_name: &'static str) -> TypeRulesBuilder {
        TypeRulesBuilder {
            rules: TypeRules {
                type_name,
                properties: IndexMap::new(),
                executables: IndexMap::new(),
            },
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn property(&self, name: &str) -> Option<&PropertyRule> {
        self.properties.get(name)
    }

    pub fn properties(&self) -> impl Iterator<Item = &PropertyRule> {
        self.properties.values()
    }

    pub fn executable(&self, name: &str) -> Option<&ExecutableRule> {
        self.executables.get(name)
    }

    pub fn executables(&self) -> impl Iterator<Item = &ExecutableRule> {
        self.executables.values()
    }
}

pub struct TypeRulesBuilder {
    rules: TypeRules,
}

impl TypeRulesBuilder {
    /// Adds a property rule. Declaring the same property twice merges the
    /// constraints and keeps the cascade settings of either declaration, the
    /// way field and accessor constraints combine on one property.
    pub fn property(mut self, rule: PropertyRule) -> Self {
        match self.rules.properties.get_mut(rule.name) {
            Some(existing) => {
                existing.constraints.extend(rule.constraints);
                existing.cascade |= rule.cascade;
                for (from, to) in rule.conversions {
                    existing.conversions.retain(|(known, _)| *known != from);
                    existing.conversions.push((from, to));
                }
            }
            None => {
                self.rules.properties.insert(rule.name, rule);
            }
        }
        self
    }

    pub fn executable(mut self, rule: ExecutableRule) -> Self {
        self.rules.executables.insert(rule.name, rule);
        self
    }

    pub fn build(self) -> TypeRules {
        self.rules
    }
}
