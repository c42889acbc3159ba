//! Compiles a condition tree into a parameterized predicate fragment.
//!
//! The builder walks the tree once, threading a single parameter map through
//! every node so that keys allocated in one subtree are visible to all later
//! ones. Values never appear in the fragment text, only their placeholders.

use crate::query::{
    dialect::{Cypher, Dialect},
    params::{Parameters, allocate_key, parameter_base},
};
use condition::{Condition, ConditionError, ConditionVisitor, MATCH_PROPERTY};
use model::{core::value::Value, graph::EntityKind};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use tracing::{debug, warn};

/// How property names reach the compiled query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IdentifierStrategy {
    /// Bind the property name as a parameter and look it up dynamically,
    /// e.g. `n[$name] = $name_value`.
    #[default]
    DynamicKey,
    /// Write the property name into the query, quoted, after checking it
    /// against `[A-Za-z_][A-Za-z0-9_]*`, e.g. ``n.`name` = $name_value``.
    Inline,
}

impl fmt::Display for IdentifierStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdentifierStrategy::DynamicKey => write!(f, "dynamic-key"),
            IdentifierStrategy::Inline => write!(f, "inline"),
        }
    }
}

impl FromStr for IdentifierStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "dynamic-key" => Ok(IdentifierStrategy::DynamicKey),
            "inline" => Ok(IdentifierStrategy::Inline),
            other => Err(format!("unknown identifier strategy '{other}'")),
        }
    }
}

/// Output of the builder: a predicate fragment and the parameters it binds.
///
/// `fragment` is `None` when the condition places no constraint (empty
/// combinators). Callers must then omit the predicate altogether.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompiledPredicate {
    pub fragment: Option<String>,
    pub parameters: Parameters,
}

impl CompiledPredicate {
    pub fn is_unconstrained(&self) -> bool {
        self.fragment.is_none()
    }
}

pub struct PredicateBuilder<'a> {
    kind: EntityKind,
    variable: String,
    strategy: IdentifierStrategy,
    dialect: &'a dyn Dialect,
}

impl PredicateBuilder<'static> {
    /// Builder for `kind` with the Cypher dialect, variable `n` and dynamic keys.
    pub fn new(kind: EntityKind) -> Self {
        Self {
            kind,
            variable: "n".to_string(),
            strategy: IdentifierStrategy::default(),
            dialect: &Cypher,
        }
    }
}

impl<'a> PredicateBuilder<'a> {
    pub fn with_variable(mut self, variable: impl Into<String>) -> Self {
        self.variable = variable.into();
        self
    }

    pub fn with_strategy(mut self, strategy: IdentifierStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_dialect<'b>(self, dialect: &'b dyn Dialect) -> PredicateBuilder<'b> {
        PredicateBuilder {
            kind: self.kind,
            variable: self.variable,
            strategy: self.strategy,
            dialect,
        }
    }

    pub fn variable(&self) -> &str {
        &self.variable
    }

    pub fn dialect(&self) -> &'a dyn Dialect {
        self.dialect
    }

    pub fn build(&self, condition: &Condition) -> Result<CompiledPredicate, ConditionError> {
        let compiled = self.visit(CompiledPredicate::default(), condition)?;
        debug!(
            "Compiled {} predicate ({} parameter(s)): {:?}",
            self.kind,
            compiled.parameters.len(),
            compiled.fragment
        );
        Ok(compiled)
    }

    /// Builds each child against the shared parameters and joins the
    /// fragments they produce.
    fn combine(
        &self,
        state: CompiledPredicate,
        filters: &[Condition],
        operator: &str,
    ) -> Result<CompiledPredicate, ConditionError> {
        let mut parameters = state.parameters;
        let mut fragments = Vec::with_capacity(filters.len());

        for filter in filters {
            let child = self.visit(
                CompiledPredicate {
                    fragment: None,
                    parameters,
                },
                filter,
            )?;
            parameters = child.parameters;
            if let Some(fragment) = child.fragment {
                fragments.push(fragment);
            }
        }

        let fragment = if fragments.is_empty() {
            None
        } else {
            Some(format!("({})", fragments.join(&format!(" {operator} "))))
        };

        Ok(CompiledPredicate {
            fragment,
            parameters,
        })
    }

    fn property_target(
        &self,
        parameters: &mut Parameters,
        property: &str,
        base: &str,
    ) -> Result<String, ConditionError> {
        match self.strategy {
            IdentifierStrategy::DynamicKey => {
                let key = allocate_key(parameters, base);
                let target = self
                    .dialect
                    .dynamic_property(&self.variable, &self.dialect.placeholder(&key));
                parameters.insert(key, Value::from(property));
                Ok(target)
            }
            IdentifierStrategy::Inline => {
                if !is_safe_identifier(property) {
                    return Err(ConditionError::UnsafeIdentifier {
                        rule: MATCH_PROPERTY,
                        property: property.to_string(),
                    });
                }
                Ok(self.dialect.inline_property(&self.variable, property))
            }
        }
    }
}

impl ConditionVisitor for PredicateBuilder<'_> {
    type State = CompiledPredicate;
    type Error = ConditionError;

    fn of_type(
        &self,
        mut state: CompiledPredicate,
        type_name: &str,
    ) -> Result<CompiledPredicate, ConditionError> {
        let key = allocate_key(&state.parameters, "type");
        let placeholder = self.dialect.placeholder(&key);
        let fragment = match self.kind {
            EntityKind::Node => self.dialect.has_label(&self.variable, &placeholder),
            EntityKind::Edge => self.dialect.has_type(&self.variable, &placeholder),
        };

        state.parameters.insert(key, Value::from(type_name));
        state.fragment = Some(fragment);
        Ok(state)
    }

    fn match_property(
        &self,
        mut state: CompiledPredicate,
        property: &str,
        value: &Value,
    ) -> Result<CompiledPredicate, ConditionError> {
        let base = parameter_base(property);
        let target = self.property_target(&mut state.parameters, property, &base)?;

        let value_key = allocate_key(&state.parameters, &format!("{base}_value"));
        let fragment = format!("{target} = {}", self.dialect.placeholder(&value_key));

        state.parameters.insert(value_key, value.clone());
        state.fragment = Some(fragment);
        Ok(state)
    }

    fn match_all(
        &self,
        state: CompiledPredicate,
        filters: &[Condition],
    ) -> Result<CompiledPredicate, ConditionError> {
        self.combine(state, filters, "AND")
    }

    fn match_any(
        &self,
        state: CompiledPredicate,
        filters: &[Condition],
    ) -> Result<CompiledPredicate, ConditionError> {
        if filters.is_empty() {
            warn!("Empty 'any' condition places no constraint on {}s", self.kind);
        }
        self.combine(state, filters, "OR")
    }
}

fn is_safe_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}
