//! Structural validation of typed condition trees.
//!
//! Wire payloads are validated while they are decoded. This validator covers
//! trees assembled in code through the smart constructors, checking the rules
//! that survive typing: type names must be non-empty.

use crate::{
    ast::{
        condition::{Condition, OF_TYPE},
        path::ConditionPath,
        visitor::ConditionVisitor,
    },
    errors::{ConditionError, Result},
};
use model::core::value::Value;

/// Validator backend. Its state is the location being checked.
pub struct ConditionValidator;

impl ConditionValidator {
    pub fn validate(&self, condition: &Condition) -> Result<()> {
        self.visit(ConditionPath::root(), condition).map(|_| ())
    }

    fn visit_children(&self, path: ConditionPath, filters: &[Condition]) -> Result<ConditionPath> {
        for (index, filter) in filters.iter().enumerate() {
            self.visit(path.child(index), filter)?;
        }
        Ok(path)
    }
}

impl ConditionVisitor for ConditionValidator {
    type State = ConditionPath;
    type Error = ConditionError;

    fn of_type(&self, path: ConditionPath, type_name: &str) -> Result<ConditionPath> {
        if type_name.is_empty() {
            return Err(ConditionError::InvalidField {
                path,
                rule: OF_TYPE,
                field: "type",
                expected: "a non-empty string",
                found: "an empty string",
            });
        }
        Ok(path)
    }

    fn match_property(
        &self,
        path: ConditionPath,
        _property: &str,
        _value: &Value,
    ) -> Result<ConditionPath> {
        Ok(path)
    }

    fn match_all(&self, path: ConditionPath, filters: &[Condition]) -> Result<ConditionPath> {
        self.visit_children(path, filters)
    }

    fn match_any(&self, path: ConditionPath, filters: &[Condition]) -> Result<ConditionPath> {
        self.visit_children(path, filters)
    }
}

/// Validates a typed condition tree.
pub fn validate(condition: &Condition) -> Result<()> {
    ConditionValidator.validate(condition)
}
