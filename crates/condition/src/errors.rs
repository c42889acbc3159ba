use crate::ast::path::ConditionPath;
use thiserror::Error;

/// A condition failed structural validation.
///
/// Every variant names where in the tree the defect is; the field-level
/// variants also name the rule, the field and the expected type.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConditionError {
    #[error("invalid condition at {path}: expected a JSON object, found {found}")]
    NotAnObject {
        path: ConditionPath,
        found: &'static str,
    },

    #[error("invalid condition at {path}: missing required field 'rule' (expected a non-empty string)")]
    MissingRule { path: ConditionPath },

    #[error("invalid condition at {path}: field 'rule' must be a non-empty string, found {found}")]
    InvalidRule {
        path: ConditionPath,
        found: &'static str,
    },

    #[error("invalid condition at {path}: unknown rule '{rule}'")]
    UnknownRule { path: ConditionPath, rule: String },

    #[error("invalid '{rule}' condition at {path}: missing required field '{field}' (expected {expected})")]
    MissingField {
        path: ConditionPath,
        rule: &'static str,
        field: &'static str,
        expected: &'static str,
    },

    #[error("invalid '{rule}' condition at {path}: field '{field}' must be {expected}, found {found}")]
    InvalidField {
        path: ConditionPath,
        rule: &'static str,
        field: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    #[error("invalid '{rule}' condition: property name '{property}' cannot be used as a query identifier")]
    UnsafeIdentifier {
        rule: &'static str,
        property: String,
    },
}

impl ConditionError {
    /// The rule of the offending condition, when it is known.
    pub fn rule(&self) -> Option<&str> {
        match self {
            ConditionError::UnknownRule { rule, .. } => Some(rule.as_str()),
            ConditionError::MissingField { rule, .. }
            | ConditionError::InvalidField { rule, .. }
            | ConditionError::UnsafeIdentifier { rule, .. } => Some(*rule),
            _ => None,
        }
    }

    /// The missing or invalid field.
    pub fn field(&self) -> Option<&str> {
        match self {
            ConditionError::MissingRule { .. }
            | ConditionError::InvalidRule { .. }
            | ConditionError::UnknownRule { .. } => Some("rule"),
            ConditionError::MissingField { field, .. }
            | ConditionError::InvalidField { field, .. } => Some(*field),
            ConditionError::UnsafeIdentifier { .. } => Some("property"),
            ConditionError::NotAnObject { .. } => None,
        }
    }

    /// The expected type of the offending field, when applicable.
    pub fn expected(&self) -> Option<&str> {
        match self {
            ConditionError::MissingField { expected, .. }
            | ConditionError::InvalidField { expected, .. } => Some(*expected),
            ConditionError::MissingRule { .. } | ConditionError::InvalidRule { .. } => {
                Some("a non-empty string")
            }
            ConditionError::NotAnObject { .. } => Some("an object"),
            _ => None,
        }
    }

    pub fn path(&self) -> Option<&ConditionPath> {
        match self {
            ConditionError::NotAnObject { path, .. }
            | ConditionError::MissingRule { path }
            | ConditionError::InvalidRule { path, .. }
            | ConditionError::UnknownRule { path, .. }
            | ConditionError::MissingField { path, .. }
            | ConditionError::InvalidField { path, .. } => Some(path),
            ConditionError::UnsafeIdentifier { .. } => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ConditionError>;
