//! Decoding of untrusted wire payloads into typed conditions.
//!
//! This is the only place the `rule` tag is looked at. Decoding is fail-fast
//! and reports the first defect in document order.

use crate::{
    ast::{
        condition::{ALL, ANY, Condition, MATCH_PROPERTY, OF_TYPE},
        path::ConditionPath,
    },
    errors::{ConditionError, Result},
};
use model::core::value::Value;
use serde_json::{Map, Value as JsonValue};
use tracing::debug;

const STRING: &str = "a string";
const NON_EMPTY_STRING: &str = "a non-empty string";
const ANY_VALUE: &str = "any value";
const ARRAY: &str = "an array";

/// Decodes and validates a wire payload.
pub fn decode(payload: &JsonValue) -> Result<Condition> {
    let condition = decode_at(payload, &ConditionPath::root())?;
    debug!(
        "Decoded '{}' condition with {} node(s)",
        condition.rule(),
        condition.size()
    );
    Ok(condition)
}

/// Parses a JSON document and decodes it.
pub fn decode_str(source: &str) -> std::result::Result<Condition, serde_json::Error> {
    serde_json::from_str(source)
}

fn decode_at(payload: &JsonValue, path: &ConditionPath) -> Result<Condition> {
    let object = payload
        .as_object()
        .ok_or_else(|| ConditionError::NotAnObject {
            path: path.clone(),
            found: json_type_name(payload),
        })?;

    let rule = match object.get("rule") {
        Some(JsonValue::String(rule)) if !rule.is_empty() => rule.as_str(),
        Some(other) => {
            return Err(ConditionError::InvalidRule {
                path: path.clone(),
                found: json_type_name(other),
            });
        }
        None => return Err(ConditionError::MissingRule { path: path.clone() }),
    };

    match rule {
        OF_TYPE => {
            let type_name = non_empty_string(object, OF_TYPE, "type", path)?;
            Ok(Condition::of_type(type_name))
        }
        MATCH_PROPERTY => {
            let property = required_string(object, MATCH_PROPERTY, "property", STRING, path)?;
            // An explicit null is a value; only an absent key is missing.
            let value = object
                .get("value")
                .ok_or_else(|| ConditionError::MissingField {
                    path: path.clone(),
                    rule: MATCH_PROPERTY,
                    field: "value",
                    expected: ANY_VALUE,
                })?;
            Ok(Condition::match_property(property, Value::from(value.clone())))
        }
        ALL => Ok(Condition::MatchAll {
            filters: decode_filters(object, ALL, path)?,
        }),
        ANY => Ok(Condition::MatchAny {
            filters: decode_filters(object, ANY, path)?,
        }),
        other => Err(ConditionError::UnknownRule {
            path: path.clone(),
            rule: other.to_string(),
        }),
    }
}

fn required_string<'a>(
    object: &'a Map<String, JsonValue>,
    rule: &'static str,
    field: &'static str,
    expected: &'static str,
    path: &ConditionPath,
) -> Result<&'a str> {
    match object.get(field) {
        Some(JsonValue::String(value)) => Ok(value.as_str()),
        Some(other) => Err(ConditionError::InvalidField {
            path: path.clone(),
            rule,
            field,
            expected,
            found: json_type_name(other),
        }),
        None => Err(ConditionError::MissingField {
            path: path.clone(),
            rule,
            field,
            expected,
        }),
    }
}

fn non_empty_string<'a>(
    object: &'a Map<String, JsonValue>,
    rule: &'static str,
    field: &'static str,
    path: &ConditionPath,
) -> Result<&'a str> {
    match required_string(object, rule, field, NON_EMPTY_STRING, path)? {
        "" => Err(ConditionError::InvalidField {
            path: path.clone(),
            rule,
            field,
            expected: NON_EMPTY_STRING,
            found: "an empty string",
        }),
        value => Ok(value),
    }
}

fn decode_filters(
    object: &Map<String, JsonValue>,
    rule: &'static str,
    path: &ConditionPath,
) -> Result<Vec<Condition>> {
    let filters = match object.get("filters") {
        Some(JsonValue::Array(filters)) => filters,
        Some(other) => {
            return Err(ConditionError::InvalidField {
                path: path.clone(),
                rule,
                field: "filters",
                expected: ARRAY,
                found: json_type_name(other),
            });
        }
        None => {
            return Err(ConditionError::MissingField {
                path: path.clone(),
                rule,
                field: "filters",
                expected: ARRAY,
            });
        }
    };

    filters
        .iter()
        .enumerate()
        .map(|(index, filter)| decode_at(filter, &path.child(index)))
        .collect()
}

fn json_type_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(s) if s.is_empty() => "an empty string",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}
