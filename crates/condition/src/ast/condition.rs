use crate::decode::decode;
use model::core::value::Value;
use serde::{Deserialize, Deserializer, Serialize, de::Error as _};

pub const OF_TYPE: &str = "of-type";
pub const MATCH_PROPERTY: &str = "match-property";
pub const ALL: &str = "all";
pub const ANY: &str = "any";

/// A filter predicate over graph entities.
///
/// Conditions are immutable once built. They serialize to the wire form
/// (`{"rule": "of-type", "type": ...}` and friends) and deserialize through
/// the validating decoder, so a successfully deserialized condition is
/// structurally sound.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "rule")]
pub enum Condition {
    /// Entities whose type tag(s) include the given type.
    #[serde(rename = "of-type")]
    OfType {
        #[serde(rename = "type")]
        type_name: String,
    },

    /// Entities whose property is present and strictly equal to `value`.
    #[serde(rename = "match-property")]
    MatchProperty { property: String, value: Value },

    /// Conjunction. No filters matches everything.
    #[serde(rename = "all")]
    MatchAll { filters: Vec<Condition> },

    /// Disjunction. No filters also matches everything.
    #[serde(rename = "any")]
    MatchAny { filters: Vec<Condition> },
}

impl Condition {
    pub fn of_type(type_name: impl Into<String>) -> Self {
        Condition::OfType {
            type_name: type_name.into(),
        }
    }

    pub fn match_property(property: impl Into<String>, value: impl Into<Value>) -> Self {
        Condition::MatchProperty {
            property: property.into(),
            value: value.into(),
        }
    }

    pub fn all(filters: impl IntoIterator<Item = Condition>) -> Self {
        Condition::MatchAll {
            filters: filters.into_iter().collect(),
        }
    }

    pub fn any(filters: impl IntoIterator<Item = Condition>) -> Self {
        Condition::MatchAny {
            filters: filters.into_iter().collect(),
        }
    }

    /// The wire name of this condition's rule.
    pub fn rule(&self) -> &'static str {
        match self {
            Condition::OfType { .. } => OF_TYPE,
            Condition::MatchProperty { .. } => MATCH_PROPERTY,
            Condition::MatchAll { .. } => ALL,
            Condition::MatchAny { .. } => ANY,
        }
    }

    /// Child conditions of a combinator; empty for leaves.
    pub fn filters(&self) -> &[Condition] {
        match self {
            Condition::MatchAll { filters } | Condition::MatchAny { filters } => filters,
            _ => &[],
        }
    }

    pub fn is_combinator(&self) -> bool {
        matches!(self, Condition::MatchAll { .. } | Condition::MatchAny { .. })
    }

    /// Number of nodes in the tree, including this one.
    pub fn size(&self) -> usize {
        1 + self.filters().iter().map(Condition::size).sum::<usize>()
    }
}

impl<'de> Deserialize<'de> for Condition {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let payload = serde_json::Value::deserialize(deserializer)?;
        decode(&payload).map_err(D::Error::custom)
    }
}

impl TryFrom<serde_json::Value> for Condition {
    type Error = crate::errors::ConditionError;

    fn try_from(payload: serde_json::Value) -> Result<Self, Self::Error> {
        decode(&payload)
    }
}
