use std::fmt;

/// Location of a condition inside its tree, rendered as `$.filters[1].filters[0]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConditionPath(String);

impl ConditionPath {
    pub fn root() -> Self {
        ConditionPath("$".to_string())
    }

    /// Path of the `index`-th entry in this combinator's `filters`.
    pub fn child(&self, index: usize) -> Self {
        ConditionPath(format!("{}.filters[{index}]", self.0))
    }

    pub fn is_root(&self) -> bool {
        self.0 == "$"
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ConditionPath {
    fn default() -> Self {
        Self::root()
    }
}

impl fmt::Display for ConditionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
