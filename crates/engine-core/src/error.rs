use crate::store::StoreError;
use condition::ConditionError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid condition: {0}")]
    Condition(#[from] ConditionError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl EngineError {
    /// Whether the failure was caused by the request rather than the store.
    pub fn is_client_error(&self) -> bool {
        matches!(self, EngineError::Condition(_))
    }
}
