use condition::ConditionError;
use engine_config::error::SettingsError;
use engine_core::{error::EngineError, store::StoreError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Failed to read input file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse JSON input: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Failed to serialize data to JSON: {0}")]
    JsonSerialize(serde_json::Error),

    #[error("Invalid condition: {0}")]
    Condition(#[from] ConditionError),

    #[error("Filtering failed: {0}")]
    Engine(#[from] EngineError),

    #[error("Failed to load graph: {0}")]
    Store(#[from] StoreError),

    #[error("Invalid settings: {0}")]
    Settings(#[from] SettingsError),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}
