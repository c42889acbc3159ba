use crate::{error::SettingsError, settings::validator::SettingsValidator};
use engine_core::service::{ExecutionMode, FilterOptions};
use planner::query::IdentifierStrategy;
use serde::{Deserialize, Serialize};
use std::{
    path::{Path, PathBuf},
    str::FromStr,
};
use tracing::{debug, info};

pub mod validator;

/// Looks up an environment variable. Injectable so tests never touch the
/// process environment.
pub type EnvGetter = fn(&str) -> Option<String>;

pub const ENV_ENTITY_VARIABLE: &str = "SIEVE_ENTITY_VARIABLE";
pub const ENV_IDENTIFIER_STRATEGY: &str = "SIEVE_IDENTIFIER_STRATEGY";
pub const ENV_EXECUTION_MODE: &str = "SIEVE_EXECUTION_MODE";
pub const ENV_INCLUDE_SUBSIDIARY: &str = "SIEVE_INCLUDE_SUBSIDIARY";
pub const ENV_LOG_LEVEL: &str = "SIEVE_LOG_LEVEL";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineSettings {
    /// Variable the compiled query binds each entity to.
    pub entity_variable: String,
    pub identifier_strategy: IdentifierStrategy,
    pub execution_mode: ExecutionMode,
    /// Default for requests that do not say whether to add subsidiary nodes.
    pub include_subsidiary: bool,
    /// Default log filter directive, overridden by `RUST_LOG`.
    pub log_level: String,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            entity_variable: "n".to_string(),
            identifier_strategy: IdentifierStrategy::default(),
            execution_mode: ExecutionMode::default(),
            include_subsidiary: false,
            log_level: "info".to_string(),
        }
    }
}

impl EngineSettings {
    pub fn from_toml(source: &str) -> Result<Self, SettingsError> {
        Ok(toml::from_str(source)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&contents)
    }

    pub fn filter_options(&self) -> FilterOptions {
        FilterOptions {
            variable: self.entity_variable.clone(),
            strategy: self.identifier_strategy,
            mode: self.execution_mode,
            include_subsidiary: self.include_subsidiary,
        }
    }
}

/// Builds [`EngineSettings`] from an optional TOML file, then environment
/// overrides, then validation.
pub struct SettingsLoader {
    path: Option<PathBuf>,
    env: EnvGetter,
}

impl Default for SettingsLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsLoader {
    pub fn new() -> Self {
        Self {
            path: None,
            env: |key| std::env::var(key).ok(),
        }
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_env(mut self, env: EnvGetter) -> Self {
        self.env = env;
        self
    }

    pub fn load(&self) -> Result<EngineSettings, SettingsError> {
        let mut settings = match &self.path {
            Some(path) => {
                info!("Loading settings from {}", path.display());
                EngineSettings::from_file(path)?
            }
            None => EngineSettings::default(),
        };

        self.apply_env(&mut settings)?;
        SettingsValidator::new(&settings).validate()?;

        debug!("Effective settings: {settings:?}");
        Ok(settings)
    }

    fn apply_env(&self, settings: &mut EngineSettings) -> Result<(), SettingsError> {
        if let Some(variable) = (self.env)(ENV_ENTITY_VARIABLE) {
            settings.entity_variable = variable;
        }
        if let Some(strategy) = self.parsed(ENV_IDENTIFIER_STRATEGY)? {
            settings.identifier_strategy = strategy;
        }
        if let Some(mode) = self.parsed(ENV_EXECUTION_MODE)? {
            settings.execution_mode = mode;
        }
        if let Some(include) = self.parsed_bool(ENV_INCLUDE_SUBSIDIARY)? {
            settings.include_subsidiary = include;
        }
        if let Some(level) = (self.env)(ENV_LOG_LEVEL) {
            settings.log_level = level;
        }
        Ok(())
    }

    fn parsed<T>(&self, key: &'static str) -> Result<Option<T>, SettingsError>
    where
        T: FromStr<Err = String>,
    {
        (self.env)(key)
            .map(|value| {
                value
                    .parse()
                    .map_err(|reason| SettingsError::InvalidValue { key, value, reason })
            })
            .transpose()
    }

    fn parsed_bool(&self, key: &'static str) -> Result<Option<bool>, SettingsError> {
        (self.env)(key)
            .map(|value| match value.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => Ok(true),
                "0" | "false" | "no" | "off" => Ok(false),
                _ => Err(SettingsError::InvalidValue {
                    key,
                    value,
                    reason: "expected a boolean".to_string(),
                }),
            })
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_defaults() {
        let settings = SettingsLoader::new().with_env(no_env).load().unwrap();
        assert_eq!(settings, EngineSettings::default());
        assert_eq!(settings.filter_options(), FilterOptions::default());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            entity_variable = "e"
            identifier_strategy = "inline"
            execution_mode = "in-memory"
            include_subsidiary = true
            "#
        )
        .unwrap();

        let settings = SettingsLoader::new()
            .with_file(file.path())
            .with_env(no_env)
            .load()
            .unwrap();

        assert_eq!(settings.entity_variable, "e");
        assert_eq!(settings.identifier_strategy, IdentifierStrategy::Inline);
        assert_eq!(settings.execution_mode, ExecutionMode::InMemory);
        assert!(settings.include_subsidiary);
        assert_eq!(settings.log_level, "info");
    }

    #[test]
    fn test_env_overrides_file() {
        fn env(key: &str) -> Option<String> {
            match key {
                ENV_EXECUTION_MODE => Some("pushdown".into()),
                ENV_INCLUDE_SUBSIDIARY => Some("yes".into()),
                ENV_IDENTIFIER_STRATEGY => Some("dynamic_key".into()),
                _ => None,
            }
        }

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "execution_mode = \"in-memory\"\nidentifier_strategy = \"inline\"").unwrap();

        let settings = SettingsLoader::new()
            .with_file(file.path())
            .with_env(env)
            .load()
            .unwrap();

        assert_eq!(settings.execution_mode, ExecutionMode::Pushdown);
        assert_eq!(settings.identifier_strategy, IdentifierStrategy::DynamicKey);
        assert!(settings.include_subsidiary);
    }

    #[test]
    fn test_bad_env_value() {
        fn env(key: &str) -> Option<String> {
            (key == ENV_EXECUTION_MODE).then(|| "remote".to_string())
        }

        let err = SettingsLoader::new().with_env(env).load().unwrap_err();
        assert!(matches!(
            err,
            SettingsError::InvalidValue { key: ENV_EXECUTION_MODE, .. }
        ));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = EngineSettings::from_toml("batch_size = 10").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = SettingsLoader::new()
            .with_file("/nonexistent/sieve.toml")
            .with_env(no_env)
            .load()
            .unwrap_err();
        assert!(matches!(err, SettingsError::Read { .. }));
    }
}
