use crate::{error::SettingsError, settings::EngineSettings};
use planner::query::IdentifierStrategy;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Checks loaded settings before they are handed to the engine.
pub struct SettingsValidator<'a> {
    settings: &'a EngineSettings,
}

impl<'a> SettingsValidator<'a> {
    pub fn new(settings: &'a EngineSettings) -> Self {
        Self { settings }
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        let mut errors: Vec<String> = Vec::new();

        self.validate_entity_variable(&mut errors);
        self.validate_log_level(&mut errors);
        self.check_strategy();

        if !errors.is_empty() {
            return Err(SettingsError::ValidationFailed(errors));
        }

        info!(
            "Settings validated: variable '{}', strategy {}, mode {}",
            self.settings.entity_variable,
            self.settings.identifier_strategy,
            self.settings.execution_mode
        );
        Ok(())
    }

    fn validate_entity_variable(&self, errors: &mut Vec<String>) {
        let variable = &self.settings.entity_variable;
        let mut chars = variable.chars();
        let valid = chars
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
            && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');

        if !valid {
            errors.push(format!(
                "entity_variable '{variable}' must match [A-Za-z_][A-Za-z0-9_]*"
            ));
        }
    }

    fn validate_log_level(&self, errors: &mut Vec<String>) {
        if let Err(err) = EnvFilter::try_new(&self.settings.log_level) {
            errors.push(format!(
                "log_level '{}' is not a valid filter: {err}",
                self.settings.log_level
            ));
        }
    }

    fn check_strategy(&self) {
        if self.settings.identifier_strategy == IdentifierStrategy::Inline {
            warn!("Inline identifier strategy writes property names into query text");
        }
    }
}
