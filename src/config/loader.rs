//! Configuration file loader.

use super::error::{ConfigError, ConfigResult};
use super::types::RestrictionConfig;
use super::validation::Validator;
use std::path::Path;
use tracing::warn;

/// Configuration loader with validation support.
#[derive(Debug, Default)]
pub struct ConfigLoader {
    /// Validators to run on loaded configuration.
    validators: Vec<Box<dyn Validator>>,
}

impl ConfigLoader {
    /// Create a new configuration loader.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a validator to the loader.
    #[must_use]
    pub fn with_validator<V: Validator + 'static>(mut self, validator: V) -> Self {
        self.validators.push(Box::new(validator));
        self
    }

    /// Load and validate configuration from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file does not exist
    /// - The file cannot be read
    /// - The TOML is malformed
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(&self, path: P) -> ConfigResult<RestrictionConfig> {
        let config = self.read(path)?;
        self.validate(&config)?;
        Ok(config)
    }

    /// Parse a configuration file without running the validators.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, unreadable or malformed.
    pub fn read<P: AsRef<Path>>(&self, path: P) -> ConfigResult<RestrictionConfig> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(toml::from_str(&content)?)
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The TOML is malformed
    /// - Validation fails
    pub fn load_str(&self, content: &str) -> ConfigResult<RestrictionConfig> {
        let config: RestrictionConfig = toml::from_str(content)?;
        self.validate(&config)?;
        Ok(config)
    }

    /// Run all registered validators.
    ///
    /// Warnings are logged; errors fail validation.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] listing every error found by
    /// the first failing validator.
    pub fn validate(&self, config: &RestrictionConfig) -> ConfigResult<()> {
        for validator in &self.validators {
            let result = validator.validate(config);

            for warning in result.warnings() {
                warn!(field = %warning.field, "{}", warning.message);
            }

            if !result.is_valid() {
                let errors: Vec<String> = result
                    .errors_only()
                    .iter()
                    .map(|e| format!("{}: {}", e.field, e.message))
                    .collect();
                return Err(ConfigError::ValidationError(errors.join("; ")));
            }
        }
        Ok(())
    }
}
