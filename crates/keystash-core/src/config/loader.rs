//! Configuration loading and persistence.

use super::Config;
use crate::env;
use crate::error::ConfigError;
use crate::paths;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Maximum allowed length for a service name.
const MAX_SERVICE_LEN: usize = 128;

impl Config {
    /// Load configuration from the default path.
    pub fn load_default() -> Result<Self, ConfigError> {
        let path = paths::config_file()?;
        Self::load(&path)
    }

    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        debug!(path = %path.display(), "loading config");
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Load from `path`, or from the default path when `path` is `None`.
    ///
    /// Only a missing default file falls back to defaults; an explicit path
    /// that does not exist is [`ConfigError::NotFound`]. Environment
    /// overrides are applied to whatever was loaded.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::load(path)?,
            None => match Self::load_default() {
                Ok(config) => config,
                Err(ConfigError::NotFound(path)) => {
                    debug!(path = %path.display(), "no config file, using defaults");
                    Self::default()
                }
                Err(e) => return Err(e),
            },
        };
        config.apply_env();
        Ok(config)
    }

    /// Apply `KEYSTASH_*` environment overrides.
    pub fn apply_env(&mut self) {
        if let Some(service) = env::get_var(env::vars::KEYSTASH_SERVICE) {
            self.store.service = service;
        }
    }

    /// Parse configuration from a string.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        json5::from_str(content).map_err(|e| ConfigError::Json5(e.to_string()))
    }

    /// Save configuration to a file path.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = self.to_json5()?;

        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Write atomically
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, &content)?;
        fs::rename(&temp_path, path)?;

        Ok(())
    }

    /// Serialize to JSON5 string.
    pub fn to_json5(&self) -> Result<String, ConfigError> {
        // json5 doesn't have a serializer, so we use serde_json with pretty print
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Validate the configuration, collecting all errors before returning.
    pub fn validate(&self) -> Result<(), ConfigError> {
        Self::validate_service(&self.store.service)
    }

    /// Check a service name against the same rules as `store.service`.
    pub fn validate_service(service: &str) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if service.trim().is_empty() {
            errors.push("Store service must not be empty".to_string());
        } else if service.trim() != service {
            errors.push(format!(
                "Store service must not have leading or trailing whitespace: {service:?}"
            ));
        }
        if service.len() > MAX_SERVICE_LEN {
            errors.push(format!(
                "Store service exceeds maximum length of {MAX_SERVICE_LEN} characters"
            ));
        }
        if service.chars().any(char::is_control) {
            errors.push("Store service must not contain control characters".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors.join("; ")))
        }
    }
}
