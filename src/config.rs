//! Configuration management for the `TripPlanner` core
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::TripPlannerError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Generative service settings
    pub ai: AiConfig,
    /// Trip store settings
    pub store: StoreConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
    /// Default trip settings
    pub defaults: DefaultsConfig,
}

/// Generative service settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiConfig {
    /// Model name passed to a real generative backend
    #[serde(default = "default_ai_model")]
    pub model: String,
    /// Per-request timeout in seconds; applies to every collaborator call
    #[serde(default = "default_ai_timeout")]
    pub timeout_seconds: u32,
    /// Answer prompts with the built-in mock service
    #[serde(default = "default_use_mock")]
    pub use_mock: bool,
}

/// Trip store settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Directory of the trip database
    #[serde(default = "default_store_location")]
    pub location: String,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

/// Default trip settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Whether food allowances are per person for new trips
    #[serde(default = "default_per_person")]
    pub per_person: bool,
    /// Largest accepted party
    #[serde(default = "default_max_party_size")]
    pub max_party_size: u32,
}

// Default value functions
fn default_ai_model() -> String {
    "mock".to_string()
}

fn default_ai_timeout() -> u32 {
    30
}

fn default_use_mock() -> bool {
    true
}

fn default_store_location() -> String {
    dirs::data_dir()
        .map(|dir| dir.join("tripplanner").join("trips"))
        .unwrap_or_else(|| PathBuf::from("trips"))
        .to_string_lossy()
        .into_owned()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_per_person() -> bool {
    true
}

fn default_max_party_size() -> u32 {
    20
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            model: default_ai_model(),
            timeout_seconds: default_ai_timeout(),
            use_mock: default_use_mock(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            location: default_store_location(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            per_person: default_per_person(),
            max_party_size: default_max_party_size(),
        }
    }
}

impl AiConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(u64::from(self.timeout_seconds))
    }
}

impl PlannerConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        // Load from file if path is provided or use default location
        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // TRIPPLANNER__AI__TIMEOUT_SECONDS=10 overrides ai.timeout_seconds
        builder = builder.add_source(
            Environment::with_prefix("TRIPPLANNER")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: PlannerConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("tripplanner").join("config.toml"))
    }

    /// Apply default values to empty configuration fields
    pub fn apply_defaults(&mut self) {
        if self.ai.model.is_empty() {
            self.ai.model = default_ai_model();
        }
        if self.ai.timeout_seconds == 0 {
            self.ai.timeout_seconds = default_ai_timeout();
        }
        if self.store.location.is_empty() {
            self.store.location = default_store_location();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
        if self.defaults.max_party_size == 0 {
            self.defaults.max_party_size = default_max_party_size();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.ai.timeout_seconds > 300 {
            return Err(TripPlannerError::config("AI timeout cannot exceed 300 seconds").into());
        }

        if self.defaults.max_party_size > 100 {
            return Err(TripPlannerError::config("Maximum party size cannot exceed 100").into());
        }

        Ok(())
    }

    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(TripPlannerError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(TripPlannerError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = PlannerConfig::default();
        assert_eq!(config.ai.timeout_seconds, 30);
        assert!(config.ai.use_mock);
        assert_eq!(config.logging.level, "info");
        assert!(config.defaults.per_person);
        assert!(config.store.location.contains("trips"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_invalid_log_level() {
        let mut config = PlannerConfig::default();
        config.logging.level = "invalid".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_config_validation_numeric_ranges() {
        let mut config = PlannerConfig::default();
        config.ai.timeout_seconds = 500;
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("timeout cannot exceed"));
    }

    #[test]
    fn test_apply_defaults_fills_zeroes() {
        let mut config = PlannerConfig::default();
        config.ai.timeout_seconds = 0;
        config.logging.format = String::new();
        config.apply_defaults();
        assert_eq!(config.ai.timeout(), Duration::from_secs(30));
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[ai]\ntimeout_seconds = 5\n\n[logging]\nformat = \"json\"\n\n[defaults]\nper_person = false\ncurrency = \"EUR\""
        )
        .unwrap();

        let config = PlannerConfig::load_from_path(Some(file.path().to_path_buf())).unwrap();
        assert_eq!(config.ai.timeout_seconds, 5);
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.logging.level, "info");
        assert!(!config.defaults.per_person);
        assert_eq!(config.defaults.max_party_size, 20);
    }

    #[test]
    fn test_config_path_generation() {
        let path = PlannerConfig::get_config_path();
        assert!(path.is_some());
        let path = path.unwrap();
        assert!(path.to_string_lossy().contains("tripplanner"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }
}
