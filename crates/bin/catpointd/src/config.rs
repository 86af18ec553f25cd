//! Configuration loading: TOML file with environment variable overrides.
//!
//! Looks for `catpoint.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Database settings.
    pub database: DatabaseConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Demo installation settings.
    pub demo: DemoConfig,
}

/// `SQLite` database configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// `SQLite` connection URL or file path.
    pub url: String,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Add the virtual sensors when the installation has none.
    pub seed_sensors: bool,
}

impl Config {
    /// Load configuration from `catpoint.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("catpoint.toml")?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("CATPOINT_DATABASE_URL") {
            self.database.url = val;
        }
        if let Ok(val) = std::env::var("CATPOINT_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("CATPOINT_SEED_SENSORS") {
            if let Ok(seed) = val.parse() {
                self.demo.seed_sensors = seed;
            }
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.database.url.trim().is_empty() {
            return Err(ConfigError::Validation(
                "database url must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite:catpoint.db?mode=rwc".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "catpointd=info,catpoint_app=info".to_string(),
        }
    }
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self { seed_sensors: true }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_produce_sensible_defaults() {
        let config = Config::default();
        assert_eq!(config.database.url, "sqlite:catpoint.db?mode=rwc");
        assert_eq!(config.logging.filter, "catpointd=info,catpoint_app=info");
        assert!(config.demo.seed_sensors);
    }

    #[test]
    fn should_parse_minimal_toml() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.database.url, "sqlite:catpoint.db?mode=rwc");
    }

    #[test]
    fn should_parse_full_toml() {
        let toml = "
            [database]
            url = 'sqlite:test.db'

            [logging]
            filter = 'debug'

            [demo]
            seed_sensors = false
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.database.url, "sqlite:test.db");
        assert_eq!(config.logging.filter, "debug");
        assert!(!config.demo.seed_sensors);
    }

    #[test]
    fn should_parse_partial_toml_with_defaults() {
        let toml = "
            [demo]
            seed_sensors = false
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert!(!config.demo.seed_sensors);
        assert_eq!(config.database.url, "sqlite:catpoint.db?mode=rwc");
    }

    #[test]
    fn should_return_default_when_file_not_found() {
        let config = Config::from_file("nonexistent.toml").unwrap();
        assert!(config.demo.seed_sensors);
    }

    #[test]
    fn should_reject_empty_database_url() {
        let mut config = Config::default();
        config.database.url = "  ".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn should_accept_default_config() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn should_report_parse_error_for_invalid_toml() {
        let result: Result<Config, _> = toml::from_str("invalid {{{");
        assert!(result.is_err());
    }
}
