//! Main application configuration
//!
//! Defaults, environment variable overrides and TOML files for the
//! go-ratings tools.

use crate::config::rating::RatingConfig;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub service: ServiceSettings,
    #[serde(default)]
    pub rating: RatingConfig,
}

/// Service-level settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Name used in log output
    pub name: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            name: "go-ratings".to_string(),
            log_level: "info".to_string(),
        }
    }
}

fn parse_var(name: &str, value: &str) -> Result<f64> {
    value
        .parse()
        .map_err(|_| anyhow!("Invalid {} value: {}", name, value))
}

impl AppConfig {
    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env()?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Load a TOML file; environment variables still override it
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let mut config = Self::from_toml(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config.apply_env()?;
        validate_config(&config)?;
        Ok(config)
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    fn apply_env(&mut self) -> Result<()> {
        if let Ok(name) = env::var("SERVICE_NAME") {
            self.service.name = name;
        }
        if let Ok(log_level) = env::var("LOG_LEVEL") {
            self.service.log_level = log_level;
        }

        if let Ok(tao) = env::var("GLICKO2_TAO") {
            self.rating.glicko2.tao = parse_var("GLICKO2_TAO", &tao)?;
        }
        if let Ok(min_rd) = env::var("GLICKO2_MIN_RD") {
            self.rating.glicko2.min_rd = parse_var("GLICKO2_MIN_RD", &min_rd)?;
        }
        if let Ok(max_rd) = env::var("GLICKO2_MAX_RD") {
            self.rating.glicko2.max_rd = parse_var("GLICKO2_MAX_RD", &max_rd)?;
        }
        if let Ok(epsilon) = env::var("GOR_EPSILON") {
            self.rating.gor.epsilon = parse_var("GOR_EPSILON", &epsilon)?;
        }

        Ok(())
    }
}

/// Validate configuration values
pub fn validate_config(config: &AppConfig) -> Result<()> {
    match config.service.log_level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        _ => return Err(anyhow!("Invalid log level: {}", config.service.log_level)),
    }

    if config.service.name.is_empty() {
        return Err(anyhow!("Service name cannot be empty"));
    }

    config.rating.validate()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        assert_eq!(config.service.name, "go-ratings");
        assert_eq!(config.service.log_level, "info");
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_from_toml() {
        let config = AppConfig::from_toml(
            r#"
            [service]
            name = "ratings-batch"
            log_level = "debug"

            [rating.glicko2]
            tao = 0.75
            min_rd = 30.0
            max_rd = 400.0

            [rating.gor]
            epsilon = 0.0
            "#,
        )
        .unwrap();

        assert_eq!(config.service.name, "ratings-batch");
        assert_eq!(config.rating.glicko2.tao, 0.75);
        assert_eq!(config.rating.glicko2.max_rd, 400.0);
        assert_eq!(config.rating.gor.epsilon, 0.0);
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config =
            AppConfig::from_toml("[service]\nname = \"x\"\nlog_level = \"warn\"\n").unwrap();
        assert_eq!(config.rating, RatingConfig::default());
    }

    #[test]
    fn test_invalid_log_level() {
        let mut config = AppConfig::default();
        config.service.log_level = "loud".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_invalid_rating_config() {
        let mut config = AppConfig::default();
        config.rating.glicko2.min_rd = 900.0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_parse_var() {
        assert_eq!(parse_var("GLICKO2_TAO", "0.4").unwrap(), 0.4);
        let err = parse_var("GLICKO2_TAO", "fast").unwrap_err();
        assert!(err.to_string().contains("GLICKO2_TAO"));
    }
}
