use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

use crate::error::ConfigError;

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// All errors joined into one line
    pub fn error_summary(&self) -> String {
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Upstream data sources
    #[serde(default)]
    pub services: ServiceConfig,

    /// Itinerary and report defaults
    #[serde(default)]
    pub planner: PlannerConfig,

    /// Backoff for upstream HTTP calls
    #[serde(default)]
    pub retry: RetryConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Nominatim search endpoint used for forward geocoding
    pub nominatim_url: String,

    /// Overpass interpreter endpoint used for POI discovery
    pub overpass_url: String,

    /// Open-Meteo forecast endpoint
    pub open_meteo_url: String,

    /// User-Agent sent to every upstream (Nominatim rejects anonymous clients)
    pub user_agent: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            nominatim_url: "https://nominatim.openstreetmap.org/search".to_string(),
            overpass_url: "https://overpass-api.de/api/interpreter".to_string(),
            open_meteo_url: "https://api.open-meteo.com/v1/forecast".to_string(),
            user_agent: concat!("tripplan/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout_secs: 20,
        }
    }
}

impl ServiceConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// POIs scheduled per day when the caller does not say otherwise
    #[serde(default = "default_daily_limit")]
    pub daily_limit: usize,

    /// Search radius around the city centre for itinerary candidates
    #[serde(default = "default_itinerary_radius")]
    pub itinerary_radius_meters: u32,

    /// Lower bound on the candidate pool requested for an itinerary
    #[serde(default = "default_min_pool_size")]
    pub min_pool_size: usize,

    /// Default radius for the stand-alone POI report
    #[serde(default = "default_poi_radius")]
    pub poi_radius_meters: u32,

    /// Default result count for the stand-alone POI report
    #[serde(default = "default_poi_limit")]
    pub poi_limit: usize,
}

fn default_daily_limit() -> usize {
    3
}

fn default_itinerary_radius() -> u32 {
    3500
}

fn default_min_pool_size() -> usize {
    20
}

fn default_poi_radius() -> u32 {
    2000
}

fn default_poi_limit() -> usize {
    8
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            daily_limit: default_daily_limit(),
            itinerary_radius_meters: default_itinerary_radius(),
            min_pool_size: default_min_pool_size(),
            poi_radius_meters: default_poi_radius(),
            poi_limit: default_poi_limit(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Retries after the first attempt; 0 disables retrying
    pub max_retries: u32,
    /// Delay before the first retry (doubles each attempt)
    pub initial_delay_ms: u64,
    /// Upper bound on any single delay
    pub max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 2,
            initial_delay_ms: 200,
            max_delay_ms: 2000,
        }
    }
}

impl RetryConfig {
    /// Exponential backoff: initial_delay * 2^attempt, capped at max_delay
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let factor = 2u64.saturating_pow(attempt);
        let delay_ms = self.initial_delay_ms.saturating_mul(factor);
        Duration::from_millis(delay_ms.min(self.max_delay_ms))
    }

    /// A policy that sends each request exactly once
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            initial_delay_ms: 0,
            max_delay_ms: 0,
        }
    }
}

impl Config {
    /// Load configuration from the user config directory, creating a default file if missing
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            let config = Self::default();
            config.save_to(&config_path)?;
            tracing::info!("Wrote default config to {}", config_path.display());
            return Ok(config);
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from an explicit path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let config: Self = toml::from_str(&contents)
            .map_err(|e| ConfigError::ParseError(format!("{}: {}", path.display(), e)))?;
        Ok(config)
    }

    /// Load configuration and reject it if validation finds errors
    pub fn load_validated(path: Option<&Path>) -> Result<(Self, ValidationResult)> {
        let config = match path {
            Some(p) => Self::load_from(p)?,
            None => Self::load()?,
        };
        let validation = config.validate();

        if !validation.is_valid() {
            anyhow::bail!(
                "Configuration validation failed: {}",
                validation.error_summary()
            );
        }

        for warning in &validation.warnings {
            tracing::warn!("Config warning: {}", warning);
        }

        Ok((config, validation))
    }

    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        validate_url(&self.services.nominatim_url, "services.nominatim_url", &mut result);
        validate_url(&self.services.overpass_url, "services.overpass_url", &mut result);
        validate_url(&self.services.open_meteo_url, "services.open_meteo_url", &mut result);

        if self.services.user_agent.trim().is_empty() {
            result.add_error("services.user_agent", "User agent must not be empty");
        }

        if self.services.timeout_secs == 0 {
            result.add_error("services.timeout_secs", "Timeout must be greater than 0");
        } else if self.services.timeout_secs > 300 {
            result.add_warning(
                "services.timeout_secs",
                "Timeout is unusually long (>300 seconds)",
            );
        }

        if self.planner.daily_limit == 0 {
            result.add_warning(
                "planner.daily_limit",
                "Daily limit is 0; itineraries will only contain placeholders",
            );
        } else if self.planner.daily_limit > 10 {
            result.add_warning("planner.daily_limit", "Only 3 POIs per day are displayed");
        }

        if self.planner.itinerary_radius_meters == 0 || self.planner.poi_radius_meters == 0 {
            result.add_error("planner", "Search radius must be greater than 0");
        }

        if self.retry.max_retries > 10 {
            result.add_warning("retry.max_retries", "More than 10 retries per request");
        }
        if self.retry.initial_delay_ms > self.retry.max_delay_ms {
            result.add_warning(
                "retry.initial_delay_ms",
                "Initial delay exceeds max delay; every retry waits max_delay_ms",
            );
        }

        result
    }

    /// Save configuration to an explicit path, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, contents).context("Failed to write config file")?;

        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get config directory")?
            .join("tripplan");

        Ok(config_dir.join("config.toml"))
    }
}

fn validate_url(url_str: &str, field_name: &str, result: &mut ValidationResult) {
    match Url::parse(url_str) {
        Ok(url) => {
            if url.scheme() != "http" && url.scheme() != "https" {
                result.add_error(
                    field_name,
                    format!("URL must use http or https scheme, got: {}", url.scheme()),
                );
            }
            if url.host().is_none() {
                result.add_error(field_name, "URL must have a host");
            }
        }
        Err(e) => result.add_error(field_name, format!("Invalid URL: {}", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_default_config() {
        let config = Config::default();
        let result = config.validate();
        assert!(result.is_valid(), "Default config should be valid: {:?}", result.errors);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_invalid_url() {
        let mut config = Config::default();
        config.services.overpass_url = "not-a-url".to_string();
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.field == "services.overpass_url"));
    }

    #[test]
    fn test_invalid_url_scheme() {
        let mut config = Config::default();
        config.services.open_meteo_url = "ftp://api.open-meteo.com/v1/forecast".to_string();
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.message.contains("http or https")));
    }

    #[test]
    fn test_zero_timeout_is_error() {
        let mut config = Config::default();
        config.services.timeout_secs = 0;
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.field == "services.timeout_secs"));
    }

    #[test]
    fn test_zero_daily_limit_is_warning() {
        let mut config = Config::default();
        config.planner.daily_limit = 0;
        let result = config.validate();
        assert!(result.is_valid());
        assert!(result.warnings.iter().any(|w| w.field == "planner.daily_limit"));
    }

    #[test]
    fn test_validation_result_error_summary() {
        let mut result = ValidationResult::default();
        result.add_error("field1", "error1");
        result.add_error("field2", "error2");
        assert_eq!(result.error_summary(), "field1: error1; field2: error2");
    }

    #[test]
    fn test_retry_delay_doubles_and_caps() {
        let retry = RetryConfig {
            max_retries: 5,
            initial_delay_ms: 100,
            max_delay_ms: 1000,
        };
        assert_eq!(retry.delay_for_attempt(0), Duration::from_millis(100));
        assert_eq!(retry.delay_for_attempt(1), Duration::from_millis(200));
        assert_eq!(retry.delay_for_attempt(3), Duration::from_millis(800));
        assert_eq!(retry.delay_for_attempt(4), Duration::from_millis(1000));
        assert_eq!(retry.delay_for_attempt(63), Duration::from_millis(1000));
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.planner.daily_limit = 4;
        config.services.user_agent = "tripplan-test".to_string();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.planner.daily_limit, 4);
        assert_eq!(loaded.services.user_agent, "tripplan-test");
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[planner]\ndaily_limit = 2\n").unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.planner.daily_limit, 2);
        assert_eq!(loaded.planner.min_pool_size, 20);
        assert_eq!(loaded.retry.max_retries, 2);
        assert_eq!(loaded.services.timeout_secs, 20);
    }

    #[test]
    fn test_partial_services_section_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[services]\nuser_agent = \"me@example.com\"\n").unwrap();

        let loaded = Config::load_from(&path).unwrap();
        let defaults = ServiceConfig::default();
        assert_eq!(loaded.services.user_agent, "me@example.com");
        assert_eq!(loaded.services.nominatim_url, defaults.nominatim_url);
        assert_eq!(loaded.services.overpass_url, defaults.overpass_url);
        assert_eq!(loaded.services.open_meteo_url, defaults.open_meteo_url);
        assert_eq!(loaded.services.timeout_secs, 20);
        assert!(loaded.validate().is_valid());
    }

    #[test]
    fn test_partial_retry_section_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[retry]\nmax_retries = 5\n").unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.retry.max_retries, 5);
        assert_eq!(loaded.retry.initial_delay_ms, 200);
        assert_eq!(loaded.retry.max_delay_ms, 2000);
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[planner\ndaily_limit = ").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::ParseError(_))
        ));

        let err = Config::load_validated(Some(&path)).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_load_validated_rejects_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut config = Config::default();
        config.services.timeout_secs = 0;
        config.save_to(&path).unwrap();

        let err = Config::load_validated(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("services.timeout_secs"));
    }
}
