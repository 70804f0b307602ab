//! Configuration management for the trip planner
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::TripPlannerError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TripPlannerConfig {
    /// HTTP server settings
    pub server: ServerConfig,
    /// Weather API configuration
    pub weather: WeatherConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
    /// Trip origin and form defaults
    pub trip: TripDefaults,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_host")]
    pub host: String,
    #[serde(default = "default_server_port")]
    pub port: u16,
    /// Directory with the browser page and its assets
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

/// Weather API configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Base URL for weather API
    #[serde(default = "default_weather_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_weather_timeout")]
    pub timeout_seconds: u32,
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

/// Values used when the traveller leaves a form field empty or zero
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripDefaults {
    /// Town every trip starts from
    #[serde(default = "default_origin")]
    pub origin: String,
    #[serde(default = "default_people")]
    pub people: u32,
    #[serde(default = "default_days")]
    pub days: u32,
    /// Fuel efficiency in km per litre
    #[serde(default = "default_mileage")]
    pub mileage: f64,
    /// Fuel price per litre
    #[serde(default = "default_fuel_price")]
    pub fuel_price: f64,
    #[serde(default)]
    pub tolls: f64,
    /// Stay cost per person per day
    #[serde(default = "default_stay_per_day")]
    pub stay_per_day: f64,
}

// Default value functions
fn default_server_host() -> String {
    "127.0.0.1".to_string()
}

fn default_server_port() -> u16 {
    5173
}

fn default_static_dir() -> String {
    "static".to_string()
}

fn default_weather_base_url() -> String {
    "https://api.open-meteo.com/v1".to_string()
}

fn default_weather_timeout() -> u32 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_origin() -> String {
    crate::routing::ORIGIN.to_string()
}

fn default_people() -> u32 {
    1
}

fn default_days() -> u32 {
    1
}

fn default_mileage() -> f64 {
    15.0
}

fn default_fuel_price() -> f64 {
    100.0
}

fn default_stay_per_day() -> f64 {
    1000.0
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
            static_dir: default_static_dir(),
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: default_weather_base_url(),
            timeout_seconds: default_weather_timeout(),
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

impl Default for TripDefaults {
    fn default() -> Self {
        Self {
            origin: default_origin(),
            people: default_people(),
            days: default_days(),
            mileage: default_mileage(),
            fuel_price: default_fuel_price(),
            tolls: 0.0,
            stay_per_day: default_stay_per_day(),
        }
    }
}

impl TripPlannerConfig {
    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        // Load from file if path is provided or use default location
        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path()
                .filter(|path| path.exists())
                .unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Environment overrides, e.g. TRIPPLANNER_SERVER__PORT=8080
        builder = builder.add_source(
            Environment::with_prefix("TRIPPLANNER")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: TripPlannerConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        if let Ok(port) = std::env::var("PORT") {
            config.server.port = port
                .parse()
                .with_context(|| format!("PORT must be a port number, got '{port}'"))?;
        }

        // Apply defaults for missing values
        config.apply_defaults();

        // Validate configuration
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("tripplanner").join("config.toml"))
    }

    /// Apply default values to missing configuration fields
    pub fn apply_defaults(&mut self) {
        if self.server.host.is_empty() {
            self.server.host = default_server_host();
        }
        if self.server.static_dir.is_empty() {
            self.server.static_dir = default_static_dir();
        }
        if self.weather.base_url.is_empty() {
            self.weather.base_url = default_weather_base_url();
        }
        if self.weather.timeout_seconds == 0 {
            self.weather.timeout_seconds = default_weather_timeout();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
        if self.trip.origin.is_empty() {
            self.trip.origin = default_origin();
        }
        if self.trip.people == 0 {
            self.trip.people = default_people();
        }
        if self.trip.days == 0 {
            self.trip.days = default_days();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(TripPlannerError::config("Server port cannot be 0").into());
        }

        if self.weather.timeout_seconds > 300 {
            return Err(
                TripPlannerError::config("Weather API timeout cannot exceed 300 seconds").into(),
            );
        }

        let trip_amounts = [
            ("mileage", self.trip.mileage),
            ("fuel_price", self.trip.fuel_price),
            ("tolls", self.trip.tolls),
            ("stay_per_day", self.trip.stay_per_day),
        ];
        for (name, value) in trip_amounts {
            if !value.is_finite() || value < 0.0 {
                return Err(TripPlannerError::config(format!(
                    "Trip default '{name}' must be a non-negative number, got {value}"
                ))
                .into());
            }
        }

        Ok(())
    }

    /// Validate string configuration values
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

        if !self.weather.base_url.starts_with("http://")
            && !self.weather.base_url.starts_with("https://")
        {
            return Err(TripPlannerError::config(
                "Weather API base URL must be a valid HTTP or HTTPS URL",
            )
            .into());
        }

        Ok(())
    }

    /// Address the HTTP server binds to
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = TripPlannerConfig::default();
        assert_eq!(config.weather.base_url, "https://api.open-meteo.com/v1");
        assert_eq!(config.weather.timeout_seconds, 30);
        assert_eq!(config.server.port, 5173);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.trip.origin, "Chandigarh");
        assert_eq!(config.trip.mileage, 15.0);
        assert_eq!(config.trip.stay_per_day, 1000.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_invalid_log_level() {
        let mut config = TripPlannerConfig::default();
        config.logging.level = "invalid".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_config_validation_invalid_log_format() {
        let mut config = TripPlannerConfig::default();
        config.logging.format = "xml".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_numeric_ranges() {
        let mut config = TripPlannerConfig::default();
        config.weather.timeout_seconds = 500;
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("timeout cannot exceed"));
    }

    #[test]
    fn test_config_validation_negative_trip_default() {
        let mut config = TripPlannerConfig::default();
        config.trip.fuel_price = -1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_base_url() {
        let mut config = TripPlannerConfig::default();
        config.weather.base_url = "ftp://example.com".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_apply_defaults_fills_zero_values() {
        let mut config = TripPlannerConfig::default();
        config.trip.people = 0;
        config.weather.timeout_seconds = 0;
        config.logging.level.clear();
        config.apply_defaults();
        assert_eq!(config.trip.people, 1);
        assert_eq!(config.weather.timeout_seconds, 30);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_load_from_file() {
        let dir = std::env::temp_dir().join(format!("tripplanner-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "[server]\nport = 8080\n\n[trip]\nmileage = 12.5").unwrap();

        let config = TripPlannerConfig::load_from_path(Some(path)).unwrap();
        std::fs::remove_dir_all(&dir).unwrap();

        assert_eq!(config.trip.mileage, 12.5);
        assert_eq!(config.trip.fuel_price, 100.0);
        assert_eq!(config.logging.format, "pretty");
        if std::env::var("PORT").is_err() {
            assert_eq!(config.server.port, 8080);
        }
    }

    #[test]
    fn test_config_path_generation() {
        if let Some(path) = TripPlannerConfig::get_config_path() {
            assert!(path.to_string_lossy().contains("tripplanner"));
            assert!(path.to_string_lossy().ends_with("config.toml"));
        }
    }
}
