//! Configuration management for the `Gridcast` application
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::GridcastError;
use crate::report::{MAX_ROWS_LIMIT, ReportConfig};
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

/// Root configuration structure for the `Gridcast` application
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridcastConfig {
    /// Report window and rendering settings
    pub report: ReportSettings,
    /// Forecast data locations
    pub data: DataSettings,
    /// Web server settings
    pub server: ServerSettings,
    /// Logging configuration
    pub logging: LoggingSettings,
}

/// Report window and rendering settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSettings {
    /// Maximum hourly rows per location (1..=208)
    #[serde(default = "default_max_rows")]
    pub max_rows: usize,
    /// Optional hour-of-day (0..=23) the window must open on
    #[serde(default)]
    pub first_hour: Option<u32>,
    /// Serve per-location blocks individually
    #[serde(default)]
    pub expose_blocks: bool,
    /// IANA time zone for displayed times and day boundaries
    #[serde(default = "default_time_zone")]
    pub time_zone: String,
}

/// Forecast data locations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataSettings {
    /// Directory holding `hrrr-{hour}.json` documents and the `lastRun` marker
    #[serde(default = "default_forecast_dir")]
    pub forecast_dir: String,
}

/// Web server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Listen port
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Default value functions
fn default_max_rows() -> usize {
    48
}

fn default_time_zone() -> String {
    "America/Chicago".to_string()
}

fn default_forecast_dir() -> String {
    "./forecasts/hrrr".to_string()
}

fn default_port() -> u16 {
    3500
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for GridcastConfig {
    fn default() -> Self {
        Self {
            report: ReportSettings {
                max_rows: default_max_rows(),
                first_hour: None,
                expose_blocks: false,
                time_zone: default_time_zone(),
            },
            data: DataSettings {
                forecast_dir: default_forecast_dir(),
            },
            server: ServerSettings {
                port: default_port(),
            },
            logging: LoggingSettings {
                level: default_log_level(),
            },
        }
    }
}

impl GridcastConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| PathBuf::from("config.toml"));
        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file)
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Add environment variable overrides with GRIDCAST_ prefix
        builder = builder.add_source(
            Environment::with_prefix("GRIDCAST")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let config: GridcastConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        // Out-of-range values are rejected before any processing begins
        config.validate()?;

        Ok(config)
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        if self.report.max_rows < 1 || self.report.max_rows > MAX_ROWS_LIMIT {
            return Err(GridcastError::config(format!(
                "report.max_rows must be between 1 and {MAX_ROWS_LIMIT}, got {}",
                self.report.max_rows
            ))
            .into());
        }

        if let Some(hour) = self.report.first_hour {
            if hour > 23 {
                return Err(GridcastError::config(format!(
                    "report.first_hour must be between 0 and 23, got {hour}"
                ))
                .into());
            }
        }

        if chrono_tz::Tz::from_str(&self.report.time_zone).is_err() {
            return Err(GridcastError::config(format!(
                "report.time_zone is not a known IANA zone: {}",
                self.report.time_zone
            ))
            .into());
        }

        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(GridcastError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        Ok(())
    }

    /// Resolve the engine-facing report configuration
    pub fn report_config(&self) -> Result<ReportConfig> {
        let time_zone = chrono_tz::Tz::from_str(&self.report.time_zone)
            .map_err(|_| GridcastError::config(format!(
                "report.time_zone is not a known IANA zone: {}",
                self.report.time_zone
            )))?;

        Ok(ReportConfig {
            max_rows: self.report.max_rows,
            first_hour: self.report.first_hour,
            expose_blocks: self.report.expose_blocks,
            time_zone,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GridcastConfig::default();
        assert_eq!(config.report.max_rows, 48);
        assert_eq!(config.report.time_zone, "America/Chicago");
        assert_eq!(config.data.forecast_dir, "./forecasts/hrrr");
        assert_eq!(config.server.port, 3500);
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_max_rows_out_of_bounds() {
        let mut config = GridcastConfig::default();
        config.report.max_rows = 0;
        assert!(config.validate().is_err());

        config.report.max_rows = 209;
        let result = config.validate();
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("between 1 and 208")
        );
    }

    #[test]
    fn test_validation_rejects_bad_first_hour() {
        let mut config = GridcastConfig::default();
        config.report.first_hour = Some(24);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_unknown_time_zone() {
        let mut config = GridcastConfig::default();
        config.report.time_zone = "Mars/Olympus_Mons".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("IANA"));
    }

    #[test]
    fn test_validation_rejects_invalid_log_level() {
        let mut config = GridcastConfig::default();
        config.logging.level = "loud".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_report_config_resolution() {
        let config = GridcastConfig::default();
        let report_config = config.report_config().unwrap();
        assert_eq!(report_config.max_rows, 48);
        assert_eq!(report_config.time_zone, chrono_tz::America::Chicago);
    }
}
