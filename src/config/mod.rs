//! Configuration management module
//!
//! Handles loading, saving, and validation of the viewer configuration:
//! where weekly data comes from, how dates are delimited, and how the UI
//! loop and the initial load behave.

use crate::data::{DataProvider, JsonFileProvider, SampleProvider};
use crate::error::RetryConfig;
use crate::models::DEFAULT_DATE_DELIMITER;
use crate::{Result, ScreenTimeError, APP_NAME, CONFIG_FILE, LOG_FILE};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

const MIN_TICK_RATE: Duration = Duration::from_millis(16);
const MAX_TICK_RATE: Duration = Duration::from_secs(5);
const MAX_LOAD_RETRIES: usize = 10;
const MAX_SAMPLE_WEEKS: usize = 520;

/// Where the weekly entries come from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DataSource {
    /// Generated demo weeks
    Sample {
        /// Number of weeks to generate
        weeks: usize,
        /// Fixed seed for reproducible numbers
        #[serde(default, skip_serializing_if = "Option::is_none")]
        seed: Option<u64>,
    },
    /// Versioned JSON data file
    File {
        path: PathBuf,
    },
}

impl Default for DataSource {
    fn default() -> Self {
        DataSource::Sample {
            weeks: 12,
            seed: None,
        }
    }
}

/// Viewer configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Delimiter inside stored dates, shown as a space
    pub date_delimiter: char,
    /// UI refresh interval, humantime syntax (`250ms`, `1s`)
    pub tick_rate: String,
    /// Attempts made by the initial load before showing an error
    pub load_retries: usize,
    /// Log file location; defaults to the data directory
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
    /// Data provider selection
    pub data_source: DataSource,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            date_delimiter: DEFAULT_DATE_DELIMITER,
            tick_rate: "250ms".to_string(),
            load_retries: 3,
            log_file: None,
            data_source: DataSource::default(),
        }
    }
}

impl AppConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Read weeks from a JSON data file
    pub fn with_data_file(mut self, path: PathBuf) -> Self {
        self.data_source = DataSource::File { path };
        self
    }

    /// Generate demo weeks
    pub fn with_sample(mut self, weeks: usize, seed: Option<u64>) -> Self {
        self.data_source = DataSource::Sample { weeks, seed };
        self
    }

    /// Set the date delimiter
    pub fn with_date_delimiter(mut self, delimiter: char) -> Self {
        self.date_delimiter = delimiter;
        self
    }

    /// Parsed UI refresh interval
    pub fn tick_rate(&self) -> Result<Duration> {
        humantime::parse_duration(&self.tick_rate).map_err(|e| {
            ScreenTimeError::ConfigError(format!("Invalid tick rate '{}': {}", self.tick_rate, e))
        })
    }

    /// Retry policy for the initial load
    pub fn retry_config(&self) -> RetryConfig {
        RetryConfig::with_attempts(self.load_retries)
    }

    /// Build the configured data provider
    pub fn provider(&self) -> Arc<dyn DataProvider> {
        match &self.data_source {
            DataSource::Sample { weeks, seed } => Arc::new(SampleProvider::new(*weeks, *seed)),
            DataSource::File { path } => Arc::new(JsonFileProvider::new(path.clone())),
        }
    }

    /// Validate the configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.date_delimiter.is_whitespace() {
            return Err(ScreenTimeError::ConfigError(
                "Date delimiter must not be whitespace".to_string(),
            ));
        }

        let tick_rate = self.tick_rate()?;
        if tick_rate < MIN_TICK_RATE || tick_rate > MAX_TICK_RATE {
            return Err(ScreenTimeError::ConfigError(format!(
                "Tick rate must be between {} and {}",
                humantime::format_duration(MIN_TICK_RATE),
                humantime::format_duration(MAX_TICK_RATE)
            )));
        }

        if self.load_retries == 0 || self.load_retries > MAX_LOAD_RETRIES {
            return Err(ScreenTimeError::ConfigError(format!(
                "Load retries must be between 1 and {}",
                MAX_LOAD_RETRIES
            )));
        }

        match &self.data_source {
            DataSource::Sample { weeks, .. } if *weeks > MAX_SAMPLE_WEEKS => {
                return Err(ScreenTimeError::ConfigError(format!(
                    "Too many sample weeks: {} (max: {})",
                    weeks, MAX_SAMPLE_WEEKS
                )));
            }
            DataSource::File { path } if path.as_os_str().is_empty() => {
                return Err(ScreenTimeError::ConfigError(
                    "Data file path must not be empty".to_string(),
                ));
            }
            _ => {}
        }

        Ok(())
    }

    /// Load configuration from the standard config file location
    /// Returns default configuration if file doesn't exist
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Load configuration from `path`, defaults when absent
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| {
            ScreenTimeError::ConfigError(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| {
            ScreenTimeError::ConfigError(format!(
                "Failed to parse config file {}: {}",
                path.display(),
                e
            ))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to the standard config file location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    /// Save configuration to `path`
    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                ScreenTimeError::ConfigError(format!(
                    "Failed to create config directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let content = toml::to_string_pretty(self)?;

        fs::write(path, content).map_err(|e| {
            ScreenTimeError::ConfigError(format!(
                "Failed to write config file {}: {}",
                path.display(),
                e
            ))
        })?;

        Ok(())
    }

    /// Get the standard configuration file path
    /// Uses $CONFIG_HOME/screentime/screentime.toml
    pub fn config_file_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            ScreenTimeError::ConfigError("Unable to determine config directory".to_string())
        })?;

        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Log file location, falling back to $DATA_HOME/screentime/screentime.log
    pub fn log_file_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.log_file {
            return Ok(path.clone());
        }

        let data_dir = dirs::data_dir().ok_or_else(|| {
            ScreenTimeError::ConfigError("Unable to determine data directory".to_string())
        })?;

        Ok(data_dir.join(APP_NAME).join(LOG_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.tick_rate().unwrap(), Duration::from_millis(250));
        assert_eq!(config.retry_config().max_attempts, 3);
    }

    #[test]
    fn test_toml_round_trip_with_file_source() {
        let config = AppConfig::default()
            .with_data_file(PathBuf::from("/tmp/weeks.json"))
            .with_date_delimiter('/');
        let toml_str = toml::to_string(&config).expect("Failed to serialize to TOML");
        assert!(toml_str.contains("kind = \"file\""));

        let deserialized: AppConfig =
            toml::from_str(&toml_str).expect("Failed to deserialize from TOML");
        assert_eq!(deserialized, config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: AppConfig = toml::from_str("tick_rate = \"1s\"").unwrap();
        assert_eq!(config.tick_rate().unwrap(), Duration::from_secs(1));
        assert_eq!(config.date_delimiter, '-');
        assert_eq!(config.data_source, DataSource::default());
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = AppConfig::default();
        config.tick_rate = "soon".to_string();
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.tick_rate = "1ms".to_string();
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.load_retries = 0;
        assert!(config.validate().is_err());

        assert!(AppConfig::default().with_date_delimiter(' ').validate().is_err());
        assert!(AppConfig::default().with_sample(10_000, None).validate().is_err());
        assert!(AppConfig::default()
            .with_data_file(PathBuf::new())
            .validate()
            .is_err());
    }

    #[test]
    fn test_save_and_load_from_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join(CONFIG_FILE);

        let config = AppConfig::default().with_sample(4, Some(9));
        config.save_to(&path).unwrap();
        assert_eq!(AppConfig::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_missing_file_loads_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = AppConfig::load_from(&temp_dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_config_file_path() {
        let path = AppConfig::config_file_path().unwrap();
        assert!(path.to_string_lossy().contains("screentime"));
        assert!(path.to_string_lossy().ends_with(CONFIG_FILE));
    }
}
