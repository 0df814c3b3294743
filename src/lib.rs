//! screentime - weekly screen-time viewer
//!
//! A terminal application that shows weekly device screen-time statistics:
//! the selected week's date range, a per-device breakdown and a searchable
//! table of all loaded weeks.

use std::fmt;

pub mod app;
pub mod config;
pub mod data;
pub mod filter;
pub mod logging;
pub mod models;
pub mod util;

// Common error types
#[derive(Debug)]
pub enum ScreenTimeError {
    /// I/O operation failed
    IoError(std::io::Error),
    /// Configuration validation or parsing error
    ConfigError(String),
    /// Data file could not be decoded or has an unsupported layout
    DataFormatError(String),
    /// Data provider failed to produce the weekly entries
    LoadError(String),
    /// TUI rendering or interaction error
    TuiError(String),
    /// Logging could not be initialised
    LoggingError(String),
}

impl fmt::Display for ScreenTimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScreenTimeError::IoError(err) => write!(f, "I/O error: {}", err),
            ScreenTimeError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            ScreenTimeError::DataFormatError(msg) => write!(f, "Data format error: {}", msg),
            ScreenTimeError::LoadError(msg) => write!(f, "Load error: {}", msg),
            ScreenTimeError::TuiError(msg) => write!(f, "TUI error: {}", msg),
            ScreenTimeError::LoggingError(msg) => write!(f, "Logging error: {}", msg),
        }
    }
}

impl std::error::Error for ScreenTimeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScreenTimeError::IoError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ScreenTimeError {
    fn from(err: std::io::Error) -> Self {
        ScreenTimeError::IoError(err)
    }
}

impl From<serde_json::Error> for ScreenTimeError {
    fn from(err: serde_json::Error) -> Self {
        ScreenTimeError::DataFormatError(format!("JSON error: {}", err))
    }
}

impl From<toml::de::Error> for ScreenTimeError {
    fn from(err: toml::de::Error) -> Self {
        ScreenTimeError::ConfigError(format!("TOML parsing error: {}", err))
    }
}

impl From<toml::ser::Error> for ScreenTimeError {
    fn from(err: toml::ser::Error) -> Self {
        ScreenTimeError::ConfigError(format!("TOML serialization error: {}", err))
    }
}

/// Result type alias for screentime operations
pub type Result<T> = std::result::Result<T, ScreenTimeError>;

/// Error handling utilities
pub mod error {
    use super::{Result, ScreenTimeError};
    use std::time::Duration;
    use tokio::time::sleep;
    use tracing::warn;

    /// Retry configuration for transient operations
    #[derive(Debug, Clone)]
    pub struct RetryConfig {
        /// Maximum number of attempts (including the first one)
        pub max_attempts: usize,
        /// Initial delay between retries
        pub initial_delay: Duration,
        /// Multiplier for exponential backoff
        pub backoff_multiplier: f64,
        /// Maximum delay between retries
        pub max_delay: Duration,
    }

    impl Default for RetryConfig {
        fn default() -> Self {
            Self {
                max_attempts: 3,
                initial_delay: Duration::from_millis(100),
                backoff_multiplier: 2.0,
                max_delay: Duration::from_secs(5),
            }
        }
    }

    impl RetryConfig {
        /// Default backoff with a custom attempt count
        pub fn with_attempts(max_attempts: usize) -> Self {
            Self {
                max_attempts: max_attempts.max(1),
                ..Self::default()
            }
        }
    }

    /// Retry a fallible async operation with exponential backoff
    pub async fn retry_async<F, Fut, T>(operation: F, config: RetryConfig) -> Result<T>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = Result<T>>,
    {
        let mut delay = config.initial_delay;
        let mut last_error = None;

        for attempt in 0..config.max_attempts {
            match operation().await {
                Ok(result) => return Ok(result),
                Err(err) => {
                    let retryable = is_retryable_error(&err);
                    warn!(attempt = attempt + 1, retryable, "operation failed: {}", err);
                    last_error = Some(err);

                    if !retryable {
                        break;
                    }

                    // Don't sleep after the last attempt
                    if attempt < config.max_attempts - 1 {
                        sleep(delay).await;
                        delay = std::cmp::min(
                            Duration::from_millis(
                                (delay.as_millis() as f64 * config.backoff_multiplier) as u64,
                            ),
                            config.max_delay,
                        );
                    }
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            ScreenTimeError::LoadError("Retry failed with no error".to_string())
        }))
    }

    /// Check if an error is retryable
    pub fn is_retryable_error(error: &ScreenTimeError) -> bool {
        match error {
            ScreenTimeError::IoError(io_err) => !matches!(
                io_err.kind(),
                std::io::ErrorKind::PermissionDenied | std::io::ErrorKind::InvalidInput
            ),
            ScreenTimeError::LoadError(_) => true,

            // A malformed file or config will not fix itself
            ScreenTimeError::ConfigError(_) => false,
            ScreenTimeError::DataFormatError(_) => false,
            ScreenTimeError::TuiError(_) => false,
            ScreenTimeError::LoggingError(_) => false,
        }
    }

    /// Convert error to user-friendly message with suggestions
    pub fn user_friendly_message(error: &ScreenTimeError) -> String {
        match error {
            ScreenTimeError::IoError(io_err)
                if io_err.kind() == std::io::ErrorKind::NotFound =>
            {
                "Data file not found. Check the data source path in your config.".to_string()
            }
            ScreenTimeError::IoError(io_err)
                if io_err.kind() == std::io::ErrorKind::PermissionDenied =>
            {
                "Permission denied while reading screen-time data.".to_string()
            }
            ScreenTimeError::DataFormatError(msg) => {
                format!("Screen-time data is malformed: {}", msg)
            }
            ScreenTimeError::ConfigError(msg) => {
                format!("Configuration error: {}. Check your settings.", msg)
            }
            ScreenTimeError::LoadError(msg) => format!("Could not load screen-time data: {}", msg),
            _ => error.to_string(),
        }
    }
}

// Common types and constants
pub const APP_NAME: &str = "screentime";
pub const CONFIG_FILE: &str = "screentime.toml";
pub const LOG_FILE: &str = "screentime.log";
pub const DATA_FILE_VERSION: u32 = 1;
