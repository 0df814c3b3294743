//! JSON data file provider
//!
//! Reads a versioned `{ "version": 1, "weeks": [...] }` document.

use super::DataProvider;
use crate::models::WeekEntry;
use crate::{Result, ScreenTimeError, DATA_FILE_VERSION};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Data file structure for JSON persistence
#[derive(Debug, Serialize, Deserialize)]
pub struct DataFile {
    pub version: u32,
    pub weeks: Vec<WeekEntry>,
}

impl DataFile {
    pub fn new(weeks: Vec<WeekEntry>) -> Self {
        Self {
            version: DATA_FILE_VERSION,
            weeks,
        }
    }
}

/// Provider reading weeks from a JSON file on every fetch
#[derive(Debug, Clone)]
pub struct JsonFileProvider {
    path: PathBuf,
}

impl JsonFileProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write `weeks` to `path` in the format this provider reads
    pub fn write(path: &Path, weeks: Vec<WeekEntry>) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&DataFile::new(weeks))?;
        fs::write(path, content)?;
        Ok(())
    }
}

impl DataProvider for JsonFileProvider {
    fn name(&self) -> &str {
        "json-file"
    }

    fn fetch(&self) -> Result<Vec<WeekEntry>> {
        let content = fs::read_to_string(&self.path)?;

        let file: DataFile = serde_json::from_str(&content).map_err(|e| {
            ScreenTimeError::DataFormatError(format!(
                "Failed to parse data file {}: {}",
                self.path.display(),
                e
            ))
        })?;

        if file.version != DATA_FILE_VERSION {
            return Err(ScreenTimeError::DataFormatError(format!(
                "Unsupported data file version {} in {} (expected {})",
                file.version,
                self.path.display(),
                DATA_FILE_VERSION
            )));
        }

        Ok(file.weeks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::is_retryable_error;
    use crate::models::DeviceUsage;
    use tempfile::TempDir;

    #[test]
    fn test_write_then_fetch() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("weeks.json");
        let weeks = vec![
            WeekEntry::new("2024-01-01", "2024-01-07", 15.0)
                .with_devices(vec![DeviceUsage::new("Phone", 15.0)]),
            WeekEntry::new("2024-01-08", "2024-01-14", 5.0),
        ];

        JsonFileProvider::write(&path, weeks.clone()).unwrap();
        let loaded = JsonFileProvider::new(&path).fetch().unwrap();
        assert_eq!(loaded, weeks);
    }

    #[test]
    fn test_file_uses_camel_case_fields() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("weeks.json");
        JsonFileProvider::write(&path, vec![WeekEntry::new("a", "b", 1.0)]).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"startDate\""));
        assert!(content.contains("\"totalHours\""));
        assert!(content.contains("\"version\": 1"));
    }

    #[test]
    fn test_missing_file_is_retryable_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let err = JsonFileProvider::new(temp_dir.path().join("absent.json"))
            .fetch()
            .unwrap_err();
        assert!(matches!(err, ScreenTimeError::IoError(_)));
        assert!(is_retryable_error(&err));
    }

    #[test]
    fn test_malformed_file_is_not_retryable() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("weeks.json");
        fs::write(&path, "{ not json").unwrap();

        let err = JsonFileProvider::new(&path).fetch().unwrap_err();
        assert!(matches!(err, ScreenTimeError::DataFormatError(_)));
        assert!(!is_retryable_error(&err));
    }

    #[test]
    fn test_unknown_version_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("weeks.json");
        fs::write(&path, r#"{ "version": 7, "weeks": [] }"#).unwrap();

        let err = JsonFileProvider::new(&path).fetch().unwrap_err();
        assert!(err.to_string().contains("version 7"));
    }

    #[test]
    fn test_wrongly_typed_hours_do_not_reject_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("weeks.json");
        fs::write(
            &path,
            r#"{ "version": 1, "weeks": [
                { "startDate": "2024-01-01", "endDate": "2024-01-07", "totalHours": "15" },
                { "startDate": "2024-01-08", "endDate": "2024-01-14", "totalHours": 5 }
            ] }"#,
        )
        .unwrap();

        let loaded = JsonFileProvider::new(&path).fetch().unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].total_hours, None);
        assert_eq!(loaded[1].total_hours, Some(5.0));
    }
}
