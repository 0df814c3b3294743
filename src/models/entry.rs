//! Weekly screen-time records
//!
//! A `WeekEntry` is one week's aggregate usage together with the
//! per-device breakdown handed to the stats panel.

use serde::{Deserialize, Deserializer, Serialize};

/// Delimiter used inside stored date strings
pub const DEFAULT_DATE_DELIMITER: char = '-';

/// Screen time of a single device within one week
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceUsage {
    /// Device label as supplied by the data source
    pub name: String,
    /// Hours of screen time on this device
    pub hours: f64,
}

impl DeviceUsage {
    pub fn new(name: impl Into<String>, hours: f64) -> Self {
        Self {
            name: name.into(),
            hours,
        }
    }
}

/// One week's aggregate screen time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekEntry {
    /// First day of the week, delimiter-separated
    pub start_date: String,
    /// Last day of the week, delimiter-separated
    pub end_date: String,
    /// Total hours for the week; `None` when the source omitted it or sent
    /// something other than a number
    #[serde(default, deserialize_with = "lenient_hours")]
    pub total_hours: Option<f64>,
    /// Per-device breakdown, in source order
    #[serde(default)]
    pub devices: Vec<DeviceUsage>,
}

/// Accept any value for the hours field, keeping only numbers
fn lenient_hours<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_f64())
}

impl WeekEntry {
    /// Create an entry with no device breakdown
    pub fn new(start_date: impl Into<String>, end_date: impl Into<String>, total_hours: f64) -> Self {
        Self {
            start_date: start_date.into(),
            end_date: end_date.into(),
            total_hours: Some(total_hours),
            devices: Vec::new(),
        }
    }

    /// Attach a device breakdown
    pub fn with_devices(mut self, devices: Vec<DeviceUsage>) -> Self {
        self.devices = devices;
        self
    }

    /// Decimal text of `total_hours`, the form the search box matches against.
    ///
    /// Returns `None` for missing or non-finite values so they never match.
    ///
    /// # Examples
    /// ```
    /// use screentime::models::WeekEntry;
    ///
    /// assert_eq!(WeekEntry::new("a", "b", 15.0).hours_text().as_deref(), Some("15"));
    /// assert_eq!(WeekEntry::new("a", "b", 7.5).hours_text().as_deref(), Some("7.5"));
    /// assert_eq!(WeekEntry::new("a", "b", f64::NAN).hours_text(), None);
    /// ```
    pub fn hours_text(&self) -> Option<String> {
        let hours = self.total_hours?;
        if !hours.is_finite() {
            return None;
        }
        // -0.0 prints as "-0"
        if hours == 0.0 {
            return Some("0".to_string());
        }
        Some(hours.to_string())
    }

    /// Header text for this week, e.g. `2024 01 01 - 2024 01 07`
    pub fn date_range(&self, delimiter: char) -> String {
        format!(
            "{} - {}",
            display_date(&self.start_date, delimiter),
            display_date(&self.end_date, delimiter)
        )
    }
}

/// Replace every occurrence of `delimiter` with a single space
pub fn display_date(date: &str, delimiter: char) -> String {
    date.replace(delimiter, " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_date_replaces_every_delimiter() {
        assert_eq!(display_date("2024-01-01", '-'), "2024 01 01");
        assert_eq!(display_date("01-Jan-2024", '-'), "01 Jan 2024");
        assert_eq!(display_date("2024/01/01", '/'), "2024 01 01");
        assert_eq!(display_date("no delimiter", '-'), "no delimiter");
        assert_eq!(display_date("", '-'), "");
    }

    #[test]
    fn test_date_range_leaves_entry_untouched() {
        let entry = WeekEntry::new("2024-01-08", "2024-01-14", 5.0);
        assert_eq!(entry.date_range('-'), "2024 01 08 - 2024 01 14");
        assert_eq!(entry.start_date, "2024-01-08");
        assert_eq!(entry.end_date, "2024-01-14");
    }

    #[test]
    fn test_hours_text_edge_cases() {
        let mut entry = WeekEntry::new("a", "b", 25.0);
        assert_eq!(entry.hours_text().as_deref(), Some("25"));

        entry.total_hours = Some(-0.0);
        assert_eq!(entry.hours_text().as_deref(), Some("0"));

        entry.total_hours = Some(f64::INFINITY);
        assert_eq!(entry.hours_text(), None);

        entry.total_hours = None;
        assert_eq!(entry.hours_text(), None);
    }

    #[test]
    fn test_deserialize_camel_case() {
        let json = r#"{
            "startDate": "2024-01-01",
            "endDate": "2024-01-07",
            "totalHours": 15,
            "devices": [{ "name": "Phone", "hours": 10.5 }]
        }"#;
        let entry: WeekEntry = serde_json::from_str(json).expect("valid entry");
        assert_eq!(entry.start_date, "2024-01-01");
        assert_eq!(entry.total_hours, Some(15.0));
        assert_eq!(entry.devices, vec![DeviceUsage::new("Phone", 10.5)]);
    }

    #[test]
    fn test_deserialize_missing_hours() {
        let json = r#"{ "startDate": "2024-01-01", "endDate": "2024-01-07", "totalHours": null }"#;
        let entry: WeekEntry = serde_json::from_str(json).expect("null hours accepted");
        assert_eq!(entry.total_hours, None);
        assert!(entry.devices.is_empty());
    }

    #[test]
    fn test_non_numeric_hours_become_missing() {
        let json = r#"[
            { "startDate": "2024-01-01", "endDate": "2024-01-07", "totalHours": "15" },
            { "startDate": "2024-01-08", "endDate": "2024-01-14", "totalHours": [1] },
            { "startDate": "2024-01-15", "endDate": "2024-01-21", "totalHours": 7.5 }
        ]"#;
        let entries: Vec<WeekEntry> = serde_json::from_str(json).expect("lenient hours");
        assert_eq!(entries[0].total_hours, None);
        assert_eq!(entries[0].hours_text(), None);
        assert_eq!(entries[1].total_hours, None);
        assert_eq!(entries[2].total_hours, Some(7.5));
    }
}
