//! Data models module
//!
//! Weekly screen-time records and their per-device breakdown.

pub mod entry;

// Re-export commonly used types
pub use entry::{display_date, DeviceUsage, WeekEntry, DEFAULT_DATE_DELIMITER};
