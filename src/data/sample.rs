//! Generated demo weeks
//!
//! Produces consecutive Monday-Sunday weeks ending with the week that
//! contains the anchor date (today by default). Without a seed every fetch
//! draws fresh numbers.

use super::DataProvider;
use crate::models::{DeviceUsage, WeekEntry};
use crate::Result;
use chrono::{Datelike, Duration, Local, NaiveDate};
use rand::{rngs::SmallRng, Rng, SeedableRng};

/// Date layout of generated entries, e.g. `01-Jan-2024`
pub const SAMPLE_DATE_FORMAT: &str = "%d-%b-%Y";

const DEVICES: [(&str, f64); 3] = [("Phone", 30.0), ("Tablet", 12.0), ("Laptop", 25.0)];

#[derive(Debug, Clone)]
pub struct SampleProvider {
    weeks: usize,
    seed: Option<u64>,
    anchor: Option<NaiveDate>,
}

impl SampleProvider {
    pub fn new(weeks: usize, seed: Option<u64>) -> Self {
        Self {
            weeks,
            seed,
            anchor: None,
        }
    }

    /// Pin the last generated week to the one containing `date`
    pub fn with_anchor(mut self, date: NaiveDate) -> Self {
        self.anchor = Some(date);
        self
    }

    fn rng(&self) -> SmallRng {
        match self.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        }
    }
}

fn round_tenths(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

impl DataProvider for SampleProvider {
    fn name(&self) -> &str {
        "sample"
    }

    fn fetch(&self) -> Result<Vec<WeekEntry>> {
        let anchor = self.anchor.unwrap_or_else(|| Local::now().date_naive());
        let last_monday =
            anchor - Duration::days(i64::from(anchor.weekday().num_days_from_monday()));
        let mut rng = self.rng();

        let entries = (0..self.weeks)
            .rev()
            .map(|weeks_back| {
                let start = last_monday - Duration::weeks(weeks_back as i64);
                let end = start + Duration::days(6);
                let devices: Vec<DeviceUsage> = DEVICES
                    .iter()
                    .map(|(name, max)| DeviceUsage::new(*name, round_tenths(rng.gen_range(0.0..*max))))
                    .collect();
                let total = round_tenths(devices.iter().map(|d| d.hours).sum());

                WeekEntry {
                    start_date: start.format(SAMPLE_DATE_FORMAT).to_string(),
                    end_date: end.format(SAMPLE_DATE_FORMAT).to_string(),
                    total_hours: Some(total),
                    devices,
                }
            })
            .collect();

        Ok(entries)
    }
}
