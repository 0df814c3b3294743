//! Weekly data sources
//!
//! The entries screen never reaches for a global data pool. A
//! `DataProvider` is injected at construction and fetched once through
//! [`load_entries`], which runs the blocking fetch off the UI task and
//! retries transient failures.

use crate::error::{retry_async, RetryConfig};
use crate::models::WeekEntry;
use crate::{Result, ScreenTimeError};
use std::sync::Arc;
use tracing::{debug, info};

pub mod file;
pub mod loader;
pub mod sample;

pub use file::JsonFileProvider;
pub use loader::Loader;
pub use sample::SampleProvider;

/// Source of the full, chronologically ordered list of weeks
pub trait DataProvider: Send + Sync {
    /// Short label used in logs
    fn name(&self) -> &str;

    /// Produce every available week, oldest first
    fn fetch(&self) -> Result<Vec<WeekEntry>>;
}

/// Provider over an in-memory list
#[derive(Debug, Clone, Default)]
pub struct StaticProvider {
    entries: Vec<WeekEntry>,
}

impl StaticProvider {
    pub fn new(entries: Vec<WeekEntry>) -> Self {
        Self { entries }
    }
}

impl DataProvider for StaticProvider {
    fn name(&self) -> &str {
        "static"
    }

    fn fetch(&self) -> Result<Vec<WeekEntry>> {
        Ok(self.entries.clone())
    }
}

/// Fetch the full entry list without blocking the caller's task
pub async fn load_entries(
    provider: Arc<dyn DataProvider>,
    retry: RetryConfig,
) -> Result<Vec<WeekEntry>> {
    info!(provider = provider.name(), "loading weekly entries");

    let entries = retry_async(
        || {
            let provider = Arc::clone(&provider);
            async move {
                tokio::task::spawn_blocking(move || provider.fetch())
                    .await
                    .map_err(|e| ScreenTimeError::LoadError(format!("fetch task failed: {}", e)))?
            }
        },
        retry,
    )
    .await?;

    debug!(count = entries.len(), "weekly entries loaded");
    Ok(entries)
}
