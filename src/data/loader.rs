//! Background load of the entry list
//!
//! The UI loop polls [`Loader::poll`] once per tick. Dropping the loader
//! aborts the task and closes the channel, so a result that lands after the
//! screen is gone is never applied.

use super::{load_entries, DataProvider};
use crate::error::RetryConfig;
use crate::models::WeekEntry;
use crate::{Result, ScreenTimeError};
use std::sync::Arc;
use tokio::sync::oneshot::{self, error::TryRecvError};
use tokio::task::JoinHandle;
use tracing::debug;

#[derive(Debug)]
pub struct Loader {
    rx: oneshot::Receiver<Result<Vec<WeekEntry>>>,
    handle: JoinHandle<()>,
    finished: bool,
}

impl Loader {
    /// Start loading on the current tokio runtime
    pub fn spawn(provider: Arc<dyn DataProvider>, retry: RetryConfig) -> Self {
        let (tx, rx) = oneshot::channel();
        let handle = tokio::spawn(async move {
            let result = load_entries(provider, retry).await;
            if tx.send(result).is_err() {
                debug!("entry list arrived after the screen was closed; discarded");
            }
        });

        Self {
            rx,
            handle,
            finished: false,
        }
    }

    /// Take the result if it has arrived
    pub fn poll(&mut self) -> Option<Result<Vec<WeekEntry>>> {
        if self.finished {
            return None;
        }
        match self.rx.try_recv() {
            Ok(result) => {
                self.finished = true;
                Some(result)
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Closed) => {
                self.finished = true;
                Some(Err(ScreenTimeError::LoadError(
                    "load task ended without a result".to_string(),
                )))
            }
        }
    }
}

impl Drop for Loader {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::StaticProvider;
    use std::time::Duration;

    async fn poll_until_done(loader: &mut Loader) -> Result<Vec<WeekEntry>> {
        for _ in 0..100 {
            if let Some(result) = loader.poll() {
                return result;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("load did not finish");
    }

    #[tokio::test]
    async fn test_poll_delivers_once() {
        let entries = vec![WeekEntry::new("2024-01-01", "2024-01-07", 4.0)];
        let mut loader = Loader::spawn(
            Arc::new(StaticProvider::new(entries.clone())),
            RetryConfig::with_attempts(1),
        );

        assert_eq!(poll_until_done(&mut loader).await.unwrap(), entries);
        assert!(loader.poll().is_none());
    }

    #[tokio::test]
    async fn test_aborted_task_reports_load_error() {
        let mut loader = Loader::spawn(
            Arc::new(StaticProvider::new(Vec::new())),
            RetryConfig::with_attempts(1),
        );
        loader.handle.abort();

        // Either the result raced in first or the channel closed empty
        match poll_until_done(&mut loader).await {
            Ok(entries) => assert!(entries.is_empty()),
            Err(err) => assert!(matches!(err, ScreenTimeError::LoadError(_))),
        }
    }
}
