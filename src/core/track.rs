//! One CLI invocation's worth of tracking: open the store, drive a
//! tracker through a single action, record it in the audit log.

use crate::errors::{AppError, AppResult};
use crate::models::night::SleepNight;
use crate::store::SleepStore;
use crate::tracker::{SleepTracker, SystemClock};
use std::sync::Arc;
use tracing::warn;

pub struct TrackSession {
    store: SleepStore,
    tracker: SleepTracker,
}

impl TrackSession {
    pub async fn open(db_path: &str) -> AppResult<Self> {
        let store = SleepStore::open(db_path).await?;
        let tracker = SleepTracker::new(store.clone(), Arc::new(SystemClock)).await?;
        // Make sure tonight's session is loaded before anything is shown.
        tracker.refresh().wait().await?;
        Ok(Self { store, tracker })
    }

    pub fn tracker(&self) -> &SleepTracker {
        &self.tracker
    }

    pub fn store(&self) -> &SleepStore {
        &self.store
    }

    async fn audit(&self, operation: &str, target: &str, message: &str) {
        if let Err(e) = self.store.audit(operation, target, message).await {
            warn!(operation, error = %e, "failed to write internal log");
        }
    }

    /// `None` when a night is already open.
    pub async fn start(&self) -> AppResult<Option<SleepNight>> {
        let started = self.tracker.start().wait().await?;
        if let Some(n) = &started {
            self.audit("start", &n.id.to_string(), "Night started").await;
        }
        Ok(started)
    }

    /// Id of the stopped night, `None` when nothing was open.
    pub async fn stop(&self) -> AppResult<Option<i64>> {
        let stopped = self.tracker.stop().wait().await?;
        if let Some(id) = stopped {
            self.audit("stop", &id.to_string(), "Night stopped").await;
        }
        Ok(stopped)
    }

    /// Rate `id`, or the most recent night when no id is given.
    /// Returns the rated id and whether it existed.
    pub async fn rate(&self, id: Option<i64>, quality: i32) -> AppResult<(i64, bool)> {
        let id = match id {
            Some(id) => id,
            None => {
                self.store
                    .get_tonight()
                    .await?
                    .ok_or(AppError::NoNights)?
                    .id
            }
        };

        let found = self.tracker.rate(id, quality).wait().await?;
        if found {
            self.audit("rate", &id.to_string(), &format!("Quality set to {}", quality))
                .await;
        }
        Ok((id, found))
    }

    pub async fn clear(&self) -> AppResult<usize> {
        let deleted = self.tracker.clear().wait().await?;
        self.audit("clear", "", &format!("Deleted {} nights", deleted))
            .await;
        Ok(deleted)
    }

    pub async fn close(self) {
        self.tracker.shutdown().await;
    }
}
