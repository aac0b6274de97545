use crate::models::night::SleepNight;
use tokio::sync::watch;

/// Live view of the full history, newest first.
///
/// Each successful insert, update or clear on the store replaces the list
/// with a freshly queried one. Dropping the subscription unsubscribes.
pub struct HistorySubscription {
    rx: watch::Receiver<Vec<SleepNight>>,
}

impl HistorySubscription {
    pub(crate) fn new(rx: watch::Receiver<Vec<SleepNight>>) -> Self {
        Self { rx }
    }

    /// Latest published list, without waiting.
    pub fn current(&self) -> Vec<SleepNight> {
        self.rx.borrow().clone()
    }

    /// Inspect the latest list without cloning it.
    pub fn with_current<R>(&self, f: impl FnOnce(&[SleepNight]) -> R) -> R {
        f(&self.rx.borrow())
    }

    /// Wait for the next republish and return it.
    /// `None` once every store handle has been dropped.
    pub async fn changed(&mut self) -> Option<Vec<SleepNight>> {
        self.rx.changed().await.ok()?;
        Some(self.rx.borrow_and_update().clone())
    }
}
