//! Session controller.
//!
//! `SleepTracker` turns the three user intents (start, stop, clear) and
//! the rating step into store operations. Each action is queued to a
//! background worker and returns a [`Ticket`] immediately; the observable
//! [`TrackerState`] changes once the store call has completed.
//!
//! The controller owns one cancellation token. Dropping the tracker (or
//! calling [`SleepTracker::shutdown`]) cancels it, abandoning whatever the
//! worker was doing and every queued command.

pub mod clock;
pub mod state;
mod worker;

pub use clock::{Clock, ManualClock, SystemClock};
pub use state::{ControlFlags, TrackerState};

use crate::errors::{AppError, AppResult};
use crate::models::night::SleepNight;
use crate::store::{HistorySubscription, SleepStore};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use worker::{Command, Reply, Worker};

/// Outcome of a queued tracker action.
///
/// Waiting is optional; the action runs either way.
pub struct Ticket<T> {
    rx: oneshot::Receiver<AppResult<T>>,
}

impl<T> Ticket<T> {
    /// Resolves once the worker has run the action, or to
    /// `AppError::Cancelled` if the tracker was torn down first.
    pub async fn wait(self) -> AppResult<T> {
        self.rx.await.unwrap_or_else(|_| Err(AppError::Cancelled))
    }
}

pub struct SleepTracker {
    commands: mpsc::UnboundedSender<Command>,
    state: Arc<watch::Sender<TrackerState>>,
    history: HistorySubscription,
    cancel: CancellationToken,
    worker: Option<JoinHandle<()>>,
}

impl SleepTracker {
    /// Build a tracker over `store` and load tonight's session in the
    /// background. Must be called from within a Tokio runtime.
    pub async fn new(store: SleepStore, clock: Arc<dyn Clock>) -> AppResult<Self> {
        let history = store.subscribe_all_nights().await?;

        let (state_tx, _) = watch::channel(TrackerState::default());
        let state = Arc::new(state_tx);

        let (commands, rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();

        let worker = Worker::new(store, clock, Arc::clone(&state));
        let handle = tokio::spawn(worker.run(rx, cancel.child_token()));

        let tracker = Self {
            commands,
            state,
            history,
            cancel,
            worker: Some(handle),
        };

        // First command in the queue, so every later action sees it.
        let _ = tracker.refresh();

        Ok(tracker)
    }

    fn submit<T>(&self, make: impl FnOnce(Reply<T>) -> Command) -> Ticket<T> {
        let (tx, rx) = oneshot::channel();
        if self.commands.send(make(tx)).is_err() {
            debug!("tracker worker is gone, command dropped");
        }
        Ticket { rx }
    }

    /// Start a new night. No-op (resolves to `None`) while one is open.
    pub fn start(&self) -> Ticket<Option<SleepNight>> {
        self.submit(Command::Start)
    }

    /// Stop the open night and mark it as waiting for a rating.
    /// Resolves to the stopped id, or `None` when nothing was open.
    pub fn stop(&self) -> Ticket<Option<i64>> {
        self.submit(Command::Stop)
    }

    /// Set the quality of any night. Resolves to false when `id` is unknown.
    pub fn rate(&self, id: i64, quality: i32) -> Ticket<bool> {
        self.submit(|reply| Command::Rate { id, quality, reply })
    }

    /// Delete the whole history. Resolves to the number of deleted nights.
    pub fn clear(&self) -> Ticket<usize> {
        self.submit(Command::Clear)
    }

    /// Re-read tonight's session from the store.
    pub fn refresh(&self) -> Ticket<Option<SleepNight>> {
        self.submit(Command::Refresh)
    }

    pub fn state(&self) -> TrackerState {
        self.state.borrow().clone()
    }

    pub fn tonight(&self) -> Option<SleepNight> {
        self.state.borrow().tonight.clone()
    }

    pub fn subscribe_state(&self) -> watch::Receiver<TrackerState> {
        self.state.subscribe()
    }

    /// Latest history seen by this tracker, newest first.
    pub fn history(&self) -> Vec<SleepNight> {
        self.history.current()
    }

    /// Wait for the next history republish.
    pub async fn history_changed(&mut self) -> Option<Vec<SleepNight>> {
        self.history.changed().await
    }

    pub fn flags(&self) -> ControlFlags {
        let state = self.state.borrow();
        self.history
            .with_current(|history| ControlFlags::derive(state.tonight.as_ref(), history))
    }

    /// Consume the "night waiting for a rating" signal.
    pub fn take_pending_rating(&self) -> Option<i64> {
        let mut taken = None;
        self.state.send_if_modified(|s| {
            taken = s.pending_rating.take();
            taken.is_some()
        });
        taken
    }

    /// Acknowledge the "history cleared" notice.
    pub fn done_showing_cleared(&self) {
        self.state
            .send_if_modified(|s| std::mem::replace(&mut s.cleared_notice, false));
    }

    /// Cancel in-flight work and wait for the worker to exit.
    pub async fn shutdown(mut self) {
        self.cancel_once();
        if let Some(handle) = self.worker.take() {
            let _ = handle.await;
        }
    }

    fn cancel_once(&self) {
        if !self.cancel.is_cancelled() {
            debug!("cancelling tracker");
            self.cancel.cancel();
        }
    }
}

impl Drop for SleepTracker {
    fn drop(&mut self) {
        self.cancel_once();
    }
}
