//! The tracker's single background task.
//!
//! Commands arrive over an unbounded FIFO channel and are executed one at
//! a time, so store operations complete in the order they were issued.
//! Both the wait for the next command and the command itself race the
//! cancellation token; a cancelled command drops its reply sender and
//! leaves the state untouched.

use super::clock::Clock;
use super::state::TrackerState;
use crate::errors::{AppError, AppResult};
use crate::models::night::SleepNight;
use crate::models::quality::SleepQuality;
use crate::store::SleepStore;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot, watch};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

pub(crate) type Reply<T> = oneshot::Sender<AppResult<T>>;

pub(crate) enum Command {
    Refresh(Reply<Option<SleepNight>>),
    Start(Reply<Option<SleepNight>>),
    Stop(Reply<Option<i64>>),
    Rate {
        id: i64,
        quality: i32,
        reply: Reply<bool>,
    },
    Clear(Reply<usize>),
}

pub(crate) struct Worker {
    store: SleepStore,
    clock: Arc<dyn Clock>,
    state: Arc<watch::Sender<TrackerState>>,
}

impl Worker {
    pub(crate) fn new(
        store: SleepStore,
        clock: Arc<dyn Clock>,
        state: Arc<watch::Sender<TrackerState>>,
    ) -> Self {
        Self {
            store,
            clock,
            state,
        }
    }

    pub(crate) async fn run(
        self,
        mut commands: mpsc::UnboundedReceiver<Command>,
        cancel: CancellationToken,
    ) {
        loop {
            let cmd = tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                cmd = commands.recv() => match cmd {
                    Some(cmd) => cmd,
                    None => break,
                },
            };

            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    debug!("tracker cancelled with a command in flight");
                    break;
                }
                _ = self.dispatch(cmd) => {}
            }
        }
        debug!("tracker worker stopped");
    }

    async fn dispatch(&self, cmd: Command) {
        // A dropped ticket is fine: the caller chose not to wait.
        match cmd {
            Command::Refresh(reply) => {
                let _ = reply.send(self.refresh().await);
            }
            Command::Start(reply) => {
                let _ = reply.send(self.start().await);
            }
            Command::Stop(reply) => {
                let _ = reply.send(self.stop().await);
            }
            Command::Rate { id, quality, reply } => {
                let _ = reply.send(self.rate(id, quality).await);
            }
            Command::Clear(reply) => {
                let _ = reply.send(self.clear().await);
            }
        }
    }

    /// Most recent night if it is still open.
    async fn load_tonight(&self) -> AppResult<Option<SleepNight>> {
        Ok(self.store.get_tonight().await?.filter(SleepNight::is_open))
    }

    async fn refresh(&self) -> AppResult<Option<SleepNight>> {
        let tonight = self.load_tonight().await?;
        self.state.send_if_modified(|s| {
            if s.tonight == tonight {
                return false;
            }
            s.tonight = tonight.clone();
            true
        });
        Ok(tonight)
    }

    async fn start(&self) -> AppResult<Option<SleepNight>> {
        let open_id = self.state.borrow().tonight.as_ref().map(|n| n.id);
        if let Some(id) = open_id {
            warn!(id, "start ignored: a night is already open");
            return Ok(None);
        }

        let night = SleepNight::begin(self.clock.now_millis());
        self.store.insert(night).await?;

        let tonight = self.load_tonight().await?;
        if let Some(n) = &tonight {
            info!(id = n.id, start = n.start_time, "night started");
        }
        self.state.send_modify(|s| s.tonight = tonight.clone());
        Ok(tonight)
    }

    async fn stop(&self) -> AppResult<Option<i64>> {
        let tonight = self.state.borrow().tonight.clone();
        let Some(mut night) = tonight else {
            debug!("stop ignored: no open night");
            return Ok(None);
        };

        // A stop time equal to the start time would leave the row open.
        night.stop_time = self
            .clock
            .now_millis()
            .max(night.start_time.saturating_add(1));
        let id = night.id;

        if !self.store.update(night).await? {
            // Removed behind our back; nothing left to stop.
            warn!(id, "open night vanished before it could be stopped");
            self.state.send_modify(|s| s.tonight = None);
            return Ok(None);
        }

        info!(id, "night stopped");
        self.state.send_modify(|s| {
            s.tonight = None;
            s.pending_rating = Some(id);
        });
        Ok(Some(id))
    }

    async fn rate(&self, id: i64, quality: i32) -> AppResult<bool> {
        // Negative values would collide with the unrated sentinel.
        if quality < SleepQuality::MIN {
            return Err(AppError::InvalidQuality(quality));
        }

        let Some(mut night) = self.store.get(id).await? else {
            debug!(id, "rate ignored: no such night");
            return Ok(false);
        };

        night.quality = quality;
        let found = self.store.update(night).await?;

        if found {
            info!(id, quality, "night rated");
            self.state.send_if_modified(|s| {
                if s.pending_rating != Some(id) {
                    return false;
                }
                s.pending_rating = None;
                true
            });
        }
        Ok(found)
    }

    async fn clear(&self) -> AppResult<usize> {
        let deleted = self.store.clear().await?;
        self.state.send_modify(|s| {
            s.tonight = None;
            s.pending_rating = None;
            s.cleared_notice = true;
        });
        Ok(deleted)
    }
}
