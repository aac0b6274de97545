//! Async record store over the `sleep_nights` table.
//!
//! Every call is dispatched to the blocking pool with `spawn_blocking`, so
//! the caller's task is parked rather than blocked while SQLite works. A
//! single connection behind a mutex gives each insert, update and clear
//! atomic, serialised semantics.
//!
//! History subscribers are fed through a `watch` channel: after a
//! successful mutation, and still under the connection lock, the store
//! re-queries the full list and publishes it. Publishing order therefore
//! matches mutation order. With no subscribers the re-query is skipped.

mod subscription;

pub use subscription::HistorySubscription;

use crate::db::initialize::init_db;
use crate::db::log::write_log;
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::models::night::SleepNight;
use rusqlite::Connection;
use std::sync::{Arc, Mutex};
use tokio::sync::watch;
use tracing::{debug, info};

struct StoreInner {
    pool: Mutex<DbPool>,
    history: watch::Sender<Vec<SleepNight>>,
    path: String,
}

/// Cloneable handle; all clones share one connection and one history feed.
#[derive(Clone)]
pub struct SleepStore {
    inner: Arc<StoreInner>,
}

impl SleepStore {
    /// Open (or create) the database at `path` and run pending migrations.
    pub async fn open(path: &str) -> AppResult<Self> {
        let owned = path.to_string();
        let pool = tokio::task::spawn_blocking(move || -> AppResult<DbPool> {
            let pool = DbPool::new(&owned)?;
            init_db(&pool.conn)?;
            Ok(pool)
        })
        .await
        .map_err(|e| AppError::Background(e.to_string()))??;

        info!(path, "sleep store opened");
        Ok(Self::from_pool(pool, path))
    }

    /// Private in-memory store, mostly for tests.
    pub async fn open_in_memory() -> AppResult<Self> {
        let pool = DbPool::in_memory()?;
        init_db(&pool.conn)?;
        Ok(Self::from_pool(pool, ":memory:"))
    }

    fn from_pool(pool: DbPool, path: &str) -> Self {
        let (history, _) = watch::channel(Vec::new());
        Self {
            inner: Arc::new(StoreInner {
                pool: Mutex::new(pool),
                history,
                path: path.to_string(),
            }),
        }
    }

    pub fn path(&self) -> &str {
        &self.inner.path
    }

    /// Number of live history subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.inner.history.receiver_count()
    }

    /// Run `f` on the connection from the blocking pool.
    async fn call<F, T>(&self, f: F) -> AppResult<T>
    where
        F: FnOnce(&Connection, &watch::Sender<Vec<SleepNight>>) -> AppResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let inner = Arc::clone(&self.inner);
        tokio::task::spawn_blocking(move || {
            let pool = inner
                .pool
                .lock()
                .map_err(|_| AppError::Other("store connection lock poisoned".into()))?;
            f(&pool.conn, &inner.history)
        })
        .await
        .map_err(|e| AppError::Background(e.to_string()))?
    }

    /// Append a night. `UNASSIGNED_ID` gets the next id; an explicit id
    /// that already exists fails with `DuplicateNight`.
    pub async fn insert(&self, night: SleepNight) -> AppResult<i64> {
        let id = self
            .call(move |conn, history| {
                let id = queries::insert_night(conn, &night)?;
                publish(conn, history)?;
                Ok(id)
            })
            .await?;
        debug!(id, "night inserted");
        Ok(id)
    }

    /// Replace the stored night with the same id. Returns false (and
    /// publishes nothing) when there is no such night.
    pub async fn update(&self, night: SleepNight) -> AppResult<bool> {
        let id = night.id;
        let found = self
            .call(move |conn, history| {
                let found = queries::update_night(conn, &night)?;
                if found {
                    publish(conn, history)?;
                }
                Ok(found)
            })
            .await?;
        debug!(id, found, "night updated");
        Ok(found)
    }

    pub async fn get(&self, id: i64) -> AppResult<Option<SleepNight>> {
        self.call(move |conn, _| queries::get_night(conn, id)).await
    }

    /// Most recent night (greatest id), if any.
    pub async fn get_tonight(&self) -> AppResult<Option<SleepNight>> {
        self.call(|conn, _| queries::get_tonight(conn)).await
    }

    /// One-shot snapshot of the history, newest first.
    pub async fn get_all_nights(&self) -> AppResult<Vec<SleepNight>> {
        self.call(|conn, _| queries::get_all_nights(conn)).await
    }

    /// Subscribe to the history. The returned subscription already holds
    /// the current list.
    pub async fn subscribe_all_nights(&self) -> AppResult<HistorySubscription> {
        let rx = self
            .call(|conn, history| {
                // Subscribe under the lock so no mutation slips in between
                // the refresh and the subscription.
                let mut rx = history.subscribe();
                let fresh = queries::get_all_nights(conn)?;
                history.send_if_modified(|current| {
                    if *current == fresh {
                        return false;
                    }
                    *current = fresh;
                    true
                });
                let _ = rx.borrow_and_update();
                Ok(rx)
            })
            .await?;
        Ok(HistorySubscription::new(rx))
    }

    /// Delete every night. Cannot be undone.
    pub async fn clear(&self) -> AppResult<usize> {
        let deleted = self
            .call(|conn, history| {
                let deleted = queries::clear_nights(conn)?;
                publish(conn, history)?;
                Ok(deleted)
            })
            .await?;
        info!(deleted, "history cleared");
        Ok(deleted)
    }

    /// Record an entry in the internal audit log.
    pub async fn audit(&self, operation: &str, target: &str, message: &str) -> AppResult<()> {
        let (operation, target, message) =
            (operation.to_string(), target.to_string(), message.to_string());
        self.call(move |conn, _| write_log(conn, &operation, &target, &message))
            .await
    }
}

/// Re-query and push the full history when someone is listening.
fn publish(conn: &Connection, history: &watch::Sender<Vec<SleepNight>>) -> AppResult<()> {
    if history.receiver_count() == 0 {
        return Ok(());
    }
    history.send_replace(queries::get_all_nights(conn)?);
    Ok(())
}
