use crate::errors::{AppError, AppResult};
use rusqlite::{Connection, OptionalExtension, Result, params};
use tracing::{debug, info};

/// A schema step applied at most once; its version is recorded in `log`.
struct Migration {
    version: &'static str,
    description: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: "20250301_0001_create_sleep_nights",
        description: "Created sleep_nights table",
        sql: r#"
            CREATE TABLE IF NOT EXISTS sleep_nights (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                start_time  INTEGER NOT NULL,
                stop_time   INTEGER NOT NULL,
                quality     INTEGER NOT NULL DEFAULT -1
            );
        "#,
    },
    Migration {
        version: "20250415_0002_index_sleep_nights_start",
        description: "Added start_time index to sleep_nights",
        sql: r#"
            CREATE INDEX IF NOT EXISTS idx_sleep_nights_start ON sleep_nights(start_time);
        "#,
    },
];

/// Ensure that the `log` table exists with the modern schema.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare_cached(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn apply(conn: &Connection, m: &Migration) -> Result<()> {
    let tx = conn.unchecked_transaction()?;
    tx.execute_batch(m.sql)?;
    tx.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        params![m.version, m.description],
    )?;
    tx.commit()
}

/// Versions not yet recorded as applied, in application order.
pub fn pending_migrations(conn: &Connection) -> AppResult<Vec<&'static str>> {
    ensure_log_table(conn)?;

    let mut out = Vec::new();
    for m in MIGRATIONS {
        if !is_applied(conn, m.version)? {
            out.push(m.version);
        }
    }
    Ok(out)
}

/// Public entry point: run all pending migrations.
///
/// Invoked by db::initialize::init_db() every time a store is opened, so
/// it must stay cheap when nothing is pending.
pub fn run_pending_migrations(conn: &Connection) -> AppResult<usize> {
    ensure_log_table(conn)?;

    let mut applied = 0;
    for m in MIGRATIONS {
        if is_applied(conn, m.version)? {
            debug!(version = m.version, "migration already applied");
            continue;
        }

        apply(conn, m).map_err(|e| AppError::Migration(format!("{}: {}", m.version, e)))?;
        info!(version = m.version, "migration applied");
        applied += 1;
    }

    Ok(applied)
}
