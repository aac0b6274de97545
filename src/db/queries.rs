use crate::errors::{AppError, AppResult};
use crate::models::night::{SleepNight, UNASSIGNED_ID};
use rusqlite::{Connection, ErrorCode, OptionalExtension, Result, Row, params};

pub fn map_row(row: &Row) -> Result<SleepNight> {
    Ok(SleepNight {
        id: row.get("id")?,
        start_time: row.get("start_time")?,
        stop_time: row.get("stop_time")?,
        quality: row.get("quality")?,
    })
}

/// Insert a night and return its id.
///
/// `UNASSIGNED_ID` lets SQLite pick the next id; any other id is stored
/// as given and fails with `DuplicateNight` if already taken.
pub fn insert_night(conn: &Connection, night: &SleepNight) -> AppResult<i64> {
    let res = if night.id == UNASSIGNED_ID {
        conn.execute(
            "INSERT INTO sleep_nights (start_time, stop_time, quality)
             VALUES (?1, ?2, ?3)",
            params![night.start_time, night.stop_time, night.quality],
        )
    } else {
        conn.execute(
            "INSERT INTO sleep_nights (id, start_time, stop_time, quality)
             VALUES (?1, ?2, ?3, ?4)",
            params![night.id, night.start_time, night.stop_time, night.quality],
        )
    };

    match res {
        Ok(_) => Ok(conn.last_insert_rowid()),
        Err(rusqlite::Error::SqliteFailure(e, _)) if e.code == ErrorCode::ConstraintViolation => {
            Err(AppError::DuplicateNight(night.id))
        }
        Err(e) => Err(e.into()),
    }
}

/// Replace every column of the row matching `night.id`.
/// Returns false when no such row exists; never inserts.
pub fn update_night(conn: &Connection, night: &SleepNight) -> AppResult<bool> {
    let changed = conn.execute(
        "UPDATE sleep_nights
         SET start_time = ?1, stop_time = ?2, quality = ?3
         WHERE id = ?4",
        params![night.start_time, night.stop_time, night.quality, night.id],
    )?;
    Ok(changed > 0)
}

pub fn get_night(conn: &Connection, id: i64) -> AppResult<Option<SleepNight>> {
    let night = conn
        .query_row(
            "SELECT * FROM sleep_nights WHERE id = ?1",
            [id],
            map_row,
        )
        .optional()?;
    Ok(night)
}

/// The most recent night, i.e. the one with the greatest id.
pub fn get_tonight(conn: &Connection) -> AppResult<Option<SleepNight>> {
    let night = conn
        .query_row(
            "SELECT * FROM sleep_nights ORDER BY id DESC LIMIT 1",
            [],
            map_row,
        )
        .optional()?;
    Ok(night)
}

/// All nights, newest first.
pub fn get_all_nights(conn: &Connection) -> AppResult<Vec<SleepNight>> {
    let mut stmt = conn.prepare_cached("SELECT * FROM sleep_nights ORDER BY id DESC")?;
    let rows = stmt.query_map([], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Delete every night. The table and its id sequence are kept, so ids
/// handed out before the clear are never reused.
pub fn clear_nights(conn: &Connection) -> AppResult<usize> {
    let deleted = conn.execute("DELETE FROM sleep_nights", [])?;
    Ok(deleted)
}

pub fn count_nights(conn: &Connection) -> Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM sleep_nights", [], |row| row.get(0))
}

/// Audit rows as (id, date, operation, target, message), oldest first.
pub fn load_log(conn: &Connection) -> Result<Vec<(i64, String, String, String, String)>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, date, operation, IFNULL(target, ''), message FROM log ORDER BY id ASC",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok((
            row.get(0)?,
            row.get(1)?,
            row.get(2)?,
            row.get(3)?,
            row.get(4)?,
        ))
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
