use crate::db::pool::DbPool;
use crate::db::queries::count_nights;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use crate::utils::time::format_millis;
use rusqlite::OptionalExtension;
use std::fs;

pub fn print_db_info(pool: &mut DbPool, db_path: &str, time_format: &str) -> rusqlite::Result<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_kb = (file_size as f64) / 1024.0;

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.1} KB", CYAN, RESET, file_kb);

    //
    // 2) TOTAL NIGHTS
    //
    let count = count_nights(&pool.conn)?;
    let rated: i64 = pool.conn.query_row(
        "SELECT COUNT(*) FROM sleep_nights WHERE quality >= 0",
        [],
        |row| row.get(0),
    )?;
    println!(
        "{}• Total nights:{} {}{}{} ({} rated)",
        CYAN, RESET, GREEN, count, RESET, rated
    );

    //
    // 3) DATE RANGE
    //
    let first: Option<i64> = pool
        .conn
        .query_row("SELECT MIN(start_time) FROM sleep_nights", [], |row| {
            row.get(0)
        })
        .optional()?
        .flatten();
    let last: Option<i64> = pool
        .conn
        .query_row("SELECT MAX(start_time) FROM sleep_nights", [], |row| {
            row.get(0)
        })
        .optional()?
        .flatten();

    let fmt = |v: Option<i64>| {
        v.map(|ms| format_millis(ms, time_format))
            .unwrap_or_else(|| format!("{GREY}--{RESET}"))
    };

    println!("{}• Date range:{}", CYAN, RESET);
    println!("    from: {}", fmt(first));
    println!("    to:   {}", fmt(last));

    //
    // 4) AVERAGE QUALITY
    //
    let avg: Option<f64> = pool.conn.query_row(
        "SELECT AVG(quality) FROM sleep_nights WHERE quality >= 0",
        [],
        |row| row.get(0),
    )?;
    if let Some(avg) = avg {
        println!("{}• Average quality:{} {:.2} / 5", CYAN, RESET, avg);
    }

    println!();
    Ok(())
}
