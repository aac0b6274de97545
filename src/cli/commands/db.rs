use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::migrate::{pending_migrations, run_pending_migrations};
use crate::db::pool::DbPool;
use crate::db::stats;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, RED, RESET, YELLOW};
use rusqlite::Connection;
use tracing::debug;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Db {
        migrate,
        check,
        vacuum,
        info,
    } = cmd
    else {
        return Ok(());
    };

    let mut pool = DbPool::new(&cfg.database)?;

    // migrations first, so --info and --check see the final schema
    if *migrate {
        migrate_schema(&pool.conn)?;
    }
    if *info {
        stats::print_db_info(&mut pool, &cfg.database, &cfg.time_format)?;
    }
    if *check {
        check_database(&pool.conn)?;
    }
    if *vacuum {
        println!("{}▶ Running VACUUM…{}", CYAN, RESET);
        pool.conn.execute_batch("VACUUM;")?;
        println!("{}✔ Vacuum completed.{}\n", GREEN, RESET);
    }

    Ok(())
}

fn migrate_schema(conn: &Connection) -> AppResult<()> {
    let pending = pending_migrations(conn)?;
    if pending.is_empty() {
        println!("{}✔ Schema is up to date.{}\n", GREEN, RESET);
        return Ok(());
    }

    println!("{}▶ Applying {} migration(s):{}", CYAN, pending.len(), RESET);
    for version in &pending {
        println!("  • {}", version);
    }
    let applied = run_pending_migrations(conn)?;
    println!("{}✔ Migration completed ({} applied).{}\n", GREEN, applied, RESET);
    Ok(())
}

fn check_database(conn: &Connection) -> AppResult<()> {
    println!("{}▶ Running integrity check…{}", CYAN, RESET);

    let integrity: String = conn.query_row("PRAGMA integrity_check;", [], |row| row.get(0))?;
    debug!(result = %integrity, "integrity check");
    if integrity == "ok" {
        println!("{}✔ Integrity check passed.{}", GREEN, RESET);
    } else {
        println!("{}✘ Integrity check failed:{} {}", RED, RESET, integrity);
    }

    let pending = pending_migrations(conn)?;
    if pending.is_empty() {
        println!("{}✔ No pending migrations.{}\n", GREEN, RESET);
    } else {
        println!(
            "{}⚠ {} pending migration(s); run `rsleeptracker db --migrate`.{}\n",
            YELLOW,
            pending.len(),
            RESET
        );
    }
    Ok(())
}
