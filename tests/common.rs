#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::path::Path;
use tempfile::TempDir;

/// Binary under test, with HOME pointed at `home` so the user's real
/// configuration is never read or written.
pub fn rst(home: &Path) -> Command {
    let mut cmd = cargo_bin_cmd!("rsleeptracker");
    cmd.env("HOME", home).env_remove("RUST_LOG");
    cmd
}

/// Fresh temp dir plus a database path inside it.
/// Keep the `TempDir` alive for the whole test.
pub fn setup_test_db(name: &str) -> (TempDir, String) {
    let dir = tempfile::tempdir().expect("tempdir");
    let db_path = dir
        .path()
        .join(format!("{}_rsleeptracker.sqlite", name))
        .to_string_lossy()
        .to_string();
    (dir, db_path)
}

/// Initialize the schema through the CLI, as a user would.
pub fn init_db(home: &Path, db_path: &str) {
    rst(home)
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

/// Run one full night: start, stop, and optionally rate it.
pub fn record_night(home: &Path, db_path: &str, quality: Option<i32>) {
    rst(home).args(["--db", db_path, "start"]).assert().success();
    rst(home).args(["--db", db_path, "stop"]).assert().success();
    if let Some(q) = quality {
        rst(home)
            .args(["--db", db_path, "rate", &q.to_string()])
            .assert()
            .success();
    }
}
