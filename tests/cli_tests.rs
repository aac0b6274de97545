use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::path::Path;

mod common;
use common::{init_db, record_night, rst, setup_test_db};

#[test]
fn test_init_creates_database() {
    let (dir, db_path) = setup_test_db("init");

    rst(dir.path())
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("Database initialized"));

    assert!(Path::new(&db_path).exists());
}

#[test]
fn test_relative_db_is_shared_by_init_and_start() {
    let (dir, _) = setup_test_db("relative");
    let home = dir.path();

    rst(home)
        .current_dir(home)
        .args(["--db", "relative.sqlite", "--test", "init"])
        .assert()
        .success();
    assert!(home.join("relative.sqlite").exists());

    rst(home)
        .current_dir(home)
        .args(["--db", "relative.sqlite", "start"])
        .assert()
        .success()
        .stdout(contains("Night #1 started at"));

    // nothing was created under the config dir
    assert!(!home.join(".rsleeptracker").join("relative.sqlite").exists());
}

#[test]
fn test_start_stop_rate_list_round_trip() {
    let (dir, db_path) = setup_test_db("round_trip");
    let home = dir.path();
    init_db(home, &db_path);

    rst(home)
        .args(["--db", &db_path, "start"])
        .assert()
        .success()
        .stdout(contains("Night #1 started at"));

    rst(home)
        .args(["--db", &db_path, "status"])
        .assert()
        .success()
        .stdout(contains("Night #1 in progress"))
        .stdout(contains("Available actions: stop, clear"));

    rst(home)
        .args(["--db", &db_path, "stop"])
        .assert()
        .success()
        .stdout(contains("Night #1 stopped after"))
        .stdout(contains("rsleeptracker rate <0-5> --id 1"));

    rst(home)
        .args(["--db", &db_path, "rate", "4"])
        .assert()
        .success()
        .stdout(contains("Night #1 rated: Pretty good"));

    rst(home)
        .args(["--db", &db_path, "list"])
        .assert()
        .success()
        .stdout(contains("Night #1"))
        .stdout(contains("Pretty good"));
}

#[test]
fn test_second_start_warns_and_keeps_one_night() {
    let (dir, db_path) = setup_test_db("double_start");
    let home = dir.path();
    init_db(home, &db_path);

    rst(home).args(["--db", &db_path, "start"]).assert().success();
    rst(home)
        .args(["--db", &db_path, "start"])
        .assert()
        .success()
        .stdout(contains("already in progress"));

    rst(home)
        .args(["--db", &db_path, "list", "--json"])
        .assert()
        .success()
        .stdout(contains("\"id\": 1"))
        .stdout(contains("\"id\": 2").not());
}

#[test]
fn test_stop_without_start_warns() {
    let (dir, db_path) = setup_test_db("stop_idle");
    let home = dir.path();
    init_db(home, &db_path);

    rst(home)
        .args(["--db", &db_path, "stop"])
        .assert()
        .success()
        .stdout(contains("No night in progress"));
}

#[test]
fn test_rate_rejects_out_of_range_quality() {
    let (dir, db_path) = setup_test_db("rate_range");
    let home = dir.path();
    init_db(home, &db_path);
    record_night(home, &db_path, None);

    rst(home)
        .args(["--db", &db_path, "rate", "9"])
        .assert()
        .failure();
}

#[test]
fn test_rate_with_empty_history_fails() {
    let (dir, db_path) = setup_test_db("rate_empty");
    let home = dir.path();
    init_db(home, &db_path);

    rst(home)
        .args(["--db", &db_path, "rate", "3"])
        .assert()
        .failure()
        .stderr(contains("No nights recorded yet"));
}

#[test]
fn test_rate_unknown_id_warns() {
    let (dir, db_path) = setup_test_db("rate_unknown");
    let home = dir.path();
    init_db(home, &db_path);
    record_night(home, &db_path, None);

    rst(home)
        .args(["--db", &db_path, "rate", "2", "--id", "99"])
        .assert()
        .success()
        .stdout(contains("No night with id 99."));
}

#[test]
fn test_list_json_carries_the_rating() {
    let (dir, db_path) = setup_test_db("list_json");
    let home = dir.path();
    init_db(home, &db_path);
    record_night(home, &db_path, Some(5));
    record_night(home, &db_path, Some(1));

    let output = rst(home)
        .args(["--db", &db_path, "list", "--json"])
        .output()
        .expect("run list");
    assert!(output.status.success());

    let nights: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("valid json");
    let nights = nights.as_array().expect("array");
    assert_eq!(nights.len(), 2);
    // newest first
    assert_eq!(nights[0]["id"], 2);
    assert_eq!(nights[0]["quality"], 1);
    assert_eq!(nights[1]["quality"], 5);
}

#[test]
fn test_list_limit_and_compact() {
    let (dir, db_path) = setup_test_db("list_compact");
    let home = dir.path();
    init_db(home, &db_path);
    record_night(home, &db_path, Some(3));
    record_night(home, &db_path, Some(0));

    rst(home)
        .args(["--db", &db_path, "list", "--compact", "--limit", "1"])
        .assert()
        .success()
        .stdout(contains("Quality"))
        .stdout(contains("Very bad"))
        .stdout(contains("OK").not());
}

#[test]
fn test_list_empty_history() {
    let (dir, db_path) = setup_test_db("list_empty");
    let home = dir.path();
    init_db(home, &db_path);

    rst(home)
        .args(["--db", &db_path, "list"])
        .assert()
        .success()
        .stdout(contains("No nights recorded yet."));
}

#[test]
fn test_clear_deletes_history() {
    let (dir, db_path) = setup_test_db("clear");
    let home = dir.path();
    init_db(home, &db_path);
    record_night(home, &db_path, Some(2));

    rst(home)
        .args(["--db", &db_path, "clear", "--yes"])
        .assert()
        .success()
        .stdout(contains("Sleep history cleared (1 nights deleted)."));

    rst(home)
        .args(["--db", &db_path, "status"])
        .assert()
        .success()
        .stdout(contains("No night in progress."))
        .stdout(contains("Available actions: start\n"));
}

#[test]
fn test_clear_declined_keeps_history() {
    let (dir, db_path) = setup_test_db("clear_declined");
    let home = dir.path();
    init_db(home, &db_path);
    record_night(home, &db_path, None);

    rst(home)
        .args(["--db", &db_path, "clear"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(contains("Operation cancelled."));

    rst(home)
        .args(["--db", &db_path, "list"])
        .assert()
        .success()
        .stdout(contains("Night #1"));
}

#[test]
fn test_log_records_user_actions() {
    let (dir, db_path) = setup_test_db("log");
    let home = dir.path();
    init_db(home, &db_path);
    record_night(home, &db_path, Some(4));

    rst(home)
        .args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("init"))
        .stdout(contains("start"))
        .stdout(contains("stop"))
        .stdout(contains("rate"));
}

#[test]
fn test_backup_plain_and_compressed() {
    let (dir, db_path) = setup_test_db("backup");
    let home = dir.path();
    init_db(home, &db_path);
    record_night(home, &db_path, Some(3));

    let plain = home.join("backups").join("nights.sqlite");
    let plain = plain.to_string_lossy().to_string();
    rst(home)
        .args(["--db", &db_path, "backup", "--file", &plain])
        .assert()
        .success()
        .stdout(contains("Backup created"));
    assert!(Path::new(&plain).exists());

    let zipped = home.join("nights_copy.sqlite");
    let zipped = zipped.to_string_lossy().to_string();
    rst(home)
        .args(["--db", &db_path, "backup", "--file", &zipped, "--compress"])
        .assert()
        .success()
        .stdout(contains("Compressed"));
    assert!(home.join("nights_copy.zip").exists());
    assert!(!Path::new(&zipped).exists());
}

#[test]
fn test_db_info_counts_nights() {
    let (dir, db_path) = setup_test_db("db_info");
    let home = dir.path();
    init_db(home, &db_path);
    record_night(home, &db_path, Some(5));

    rst(home)
        .args(["--db", &db_path, "db", "--info"])
        .assert()
        .success()
        .stdout(contains("Total nights"));
}

#[test]
fn test_db_check_reports_ok() {
    let (dir, db_path) = setup_test_db("db_check");
    let home = dir.path();
    init_db(home, &db_path);

    rst(home)
        .args(["--db", &db_path, "db", "--check"])
        .assert()
        .success()
        .stdout(contains("Integrity check passed."));
}
