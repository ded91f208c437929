//! End-to-end CLI tests for the hold lifecycle.
//!
//! Each test runs the real binary against a temporary data directory,
//! walking the inventory-hold-confirm-reap flow a deployment would.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::{Path, PathBuf};

fn tably_cmd(data_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("tably").expect("Failed to find tably binary");
    cmd.args(["--data-dir", data_dir.to_str().unwrap()]);
    cmd
}

/// Creates a data directory with one 4-seat and one 6-seat table at
/// restaurant 1.
fn seeded_data_dir() -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let data_dir = dir.path().join("data");

    tably_cmd(&data_dir).arg("init").assert().success();
    tably_cmd(&data_dir)
        .args(["add-tables", "--restaurant", "1", "--type", "4"])
        .assert()
        .success();
    tably_cmd(&data_dir)
        .args(["add-tables", "--restaurant", "1", "--type", "6"])
        .assert()
        .success();

    (dir, data_dir)
}

/// Runs a hold for a lunch party of four, returning the hold id.
fn hold_party_of_four(data_dir: &Path) -> String {
    let output = tably_cmd(data_dir)
        .args([
            "--quiet",
            "hold",
            "--restaurant",
            "1",
            "--guests",
            "4",
            "--date",
            "2025-07-22",
            "--arrival",
            "12:30",
            "--phone",
            "555-0100",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// Rewrites all hold expirations into the past.
fn expire_all_holds(data_dir: &Path) {
    let conn = rusqlite::Connection::open(data_dir.join("tably.db")).unwrap();
    conn.execute(
        "UPDATE reservation_tables SET hold_expiration = hold_expiration - 600",
        [],
    )
    .unwrap();
}

#[test]
fn test_hold_confirm_flow() {
    let (_dir, data_dir) = seeded_data_dir();

    let hold_id = hold_party_of_four(&data_dir);
    assert!(!hold_id.is_empty());

    // The hold is visible on the status page
    tably_cmd(&data_dir)
        .args(["show", &hold_id, "--holding"])
        .assert()
        .success()
        .stdout(predicate::str::contains("PENDING"))
        .stdout(predicate::str::contains("4-seat"));

    // Confirm it
    tably_cmd(&data_dir)
        .args(["confirm", &hold_id, "--phone", "555-0123"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Confirmed"));

    tably_cmd(&data_dir)
        .args(["show", &hold_id])
        .assert()
        .success()
        .stdout(predicate::str::contains("CONFIRMED"));
}

#[test]
fn test_availability_reflects_holds() {
    let (_dir, data_dir) = seeded_data_dir();

    let availability_args = [
        "availability",
        "--restaurant",
        "1",
        "--date",
        "2025-07-22",
        "--arrival",
        "12:30",
        "--guests",
        "10",
    ];

    // 4 + 6 seats cover a party of ten
    tably_cmd(&data_dir)
        .args(availability_args)
        .assert()
        .success()
        .stdout(predicate::str::contains("available"));

    hold_party_of_four(&data_dir);

    // With the 4-seat table held, ten guests no longer fit
    tably_cmd(&data_dir)
        .args(availability_args)
        .assert()
        .success()
        .stdout(predicate::str::contains("unavailable"));
}

#[test]
fn test_infeasible_hold_exits_with_domain_failure() {
    let dir = tempfile::tempdir().unwrap();
    let data_dir = dir.path().join("data");
    tably_cmd(&data_dir).arg("init").assert().success();

    // No inventory registered at all
    tably_cmd(&data_dir)
        .args([
            "hold",
            "--restaurant",
            "1",
            "--guests",
            "4",
            "--date",
            "2025-07-22",
            "--arrival",
            "12:30",
            "--phone",
            "555-0100",
        ])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("no tables available"));
}

#[test]
fn test_confirm_expired_hold_fails_and_reap_releases() {
    let (_dir, data_dir) = seeded_data_dir();

    let hold_id = hold_party_of_four(&data_dir);
    expire_all_holds(&data_dir);

    // Confirm reports the lapsed hold
    tably_cmd(&data_dir)
        .args(["confirm", &hold_id, "--phone", "555-0123"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("hold expired or invalid"));

    // The reap releases it
    tably_cmd(&data_dir)
        .args(["reap"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Released 1 expired hold"));

    tably_cmd(&data_dir)
        .args(["show", &hold_id])
        .assert()
        .success()
        .stdout(predicate::str::contains("CANCELLED"));

    // Reaping again finds nothing
    tably_cmd(&data_dir)
        .args(["--quiet", "reap"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0"));
}

#[test]
fn test_cancel_command_releases_tables() {
    let (_dir, data_dir) = seeded_data_dir();

    let hold_id = hold_party_of_four(&data_dir);

    tably_cmd(&data_dir)
        .args(["cancel", &hold_id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cancelled"));

    // The table is free to hold again
    hold_party_of_four(&data_dir);
}

#[test]
fn test_tables_and_list_output() {
    let (_dir, data_dir) = seeded_data_dir();
    let hold_id = hold_party_of_four(&data_dir);

    tably_cmd(&data_dir)
        .args(["tables", "--restaurant", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("4-seat"))
        .stdout(predicate::str::contains("6-seat"));

    tably_cmd(&data_dir)
        .args(["list", "--restaurant", "1", "--date", "2025-07-22"])
        .assert()
        .success()
        .stdout(predicate::str::contains(&hold_id))
        .stdout(predicate::str::contains("LUNCH"))
        .stdout(predicate::str::contains("PENDING"));
}

#[test]
fn test_show_json_output() {
    let (_dir, data_dir) = seeded_data_dir();
    let hold_id = hold_party_of_four(&data_dir);

    let output = tably_cmd(&data_dir)
        .args(["show", &hold_id, "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["reservation"]["guest_count"], 4);
    assert!(parsed["tables"].is_array());
}
