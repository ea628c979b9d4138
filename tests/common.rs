#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn ti() -> Command {
    cargo_bin_cmd!("techinvoice")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_techinvoice.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Run `init` in test mode (schema only, no config file)
pub fn init_db(db_path: &str) {
    ti().args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

/// Initialize DB and build a draft for Jane Doe (BHM, techId 12) with two items (45 + 25)
pub fn init_db_with_draft(db_path: &str) {
    init_db(db_path);

    ti().args([
        "--db",
        db_path,
        "set",
        "--tech",
        "Jane Doe",
        "--account",
        "Sunrise Apartments",
        "--po",
        "PO-778",
        "--notes",
        "Replaced lock cylinder",
    ])
    .assert()
    .success();

    ti().args(["--db", db_path, "item", "add", "Rekey", "45"])
        .assert()
        .success();

    ti().args(["--db", db_path, "item", "add", "Service fee", "25.00"])
        .assert()
        .success();
}

/// Export the current draft to `out` as CSV
pub fn export_csv(db_path: &str, out: &str) -> assert_cmd::assert::Assert {
    ti().args([
        "--db", db_path, "export", "--format", "csv", "--file", out, "--force",
    ])
    .assert()
}
