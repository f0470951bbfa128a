//! CLI integration tests
//!
//! Run the `leaseup` binary against a temporary database file.

use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

fn run(dir: &Path, db_path: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_leaseup"))
        .current_dir(dir)
        .env_remove("LEASEUP_DATABASE")
        .env("RUST_LOG", "off")
        .arg("--db")
        .arg(db_path)
        .args(args)
        .output()
        .expect("Failed to execute CLI")
}

fn db_path(temp_dir: &TempDir) -> PathBuf {
    temp_dir.path().join("data").join("leaseup.db")
}

fn count(db_path: &Path, table: &str) -> i64 {
    let conn = Connection::open(db_path).unwrap();
    conn.query_row(&format!("SELECT COUNT(*) FROM \"{}\"", table), [], |row| row.get(0))
        .unwrap()
}

#[test]
fn test_db_migrate_creates_database() {
    let temp_dir = TempDir::new().unwrap();
    let db = db_path(&temp_dir);

    let output = run(temp_dir.path(), &db, &["db", "migrate"]);
    assert!(
        output.status.success(),
        "Stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(String::from_utf8_lossy(&output.stdout).contains("Applied 2 migration(s)"));
    assert!(db.exists());

    // Second run has nothing left to apply
    let output = run(temp_dir.path(), &db, &["db", "migrate"]);
    assert!(String::from_utf8_lossy(&output.stdout).contains("Applied 0 migration(s)"));
}

#[test]
fn test_seed_demo_then_status() {
    let temp_dir = TempDir::new().unwrap();
    let db = db_path(&temp_dir);

    let output = run(temp_dir.path(), &db, &["seed", "demo"]);
    assert!(
        output.status.success(),
        "Stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(String::from_utf8_lossy(&output.stdout).contains("Imported demo (18 rows"));
    assert_eq!(count(&db, "property"), 4);

    let output = run(temp_dir.path(), &db, &["db", "status"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("001_initial_schema applied"));
    assert!(stdout.lines().any(|l| l.trim_start().starts_with("unit") && l.trim_end().ends_with('4')));
}

#[test]
fn test_reseed_fails_with_error_exit() {
    let temp_dir = TempDir::new().unwrap();
    let db = db_path(&temp_dir);

    assert!(run(temp_dir.path(), &db, &["seed", "demo"]).status.success());

    let output = run(temp_dir.path(), &db, &["seed", "demo"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.starts_with("Error: "), "Stderr: {}", stderr);
    assert!(stderr.contains("ERR_CONFLICT"));

    assert_eq!(count(&db, "lease"), 2);
}

#[test]
fn test_seed_import_directory() {
    let temp_dir = TempDir::new().unwrap();
    let db = db_path(&temp_dir);
    let seeds = temp_dir.path().join("seeds");
    std::fs::create_dir_all(&seeds).unwrap();
    std::fs::write(
        seeds.join("01_properties.yaml"),
        "schema_version: 0\nfixture: { name: properties }\nproperties:\n  - { id: 1, name: Greenfield Heights }\n",
    )
    .unwrap();
    std::fs::write(
        seeds.join("02_units.yaml"),
        "schema_version: 0\nfixture: { name: units }\nunits:\n  - { id: 1, property: 1, number: Room 1 }\n",
    )
    .unwrap();

    let output = run(temp_dir.path(), &db, &["seed", "import", seeds.to_str().unwrap()]);
    assert!(
        output.status.success(),
        "Stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Imported properties"));
    assert!(stdout.contains("Imported units"));
    assert_eq!(count(&db, "unit"), 1);
}

#[test]
fn test_reports() {
    let temp_dir = TempDir::new().unwrap();
    let db = db_path(&temp_dir);
    assert!(run(temp_dir.path(), &db, &["seed", "demo"]).status.success());

    let output = run(temp_dir.path(), &db, &["report", "vacancies"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Room 2"));
    assert!(stdout.contains("Sunrise Residences"));
    assert!(!stdout.contains("Room 1 "));

    let output = run(
        temp_dir.path(),
        &db,
        &["report", "expiring", "--as-of", "2025-12-15", "--json"],
    );
    assert!(output.status.success());
    let rows: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(rows.as_array().map(|r| r.len()), Some(2));
    assert_eq!(rows[0]["days_remaining"], 16);

    let output = run(
        temp_dir.path(),
        &db,
        &["report", "balances", "--as-of", "2025-04-01", "--json"],
    );
    let rows: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(rows[0]["expected"], 15000.0);
    assert_eq!(rows[0]["balance"], 15000.0);
}

#[test]
fn test_database_from_environment() {
    let temp_dir = TempDir::new().unwrap();
    let db = temp_dir.path().join("env.db");

    let output = Command::new(env!("CARGO_BIN_EXE_leaseup"))
        .current_dir(temp_dir.path())
        .env("LEASEUP_DATABASE", &db)
        .env("RUST_LOG", "off")
        .args(["db", "migrate"])
        .output()
        .expect("Failed to execute CLI");

    assert!(output.status.success());
    assert!(db.exists());
    assert!(!temp_dir.path().join("instance").exists());
}

#[test]
fn test_invalid_seed_reports_error() {
    let temp_dir = TempDir::new().unwrap();
    let db = db_path(&temp_dir);
    let seed = temp_dir.path().join("bad.yaml");
    std::fs::write(&seed, "schema_version: 0\nunits:\n  - { id: 1, property: 9, number: Room 1 }\n")
        .unwrap();

    let output = run(temp_dir.path(), &db, &["seed", "import", seed.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("ERR_INVALID_INPUT"));
}
