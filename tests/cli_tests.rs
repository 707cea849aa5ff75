use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

fn ar_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("ar-summary"))
}

fn init_config(config_path: &Path) {
    ar_cmd()
        .args(["-C", config_path.to_str().unwrap(), "init"])
        .assert()
        .success();
}

#[test]
fn test_help() {
    ar_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Accounts receivable summary reports"));
}

#[test]
fn test_version() {
    ar_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("ar-summary"));
}

#[test]
fn test_init_creates_config() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("ar-config");

    ar_cmd()
        .args(["-C", config_path.to_str().unwrap(), "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized ar-summary config"));

    assert!(config_path.join("config.toml").exists());
    assert!(config_path.join("receivables.toml").exists());
    assert!(config_path.join("directory.toml").exists());
    assert!(config_path.join("accounts.toml").exists());
}

#[test]
fn test_init_fails_if_exists() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("ar-config");

    init_config(&config_path);

    ar_cmd()
        .args(["-C", config_path.to_str().unwrap(), "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_summary_without_init() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("nonexistent");

    ar_cmd()
        .args(["-C", config_path.to_str().unwrap(), "summary"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_summary_lists_parties_with_balance() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("ar-config");
    init_config(&config_path);

    ar_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "summary",
            "--date",
            "2026-03-31",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Customer ID"))
        .stdout(predicate::str::contains("CUST-0001"))
        .stdout(predicate::str::contains("Jane Doe"))
        .stdout(predicate::str::contains("Dr. Smith"))
        .stdout(predicate::str::contains("+1-555-0101"))
        .stdout(predicate::str::contains("200.00"))
        .stdout(predicate::str::contains("receipt CUST-0002 320.50"))
        // net-zero party is left out
        .stdout(predicate::str::contains("CUST-0003").not())
        .stdout(predicate::str::contains("Page 1 of 1 (3 parties)"))
        .stdout(predicate::str::contains("Page outstanding: $565.75"));
}

#[test]
fn test_summary_respects_report_date() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("ar-config");
    init_config(&config_path);

    ar_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "summary",
            "--date",
            "2026-01-15",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("CUST-0001"))
        .stdout(predicate::str::contains("150.00"))
        .stdout(predicate::str::contains("CUST-0002").not())
        .stdout(predicate::str::contains("(1 parties)"));
}

#[test]
fn test_summary_pagination() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("ar-config");
    init_config(&config_path);

    ar_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "summary",
            "--date",
            "2026-03-31",
            "--page-length",
            "2",
            "--start",
            "2",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("CUST-0004"))
        .stdout(predicate::str::contains("CUST-0001").not())
        .stdout(predicate::str::contains("Page 2 of 2 (3 parties)"));
}

#[test]
fn test_summary_by_debtor() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("ar-config");
    init_config(&config_path);

    ar_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "summary",
            "--date",
            "2026-03-31",
            "--by",
            "debtor",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Insurance"))
        .stdout(predicate::str::contains("520.50"))
        .stdout(predicate::str::contains("Self Pay"))
        .stdout(predicate::str::contains("45.25"))
        .stdout(predicate::str::contains("CUST-0001").not())
        .stdout(predicate::str::contains("Page 1 of 1 (2 groups)"));
}

#[test]
fn test_summary_gl_balance_columns() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("ar-config");
    init_config(&config_path);

    ar_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "summary",
            "--date",
            "2026-03-31",
            "--gl-balance",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("GL Balance"))
        .stdout(predicate::str::contains("Difference"));
}

#[test]
fn test_summary_json() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("ar-config");
    init_config(&config_path);

    let output = ar_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "summary",
            "--date",
            "2026-03-31",
            "--json",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["total_count"], 3);
    assert_eq!(report["page_count"], 1);
    assert_eq!(report["rows"][0]["party"], "CUST-0001");
    assert_eq!(report["rows"][0]["outstanding"], 200.0);
    assert_eq!(report["rows"][0]["receipt"]["action"], "receipt");
    assert_eq!(report["rows"][1]["advance"], 25.0);
}

#[test]
fn test_summary_with_no_outstanding() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("ar-config");
    init_config(&config_path);
    fs::write(config_path.join("receivables.toml"), "rows = []\n").unwrap();

    ar_cmd()
        .args(["-C", config_path.to_str().unwrap(), "summary"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No outstanding receivables found."));
}

#[test]
fn test_summary_invalid_date() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("ar-config");
    init_config(&config_path);

    ar_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "summary",
            "--date",
            "31/03/2026",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid date"));
}

#[test]
fn test_summary_reports_parse_errors() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("ar-config");
    init_config(&config_path);
    fs::write(config_path.join("accounts.toml"), "[[gl_entries]]\ndebit = \"x\"\n").unwrap();

    ar_cmd()
        .args(["-C", config_path.to_str().unwrap(), "summary"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse config file"));
}

#[test]
fn test_columns_list() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("ar-config");
    init_config(&config_path);

    ar_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "columns",
            "--sales-person",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Customer ID"))
        .stdout(predicate::str::contains("Customer Name"))
        .stdout(predicate::str::contains("Print Statement"))
        .stdout(predicate::str::contains("sales_person"));
}
