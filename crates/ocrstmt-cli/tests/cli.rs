use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;

fn ocrstmt(config_home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("ocrstmt").unwrap();
    // keep the user's real config out of the way
    cmd.env("XDG_CONFIG_HOME", config_home)
        .env("HOME", config_home)
        .env_remove("OCRSTMT_DATABASE");
    cmd
}

#[test]
fn test_run_missing_input_fails() {
    let dir = tempfile::tempdir().unwrap();

    ocrstmt(dir.path())
        .args(["run", "--no-open"])
        .arg(dir.path().join("absent"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("input path does not exist"));
}

#[test]
fn test_run_non_pdf_input_fails() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("notes.txt");
    std::fs::write(&input, "hello").unwrap();

    ocrstmt(dir.path())
        .args(["run", "--no-open"])
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a PDF"));
}

#[test]
fn test_run_empty_folder_succeeds() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("statements");
    let output = dir.path().join("reports");
    std::fs::create_dir(&input).unwrap();

    ocrstmt(dir.path())
        .env("OCRSTMT_DATABASE", dir.path().join("accounts.db"))
        .args(["run", "--no-open"])
        .arg(&input)
        .arg("--output-dir")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Processed 0 documents"));

    assert!(output.is_dir());
}

#[test]
fn test_run_json_and_summary() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("statements");
    std::fs::create_dir(&input).unwrap();
    // not a real PDF: decoding fails and the document is skipped
    std::fs::write(input.join("250000001.pdf"), "garbage").unwrap();
    let summary = dir.path().join("summary.csv");

    ocrstmt(dir.path())
        .args(["run", "--no-open", "--json"])
        .arg(&input)
        .arg("--summary")
        .arg(&summary)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"status\": \"missing_fields\""))
        .stdout(predicate::str::contains("\"reference\": \"250000001\""));

    let csv = std::fs::read_to_string(&summary).unwrap();
    let mut lines = csv.lines();
    assert_eq!(
        lines.next(),
        Some("file,status,reference,new_balance,closing_date,due_date,rows_written,processing_time_ms,message")
    );
    assert!(lines.next().unwrap().contains("missing_fields,250000001"));
}

#[test]
fn test_config_init_get_and_path() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("ocrstmt.json");

    ocrstmt(dir.path())
        .args(["config", "init", "--output"])
        .arg(&config)
        .assert()
        .success();
    assert!(config.exists());

    ocrstmt(dir.path())
        .arg("--config")
        .arg(&config)
        .args(["config", "get", "report.file_prefix"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"ocr_statement_output_\""));

    ocrstmt(dir.path())
        .arg("--config")
        .arg(&config)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("exists"));
}

#[test]
fn test_config_get_unknown_key_fails() {
    let dir = tempfile::tempdir().unwrap();

    ocrstmt(dir.path())
        .args(["config", "get", "report.nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration key not found"));
}

#[test]
fn test_missing_explicit_config_fails() {
    let dir = tempfile::tempdir().unwrap();

    ocrstmt(dir.path())
        .arg("--config")
        .arg(dir.path().join("absent.json"))
        .args(["run", "--no-open"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load config"));
}

#[test]
fn test_inspect_unreadable_pdf_fails() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("250000001.pdf");
    std::fs::write(&input, "garbage").unwrap();

    ocrstmt(dir.path())
        .arg("inspect")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("PDF"));
}
