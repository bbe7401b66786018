//! End-to-end batch runs over a temporary folder and SQLite database.

use std::path::Path;

use chrono::NaiveDate;
use ocrstmt_core::error::PdfError;
use ocrstmt_core::lookup::StaticSecretProvider;
use ocrstmt_core::{
    BatchDriver, BatchRequest, DocumentStatus, ReportTable, SqlRecordLookup, TextDecoder,
};
use pretty_assertions::assert_eq;
use rusqlite::Connection;

const STATEMENT: &str = "\
ACME BANK
Account Summary
New Balance: $1,234.56
Statement Closing Date
03/15/2024
Payment Due Date:
04/10/2024
";

/// Treats the "PDF" as plain text so tests do not need real documents.
struct PlainText;

impl TextDecoder for PlainText {
    fn decode(&self, path: &Path) -> Result<String, PdfError> {
        std::fs::read_to_string(path).map_err(|e| PdfError::Read {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

fn seed_database(path: &Path) {
    let conn = Connection::open(path).unwrap();
    conn.execute_batch(
        r#"
        CREATE TABLE MASTER (
            FILENO INTEGER PRIMARY KEY,
            FORW_FILENO TEXT,
            FORW_REFNO TEXT,
            CHARGE_OFF TEXT,
            ORIG_CLAIM TEXT,
            CHARGE_OFF_DATE TEXT
        );
        CREATE TABLE DEBTOR (FILENO INTEGER, NAME TEXT);
        INSERT INTO MASTER VALUES (1001, '0004111222233334444', '250000001', 'Y', '5000.00', '2023-06-30');
        INSERT INTO DEBTOR VALUES (1001, 'JANE DOE');
        "#,
    )
    .unwrap();
}

struct Fixture {
    _root: tempfile::TempDir,
    input: std::path::PathBuf,
    output: std::path::PathBuf,
    database: std::path::PathBuf,
}

fn fixture() -> Fixture {
    let root = tempfile::tempdir().unwrap();
    let input = root.path().join("statements");
    let output = root.path().join("reports");
    let database = root.path().join("accounts.db");

    std::fs::create_dir(&input).unwrap();
    std::fs::write(input.join("250000001_stmt.pdf"), STATEMENT).unwrap();
    std::fs::write(input.join("garbage.pdf"), "%PDF-1.4 nothing useful here").unwrap();
    seed_database(&database);

    Fixture {
        _root: root,
        input,
        output,
        database,
    }
}

fn driver(database: &Path) -> BatchDriver {
    BatchDriver::new(SqlRecordLookup::new(StaticSecretProvider::new(database)))
        .with_decoder(PlainText)
        .with_run_date(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap())
        .without_reveal()
}

#[test]
fn test_folder_batch_writes_one_row() {
    let fx = fixture();

    let report = driver(&fx.database)
        .run(&BatchRequest::new(&fx.input, &fx.output))
        .unwrap();

    assert_eq!(
        report.output_file,
        fx.output.join("ocr_statement_output_03-15-2024.xlsx")
    );
    assert_eq!(report.documents.len(), 2);

    let garbage = &report.documents[1];
    assert_eq!(garbage.path, fx.input.join("garbage.pdf"));
    assert_eq!(garbage.status, DocumentStatus::MissingFields);
    assert_eq!(garbage.rows_written, 0);

    let statement = &report.documents[0];
    assert_eq!(statement.status, DocumentStatus::Success);
    assert_eq!(statement.reference.as_deref(), Some("250000001"));
    assert_eq!(statement.rows_written, 1);

    let table = ReportTable::load(&report.output_file).unwrap();
    assert_eq!(table.len(), 1);
    assert_eq!(
        table.rows()[0].cells(),
        [
            "'1001",
            "0004111222233334444",
            "250000001",
            "JANE DOE",
            "Y",
            "5000.00",
            "2023-06-30",
            "0004111222233334444",
            "$1,234.56",
            "03/15/2024",
            "04/10/2024",
        ]
    );
}

#[test]
fn test_rerun_on_same_day_duplicates_rows() {
    let fx = fixture();
    let driver = driver(&fx.database);
    let request = BatchRequest::new(&fx.input, &fx.output);

    let first = driver.run(&request).unwrap();
    let second = driver.run(&request).unwrap();
    assert_eq!(first.output_file, second.output_file);

    let table = ReportTable::load(&second.output_file).unwrap();
    assert_eq!(table.len(), 2);
    assert_eq!(table.rows()[0], table.rows()[1]);
}

#[test]
fn test_single_file_input() {
    let fx = fixture();

    let report = driver(&fx.database)
        .run(&BatchRequest::new(
            fx.input.join("250000001_stmt.pdf"),
            &fx.output,
        ))
        .unwrap();

    assert_eq!(report.documents.len(), 1);
    assert_eq!(report.rows_written(), 1);
}

#[test]
fn test_database_outage_degrades() {
    let fx = fixture();
    std::fs::remove_file(&fx.database).unwrap();

    let report = driver(&fx.database)
        .run(&BatchRequest::new(&fx.input, &fx.output))
        .unwrap();

    assert_eq!(report.count(DocumentStatus::LookupDegraded), 1);
    assert_eq!(report.count(DocumentStatus::MissingFields), 1);
    assert_eq!(report.rows_written(), 0);
    assert!(ReportTable::load(&report.output_file).unwrap().is_empty());
}

#[test]
fn test_unwritable_report_does_not_stop_batch() {
    let fx = fixture();
    std::fs::write(fx.input.join("250000001_second.pdf"), STATEMENT).unwrap();
    std::fs::create_dir_all(&fx.output).unwrap();
    // an existing report that cannot be parsed is left alone
    std::fs::write(
        fx.output.join("ocr_statement_output_03-15-2024.xlsx"),
        b"not a workbook",
    )
    .unwrap();

    let report = driver(&fx.database)
        .run(&BatchRequest::new(&fx.input, &fx.output))
        .unwrap();

    assert_eq!(report.documents.len(), 3);
    assert_eq!(report.count(DocumentStatus::WriteFailed), 2);
    assert_eq!(report.count(DocumentStatus::MissingFields), 1);
    assert_eq!(
        std::fs::read(&report.output_file).unwrap(),
        b"not a workbook"
    );
}

#[test]
fn test_statement_without_reference_matches_nothing() {
    let fx = fixture();
    std::fs::write(fx.input.join("march_statement.pdf"), STATEMENT).unwrap();

    let report = driver(&fx.database)
        .run(&BatchRequest::new(
            fx.input.join("march_statement.pdf"),
            &fx.output,
        ))
        .unwrap();

    let doc = &report.documents[0];
    assert_eq!(doc.reference, None);
    assert_eq!(doc.status, DocumentStatus::Success);
    assert_eq!(doc.rows_written, 0);
    assert!(ReportTable::load(&report.output_file).unwrap().is_empty());
}

#[test]
fn test_statement_without_reference_still_queries_database() {
    let fx = fixture();
    std::fs::write(fx.input.join("march_statement.pdf"), STATEMENT).unwrap();
    std::fs::remove_file(&fx.database).unwrap();

    let report = driver(&fx.database)
        .run(&BatchRequest::new(
            fx.input.join("march_statement.pdf"),
            &fx.output,
        ))
        .unwrap();

    // the lookup ran (and failed) even though there was no reference
    assert_eq!(report.documents[0].status, DocumentStatus::LookupDegraded);
}
