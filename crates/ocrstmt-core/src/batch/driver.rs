//! Sequential batch driver.

use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::{Local, NaiveDate};
use tracing::{debug, error, info, warn};

use super::{
    resolve_input, BatchObserver, BatchReport, BatchRequest, BatchState, DocumentResult,
    DocumentStatus, FolderRevealer, SystemRevealer,
};
use crate::error::Result;
use crate::lookup::RecordLookup;
use crate::models::config::ReportConfig;
use crate::pdf::{PdfTextDecoder, TextDecoder};
use crate::report::ReportWriter;
use crate::statement::{extract_reference, RuleStatementParser, StatementParser};

type Decoder = Box<dyn TextDecoder + Send + Sync>;
type Parser = Box<dyn StatementParser + Send + Sync>;
type Lookup = Box<dyn RecordLookup + Send + Sync>;
type Revealer = Box<dyn FolderRevealer + Send + Sync>;

/// Runs statement batches against a lookup and a report writer.
///
/// Documents are processed one at a time in discovery order. The run date is
/// fixed when the batch starts, so every document of a batch lands in the
/// same report even across midnight.
pub struct BatchDriver {
    decoder: Decoder,
    parser: Parser,
    lookup: Lookup,
    revealer: Option<Revealer>,
    report: ReportConfig,
    run_date: Option<NaiveDate>,
}

impl BatchDriver {
    /// Create a driver using the PDF text decoder, the rule parser and the
    /// system folder revealer.
    pub fn new(lookup: impl RecordLookup + Send + Sync + 'static) -> Self {
        Self {
            decoder: Box::new(PdfTextDecoder),
            parser: Box::new(RuleStatementParser::new()),
            lookup: Box::new(lookup),
            revealer: Some(Box::new(SystemRevealer)),
            report: ReportConfig::default(),
            run_date: None,
        }
    }

    pub fn with_decoder(mut self, decoder: impl TextDecoder + Send + Sync + 'static) -> Self {
        self.decoder = Box::new(decoder);
        self
    }

    pub fn with_parser(mut self, parser: impl StatementParser + Send + Sync + 'static) -> Self {
        self.parser = Box::new(parser);
        self
    }

    pub fn with_revealer(mut self, revealer: impl FolderRevealer + Send + Sync + 'static) -> Self {
        self.revealer = Some(Box::new(revealer));
        self
    }

    /// Do not open the output folder when the batch finishes.
    pub fn without_reveal(mut self) -> Self {
        self.revealer = None;
        self
    }

    pub fn with_report_config(mut self, config: ReportConfig) -> Self {
        self.report = config;
        self
    }

    /// Pin the date used to name the report. Defaults to today.
    pub fn with_run_date(mut self, date: NaiveDate) -> Self {
        self.run_date = Some(date);
        self
    }

    /// Run a batch without progress reporting.
    pub fn run(&self, request: &BatchRequest) -> Result<BatchReport> {
        self.run_with(request, &mut ())
    }

    /// Run a batch, reporting state changes and per-document results to
    /// `observer`.
    ///
    /// Only an unusable input or report configuration fails the batch;
    /// everything that goes wrong with a single document is recorded in its
    /// [`DocumentResult`].
    pub fn run_with(
        &self,
        request: &BatchRequest,
        observer: &mut dyn BatchObserver,
    ) -> Result<BatchReport> {
        observer.on_state(&BatchState::Idle);

        let run_date = self.run_date.unwrap_or_else(|| Local::now().date_naive());
        let writer = ReportWriter::new(&request.output_dir, run_date, &self.report)?;

        observer.on_state(&BatchState::ResolvingInput);
        let documents = resolve_input(&request.input)?;
        info!(
            "Processing {} documents from {}",
            documents.len(),
            request.input.display()
        );

        if let Err(e) = std::fs::create_dir_all(&request.output_dir) {
            warn!(
                "Cannot create output folder {}: {}",
                request.output_dir.display(),
                e
            );
        }

        observer.on_state(&BatchState::Iterating {
            total: documents.len(),
        });

        let mut results = Vec::with_capacity(documents.len());
        for (index, path) in documents.iter().enumerate() {
            observer.on_state(&BatchState::ProcessingDocument {
                index,
                path: path.clone(),
            });

            let result = self.process_isolated(path, &writer);
            observer.on_document(&result);
            results.push(result);
        }

        observer.on_state(&BatchState::Done);

        let revealed = self.reveal(&request.output_dir);

        Ok(BatchReport {
            output_file: writer.path().to_path_buf(),
            documents: results,
            revealed,
        })
    }

    fn process_isolated(&self, path: &Path, writer: &ReportWriter) -> DocumentResult {
        let start = Instant::now();

        let mut result = match panic::catch_unwind(AssertUnwindSafe(|| {
            self.process_document(path, writer)
        })) {
            Ok(result) => result,
            Err(payload) => {
                let reason = panic_message(payload.as_ref());
                error!("Processing {} aborted: {}", path.display(), reason);
                let mut result = DocumentResult::new(path);
                result.status = DocumentStatus::Failed;
                result.message = Some(reason);
                result
            }
        };

        result.processing_time_ms = start.elapsed().as_millis() as u64;
        result
    }

    fn process_document(&self, path: &Path, writer: &ReportWriter) -> DocumentResult {
        let mut result = DocumentResult::new(path);
        info!("Processing: {}", path.display());

        let text = match self.decoder.decode(path) {
            Ok(text) => text,
            Err(e) => {
                warn!("No text from {}: {}", path.display(), e);
                result.warnings.push(format!("text extraction failed: {}", e));
                String::new()
            }
        };

        result.reference = extract_reference(path);
        if result.reference.is_none() {
            debug!("No reference number in file name {}", path.display());
        }

        let extraction = self.parser.parse(&text);
        result.warnings.extend(extraction.warnings);
        result.fields = extraction.fields;

        let Some(fields) = result.fields.complete() else {
            let missing = result.fields.missing().join(", ");
            info!("Skipping {}: missing {}", path.display(), missing);
            result.status = DocumentStatus::MissingFields;
            result.message = Some(format!("missing {}", missing));
            return result;
        };

        // gated on the fields only; a missing reference is looked up as NULL
        let rows = match self.lookup.lookup(result.reference.as_deref()) {
            Ok(rows) => {
                if rows.is_empty() {
                    result.message = Some(match result.reference.as_deref() {
                        Some(reference) => format!("no accounts match reference {}", reference),
                        None => "no reference number in file name".to_string(),
                    });
                }
                rows
            }
            Err(e) => {
                warn!("Lookup for {} failed: {}", path.display(), e);
                result.status = DocumentStatus::LookupDegraded;
                result.message = Some(e.to_string());
                Vec::new()
            }
        };

        match writer.write(&rows, &fields) {
            Ok(outcome) => result.rows_written = outcome.appended_rows,
            Err(e) => {
                error!("Writing report for {} failed: {}", path.display(), e);
                result.status = DocumentStatus::WriteFailed;
                result.message = Some(e.to_string());
                return result;
            }
        }

        if !writer.path().exists() {
            warn!("Report not found after write: {}", writer.path().display());
        }

        result
    }

    fn reveal(&self, dir: &Path) -> bool {
        let Some(revealer) = &self.revealer else {
            return false;
        };
        match revealer.reveal(dir) {
            Ok(()) => true,
            Err(e) => {
                warn!("Cannot open output folder {}: {}", dir.display(), e);
                false
            }
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unexpected panic".to_string()
    }
}

/// Default location of the report workbook when no output folder is given.
pub fn default_output_dir(input: &Path) -> PathBuf {
    if input.is_dir() {
        input.to_path_buf()
    } else {
        input
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}
