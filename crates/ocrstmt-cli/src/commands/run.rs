//! Run command - process a statement PDF or a folder of them.

use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use ocrstmt_core::batch::default_output_dir;
use ocrstmt_core::lookup::{EnvSecretProvider, FileSecretProvider};
use ocrstmt_core::models::config::AppConfig;
use ocrstmt_core::{
    BatchDriver, BatchObserver, BatchReport, BatchRequest, BatchState, DocumentResult,
    DocumentStatus, SecretProvider, SqlRecordLookup,
};

/// Arguments for the run command.
#[derive(Args)]
pub struct RunArgs {
    /// Statement PDF or folder of statements
    #[arg(required = true)]
    input: PathBuf,

    /// Folder for the report workbook (default: the input folder)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// JSON file with the database connection settings
    #[arg(long)]
    credentials: Option<PathBuf>,

    /// Write a per-document summary CSV
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Print the batch report as JSON
    #[arg(long)]
    json: bool,

    /// Do not open the output folder when done
    #[arg(long)]
    no_open: bool,
}

/// Drives a progress bar from batch events.
struct ProgressObserver {
    pb: ProgressBar,
}

impl ProgressObserver {
    fn new(hidden: bool) -> anyhow::Result<Self> {
        let pb = if hidden {
            ProgressBar::hidden()
        } else {
            ProgressBar::new(0)
        };
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
                .progress_chars("=>-"),
        );
        Ok(Self { pb })
    }
}

impl BatchObserver for ProgressObserver {
    fn on_state(&mut self, state: &BatchState) {
        match state {
            BatchState::Iterating { total } => self.pb.set_length(*total as u64),
            BatchState::ProcessingDocument { path, .. } => {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                self.pb.set_message(name);
            }
            BatchState::Done => self.pb.finish_and_clear(),
            BatchState::Idle | BatchState::ResolvingInput => {}
        }
    }

    fn on_document(&mut self, result: &DocumentResult) {
        debug!("{} -> {}", result.path.display(), result.status);
        self.pb.inc(1);
    }
}

pub async fn run(args: RunArgs, config: AppConfig) -> anyhow::Result<()> {
    let start = Instant::now();

    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| default_output_dir(&args.input));
    let request = BatchRequest::new(&args.input, &output_dir);

    let lookup = SqlRecordLookup::new(secret_provider(&args, &config));
    let mut driver = BatchDriver::new(lookup).with_report_config(config.report.clone());
    if args.no_open || !config.batch.reveal_output {
        driver = driver.without_reveal();
    }

    info!(
        "Running batch: {} -> {}",
        request.input.display(),
        request.output_dir.display()
    );

    let mut observer = ProgressObserver::new(args.json)?;
    let report = tokio::task::spawn_blocking(move || driver.run_with(&request, &mut observer))
        .await??;

    if let Some(summary_path) = &args.summary {
        write_summary(summary_path, &report)?;
        if !args.json {
            println!(
                "{} Summary written to {}",
                style("✓").green(),
                summary_path.display()
            );
        }
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_summary(&report, start);
    }

    Ok(())
}

fn secret_provider(args: &RunArgs, config: &AppConfig) -> Box<dyn SecretProvider + Send + Sync> {
    match args
        .credentials
        .as_ref()
        .or(config.database.credentials_file.as_ref())
    {
        Some(path) => {
            debug!("Using credentials file {}", path.display());
            Box::new(FileSecretProvider::new(path))
        }
        None => {
            debug!("Using database from ${}", config.database.database_env);
            Box::new(EnvSecretProvider::new(&config.database.database_env))
        }
    }
}

fn print_summary(report: &BatchReport, start: Instant) {
    println!();
    println!(
        "{} Processed {} documents in {:?}",
        style("✓").green(),
        report.documents.len(),
        start.elapsed()
    );
    println!(
        "   {} succeeded, {} missing fields, {} lookup degraded, {} write failed, {} failed",
        style(report.count(DocumentStatus::Success)).green(),
        style(report.count(DocumentStatus::MissingFields)).yellow(),
        style(report.count(DocumentStatus::LookupDegraded)).yellow(),
        style(report.count(DocumentStatus::WriteFailed)).red(),
        style(report.count(DocumentStatus::Failed)).red(),
    );
    println!(
        "   {} rows written to {}",
        report.rows_written(),
        report.output_file.display()
    );

    let problems: Vec<_> = report.problems().collect();
    if !problems.is_empty() {
        println!();
        println!("{}", style("Documents needing attention:").yellow());
        for result in problems {
            println!(
                "  - {} [{}]: {}",
                result.path.display(),
                result.status,
                result.message.as_deref().unwrap_or("")
            );
        }
    }
}

fn write_summary(path: &Path, report: &BatchReport) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "file",
        "status",
        "reference",
        "new_balance",
        "closing_date",
        "due_date",
        "rows_written",
        "processing_time_ms",
        "message",
    ])?;

    for result in &report.documents {
        let file = result.path.display().to_string();
        wtr.write_record([
            file.as_str(),
            result.status.as_str(),
            result.reference.as_deref().unwrap_or(""),
            result.fields.new_balance.as_deref().unwrap_or(""),
            result.fields.closing_date.as_deref().unwrap_or(""),
            result.fields.due_date.as_deref().unwrap_or(""),
            &result.rows_written.to_string(),
            &result.processing_time_ms.to_string(),
            result.message.as_deref().unwrap_or(""),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
