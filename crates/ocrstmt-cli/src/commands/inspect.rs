//! Inspect command - show what would be extracted from one statement.

use std::path::PathBuf;

use clap::Args;
use console::style;
use serde_json::json;

use ocrstmt_core::statement::extract_reference;
use ocrstmt_core::{PdfTextDecoder, RuleStatementParser, StatementParser, TextDecoder};

/// Arguments for the inspect command.
#[derive(Args)]
pub struct InspectArgs {
    /// Statement PDF
    #[arg(required = true)]
    input: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Also print the decoded document text
    #[arg(long)]
    show_text: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// Plain text summary
    Text,
}

pub async fn run(args: InspectArgs) -> anyhow::Result<()> {
    if !args.input.is_file() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let text = PdfTextDecoder.decode(&args.input)?;
    let reference = extract_reference(&args.input);
    let result = RuleStatementParser::new().parse(&text);

    match args.format {
        OutputFormat::Json => {
            let mut output = json!({
                "file": &args.input,
                "reference": &reference,
                "fields": &result.fields,
                "complete": result.fields.is_complete(),
                "warnings": &result.warnings,
                "processing_time_ms": result.processing_time_ms,
            });
            if args.show_text {
                output["text"] = json!(text);
            }
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Text => {
            let show = |label: &str, value: Option<&str>| match value {
                Some(v) => println!("{:<24} {}", label, v),
                None => println!("{:<24} {}", label, style("not found").red()),
            };

            println!("{}", style(args.input.display()).bold());
            show("Reference number:", reference.as_deref());
            show("New balance:", result.fields.new_balance.as_deref());
            show("Statement closing date:", result.fields.closing_date.as_deref());
            show("Payment due date:", result.fields.due_date.as_deref());

            for warning in &result.warnings {
                println!("{} {}", style("⚠").yellow(), warning);
            }

            if args.show_text {
                println!();
                println!("{}", style("Decoded text:").bold());
                println!("{}", text);
            }
        }
    }

    Ok(())
}
