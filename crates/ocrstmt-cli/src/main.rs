//! CLI application for credit card statement processing.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{config, inspect, run};

/// Match credit card statement PDFs to collection accounts and append them
/// to the daily xlsx report
#[derive(Parser)]
#[command(name = "ocrstmt")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase log detail (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Config file (default: <config dir>/ocrstmt/config.json)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process a statement PDF or a folder of statements
    Run(run::RunArgs),

    /// Show the fields extracted from a single statement
    Inspect(inspect::InspectArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

/// Map the `-v` count to a log level: warnings by default, then info,
/// debug and trace.
fn log_level(verbose: u8) -> Level {
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so `run --json` and `inspect -f json` stay parseable
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level(cli.verbose))
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Run(args) => run::run(args, config::load_config(config_path)?).await,
        Commands::Inspect(args) => inspect::run(args).await,
        Commands::Config(args) => config::run(args, config_path).await,
    }
}
