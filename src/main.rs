use clap::{ArgAction, Parser, ValueEnum};
use coursepay::application::workflow::WorkflowController;
use coursepay::config::RegistrationConfig;
use coursepay::infrastructure::logging::LoggingObserver;
use coursepay::interfaces::csv::event_reader::EventReader;
use coursepay::interfaces::csv::receipt_writer::ReceiptWriter;
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// The visible receipt as CSV rows
    Csv,
    /// The final workflow state as JSON
    Json,
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Event script CSV file (columns: event, target, value)
    input: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
    format: OutputFormat,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .with_ansi(io::stderr().is_terminal())
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = RegistrationConfig::default();
    let mut workflow = WorkflowController::new(&config);
    workflow.subscribe(Box::new(LoggingObserver::new()));

    // Replay the script; rejected actions are reported and skipped.
    let file = File::open(&cli.input).into_diagnostic()?;
    let reader = EventReader::new(file);
    for (row, event) in reader.events().enumerate() {
        match event {
            Ok(event) => {
                // The controller already logs the rejection itself.
                let _ = workflow.dispatch(event);
            }
            Err(e) if e.is_rejection() => warn!(row = row + 1, "Skipping event: {}", e),
            Err(e) => error!(row = row + 1, "Error reading event: {}", e),
        }
    }

    let stdout = io::stdout();
    match cli.format {
        OutputFormat::Csv => {
            if let Some(receipt) = workflow.receipt() {
                let mut writer = ReceiptWriter::new(stdout.lock());
                writer.write_receipt(receipt).into_diagnostic()?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(stdout.lock(), &workflow.view()).into_diagnostic()?;
            println!();
        }
    }

    Ok(())
}
