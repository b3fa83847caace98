//! dataclean - batch cleaning of a delimited data file

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::Parser;

use dataclean::config::{DEFAULT_INPUT_PATH, DEFAULT_LOG_PATH, DEFAULT_OUTPUT_PATH};
use dataclean::output::JsonOutput;
use dataclean::{run_pipeline, CleanError, Config};

/// Clean a delimited data file and append an audit trail
#[derive(Parser, Debug)]
#[command(name = "dataclean")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Raw input file
    #[arg(short, long, default_value = DEFAULT_INPUT_PATH)]
    input: PathBuf,

    /// Where the cleaned file is written
    #[arg(short, long, default_value = DEFAULT_OUTPUT_PATH)]
    output: PathBuf,

    /// Append-only audit log
    #[arg(short, long, default_value = DEFAULT_LOG_PATH)]
    log: PathBuf,

    /// Field delimiter for input and output (default: by file extension)
    #[arg(short, long)]
    delimiter: Option<char>,

    /// Do not mirror audit lines to stdout
    #[arg(short, long)]
    quiet: bool,

    /// Print a JSON run summary to stdout when done
    #[arg(long)]
    json: bool,

    /// Diagnostic log level on stderr (overridden by RUST_LOG)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

/// Initialize the tracing subscriber for diagnostics.
///
/// Diagnostics go to stderr; stdout is reserved for audit lines and JSON.
fn init_logging(level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let mut config = Config::new(cli.input, cli.output, cli.log).with_echo_audit(!cli.quiet);

    if let Some(delimiter) = cli.delimiter {
        if !delimiter.is_ascii() {
            bail!("Delimiter must be a single ASCII character, got {delimiter:?}");
        }
        config = config.with_delimiter(delimiter as u8);
    }

    let summary = match run_pipeline(&config) {
        Err(CleanError::InputNotFound(path)) => {
            println!("ERROR: File not found at {}", path.display());
            return Ok(ExitCode::from(1));
        }
        other => other.context("Cleaning pipeline failed")?,
    };

    if cli.json {
        let mut stdout = std::io::stdout();
        JsonOutput::new()
            .render(&summary, &mut stdout)
            .context("Failed to render run summary")?;
    }

    Ok(ExitCode::SUCCESS)
}
