use anyhow::{Context, Result};
use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::process;

use tracing::{debug, error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use cdb2net_lib::DumpError;

/// Decode a comdb2 network event log (JSON lines) into a readable protocol trace.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Event log to read. Reads standard input when absent or `-`.
    file: Option<PathBuf>,
    /// Optional path to a file to write diagnostics to, in addition to stderr.
    #[arg(short, long)]
    log_file: Option<PathBuf>,
    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,
}

fn setup_logging(
    log_file_path: Option<&Path>,
    verbosity: &Verbosity<WarnLevel>,
) -> Result<Option<WorkerGuard>> {
    // stdout carries the trace, so diagnostics go to stderr
    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .without_time();

    let (file_layer, guard) = if let Some(path) = log_file_path {
        let log_file = File::create(path)
            .with_context(|| format!("Failed to create log file at: {:?}", path))?;
        let (non_blocking_writer, guard) = tracing_appender::non_blocking(log_file);
        let layer = tracing_subscriber::fmt::layer()
            .with_writer(non_blocking_writer)
            .with_ansi(false)
            .with_target(false);
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    // WARN by default, -v for INFO, -vv for DEBUG; RUST_LOG wins over both
    let filter = EnvFilter::builder()
        .with_default_directive(verbosity.tracing_level_filter().into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    if let Some(path) = log_file_path {
        info!("Logging to file: {:?}", path);
    }

    Ok(guard)
}

fn open_input(path: Option<&Path>) -> Result<Box<dyn BufRead>> {
    match path {
        Some(path) if path != Path::new("-") => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open event log: {:?}", path))?;
            info!("Reading events from {:?}", path);
            Ok(Box::new(BufReader::new(file)))
        }
        _ => {
            info!("Reading events from standard input");
            Ok(Box::new(io::stdin().lock()))
        }
    }
}

fn run_dump(path: Option<&Path>) -> Result<()> {
    let input = open_input(path)?;
    let mut output = io::stdout().lock();

    match cdb2net_lib::run(input, &mut output) {
        Ok(summary) => {
            info!("{}", summary);
            Ok(())
        }
        Err(DumpError::Io(e)) if e.kind() == io::ErrorKind::BrokenPipe => {
            debug!("Output closed, stopping");
            Ok(())
        }
        Err(e) => Err(e).context("Failed to decode event log"),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let guard = setup_logging(cli.log_file.as_deref(), &cli.verbose)?;

    let outcome = run_dump(cli.file.as_deref());
    if let Err(e) = &outcome {
        error!("{:#}", e);
    }

    // Flush the file logger before exiting
    drop(guard);
    if outcome.is_err() {
        process::exit(1);
    }

    Ok(())
}
