//! rollcall - find cadets who are free during a time window.
//!
//! Reads the roster/availability sheet (published CSV export or local file)
//! and answers availability and lookup queries from the command line.

mod args;
mod output;

use std::io;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use rollcall_core::availability::{
    conflicts, parse_busy_cell, parse_window, AvailabilityService, QueryWindow,
};
use rollcall_core::cache::CachedSource;
use rollcall_core::config::Config;
use rollcall_core::error::AvailabilityError;
use rollcall_core::source::RosterSource;

use args::{Args, Command, OutputArgs};

// ============================================================================
// Exit codes
// ============================================================================

const EXIT_FAILURE: u8 = 1;
const EXIT_BAD_INPUT: u8 = 2;
const EXIT_DATA_UNAVAILABLE: u8 = 3;
const EXIT_NOT_FOUND: u8 = 4;

/// Initialize the tracing subscriber for logging
fn init_tracing(verbose: bool) {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let args = Args::parse();
    init_tracing(args.verbose);

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(exit_code(&e))
        }
    }
}

fn exit_code(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<AvailabilityError>() {
        Some(AvailabilityError::Input(_)) => EXIT_BAD_INPUT,
        Some(AvailabilityError::DataUnavailable(_)) => EXIT_DATA_UNAVAILABLE,
        Some(AvailabilityError::NotFound(_)) => EXIT_NOT_FOUND,
        None => EXIT_FAILURE,
    }
}

async fn run(args: Args) -> Result<()> {
    let mut config = Config::load()?;
    apply_source_flags(&mut config, &args);

    match args.command {
        Command::Available {
            day,
            start,
            end,
            output,
        } => available(&config, &day, &start, &end, &output).await,
        Command::Lookup { query, output } => lookup(&config, &query, &output).await,
        Command::Check { cell, start, end } => check(&cell, &start, &end),
        Command::Config {
            set_csv,
            set_url,
            set_ttl,
        } => update_config(set_csv, set_url, set_ttl),
    }
}

/// `--csv` and `--url` replace whatever source the config names.
fn apply_source_flags(config: &mut Config, args: &Args) {
    if let Some(ref path) = args.csv {
        config.csv_path = Some(path.clone());
    }
    if let Some(ref url) = args.url {
        config.sheet_csv_url = Some(url.clone());
        config.csv_path = None;
    }
}

fn service(config: &Config) -> Result<AvailabilityService<CachedSource<RosterSource>>> {
    let source = RosterSource::from_config(config).map_err(AvailabilityError::from)?;
    info!(source = %source.describe(), "Using roster source");
    Ok(AvailabilityService::new(CachedSource::with_ttl(
        source,
        config.cache_ttl(),
    )))
}

async fn available(
    config: &Config,
    day: &str,
    start: &str,
    end: &str,
    output: &OutputArgs,
) -> Result<()> {
    let query = QueryWindow::parse(day, start, end)
        .map_err(AvailabilityError::from)?;
    let service = service(config)?;
    let people = service
        .find_available(day, start, end, output.org.as_deref())
        .await?;
    debug!(matched = people.len(), "Available cadets");

    if output.json {
        println!("{}", serde_json::to_string_pretty(&people)?);
    } else {
        print!("{}", output::render_available(query, &people));
    }
    Ok(())
}

async fn lookup(config: &Config, query: &str, output: &OutputArgs) -> Result<()> {
    let service = service(config)?;
    let person = service.lookup_person(query, output.org.as_deref()).await?;

    if output.json {
        println!("{}", serde_json::to_string_pretty(&person)?);
    } else {
        print!("{}", output::render_person(&person));
    }
    Ok(())
}

fn check(cell: &str, start: &str, end: &str) -> Result<()> {
    let window = parse_window(start, end).map_err(AvailabilityError::from)?;
    let busy = parse_busy_cell(cell);
    let hits = conflicts(&busy, window);
    print!("{}", output::render_check(window, &busy, &hits));
    Ok(())
}

fn update_config(
    set_csv: Option<std::path::PathBuf>,
    set_url: Option<String>,
    set_ttl: Option<i64>,
) -> Result<()> {
    let path = Config::config_path()?;
    // Edit the file as saved, without environment overrides
    let mut config = Config::load_from(&path)?;
    let changed = set_csv.is_some() || set_url.is_some() || set_ttl.is_some();

    if let Some(csv) = set_csv {
        config.csv_path = Some(csv);
    }
    if let Some(url) = set_url {
        config.sheet_csv_url = Some(url);
    }
    if let Some(ttl) = set_ttl {
        config.cache_ttl_minutes = ttl;
    }
    if changed {
        config.save().context("Failed to save config")?;
        info!(path = %path.display(), "Config saved");
    }

    println!("# {}", path.display());
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}
