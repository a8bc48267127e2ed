use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};
use rollcall_core::config::MAX_CACHE_TTL_MINUTES;

/// Find cadets who are free during a time window.
///
/// The roster comes from a published sheet CSV export or a local CSV file.
/// Each weekday column lists the cadet's busy blocks, e.g. "0900-1000, 1330-1500".
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// (file path) Read the roster from this CSV file instead of the configured source.
    #[arg(long, global = true, conflicts_with = "url")]
    pub csv: Option<PathBuf>,

    /// (URL) Fetch the roster from this published CSV export instead of the configured source.
    #[arg(long, global = true)]
    pub url: Option<String>,

    /// Turn on debug logging to standard error.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List cadets free for the whole window, ranked by class level then name.
    Available {
        /// Monday through Friday, or Mon..Fri
        day: String,
        /// Window start, HHMM 24-hour (e.g. 0830)
        start: String,
        /// Window end, HHMM 24-hour; must be after start
        end: String,
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Show one cadet's record, by school email or "First Last".
    Lookup {
        query: String,
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Parse a single busy cell and report which blocks collide with a window.
    Check {
        /// Cell text as typed in the sheet, e.g. "0900-1000; 13:30-15:00"
        cell: String,
        start: String,
        end: String,
    },

    /// Show or update the saved configuration.
    Config {
        /// Save this CSV file as the roster source.
        #[arg(long)]
        set_csv: Option<PathBuf>,
        /// Save this published CSV URL as the roster source.
        #[arg(long)]
        set_url: Option<String>,
        /// Snapshot lifetime in minutes (0 to one week).
        #[arg(long, value_parser = clap::value_parser!(i64).range(0..=MAX_CACHE_TTL_MINUTES))]
        set_ttl: Option<i64>,
    },
}

#[derive(ClapArgs, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Only cadets whose organization contains this text (case-insensitive).
    #[arg(long)]
    pub org: Option<String>,

    /// Print JSON instead of a table.
    #[arg(long)]
    pub json: bool,
}
