//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Windowed post search
#[derive(Parser, Debug)]
#[command(name = "tweetset")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML or JSON)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search one date window
    Search {
        /// Search text (e.g. '$AAPL')
        #[arg(short, long)]
        query: String,

        /// First day of the window (YYYY-MM-DD)
        #[arg(long)]
        since: String,

        /// Day after the last day of the window (YYYY-MM-DD or 'today')
        #[arg(long, default_value = "today")]
        until: String,

        /// Stop once at least this many posts are collected
        #[arg(short, long, default_value = "100")]
        max_results: usize,

        /// Drop posts older than the window start
        #[arg(long)]
        trim: bool,
    },

    /// Search consecutive windows concurrently, one day each by default
    Daily {
        /// Search text (e.g. '$AAPL')
        #[arg(short, long)]
        query: String,

        /// Number of trailing days
        #[arg(short, long, default_value = "7")]
        days: u32,

        /// First searched day (YYYY-MM-DD); replaces --days
        #[arg(long, conflicts_with = "days")]
        since: Option<String>,

        /// Day after the last searched day (YYYY-MM-DD or 'today')
        #[arg(long, default_value = "today")]
        until: String,

        /// Window length (e.g. '1d', '2w')
        #[arg(long, default_value = "1d")]
        step: String,

        /// Stop each day once at least this many posts are collected
        #[arg(short, long, default_value = "100")]
        max_results: usize,

        /// Drop posts that fall outside their day
        #[arg(long)]
        trim: bool,
    },

    /// Validate the configuration file
    CheckConfig,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one message per line)
    Json,
    /// Human-readable output
    Pretty,
}
