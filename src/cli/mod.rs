//! CLI module
//!
//! Command-line interface for running searches.
//!
//! # Commands
//!
//! - `search` - Collect posts for one date window
//! - `daily` - Collect posts for each of the last N days
//! - `check-config` - Validate a configuration file

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::{Runner, BEARER_TOKEN_ENV};
