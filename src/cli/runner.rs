//! CLI runner - executes commands

use crate::auth::AuthConfig;
use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::SearchConfig;
use crate::engine::{search_windows, PaginationDriver, SearchOutcome};
use crate::error::Result;
use crate::fetch::SearchClient;
use crate::pagination::trim_to_window;
use crate::window::{self, Window, WindowRouter};
use serde_json::{json, Value};
use tracing::{info, warn};

/// Environment variable consulted for a bearer token when no config file
/// is given
pub const BEARER_TOKEN_ENV: &str = "TWITTER_BEARER_TOKEN";

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Search {
                query,
                since,
                until,
                max_results,
                trim,
            } => self.search(query, since, until, *max_results, *trim).await,
            Commands::Daily {
                query,
                days,
                since,
                until,
                step,
                max_results,
                trim,
            } => {
                let router = daily_router(*days, since.as_deref(), until, step)?;
                self.daily(query, &router, *max_results, *trim).await
            }
            Commands::CheckConfig => self.check_config(),
        }
    }

    /// Load configuration from `--config`, or defaults plus an optional
    /// bearer token from the environment
    fn load_config(&self) -> Result<SearchConfig> {
        if let Some(path) = &self.cli.config {
            return SearchConfig::from_file(path);
        }

        let mut config = SearchConfig::default();
        if let Ok(token) = std::env::var(BEARER_TOKEN_ENV) {
            config.credentials = AuthConfig::bearer(token);
        }
        config.validate()?;
        Ok(config)
    }

    /// Build the driver over the HTTP search client
    fn build_driver(config: &SearchConfig) -> Result<PaginationDriver<SearchClient>> {
        let client = SearchClient::from_config(config)?;
        Ok(PaginationDriver::new(client).with_policy(config.pagination.empty_page))
    }

    /// Search a single window, stopping early on Ctrl-C
    async fn search(
        &self,
        text: &str,
        since: &str,
        until: &str,
        max_results: usize,
        trim: bool,
    ) -> Result<()> {
        let config = self.load_config()?;
        let window = Window::new(window::parse_date(since)?, parse_until(until)?)?;
        let query = window.to_query(text, max_results)?;
        let driver = Self::build_driver(&config)?;

        let shutdown = async {
            if tokio::signal::ctrl_c().await.is_err() {
                // No signal handler available; never cancel
                std::future::pending::<()>().await;
            }
        };
        let mut outcome = driver.run_until(&query, shutdown).await?;

        if trim {
            outcome.items = trim_to_window(std::mem::take(&mut outcome.items), &query);
        }

        self.emit_outcome(&window, &outcome);
        Ok(())
    }

    /// Search every window of `router`, one concurrent run per window
    async fn daily(
        &self,
        text: &str,
        router: &WindowRouter,
        max_results: usize,
        trim: bool,
    ) -> Result<()> {
        let config = self.load_config()?;
        let windows = router.windows();
        let driver = Self::build_driver(&config)?;

        info!(query = %text, windows = windows.len(), "Searching daily windows");
        let outcomes = search_windows(&driver, text, &windows, max_results).await;

        for window_outcome in outcomes {
            let window = window_outcome.window;
            match window_outcome.result {
                Ok(mut outcome) => {
                    if trim {
                        let query = window.to_query(text, max_results)?;
                        outcome.items = trim_to_window(std::mem::take(&mut outcome.items), &query);
                    }
                    self.emit_outcome(&window, &outcome);
                }
                Err(e) => {
                    warn!(window = %window, error = %e, "Window skipped");
                    self.output_message(&json!({
                        "type": "LOG",
                        "log": {
                            "level": "WARN",
                            "message": format!("Window {window} skipped: {e}")
                        }
                    }));
                }
            }
        }

        Ok(())
    }

    /// Validate configuration
    fn check_config(&self) -> Result<()> {
        let config = self.load_config()?;
        let rate_limit = config.rate_limit().map(|limits| {
            json!({
                "max_requests": limits.max_requests,
                "window_secs": limits.period.as_secs(),
                "burst_size": limits.burst_size,
            })
        });

        self.output_message(&json!({
            "type": "CONFIG",
            "config": {
                "base_url": config.base_url,
                "search_path": config.search_path,
                "credentials": config.credentials.kind(),
                "timeout_secs": config.http.timeout_secs,
                "rate_limit": rate_limit,
                "records_field": config.pagination.records_field,
                "max_id_inclusive": config.pagination.max_id_inclusive,
                "result_type": config.pagination.result_type,
                "empty_page": config.pagination.empty_page,
            }
        }));

        Ok(())
    }

    /// Print one record per item, then a summary on stderr
    fn emit_outcome(&self, window: &Window, outcome: &SearchOutcome) {
        for item in &outcome.items {
            self.output_message(&json!({
                "type": "RECORD",
                "window": window,
                "record": item,
            }));
        }

        if outcome.completion.is_cancelled() {
            warn!(window = %window, collected = outcome.len(), "Search interrupted");
        } else if outcome.completion.is_degraded() {
            warn!(window = %window, completion = %outcome.completion, "Partial results");
        }

        let stopped = outcome
            .completion
            .stop_reason()
            .map_or_else(|| outcome.completion.to_string(), |reason| reason.to_string());
        eprintln!(
            "{window}: {} posts, {} requests in {}ms, {stopped}",
            outcome.len(),
            outcome.stats.calls(),
            outcome.stats.duration_ms,
        );
    }

    /// Output a message
    fn output_message(&self, msg: &Value) {
        match self.cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(msg).unwrap_or_default());
            }
            OutputFormat::Pretty => {
                println!("{}", serde_json::to_string_pretty(msg).unwrap_or_default());
            }
        }
    }
}

/// Windows for `daily`: `[since, until)` when `since` is given, otherwise
/// the `days` days before `until`
fn daily_router(days: u32, since: Option<&str>, until: &str, step: &str) -> Result<WindowRouter> {
    match since {
        Some(since) => WindowRouter::from_strings(since, until, step),
        None => WindowRouter::trailing(parse_until(until)?, days, window::parse_step(step)?),
    }
}

/// Parse an `--until` value; `today` means the current UTC date
fn parse_until(s: &str) -> Result<chrono::NaiveDate> {
    if s.eq_ignore_ascii_case("today") {
        Ok(window::today())
    } else {
        window::parse_date(s)
    }
}
