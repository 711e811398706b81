//! Search client configuration
//!
//! Loaded from YAML or JSON. String values may reference the environment
//! with `{{ env.NAME }}`, which is how credentials are meant to be supplied:
//!
//! ```yaml
//! credentials:
//!   type: app_only
//!   consumer_key: "{{ env.TWITTER_CONSUMER_KEY }}"
//!   consumer_secret: "{{ env.TWITTER_CONSUMER_SECRET }}"
//! pagination:
//!   empty_page:
//!     policy: tolerate
//!     max_consecutive: 1
//! ```

use crate::auth::AuthConfig;
use crate::error::{Error, Result, ResultExt};
use crate::fetch::{SearchEndpoint, DEFAULT_RECORDS_FIELD, DEFAULT_SEARCH_PATH};
use crate::http::{HttpClientConfig, RateLimiterConfig};
use crate::pagination::EmptyPagePolicy;
use crate::template::{self, TemplateContext};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

// ============================================================================
// Top-Level Config
// ============================================================================

/// Complete search client configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    /// Base URL of the search API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Search path relative to `base_url`
    #[serde(default = "default_search_path")]
    pub search_path: String,

    /// Credentials for the search API
    #[serde(default)]
    pub credentials: AuthConfig,

    /// HTTP client settings
    #[serde(default)]
    pub http: HttpSettings,

    /// Paging behaviour
    #[serde(default)]
    pub pagination: PaginationSettings,
}

fn default_base_url() -> String {
    "https://api.twitter.com/1.1".to_string()
}

fn default_search_path() -> String {
    DEFAULT_SEARCH_PATH.to_string()
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            search_path: default_search_path(),
            credentials: AuthConfig::default(),
            http: HttpSettings::default(),
            pagination: PaginationSettings::default(),
        }
    }
}

// ============================================================================
// HTTP Settings
// ============================================================================

/// HTTP client settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HttpSettings {
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Requests allowed per rate limit window (0 disables rate limiting)
    pub max_requests: u32,
    /// Rate limit window in seconds
    pub window_secs: u64,
    /// Requests allowed back to back
    pub burst_size: u32,
    /// User agent override
    pub user_agent: Option<String>,
}

impl Default for HttpSettings {
    fn default() -> Self {
        let limits = RateLimiterConfig::default();
        Self {
            timeout_secs: 30,
            max_requests: limits.max_requests,
            window_secs: limits.period.as_secs(),
            burst_size: limits.burst_size,
            user_agent: None,
        }
    }
}

// ============================================================================
// Pagination Settings
// ============================================================================

/// Paging behaviour
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PaginationSettings {
    /// Envelope field holding the posts
    pub records_field: String,
    /// Whether the service returns the `max_id` post itself
    pub max_id_inclusive: bool,
    /// `result_type` parameter (`recent`, `mixed`, `popular`)
    pub result_type: Option<String>,
    /// Additional fixed query parameters
    pub extra_params: BTreeMap<String, String>,
    /// What an empty page means
    pub empty_page: EmptyPagePolicy,
}

impl Default for PaginationSettings {
    fn default() -> Self {
        Self {
            records_field: DEFAULT_RECORDS_FIELD.to_string(),
            max_id_inclusive: true,
            result_type: Some("recent".to_string()),
            extra_params: BTreeMap::new(),
            empty_page: EmptyPagePolicy::default(),
        }
    }
}

// ============================================================================
// Loading
// ============================================================================

impl SearchConfig {
    /// Load from a YAML or JSON file, interpolating the process environment.
    ///
    /// Files ending in `.json` are parsed as JSON, everything else as YAML.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path)?;
        let ctx = TemplateContext::from_env();
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));

        let loaded = if is_json {
            Self::from_json_str(&content, &ctx)
        } else {
            Self::from_yaml_str(&content, &ctx)
        };
        loaded.with_context(|| format!("Loading {}", path.display()))
    }

    /// Parse YAML content
    pub fn from_yaml_str(content: &str, ctx: &TemplateContext) -> Result<Self> {
        let raw: Value = if content.trim().is_empty() {
            Value::Null
        } else {
            serde_yaml::from_str(content)?
        };
        Self::from_value(&raw, ctx)
    }

    /// Parse JSON content
    pub fn from_json_str(content: &str, ctx: &TemplateContext) -> Result<Self> {
        let raw: Value = serde_json::from_str(content)?;
        Self::from_value(&raw, ctx)
    }

    /// Interpolate templates in a raw document and deserialize it
    pub fn from_value(raw: &Value, ctx: &TemplateContext) -> Result<Self> {
        // An empty file parses as null
        let raw = if raw.is_null() {
            Value::Object(serde_json::Map::new())
        } else {
            template::render_value(raw, ctx)?
        };
        let config: Self = serde_json::from_value(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the configuration is usable
    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(Error::missing_field("base_url"));
        }
        url::Url::parse(&self.base_url)?;

        if self.search_path.trim().is_empty() {
            return Err(Error::missing_field("search_path"));
        }
        if self.pagination.records_field.trim().is_empty() {
            return Err(Error::missing_field("pagination.records_field"));
        }
        if self.http.timeout_secs == 0 {
            return Err(Error::config("http.timeout_secs must be positive"));
        }
        if self.http.max_requests > 0 && self.http.window_secs == 0 {
            return Err(Error::config("http.window_secs must be positive"));
        }

        match &self.credentials {
            AuthConfig::None => {}
            AuthConfig::Bearer { token } => {
                if token.trim().is_empty() {
                    return Err(Error::missing_field("credentials.token"));
                }
            }
            AuthConfig::AppOnly {
                consumer_key,
                consumer_secret,
                token_url,
            } => {
                if consumer_key.trim().is_empty() {
                    return Err(Error::missing_field("credentials.consumer_key"));
                }
                if consumer_secret.trim().is_empty() {
                    return Err(Error::missing_field("credentials.consumer_secret"));
                }
                url::Url::parse(token_url)?;
            }
        }

        Ok(())
    }

    /// Rate limiter settings, `None` when disabled
    pub fn rate_limit(&self) -> Option<RateLimiterConfig> {
        (self.http.max_requests > 0).then(|| {
            RateLimiterConfig::new(
                self.http.max_requests,
                Duration::from_secs(self.http.window_secs),
                self.http.burst_size,
            )
        })
    }

    /// HTTP client settings derived from this config
    pub fn http_client_config(&self) -> HttpClientConfig {
        let mut builder = HttpClientConfig::builder()
            .base_url(self.base_url.as_str())
            .timeout(Duration::from_secs(self.http.timeout_secs));

        builder = match self.rate_limit() {
            Some(limits) => builder.rate_limit(limits),
            None => builder.no_rate_limit(),
        };

        if let Some(agent) = &self.http.user_agent {
            builder = builder.user_agent(agent.as_str());
        }

        builder.build()
    }

    /// Search endpoint settings derived from this config
    pub fn endpoint(&self) -> SearchEndpoint {
        SearchEndpoint {
            path: self.search_path.clone(),
            records_field: self.pagination.records_field.clone(),
            max_id_inclusive: self.pagination.max_id_inclusive,
            result_type: self.pagination.result_type.clone(),
            extra_params: self.pagination.extra_params.clone(),
        }
    }
}
