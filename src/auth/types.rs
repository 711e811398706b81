//! Auth configuration types
//!
//! These types represent the runtime auth configuration after template
//! interpolation has been applied.

use serde::Deserialize;
use std::fmt;

/// Token endpoint for app-only authentication
pub const DEFAULT_TOKEN_URL: &str = "https://api.twitter.com/oauth2/token";

fn default_token_url() -> String {
    DEFAULT_TOKEN_URL.to_string()
}

/// Authentication configuration (after template interpolation)
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AuthConfig {
    /// No authentication required
    #[default]
    None,

    /// Bearer token issued ahead of time
    Bearer {
        /// The bearer token
        token: String,
    },

    /// App-only authentication: consumer credentials exchanged for a
    /// bearer token via the client credentials grant
    AppOnly {
        /// Consumer (API) key
        consumer_key: String,
        /// Consumer (API) secret
        consumer_secret: String,
        /// Token endpoint URL
        #[serde(default = "default_token_url")]
        token_url: String,
    },
}

impl AuthConfig {
    /// Create a bearer config
    pub fn bearer(token: impl Into<String>) -> Self {
        Self::Bearer {
            token: token.into(),
        }
    }

    /// Create an app-only config against the default token endpoint
    pub fn app_only(consumer_key: impl Into<String>, consumer_secret: impl Into<String>) -> Self {
        Self::AppOnly {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
            token_url: default_token_url(),
        }
    }

    /// Short name of the auth type
    pub fn kind(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Bearer { .. } => "bearer",
            Self::AppOnly { .. } => "app_only",
        }
    }
}

// Secrets stay out of logs
impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Bearer { .. } => f.debug_struct("Bearer").finish_non_exhaustive(),
            Self::AppOnly { token_url, .. } => f
                .debug_struct("AppOnly")
                .field("token_url", token_url)
                .finish_non_exhaustive(),
        }
    }
}

/// Token obtained from the token endpoint
#[derive(Clone)]
pub struct CachedToken {
    /// The access token
    pub token: String,
}

impl CachedToken {
    /// Create a new cached token
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl fmt::Debug for CachedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CachedToken").finish_non_exhaustive()
    }
}
