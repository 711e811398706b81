//! Authenticator implementation
//!
//! Handles applying authentication to requests and exchanging consumer
//! credentials for an app-only token.

use super::types::{AuthConfig, CachedToken};
use crate::error::{Error, Result};
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// Authenticator handles applying authentication to HTTP requests
pub struct Authenticator {
    /// Auth configuration
    config: AuthConfig,
    /// Token exchanged for app-only auth
    cached_token: Arc<RwLock<Option<CachedToken>>>,
    /// HTTP client for token requests
    http_client: Client,
}

impl Authenticator {
    /// Create a new authenticator with the given config
    pub fn new(config: AuthConfig) -> Self {
        Self::with_client(config, Client::new())
    }

    /// Create an authenticator with a custom HTTP client
    pub fn with_client(config: AuthConfig, http_client: Client) -> Self {
        Self {
            config,
            cached_token: Arc::new(RwLock::new(None)),
            http_client,
        }
    }

    /// Apply authentication to a request builder
    pub async fn apply(&self, req: RequestBuilder) -> Result<RequestBuilder> {
        match &self.config {
            AuthConfig::None => Ok(req),
            AuthConfig::Bearer { token } => Ok(req.bearer_auth(token)),
            AuthConfig::AppOnly { .. } => {
                let token = self.get_or_fetch_token().await?;
                Ok(req.bearer_auth(token))
            }
        }
    }

    /// Get the app-only token, exchanging credentials on first use
    async fn get_or_fetch_token(&self) -> Result<String> {
        {
            let cached = self.cached_token.read().await;
            if let Some(token) = cached.as_ref() {
                return Ok(token.token.clone());
            }
        }

        let mut cached = self.cached_token.write().await;

        // Another task may have fetched while we waited for the write lock
        if let Some(token) = cached.as_ref() {
            return Ok(token.token.clone());
        }

        let new_token = self.fetch_app_only_token().await?;
        let token_str = new_token.token.clone();
        *cached = Some(new_token);

        Ok(token_str)
    }

    /// Exchange consumer credentials for a bearer token
    async fn fetch_app_only_token(&self) -> Result<CachedToken> {
        let AuthConfig::AppOnly {
            consumer_key,
            consumer_secret,
            token_url,
        } = &self.config
        else {
            return Err(Error::auth(
                "Token exchange not supported for this auth type",
            ));
        };

        debug!(token_url = %token_url, "Requesting app-only token");

        let response = self
            .http_client
            .post(token_url)
            .basic_auth(consumer_key, Some(consumer_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(Error::Http)?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::auth(format!(
                "Token request failed with status {status}: {body}"
            )));
        }

        let token_response: TokenResponse = response.json().await.map_err(Error::Http)?;
        token_response.into_cached_token()
    }

    /// Forget the exchanged token so the next request fetches a new one
    pub async fn clear_cache(&self) {
        let mut cached = self.cached_token.write().await;
        *cached = None;
    }

    /// Get the current auth config
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }
}

impl std::fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authenticator")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// App-only token response
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    token_type: Option<String>,
}

impl TokenResponse {
    fn into_cached_token(self) -> Result<CachedToken> {
        match self.token_type.as_deref() {
            None => Ok(CachedToken::new(self.access_token)),
            Some(kind) if kind.eq_ignore_ascii_case("bearer") => {
                Ok(CachedToken::new(self.access_token))
            }
            Some(other) => Err(Error::auth(format!(
                "Unexpected token type '{other}', expected bearer"
            ))),
        }
    }
}
