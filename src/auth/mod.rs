//! Authentication module
//!
//! Supports: no auth, a pre-issued bearer token, and app-only auth (consumer
//! key and secret exchanged for a bearer token).
//!
//! The `Authenticator` caches the exchanged token so concurrent searches
//! sharing one client only hit the token endpoint once.

mod authenticator;
mod types;

pub use authenticator::Authenticator;
pub use types::{AuthConfig, CachedToken, DEFAULT_TOKEN_URL};
