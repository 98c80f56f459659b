//! Twitch integration client library.
//!
//! Provides app-token acquisition (client-credentials flow) backed by a
//! pluggable token cache, and a Helix REST client for category search and
//! live stream listing.

pub mod api;
pub mod auth;
pub mod token_cache;

use serde::{Deserialize, Serialize};

/// Bearer token attached to Helix requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
}

impl Token {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
        }
    }
}

/// Unified error type for the twitch-client crate.
#[derive(Debug, thiserror::Error)]
pub enum TwitchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Token request failed: {0}")]
    TokenRequestFailed(String),

    #[error("Twitch API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("Token cache I/O error: {0}")]
    CacheIo(#[from] std::io::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),
}

impl TwitchError {
    /// True when the body arrived but could not be understood.
    pub fn is_payload_error(&self) -> bool {
        matches!(self, TwitchError::Json(_))
    }
}
