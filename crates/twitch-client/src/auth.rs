//! App access token acquisition for Twitch.
//!
//! Uses the client-credentials grant. A fresh token from the injected
//! [`TokenCache`] is returned without touching the network; otherwise a new
//! token is requested and written back to the cache.

use std::sync::Arc;

use chrono::Utc;
use serde::Deserialize;

use crate::token_cache::{CachedToken, TokenCache};
use crate::{Token, TwitchError};

const ID_BASE: &str = "https://id.twitch.tv";

/// Twitch OAuth token response from the token endpoint.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    expires_in: Option<i64>,
}

/// Twitch OAuth error response.
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    #[serde(default, alias = "message")]
    error: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
}

/// Obtains app access tokens, consulting the token cache first.
pub struct TwitchAuth {
    client_id: String,
    client_secret: String,
    id_base: String,
    cache: Arc<dyn TokenCache>,
    http: reqwest::Client,
}

impl TwitchAuth {
    /// Create a new auth manager backed by `cache`.
    pub fn new(client_id: String, client_secret: String, cache: Arc<dyn TokenCache>) -> Self {
        Self {
            client_id,
            client_secret,
            id_base: ID_BASE.to_string(),
            cache,
            http: reqwest::Client::new(),
        }
    }

    /// Point token requests at a different identity host.
    pub fn with_base_url(mut self, id_base: impl Into<String>) -> Self {
        self.id_base = id_base.into().trim_end_matches('/').to_string();
        self
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    fn token_endpoint(&self) -> String {
        format!("{}/oauth2/token", self.id_base)
    }

    /// Return a usable bearer token.
    ///
    /// A cached token younger than one hour is reused. Otherwise a single
    /// token request is made; failures are returned as-is and never retried.
    pub async fn acquire_token(&self) -> Result<Token, TwitchError> {
        if let Some(cached) = self.cache.get() {
            if cached.is_fresh(Utc::now()) {
                tracing::info!("Using cached Twitch token");
                return Ok(Token::new(cached.access_token));
            }
            tracing::debug!(issued_at = %cached.issued_at, "Cached Twitch token is stale");
        }

        tracing::info!("Getting new Twitch token");
        let token = self.request_app_token().await?;

        let entry = CachedToken::new(token.access_token.clone(), Utc::now());
        if let Err(e) = self.cache.put(&entry) {
            tracing::warn!(error = %e, "Failed to write Twitch token cache");
        }

        tracing::info!("Twitch token received and cached");
        Ok(token)
    }

    /// Request a new app access token using the client-credentials grant.
    pub async fn request_app_token(&self) -> Result<Token, TwitchError> {
        let params = [
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("grant_type", "client_credentials"),
        ];

        let resp = self
            .http
            .post(self.token_endpoint())
            .form(&params)
            .send()
            .await?;

        parse_token_response(resp).await
    }
}

/// Parse the token endpoint response into a `Token`.
async fn parse_token_response(resp: reqwest::Response) -> Result<Token, TwitchError> {
    let status = resp.status();
    let body = resp.text().await?;

    if !status.is_success() {
        let err: ErrorResponse = serde_json::from_str(&body).unwrap_or(ErrorResponse {
            error: Some(status.to_string()),
            error_description: Some(body.clone()),
        });
        return Err(TwitchError::TokenRequestFailed(format!(
            "{}: {}",
            err.error.unwrap_or_default(),
            err.error_description.unwrap_or_default()
        )));
    }

    let token_resp: TokenResponse = serde_json::from_str(&body).map_err(|e| {
        TwitchError::TokenRequestFailed(format!("failed to parse response: {e}"))
    })?;

    match token_resp.access_token.filter(|t| !t.is_empty()) {
        Some(access_token) => {
            tracing::debug!(expires_in = ?token_resp.expires_in, "Token endpoint issued app token");
            Ok(Token::new(access_token))
        }
        None => Err(TwitchError::TokenRequestFailed(format!(
            "response has no access_token: {body}"
        ))),
    }
}
