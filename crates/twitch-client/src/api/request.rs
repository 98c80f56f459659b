use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use url::Url;

use super::*;

impl TwitchApiClient {
    pub fn new(client_id: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            client_id,
            helix_base: HELIX_BASE.to_string(),
        }
    }

    /// Point requests at a different Helix root (no trailing slash needed).
    pub fn with_base_url(mut self, helix_base: impl Into<String>) -> Self {
        self.helix_base = helix_base.into().trim_end_matches('/').to_string();
        self
    }

    /// Build a Helix URL with properly encoded query parameters.
    pub(super) fn helix_url(&self, path: &str, query: &[(&str, &str)]) -> Result<Url, TwitchError> {
        let base = format!("{}/{}", self.helix_base, path.trim_start_matches('/'));
        Ok(Url::parse_with_params(&base, query)?)
    }

    /// Build auth headers from the given token.
    fn auth_headers(&self, token: &Token) -> Result<HeaderMap, TwitchError> {
        let mut headers = HeaderMap::new();
        let bearer = format!("Bearer {}", token.access_token);
        let invalid = |_| TwitchError::ApiError {
            status: 0,
            message: "token or client id is not a valid header value".into(),
        };
        headers.insert(AUTHORIZATION, HeaderValue::from_str(&bearer).map_err(invalid)?);
        headers.insert("Client-Id", HeaderValue::from_str(&self.client_id).map_err(invalid)?);
        Ok(headers)
    }

    /// Execute a GET request with auth headers. Non-2xx is an `ApiError`.
    pub(super) async fn authenticated_get(
        &self,
        url: Url,
        token: &Token,
    ) -> Result<String, TwitchError> {
        let headers = self.auth_headers(token)?;
        let resp = self.http.get(url.clone()).headers(headers).send().await?;

        let status = resp.status();
        let body = resp.text().await?;

        if status == reqwest::StatusCode::UNAUTHORIZED {
            tracing::warn!(url = %url.path(), "Got 401 from Helix");
        }

        if !status.is_success() {
            return Err(TwitchError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(body)
    }
}
