//! Runtime application configuration loaded from environment + credentials file.

use std::path::PathBuf;

use anyhow::{Context, bail};

use super::credentials::Credentials;

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_CACHE_DIR: &str = "./cache";
pub const DEFAULT_CREDENTIALS_FILE: &str = "auth/credentials.json";
pub const DEFAULT_TWITCH_ID_BASE: &str = "https://id.twitch.tv";
pub const DEFAULT_TWITCH_HELIX_BASE: &str = "https://api.twitch.tv/helix";
pub const DEFAULT_WEATHER_API_BASE: &str = "https://api.openweathermap.org";

/// Runtime configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub client_id: String,
    pub client_secret: String,
    pub weather_api_key: String,
    pub host: String,
    pub server_port: u16,
    pub cache_dir: PathBuf,
    pub twitch_id_base: String,
    pub twitch_helix_base: String,
    pub weather_api_base: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            client_secret: String::new(),
            weather_api_key: String::new(),
            host: DEFAULT_HOST.into(),
            server_port: DEFAULT_PORT,
            cache_dir: PathBuf::from(DEFAULT_CACHE_DIR),
            twitch_id_base: DEFAULT_TWITCH_ID_BASE.into(),
            twitch_helix_base: DEFAULT_TWITCH_HELIX_BASE.into(),
            weather_api_base: DEFAULT_WEATHER_API_BASE.into(),
        }
    }
}

impl AppConfig {
    /// Load from process environment, falling back to the credentials file
    /// for any secret the environment does not provide.
    pub fn load() -> Result<Self, anyhow::Error> {
        let env = |key: &str| std::env::var(key).ok();
        let path = env("CREDENTIALS_FILE").unwrap_or_else(|| DEFAULT_CREDENTIALS_FILE.into());
        let credentials = Credentials::load_optional(&path)
            .with_context(|| format!("Failed to read credentials file {path}"))?;
        Self::from_sources(env, credentials.as_ref())
    }

    /// Build from an environment lookup and optional credentials file contents.
    pub fn from_sources(
        env: impl Fn(&str) -> Option<String>,
        credentials: Option<&Credentials>,
    ) -> Result<Self, anyhow::Error> {
        let g = |key: &str| env(key).filter(|v| !v.is_empty());

        let client_id = g("TWITCH_CLIENT_ID")
            .or_else(|| credentials.map(|c| c.twitch.client_id.clone()))
            .unwrap_or_default();
        let client_secret = g("TWITCH_CLIENT_SECRET")
            .or_else(|| credentials.map(|c| c.twitch.client_secret.clone()))
            .unwrap_or_default();
        let weather_api_key = g("WEATHER_API_KEY")
            .or_else(|| credentials.map(|c| c.openweathermap.api_key.clone()))
            .unwrap_or_default();

        let mut missing = Vec::new();
        if client_id.is_empty() {
            missing.push("TWITCH_CLIENT_ID");
        }
        if client_secret.is_empty() {
            missing.push("TWITCH_CLIENT_SECRET");
        }
        if weather_api_key.is_empty() {
            missing.push("WEATHER_API_KEY");
        }
        if !missing.is_empty() {
            bail!(
                "Missing credentials: {}. Set them in the environment or in {DEFAULT_CREDENTIALS_FILE}",
                missing.join(", ")
            );
        }

        Ok(Self {
            client_id,
            client_secret,
            weather_api_key,
            host: g("HOST").unwrap_or_else(|| DEFAULT_HOST.into()),
            server_port: parse_u16(&g("PORT").unwrap_or_default(), DEFAULT_PORT),
            cache_dir: g("CACHE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CACHE_DIR)),
            twitch_id_base: g("TWITCH_ID_BASE").unwrap_or_else(|| DEFAULT_TWITCH_ID_BASE.into()),
            twitch_helix_base: g("TWITCH_HELIX_BASE")
                .unwrap_or_else(|| DEFAULT_TWITCH_HELIX_BASE.into()),
            weather_api_base: g("WEATHER_API_BASE")
                .unwrap_or_else(|| DEFAULT_WEATHER_API_BASE.into()),
        })
    }

    /// `host:port` for the listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.server_port)
    }
}

fn parse_u16(s: &str, default: u16) -> u16 {
    if s.is_empty() {
        return default;
    }
    s.parse().unwrap_or(default)
}
