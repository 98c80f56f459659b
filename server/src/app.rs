use std::sync::Arc;

use twitch_client::api::TwitchApiClient;
use twitch_client::auth::TwitchAuth;
use twitch_client::token_cache::FileTokenCache;
use weather_client::WeatherClient;

use crate::config::AppConfig;
use crate::pipeline::SearchPipeline;

/// Application shared state accessible from axum handlers.
#[derive(Clone)]
pub struct SharedState {
    inner: Arc<SharedStateInner>,
}

struct SharedStateInner {
    /// Application configuration
    config: AppConfig,
    /// Upstream clients and token cache
    pipeline: SearchPipeline,
}

impl SharedState {
    /// Wire the pipeline from config, with the token cache on disk.
    pub fn new(config: AppConfig) -> Self {
        let cache = Arc::new(FileTokenCache::in_dir(&config.cache_dir, config.client_id.clone()));
        tracing::info!("Token cache at {}", cache.path().display());

        let auth = TwitchAuth::new(config.client_id.clone(), config.client_secret.clone(), cache)
            .with_base_url(&config.twitch_id_base);
        let twitch =
            TwitchApiClient::new(config.client_id.clone()).with_base_url(&config.twitch_helix_base);
        let weather = WeatherClient::new(config.weather_api_key.clone())
            .with_base_url(&config.weather_api_base);

        Self::with_pipeline(config, SearchPipeline::new(auth, twitch, weather))
    }

    /// Use an already-built pipeline (tests inject in-memory caches this way).
    pub fn with_pipeline(config: AppConfig, pipeline: SearchPipeline) -> Self {
        Self {
            inner: Arc::new(SharedStateInner { config, pipeline }),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    pub fn server_port(&self) -> u16 {
        self.inner.config.server_port
    }

    pub fn pipeline(&self) -> &SearchPipeline {
        &self.inner.pipeline
    }
}
