//! Search pipeline: auth → category → live streams → weather.
//!
//! Each stage awaits the previous one and stops at the first terminal
//! outcome. Nothing is retried and no stage starts early.


use std::fmt;

use twitch_client::api::{STREAMS_PAGE_SIZE, StreamSummary, TwitchApiClient};
use twitch_client::auth::TwitchAuth;
use weather_client::{WeatherClient, WeatherReading};

/// Validated `/search` input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub game: String,
    pub city: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("missing or empty parameter: {0}")]
    Missing(&'static str),
}

impl SearchRequest {
    /// Both fields must be present and non-empty.
    pub fn from_params(game: Option<&str>, city: Option<&str>) -> Result<Self, ValidationError> {
        let game = game
            .filter(|g| !g.is_empty())
            .ok_or(ValidationError::Missing("game"))?;
        let city = city
            .filter(|c| !c.is_empty())
            .ok_or(ValidationError::Missing("city"))?;
        Ok(Self {
            game: game.to_string(),
            city: city.to_string(),
        })
    }
}

/// Post-auth stage that can fail against an upstream. Auth failures
/// surface as [`PipelineResult::AuthFailed`] instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Category,
    Streams,
    Weather,
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Category => "category",
            Stage::Streams => "streams",
            Stage::Weather => "weather",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether an upstream failed to answer or answered with something unreadable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Transport,
    Payload,
}

impl FailureKind {
    fn from_payload_flag(is_payload: bool) -> Self {
        if is_payload {
            FailureKind::Payload
        } else {
            FailureKind::Transport
        }
    }
}

/// Everything the results page needs.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResults {
    pub streams: Vec<StreamSummary>,
    pub weather: WeatherReading,
    pub city: String,
}

/// Terminal outcome of one search.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineResult {
    Success(SearchResults),
    GameNotFound { game: String },
    NoLiveStreams { game: String },
    CityNotFound { city: String },
    AuthFailed,
    UpstreamError {
        stage: Stage,
        kind: FailureKind,
        detail: String,
    },
}

impl PipelineResult {
    fn upstream(stage: Stage, is_payload: bool, detail: impl fmt::Display) -> Self {
        PipelineResult::UpstreamError {
            stage,
            kind: FailureKind::from_payload_flag(is_payload),
            detail: detail.to_string(),
        }
    }
}

/// Owns the three upstream clients. Token caching lives inside `auth`.
pub struct SearchPipeline {
    auth: TwitchAuth,
    twitch: TwitchApiClient,
    weather: WeatherClient,
}

impl SearchPipeline {
    pub fn new(auth: TwitchAuth, twitch: TwitchApiClient, weather: WeatherClient) -> Self {
        Self {
            auth,
            twitch,
            weather,
        }
    }

    /// Run every stage in order and return the first terminal outcome.
    pub async fn run(&self, request: &SearchRequest) -> PipelineResult {
        let game = request.game.as_str();
        let city = request.city.as_str();

        // Stage 1: app token
        let token = match self.auth.acquire_token().await {
            Ok(token) => token,
            Err(e) => {
                tracing::error!(stage = "auth", game, city, error = %e, "Twitch authentication failed");
                return PipelineResult::AuthFailed;
            }
        };

        // Stage 2: game name -> category
        tracing::info!(stage = %Stage::Category, game, "Searching for game on Twitch");
        let category = match self.twitch.resolve_category(&token, game).await {
            Ok(Some(category)) => category,
            Ok(None) => {
                tracing::info!(stage = %Stage::Category, game, "Game not found");
                return PipelineResult::GameNotFound {
                    game: game.to_string(),
                };
            }
            Err(e) => {
                tracing::error!(stage = %Stage::Category, game, error = %e, "Game search failed");
                return PipelineResult::upstream(Stage::Category, e.is_payload_error(), e);
            }
        };
        tracing::info!(game_id = %category.id, name = %category.name, "Found game");

        // Stage 3: live streams
        let streams = match self
            .twitch
            .get_live_streams(&token, &category.id, STREAMS_PAGE_SIZE)
            .await
        {
            Ok(streams) if streams.is_empty() => {
                tracing::info!(stage = %Stage::Streams, game, game_id = %category.id, "No live streams");
                return PipelineResult::NoLiveStreams {
                    game: game.to_string(),
                };
            }
            Ok(streams) => streams,
            Err(e) => {
                tracing::error!(stage = %Stage::Streams, game, game_id = %category.id, error = %e, "Stream listing failed");
                return PipelineResult::upstream(Stage::Streams, e.is_payload_error(), e);
            }
        };
        tracing::info!(count = streams.len(), "Found live streams, getting weather");

        // Stage 4: weather, only once streams exist
        let weather = match self.weather.current_weather(city).await {
            Ok(Some(reading)) => reading,
            Ok(None) => {
                tracing::warn!(stage = %Stage::Weather, city, "City not found");
                return PipelineResult::CityNotFound {
                    city: city.to_string(),
                };
            }
            Err(e) => {
                tracing::error!(stage = %Stage::Weather, city, error = %e, "Weather lookup failed");
                return PipelineResult::upstream(Stage::Weather, e.is_payload_error(), e);
            }
        };

        tracing::info!(game, city, "Weather data received");
        PipelineResult::Success(SearchResults {
            streams,
            weather,
            city: city.to_string(),
        })
    }
}
