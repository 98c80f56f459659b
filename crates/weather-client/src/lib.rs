//! OpenWeatherMap current-conditions client.
//!
//! Temperatures are requested in metric units only; Fahrenheit values are
//! derived locally.

mod client;
pub mod models;

pub use client::WeatherClient;
pub use models::{WeatherReading, celsius_to_fahrenheit, round_half_up};

/// Unified error type for the weather-client crate.
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Weather API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),
}

impl WeatherError {
    /// True when the body arrived but could not be understood.
    pub fn is_payload_error(&self) -> bool {
        matches!(self, WeatherError::Json(_))
    }
}
