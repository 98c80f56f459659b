use url::Url;

use crate::WeatherError;
use crate::models::{WeatherReading, WeatherResponse};

const WEATHER_BASE: &str = "https://api.openweathermap.org";

/// OpenWeatherMap client keyed by an API key.
pub struct WeatherClient {
    http: reqwest::Client,
    api_key: String,
    base: String,
}

impl WeatherClient {
    pub fn new(api_key: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            base: WEATHER_BASE.to_string(),
        }
    }

    /// Point requests at a different API host.
    pub fn with_base_url(mut self, base: impl Into<String>) -> Self {
        self.base = base.into().trim_end_matches('/').to_string();
        self
    }

    fn weather_url(&self, city: &str) -> Result<Url, WeatherError> {
        Ok(Url::parse_with_params(
            &format!("{}/data/2.5/weather", self.base),
            &[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ],
        )?)
    }

    /// Current conditions for `city`.
    ///
    /// Returns `Ok(None)` when the provider reports the city as unknown or the
    /// body carries no measurement block.
    pub async fn current_weather(&self, city: &str) -> Result<Option<WeatherReading>, WeatherError> {
        let url = self.weather_url(city)?;
        let resp = self.http.get(url).send().await?;

        let status = resp.status();
        let body = resp.text().await?;

        let parsed: WeatherResponse = match serde_json::from_str(&body) {
            Ok(parsed) => parsed,
            Err(_) if status == reqwest::StatusCode::NOT_FOUND => return Ok(None),
            Err(_) if !status.is_success() => {
                return Err(WeatherError::ApiError {
                    status: status.as_u16(),
                    message: body,
                });
            }
            Err(e) => return Err(e.into()),
        };

        if parsed.is_not_found() || status == reqwest::StatusCode::NOT_FOUND {
            tracing::debug!(city, message = ?parsed.message, "Weather API reports city not found");
            return Ok(None);
        }

        if parsed.main.is_none() {
            tracing::warn!(
                city,
                status = status.as_u16(),
                cod = ?parsed.cod,
                message = ?parsed.message,
                "Weather response has no measurements"
            );
        }

        Ok(parsed.into_reading())
    }
}
