use serde::{Deserialize, Serialize};

const DEFAULT_DESCRIPTION: &str = "N/A";
const DEFAULT_ICON: &str = "01d";

/// Raw body of GET /data/2.5/weather.
#[derive(Debug, Deserialize)]
pub(crate) struct WeatherResponse {
    #[serde(default)]
    pub cod: Option<serde_json::Value>,
    #[serde(default)]
    pub message: Option<serde_json::Value>,
    #[serde(default)]
    pub main: Option<MainBlock>,
    #[serde(default)]
    pub weather: Option<Vec<Condition>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MainBlock {
    pub temp: f64,
    pub feels_like: f64,
    pub humidity: u32,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Condition {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
}

impl WeatherResponse {
    /// `cod` is a string on errors ("404") and a number on success (200).
    pub fn is_not_found(&self) -> bool {
        match &self.cod {
            Some(serde_json::Value::String(s)) => s == "404",
            Some(serde_json::Value::Number(n)) => n.as_u64() == Some(404),
            _ => false,
        }
    }

    /// `None` when the measurement block is absent.
    pub fn into_reading(self) -> Option<WeatherReading> {
        let main = self.main?;
        let condition = self.weather.and_then(|w| w.into_iter().next());
        let (description, icon_code) = match condition {
            Some(c) => (c.description, c.icon),
            None => (DEFAULT_DESCRIPTION.to_string(), DEFAULT_ICON.to_string()),
        };

        Some(WeatherReading {
            description,
            icon_code,
            temp_c: main.temp,
            feels_like_c: main.feels_like,
            humidity_pct: main.humidity,
        })
    }
}

/// Current conditions for a city, in metric units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReading {
    pub description: String,
    pub icon_code: String,
    pub temp_c: f64,
    pub feels_like_c: f64,
    pub humidity_pct: u32,
}

impl WeatherReading {
    pub fn temp_c_rounded(&self) -> i64 {
        round_half_up(self.temp_c)
    }

    pub fn temp_f(&self) -> i64 {
        celsius_to_fahrenheit(self.temp_c)
    }

    pub fn feels_like_c_rounded(&self) -> i64 {
        round_half_up(self.feels_like_c)
    }

    pub fn feels_like_f(&self) -> i64 {
        celsius_to_fahrenheit(self.feels_like_c)
    }

    pub fn icon_url(&self) -> String {
        format!("https://openweathermap.org/img/wn/{}@2x.png", self.icon_code)
    }
}

/// Round to the nearest integer, halves toward positive infinity.
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// `round(c * 9/5 + 32)`.
pub fn celsius_to_fahrenheit(celsius: f64) -> i64 {
    round_half_up(celsius * 9.0 / 5.0 + 32.0)
}
