//! Local credentials file (`auth/credentials.json`).

use std::path::Path;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    pub twitch: TwitchCredentials,
    pub openweathermap: WeatherCredentials,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TwitchCredentials {
    pub client_id: String,
    pub client_secret: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeatherCredentials {
    pub api_key: String,
}

impl Credentials {
    /// Read the file if it exists. A missing file is `Ok(None)`; a file that
    /// exists but does not parse is an error.
    pub fn load_optional(path: impl AsRef<Path>) -> Result<Option<Self>, anyhow::Error> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::info!("No credentials file at {}, using environment only", path.display());
            return Ok(None);
        }
        let raw = std::fs::read_to_string(path)?;
        Ok(Some(serde_json::from_str(&raw)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = Credentials::load_optional(dir.path().join("credentials.json")).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn parses_nested_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("credentials.json");
        std::fs::write(
            &path,
            r#"{"twitch":{"client_id":"id","client_secret":"secret"},
                "openweathermap":{"api_key":"key"}}"#,
        )
        .unwrap();

        let creds = Credentials::load_optional(&path).unwrap().unwrap();
        assert_eq!(creds.twitch.client_id, "id");
        assert_eq!(creds.openweathermap.api_key, "key");
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("credentials.json");
        std::fs::write(&path, "{").unwrap();
        assert!(Credentials::load_optional(&path).is_err());
    }
}
