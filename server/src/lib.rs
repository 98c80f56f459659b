pub mod app;
pub mod config;
pub mod pipeline;
pub mod render;
pub mod server;

use config::AppConfig;

/// Load .env from multiple candidate paths.
fn load_dotenv() {
    let candidates = [".env", "../.env"];
    for path in &candidates {
        if dotenvy::from_filename(path).is_ok() {
            tracing::info!("Loaded .env from: {path}");
            return;
        }
    }
    tracing::info!("No .env file found, using system environment variables");
}

/// Load .env, environment and credentials file into an `AppConfig`.
pub fn init_config() -> Result<AppConfig, anyhow::Error> {
    load_dotenv();

    let config = AppConfig::load()?;
    tracing::info!(
        host = %config.host,
        port = config.server_port,
        cache_dir = %config.cache_dir.display(),
        "Settings loaded"
    );
    Ok(config)
}
