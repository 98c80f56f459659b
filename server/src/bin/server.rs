//! Server binary: loads config, then serves `/` and `/search` until Ctrl+C.

use tracing_subscriber::EnvFilter;

use stream_weather_lib::app::SharedState;
use stream_weather_lib::server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Starting stream & weather server");

    let config = stream_weather_lib::init_config()?;
    let state = SharedState::new(config);

    server::start_server(state).await?;

    tracing::info!("Shutting down...");
    Ok(())
}
