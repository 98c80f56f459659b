//! Configuration: environment variables with a credentials-file fallback.

pub mod app_config;
pub mod credentials;

pub use app_config::AppConfig;
pub use credentials::Credentials;
