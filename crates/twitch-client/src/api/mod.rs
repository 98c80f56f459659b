//! Twitch Helix REST API client.
//!
//! Provides typed access to the category search and live stream endpoints
//! with Bearer token + Client-ID header injection.

mod categories;
mod request;
mod streams;

pub mod models;

pub use models::{Category, HelixResponse, StreamSummary};
pub use streams::STREAMS_PAGE_SIZE;

use crate::{Token, TwitchError};

const HELIX_BASE: &str = "https://api.twitch.tv/helix";

/// Twitch Helix API client with automatic auth header injection.
pub struct TwitchApiClient {
    pub(super) http: reqwest::Client,
    pub(super) client_id: String,
    pub(super) helix_base: String,
}
