use super::*;

/// Number of live streams requested per category lookup.
pub const STREAMS_PAGE_SIZE: u32 = 20;

impl TwitchApiClient {
    /// Get live streams for a category, in the order Twitch returns them.
    ///
    /// `first` is clamped to Helix's 1..=100 page size.
    pub async fn get_live_streams(
        &self,
        token: &Token,
        game_id: &str,
        first: u32,
    ) -> Result<Vec<StreamSummary>, TwitchError> {
        let first = first.clamp(1, 100).to_string();
        let url = self.helix_url("streams", &[("game_id", game_id), ("first", first.as_str())])?;
        let body = self.authenticated_get(url, token).await?;
        let resp: HelixResponse<StreamSummary> = serde_json::from_str(&body)?;
        Ok(resp.data)
    }
}
