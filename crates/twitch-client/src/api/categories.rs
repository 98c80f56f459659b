use super::*;

impl TwitchApiClient {
    /// Search categories by free-text query, in the order Twitch returns them.
    pub async fn search_categories(
        &self,
        token: &Token,
        query: &str,
    ) -> Result<Vec<Category>, TwitchError> {
        let url = self.helix_url("search/categories", &[("query", query)])?;
        let body = self.authenticated_get(url, token).await?;
        let resp: HelixResponse<Category> = serde_json::from_str(&body)?;
        Ok(resp.data)
    }

    /// Resolve a game name to a category. Takes the first search result as-is.
    ///
    /// Returns `Ok(None)` when the search comes back empty.
    pub async fn resolve_category(
        &self,
        token: &Token,
        game_name: &str,
    ) -> Result<Option<Category>, TwitchError> {
        let categories = self.search_categories(token, game_name).await?;
        Ok(categories.into_iter().next())
    }
}
