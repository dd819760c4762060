use reqwest::Method;

use focal_types::api::{FeedData, Page, PageParams};
use focal_types::error::ApiError;
use focal_types::models::Post;

use crate::ApiClient;

impl ApiClient {
    /// `GET /api/feed` — the home timeline, newest first.
    pub async fn get_feed(&self, params: PageParams) -> Result<Page<Post>, ApiError> {
        let data: FeedData = self
            .send(self.request(Method::GET, "/api/feed").query(&params))
            .await?;
        Ok(data.into())
    }
}
