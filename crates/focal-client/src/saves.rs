use reqwest::Method;

use focal_types::api::{Page, PageParams, SaveResult, SavedPostListData};
use focal_types::error::ApiError;
use focal_types::models::SavedPost;

use crate::ApiClient;

impl ApiClient {
    /// `POST /api/posts/{id}/save`.
    pub async fn save_post(&self, post_id: i64) -> Result<SaveResult, ApiError> {
        self.send(self.request(Method::POST, &format!("/api/posts/{post_id}/save")))
            .await
    }

    /// `DELETE /api/posts/{id}/save`.
    pub async fn unsave_post(&self, post_id: i64) -> Result<SaveResult, ApiError> {
        self.send(self.request(Method::DELETE, &format!("/api/posts/{post_id}/save")))
            .await
    }

    /// `GET /api/me/saved`.
    pub async fn get_my_saved(&self, params: PageParams) -> Result<Page<SavedPost>, ApiError> {
        let data: SavedPostListData = self
            .send(self.request(Method::GET, "/api/me/saved").query(&params))
            .await?;
        Ok(data.into())
    }
}
