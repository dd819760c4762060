use reqwest::Method;

use focal_types::api::{LikeResult, LikedPostListData, LikerListData, Page, PageParams};
use focal_types::error::ApiError;
use focal_types::models::{LikedPost, Liker};

use crate::ApiClient;

impl ApiClient {
    /// `POST /api/posts/{id}/like`.
    pub async fn like_post(&self, post_id: i64) -> Result<LikeResult, ApiError> {
        self.send(self.request(Method::POST, &format!("/api/posts/{post_id}/like")))
            .await
    }

    /// `DELETE /api/posts/{id}/like`.
    pub async fn unlike_post(&self, post_id: i64) -> Result<LikeResult, ApiError> {
        self.send(self.request(Method::DELETE, &format!("/api/posts/{post_id}/like")))
            .await
    }

    /// `GET /api/posts/{id}/likes` — who liked a post.
    pub async fn get_post_likes(
        &self,
        post_id: i64,
        params: PageParams,
    ) -> Result<Page<Liker>, ApiError> {
        let data: LikerListData = self
            .send(
                self.request(Method::GET, &format!("/api/posts/{post_id}/likes"))
                    .query(&params),
            )
            .await?;
        Ok(data.into())
    }

    /// `GET /api/me/likes` — posts the viewer has liked.
    pub async fn get_my_likes(&self, params: PageParams) -> Result<Page<LikedPost>, ApiError> {
        let data: LikedPostListData = self
            .send(self.request(Method::GET, "/api/me/likes").query(&params))
            .await?;
        Ok(data.into())
    }
}
