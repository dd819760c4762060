use reqwest::Method;

use focal_types::api::{Page, PageParams, PostListData, UserListData};
use focal_types::error::ApiError;
use focal_types::models::{Post, UserProfile, UserSummary};

use crate::ApiClient;

impl ApiClient {
    /// `GET /api/users/{username}` — public profile with counts and the
    /// viewer's relationship flags.
    pub async fn get_user(&self, username: &str) -> Result<UserProfile, ApiError> {
        self.send(self.request(Method::GET, &format!("/api/users/{username}")))
            .await
    }

    /// `GET /api/users/{username}/posts` — gallery grid.
    pub async fn get_user_posts(
        &self,
        username: &str,
        params: PageParams,
    ) -> Result<Page<Post>, ApiError> {
        let data: PostListData = self
            .send(
                self.request(Method::GET, &format!("/api/users/{username}/posts"))
                    .query(&params),
            )
            .await?;
        Ok(data.into())
    }

    /// `GET /api/users/{username}/likes` — posts that user has liked.
    pub async fn get_user_likes(
        &self,
        username: &str,
        params: PageParams,
    ) -> Result<Page<Post>, ApiError> {
        let data: PostListData = self
            .send(
                self.request(Method::GET, &format!("/api/users/{username}/likes"))
                    .query(&params),
            )
            .await?;
        Ok(data.into())
    }

    /// `GET /api/users/search?q=…`.
    pub async fn search_users(
        &self,
        query: &str,
        params: PageParams,
    ) -> Result<Page<UserSummary>, ApiError> {
        let data: UserListData = self
            .send(
                self.request(Method::GET, "/api/users/search")
                    .query(&[("q", query)])
                    .query(&params),
            )
            .await?;
        Ok(data.into())
    }
}
