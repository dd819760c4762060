use reqwest::Method;

use focal_types::api::{FollowResult, Page, PageParams, UserListData};
use focal_types::error::ApiError;
use focal_types::models::UserSummary;

use crate::ApiClient;

impl ApiClient {
    /// `POST /api/follow/{username}`.
    pub async fn follow(&self, username: &str) -> Result<FollowResult, ApiError> {
        self.send(self.request(Method::POST, &format!("/api/follow/{username}")))
            .await
    }

    /// `DELETE /api/follow/{username}`.
    pub async fn unfollow(&self, username: &str) -> Result<FollowResult, ApiError> {
        self.send(self.request(Method::DELETE, &format!("/api/follow/{username}")))
            .await
    }

    /// `GET /api/users/{username}/followers`.
    pub async fn get_user_followers(
        &self,
        username: &str,
        params: PageParams,
    ) -> Result<Page<UserSummary>, ApiError> {
        let data: UserListData = self
            .send(
                self.request(Method::GET, &format!("/api/users/{username}/followers"))
                    .query(&params),
            )
            .await?;
        Ok(data.into())
    }

    /// `GET /api/users/{username}/following`.
    pub async fn get_user_following(
        &self,
        username: &str,
        params: PageParams,
    ) -> Result<Page<UserSummary>, ApiError> {
        let data: UserListData = self
            .send(
                self.request(Method::GET, &format!("/api/users/{username}/following"))
                    .query(&params),
            )
            .await?;
        Ok(data.into())
    }

    /// `GET /api/me/followers`.
    pub async fn get_my_followers(
        &self,
        params: PageParams,
    ) -> Result<Page<UserSummary>, ApiError> {
        let data: UserListData = self
            .send(self.request(Method::GET, "/api/me/followers").query(&params))
            .await?;
        Ok(data.into())
    }

    /// `GET /api/me/following`.
    pub async fn get_my_following(
        &self,
        params: PageParams,
    ) -> Result<Page<UserSummary>, ApiError> {
        let data: UserListData = self
            .send(self.request(Method::GET, "/api/me/following").query(&params))
            .await?;
        Ok(data.into())
    }
}
