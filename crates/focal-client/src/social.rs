use async_trait::async_trait;

use focal_store::SocialApi;
use focal_types::api::{
    Deleted, FollowResult, LikeResult, NewComment, NewPost, ProfileUpdate, SaveResult,
    UpdatedProfile,
};
use focal_types::error::ApiError;
use focal_types::models::{Post, PostedComment};

use crate::ApiClient;

// Bridges the store's write seam to the REST endpoints. All methods delegate
// to the inherent endpoint wrappers.
#[async_trait]
impl SocialApi for ApiClient {
    async fn like_post(&self, post_id: i64) -> Result<LikeResult, ApiError> {
        ApiClient::like_post(self, post_id).await
    }

    async fn unlike_post(&self, post_id: i64) -> Result<LikeResult, ApiError> {
        ApiClient::unlike_post(self, post_id).await
    }

    async fn save_post(&self, post_id: i64) -> Result<SaveResult, ApiError> {
        ApiClient::save_post(self, post_id).await
    }

    async fn unsave_post(&self, post_id: i64) -> Result<SaveResult, ApiError> {
        ApiClient::unsave_post(self, post_id).await
    }

    async fn post_comment(
        &self,
        post_id: i64,
        comment: &NewComment,
    ) -> Result<PostedComment, ApiError> {
        ApiClient::post_comment(self, post_id, comment).await
    }

    async fn delete_comment(&self, comment_id: i64) -> Result<Deleted, ApiError> {
        ApiClient::delete_comment(self, comment_id).await
    }

    async fn follow(&self, username: &str) -> Result<FollowResult, ApiError> {
        ApiClient::follow(self, username).await
    }

    async fn unfollow(&self, username: &str) -> Result<FollowResult, ApiError> {
        ApiClient::unfollow(self, username).await
    }

    async fn create_post(&self, post: NewPost) -> Result<Post, ApiError> {
        ApiClient::create_post(self, post).await
    }

    async fn delete_post(&self, post_id: i64) -> Result<Deleted, ApiError> {
        ApiClient::delete_post(self, post_id).await
    }

    async fn update_me(&self, update: ProfileUpdate) -> Result<UpdatedProfile, ApiError> {
        ApiClient::update_me(self, update).await
    }
}
