use reqwest::Method;
use reqwest::multipart::{Form, Part};

use focal_types::api::{Deleted, NewPost};
use focal_types::error::ApiError;
use focal_types::models::Post;

use crate::ApiClient;

impl ApiClient {
    /// `POST /api/posts` — multipart upload of the image plus caption.
    pub async fn create_post(&self, post: NewPost) -> Result<Post, ApiError> {
        let form = Form::new()
            .part("image", Part::bytes(post.image).file_name(post.filename))
            .text("caption", post.caption);

        self.send(self.request(Method::POST, "/api/posts").multipart(form))
            .await
    }

    /// `GET /api/posts/{id}`.
    pub async fn get_post(&self, post_id: i64) -> Result<Post, ApiError> {
        self.send(self.request(Method::GET, &format!("/api/posts/{post_id}")))
            .await
    }

    /// `DELETE /api/posts/{id}`.
    pub async fn delete_post(&self, post_id: i64) -> Result<Deleted, ApiError> {
        self.send(self.request(Method::DELETE, &format!("/api/posts/{post_id}")))
            .await
    }
}
