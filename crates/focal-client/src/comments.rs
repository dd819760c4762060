use reqwest::Method;

use focal_types::api::{CommentListData, Deleted, NewComment, Page, PageParams};
use focal_types::error::ApiError;
use focal_types::models::{Comment, PostedComment};

use crate::ApiClient;

impl ApiClient {
    /// `GET /api/posts/{id}/comments`.
    pub async fn get_comments(
        &self,
        post_id: i64,
        params: PageParams,
    ) -> Result<Page<Comment>, ApiError> {
        let data: CommentListData = self
            .send(
                self.request(Method::GET, &format!("/api/posts/{post_id}/comments"))
                    .query(&params),
            )
            .await?;
        Ok(data.into())
    }

    /// `POST /api/posts/{id}/comments`.
    pub async fn post_comment(
        &self,
        post_id: i64,
        comment: &NewComment,
    ) -> Result<PostedComment, ApiError> {
        self.send(
            self.request(Method::POST, &format!("/api/posts/{post_id}/comments"))
                .json(comment),
        )
        .await
    }

    /// `DELETE /api/comments/{id}` — only the author's own comments.
    pub async fn delete_comment(&self, comment_id: i64) -> Result<Deleted, ApiError> {
        self.send(self.request(Method::DELETE, &format!("/api/comments/{comment_id}")))
            .await
    }
}
