use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{
    AccountUser, Author, Comment, LikedPost, Liker, Post, PostedComment, Profile, ProfileStats,
    SavedPost, UserSummary,
};

/// Every REST response wraps its payload in `{ success, message, data }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
    pub data: T,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u32,
    pub total_pages: u32,
}

impl Pagination {
    /// Whether a page after this one exists.
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Uniform view of one fetched page, regardless of which wire field the
/// endpoint nests its items under (`items`, `posts`, `comments`, `users`).
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: Pagination,
}

/// `page`/`limit` query pair accepted by every paginated endpoint.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PageParams {
    pub page: u32,
    pub limit: u32,
}

// -- Paginated payloads --
//
// Each endpoint family nests its list under its own key; a `From` impl
// flattens each into `Page<T>` so callers never see the difference.

#[derive(Debug, Clone, Deserialize)]
pub struct FeedData {
    pub items: Vec<Post>,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PostListData {
    pub posts: Vec<Post>,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommentListData {
    pub comments: Vec<Comment>,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LikerListData {
    pub users: Vec<Liker>,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LikedPostListData {
    pub posts: Vec<LikedPost>,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SavedPostListData {
    pub posts: Vec<SavedPost>,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserListData {
    pub users: Vec<UserSummary>,
    pub pagination: Pagination,
}

macro_rules! into_page {
    ($src:ty, $item:ty, $field:ident) => {
        impl From<$src> for Page<$item> {
            fn from(data: $src) -> Self {
                Page {
                    items: data.$field,
                    pagination: data.pagination,
                }
            }
        }
    };
}

into_page!(FeedData, Post, items);
into_page!(PostListData, Post, posts);
into_page!(CommentListData, Comment, comments);
into_page!(LikerListData, Liker, users);
into_page!(LikedPostListData, LikedPost, posts);
into_page!(SavedPostListData, SavedPost, posts);
into_page!(UserListData, UserSummary, users);

// -- Auth --

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub username: String,
    pub email: String,
    pub phone: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthSession {
    pub token: String,
    pub user: AccountUser,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginToken {
    pub token: String,
}

// -- Me --

#[derive(Debug, Clone, Deserialize)]
pub struct MeData {
    pub profile: Profile,
    pub stats: ProfileStats,
}

/// Edit-profile save. The avatar is either kept as the URL already on file or
/// replaced by an uploaded image, which switches the request to multipart.
#[derive(Debug, Clone)]
pub struct ProfileUpdate {
    pub name: String,
    pub username: String,
    pub phone: String,
    pub bio: String,
    pub avatar: AvatarChange,
}

#[derive(Debug, Clone)]
pub enum AvatarChange {
    Keep(String),
    Upload { bytes: Vec<u8>, filename: String },
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatedProfile {
    pub id: i64,
    pub name: String,
    pub username: String,
    pub email: String,
    pub phone: String,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub updated_at: DateTime<Utc>,
}

// -- Writes --

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewComment {
    pub text: String,
}

/// Post creation is always multipart (image bytes + caption).
#[derive(Debug, Clone)]
pub struct NewPost {
    pub image: Vec<u8>,
    pub filename: String,
    pub caption: String,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeResult {
    pub liked: bool,
    pub like_count: u32,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct FollowResult {
    pub following: bool,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct SaveResult {
    pub saved: bool,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Deleted {
    pub deleted: bool,
}

impl Post {
    /// Convenience for tests and demo output.
    pub fn summary(&self) -> String {
        format!(
            "#{} by @{}: {} ({} likes, {} comments)",
            self.id, self.author.username, self.caption, self.like_count, self.comment_count
        )
    }
}

impl From<LikedPost> for Post {
    fn from(p: LikedPost) -> Self {
        Post {
            id: p.id,
            image_url: p.image_url,
            caption: p.caption,
            created_at: p.created_at,
            author: p.author,
            like_count: p.like_count,
            comment_count: p.comment_count,
            liked_by_me: p.liked_by_me,
        }
    }
}

impl From<PostedComment> for Comment {
    fn from(c: PostedComment) -> Self {
        Comment {
            id: c.id,
            text: c.text,
            created_at: c.created_at,
            author: c.author,
        }
    }
}

impl From<Liker> for UserSummary {
    fn from(l: Liker) -> Self {
        UserSummary {
            id: l.id,
            username: l.username,
            name: l.name,
            avatar_url: l.avatar_url,
            is_followed_by_me: l.is_followed_by_me,
        }
    }
}

impl Author {
    pub fn new(id: i64, username: &str, name: &str) -> Self {
        Author {
            id,
            username: username.to_string(),
            name: name.to_string(),
            avatar_url: None,
        }
    }
}
