use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Post/comment author as embedded in list payloads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub id: i64,
    pub username: String,
    pub name: String,
    pub avatar_url: Option<String>,
}

/// A post as surfaced by the feed, a user's gallery, or a single-post fetch.
///
/// `like_count`, `comment_count` and `liked_by_me` are the interaction-owned
/// fields: once a post has been ingested into the overlay store, the overlay's
/// values win over whatever a later page fetch reports for these three.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: i64,
    pub image_url: String,
    pub caption: String,
    pub created_at: DateTime<Utc>,
    pub author: Author,
    pub like_count: u32,
    pub comment_count: u32,
    pub liked_by_me: bool,
}

/// Entry of the viewer's liked-posts list (`GET /api/me/likes`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikedPost {
    pub id: i64,
    pub image_url: String,
    pub caption: String,
    pub created_at: DateTime<Utc>,
    pub liked_at: DateTime<Utc>,
    pub author: Author,
    pub like_count: u32,
    pub comment_count: u32,
    pub liked_by_me: bool,
}

/// Entry of the viewer's saved-posts list (`GET /api/me/saved`).
/// The saved list carries no interaction counters on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedPost {
    pub id: i64,
    pub image_url: String,
    pub caption: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: i64,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub author: Author,
}

/// The payload returned when the viewer posts a comment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostedComment {
    pub id: i64,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub author: Author,
    pub is_mine: bool,
}

/// User entry in followers/following/search lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: i64,
    pub username: String,
    pub name: String,
    pub avatar_url: Option<String>,
    pub is_followed_by_me: bool,
}

/// User entry in the likes-on-a-post list, which additionally reports the
/// relationship in both directions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Liker {
    pub id: i64,
    pub username: String,
    pub name: String,
    pub avatar_url: Option<String>,
    pub is_followed_by_me: bool,
    pub is_me: bool,
    pub follows_me: bool,
}

/// The authenticated viewer's own profile (`GET /api/me`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: i64,
    pub name: String,
    pub username: String,
    pub email: String,
    pub phone: String,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileStats {
    pub posts: u32,
    pub followers: u32,
    pub following: u32,
    pub likes: u32,
}

/// Per-user counts as reported by the public profile endpoint, which uses a
/// different key for the post count than the viewer's own stats payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCounts {
    pub post: u32,
    pub followers: u32,
    pub following: u32,
    pub likes: u32,
}

/// Public view of any user (`GET /api/users/{username}`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: i64,
    pub name: String,
    pub username: String,
    pub bio: String,
    pub avatar_url: Option<String>,
    pub email: String,
    pub phone: String,
    pub counts: UserCounts,
    pub is_following: bool,
    pub is_me: bool,
}

/// Minimal user record returned alongside the token on registration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountUser {
    pub id: i64,
    pub name: String,
    pub username: String,
    pub email: String,
    pub phone: String,
    pub avatar_url: Option<String>,
}
