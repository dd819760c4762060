use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, warn};
use validator::{Validate, ValidationError, ValidationErrors};

use focal_types::api::{
    AvatarChange, Deleted, FollowResult, LikeResult, NewComment, NewPost, ProfileUpdate,
    SaveResult, UpdatedProfile,
};
use focal_types::error::ApiError;
use focal_types::models::{Post, PostedComment};
use focal_types::validate::ProfileInput;

use crate::cache::{QueryCache, QueryKey};
use crate::interactions::InteractionStore;
use crate::profile::ProfileStore;

/// The write endpoints the reconciler drives. Implemented by the REST client;
/// tests substitute a fake.
#[async_trait]
pub trait SocialApi: Send + Sync {
    async fn like_post(&self, post_id: i64) -> Result<LikeResult, ApiError>;
    async fn unlike_post(&self, post_id: i64) -> Result<LikeResult, ApiError>;
    async fn save_post(&self, post_id: i64) -> Result<SaveResult, ApiError>;
    async fn unsave_post(&self, post_id: i64) -> Result<SaveResult, ApiError>;
    async fn post_comment(
        &self,
        post_id: i64,
        comment: &NewComment,
    ) -> Result<PostedComment, ApiError>;
    async fn delete_comment(&self, comment_id: i64) -> Result<Deleted, ApiError>;
    async fn follow(&self, username: &str) -> Result<FollowResult, ApiError>;
    async fn unfollow(&self, username: &str) -> Result<FollowResult, ApiError>;
    async fn create_post(&self, post: NewPost) -> Result<Post, ApiError>;
    async fn delete_post(&self, post_id: i64) -> Result<Deleted, ApiError>;
    async fn update_me(&self, update: ProfileUpdate) -> Result<UpdatedProfile, ApiError>;
}

#[derive(Debug, Error)]
pub enum ActionError {
    /// Field-level form validation failed; no request was made.
    #[error("validation failed")]
    Validation(#[from] ValidationErrors),

    /// The same logical action is already pending; no request was made.
    /// Callers disable the triggering control while an action is pending,
    /// so hitting this indicates the control wasn't disabled.
    #[error("action already in flight")]
    InFlight,

    /// The request failed; no state was mutated. Transient — surface a
    /// notification and leave rendered data untouched.
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Logical key for the single-flight rule. Like and unlike share a key (only
/// one of the two may be pending per post), as do save/unsave and
/// follow/unfollow.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum ActionKey {
    Like(i64),
    Save(i64),
    Follow(String),
}

struct FlightGuard<'a> {
    pending: &'a Mutex<HashSet<ActionKey>>,
    key: ActionKey,
}

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        self.pending
            .lock()
            .expect("pending lock poisoned")
            .remove(&self.key);
    }
}

/// Orchestrates every write action: confirm with the server first, then
/// mutate the overlay/profile stores, then invalidate (or refetch) the
/// affected paginated queries.
///
/// Deliberately confirm-then-mutate, not optimistic: state changes only on a
/// success response, so each action produces exactly one user-visible
/// transition and failures need no rollback.
pub struct Actions {
    api: Arc<dyn SocialApi>,
    interactions: Arc<InteractionStore>,
    profile: Arc<ProfileStore>,
    cache: Arc<QueryCache>,
    pending: Mutex<HashSet<ActionKey>>,
}

impl Actions {
    pub fn new(
        api: Arc<dyn SocialApi>,
        interactions: Arc<InteractionStore>,
        profile: Arc<ProfileStore>,
        cache: Arc<QueryCache>,
    ) -> Self {
        Self {
            api,
            interactions,
            profile,
            cache,
            pending: Mutex::new(HashSet::new()),
        }
    }

    fn begin(&self, key: ActionKey) -> Result<FlightGuard<'_>, ActionError> {
        let mut pending = self.pending.lock().expect("pending lock poisoned");
        if !pending.insert(key.clone()) {
            warn!(?key, "action rejected: already in flight");
            return Err(ActionError::InFlight);
        }
        debug!(?key, "action pending");
        Ok(FlightGuard {
            pending: &self.pending,
            key,
        })
    }

    pub async fn like(&self, post_id: i64) -> Result<LikeResult, ActionError> {
        let _guard = self.begin(ActionKey::Like(post_id))?;
        let result = self.api.like_post(post_id).await?;

        self.interactions.apply_like(post_id);
        self.cache.invalidate(&QueryKey::PostLikes(post_id));
        self.cache.invalidate(&QueryKey::MyLikes);
        Ok(result)
    }

    pub async fn unlike(&self, post_id: i64) -> Result<LikeResult, ActionError> {
        let _guard = self.begin(ActionKey::Like(post_id))?;
        let result = self.api.unlike_post(post_id).await?;

        self.interactions.apply_unlike(post_id);
        self.cache.invalidate(&QueryKey::PostLikes(post_id));
        self.cache.invalidate(&QueryKey::MyLikes);
        Ok(result)
    }

    pub async fn save(&self, post_id: i64) -> Result<SaveResult, ActionError> {
        let _guard = self.begin(ActionKey::Save(post_id))?;
        let result = self.api.save_post(post_id).await?;

        self.cache.invalidate(&QueryKey::MySaved);
        Ok(result)
    }

    pub async fn unsave(&self, post_id: i64) -> Result<SaveResult, ActionError> {
        let _guard = self.begin(ActionKey::Save(post_id))?;
        let result = self.api.unsave_post(post_id).await?;

        self.cache.invalidate(&QueryKey::MySaved);
        Ok(result)
    }

    /// Post a comment. On success the comment count is bumped and the
    /// comment list is refetched immediately (not just marked stale) so the
    /// new comment is visible without manual pagination.
    pub async fn post_comment(
        &self,
        post_id: i64,
        text: &str,
    ) -> Result<PostedComment, ActionError> {
        let text = text.trim();
        if text.is_empty() {
            let mut errors = ValidationErrors::new();
            errors.add(
                "text",
                ValidationError::new("required").with_message("Comment text is required".into()),
            );
            return Err(errors.into());
        }

        let posted = self
            .api
            .post_comment(
                post_id,
                &NewComment {
                    text: text.to_string(),
                },
            )
            .await?;

        self.interactions.apply_comment_posted(post_id);
        self.cache.refetch(&QueryKey::Comments(post_id)).await;
        Ok(posted)
    }

    /// Delete the viewer's own comment on `post_id`.
    pub async fn delete_comment(
        &self,
        comment_id: i64,
        post_id: i64,
    ) -> Result<Deleted, ActionError> {
        let result = self.api.delete_comment(comment_id).await?;

        if result.deleted {
            self.interactions.apply_comment_deleted(post_id);
            self.cache.refetch(&QueryKey::Comments(post_id)).await;
        }
        Ok(result)
    }

    pub async fn follow(&self, username: &str) -> Result<FollowResult, ActionError> {
        let _guard = self.begin(ActionKey::Follow(username.to_string()))?;
        let result = self.api.follow(username).await?;

        self.invalidate_follow_lists(username);
        // The acted-upon edge is always the viewer's own following edge.
        self.profile.add_following();
        Ok(result)
    }

    pub async fn unfollow(&self, username: &str) -> Result<FollowResult, ActionError> {
        let _guard = self.begin(ActionKey::Follow(username.to_string()))?;
        let result = self.api.unfollow(username).await?;

        self.invalidate_follow_lists(username);
        self.profile.remove_following();
        Ok(result)
    }

    fn invalidate_follow_lists(&self, username: &str) {
        self.cache
            .invalidate(&QueryKey::UserFollowers(username.to_string()));
        self.cache
            .invalidate(&QueryKey::UserFollowing(username.to_string()));
        self.cache.invalidate(&QueryKey::MyFollowers);
        self.cache.invalidate(&QueryKey::MyFollowing);
    }

    pub async fn create_post(&self, post: NewPost) -> Result<Post, ActionError> {
        if post.image.is_empty() {
            let mut errors = ValidationErrors::new();
            errors.add(
                "image",
                ValidationError::new("required").with_message("An image is required".into()),
            );
            return Err(errors.into());
        }

        let created = self.api.create_post(post).await?;

        self.interactions.ingest([&created]);
        self.cache.invalidate(&QueryKey::Feed);
        if let Some(username) = self.profile.username() {
            self.cache.invalidate(&QueryKey::UserPosts(username));
        }
        Ok(created)
    }

    pub async fn delete_post(&self, post_id: i64) -> Result<Deleted, ActionError> {
        let result = self.api.delete_post(post_id).await?;

        self.cache.invalidate(&QueryKey::Feed);
        self.cache.invalidate(&QueryKey::MyLikes);
        self.cache.invalidate(&QueryKey::MySaved);
        if let Some(username) = self.profile.username() {
            self.cache.invalidate(&QueryKey::UserPosts(username));
        }
        Ok(result)
    }

    /// Edit-profile save: validate locally, confirm with the server, merge
    /// the response into the profile snapshot.
    pub async fn update_profile(
        &self,
        input: ProfileInput,
        avatar: AvatarChange,
    ) -> Result<UpdatedProfile, ActionError> {
        input.validate()?;

        let updated = self
            .api
            .update_me(ProfileUpdate {
                name: input.name,
                username: input.username,
                phone: input.phone,
                bio: input.bio,
                avatar,
            })
            .await?;

        self.profile.apply_update(&updated);
        Ok(updated)
    }
}
