use std::sync::Mutex;

use tracing::{debug, warn};

use focal_types::api::{MeData, UpdatedProfile};
use focal_types::models::{Profile, ProfileStats};

/// The authenticated viewer's cached profile and stats.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileSnapshot {
    pub profile: Profile,
    pub stats: ProfileStats,
}

impl From<MeData> for ProfileSnapshot {
    fn from(me: MeData) -> Self {
        Self {
            profile: me.profile,
            stats: me.stats,
        }
    }
}

/// Holder for the viewer's own profile snapshot.
///
/// Populated after login / the first `/api/me` fetch, adjusted by
/// follow/unfollow side effects and edit-profile saves, discarded on logout.
#[derive(Default)]
pub struct ProfileStore {
    state: Mutex<Option<ProfileSnapshot>>,
}

impl ProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, snapshot: ProfileSnapshot) {
        debug!(username = %snapshot.profile.username, "profile snapshot set");
        *self.state.lock().expect("profile lock poisoned") = Some(snapshot);
    }

    pub fn get(&self) -> Option<ProfileSnapshot> {
        self.state.lock().expect("profile lock poisoned").clone()
    }

    pub fn username(&self) -> Option<String> {
        self.state
            .lock()
            .expect("profile lock poisoned")
            .as_ref()
            .map(|s| s.profile.username.clone())
    }

    /// Logout / account switch.
    pub fn clear(&self) {
        *self.state.lock().expect("profile lock poisoned") = None;
    }

    /// The viewer followed someone: their own following count goes up by one.
    pub fn add_following(&self) {
        match self.state.lock().expect("profile lock poisoned").as_mut() {
            Some(s) => s.stats.following += 1,
            None => warn!("add_following with no profile loaded"),
        }
    }

    /// The viewer unfollowed someone: following count down by one, floored
    /// at zero.
    pub fn remove_following(&self) {
        match self.state.lock().expect("profile lock poisoned").as_mut() {
            Some(s) => s.stats.following = s.stats.following.saturating_sub(1),
            None => warn!("remove_following with no profile loaded"),
        }
    }

    /// Merge a confirmed edit-profile save into the snapshot.
    pub fn apply_update(&self, updated: &UpdatedProfile) {
        match self.state.lock().expect("profile lock poisoned").as_mut() {
            Some(s) => {
                s.profile.name = updated.name.clone();
                s.profile.username = updated.username.clone();
                s.profile.email = updated.email.clone();
                s.profile.phone = updated.phone.clone();
                s.profile.bio = updated.bio.clone();
                s.profile.avatar_url = updated.avatar_url.clone();
            }
            None => warn!("apply_update with no profile loaded"),
        }
    }
}
