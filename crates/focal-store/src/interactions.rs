use std::collections::HashMap;
use std::sync::Mutex;

use tracing::{debug, warn};

use focal_types::models::{LikedPost, Post};

/// Where an overlay counter's current value came from.
///
/// `Server` records were copied from the first page fetch that surfaced the
/// post. `Local` records have been touched by a confirmed viewer action and
/// must never be reverted by a later (possibly stale) page fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provenance {
    Server,
    Local,
}

/// Authoritative client-side view of one post's mutable counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InteractionSnapshot {
    pub like_count: u32,
    pub liked_by_me: bool,
    pub comment_count: u32,
    pub provenance: Provenance,
}

/// Id-keyed overlay for the interaction-owned fields of posts.
///
/// Multiple independent lists (feed, gallery, saved, liked) can surface the
/// same post; they all resolve their displayed counters through this store,
/// so a like confirmed in one view shows up in every view immediately,
/// regardless of when each list's pages were fetched.
///
/// Merge policy: first ingest wins; later ingests never overwrite the owned
/// fields. A refetch that raced a confirmed mutation would otherwise silently
/// revert it.
#[derive(Default)]
pub struct InteractionStore {
    records: Mutex<HashMap<i64, InteractionSnapshot>>,
}

impl InteractionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the interaction fields of freshly fetched posts. Ids already
    /// present keep their current values.
    pub fn ingest<'a, I>(&self, posts: I)
    where
        I: IntoIterator<Item = &'a Post>,
    {
        let mut records = self.records.lock().expect("interaction lock poisoned");
        for post in posts {
            records.entry(post.id).or_insert(InteractionSnapshot {
                like_count: post.like_count,
                liked_by_me: post.liked_by_me,
                comment_count: post.comment_count,
                provenance: Provenance::Server,
            });
        }
    }

    /// Same as [`ingest`](Self::ingest) for the liked-posts list payload.
    pub fn ingest_liked<'a, I>(&self, posts: I)
    where
        I: IntoIterator<Item = &'a LikedPost>,
    {
        let mut records = self.records.lock().expect("interaction lock poisoned");
        for post in posts {
            records.entry(post.id).or_insert(InteractionSnapshot {
                like_count: post.like_count,
                liked_by_me: post.liked_by_me,
                comment_count: post.comment_count,
                provenance: Provenance::Server,
            });
        }
    }

    /// Confirmed like: +1 and flip the flag. No-op for unknown ids — a
    /// mutation can only be triggered from a view that already ingested the
    /// post, so an unknown id indicates a caller bug.
    pub fn apply_like(&self, post_id: i64) {
        let mut records = self.records.lock().expect("interaction lock poisoned");
        match records.get_mut(&post_id) {
            Some(r) => {
                r.like_count += 1;
                r.liked_by_me = true;
                r.provenance = Provenance::Local;
                debug!(post_id, like_count = r.like_count, "like applied");
            }
            None => warn!(post_id, "apply_like on unknown post"),
        }
    }

    /// Confirmed unlike: -1 (floored at zero) and flip the flag.
    pub fn apply_unlike(&self, post_id: i64) {
        let mut records = self.records.lock().expect("interaction lock poisoned");
        match records.get_mut(&post_id) {
            Some(r) => {
                r.like_count = r.like_count.saturating_sub(1);
                r.liked_by_me = false;
                r.provenance = Provenance::Local;
                debug!(post_id, like_count = r.like_count, "unlike applied");
            }
            None => warn!(post_id, "apply_unlike on unknown post"),
        }
    }

    /// Confirmed comment creation: comment count +1.
    pub fn apply_comment_posted(&self, post_id: i64) {
        let mut records = self.records.lock().expect("interaction lock poisoned");
        match records.get_mut(&post_id) {
            Some(r) => {
                r.comment_count += 1;
                r.provenance = Provenance::Local;
            }
            None => warn!(post_id, "apply_comment_posted on unknown post"),
        }
    }

    /// Confirmed comment deletion: comment count -1, floored at zero.
    pub fn apply_comment_deleted(&self, post_id: i64) {
        let mut records = self.records.lock().expect("interaction lock poisoned");
        match records.get_mut(&post_id) {
            Some(r) => {
                r.comment_count = r.comment_count.saturating_sub(1);
                r.provenance = Provenance::Local;
            }
            None => warn!(post_id, "apply_comment_deleted on unknown post"),
        }
    }

    /// Patch a list entry with the overlay's counters. The fallback is
    /// returned unchanged when the post was never ingested — the overlay is
    /// a patch layer, not a replacement data source.
    pub fn resolve(&self, fallback: &Post) -> Post {
        let records = self.records.lock().expect("interaction lock poisoned");
        let mut post = fallback.clone();
        if let Some(r) = records.get(&post.id) {
            post.like_count = r.like_count;
            post.liked_by_me = r.liked_by_me;
            post.comment_count = r.comment_count;
        }
        post
    }

    pub fn get(&self, post_id: i64) -> Option<InteractionSnapshot> {
        self.records
            .lock()
            .expect("interaction lock poisoned")
            .get(&post_id)
            .copied()
    }

    /// Forget everything (logout / account switch).
    pub fn clear(&self) {
        self.records
            .lock()
            .expect("interaction lock poisoned")
            .clear();
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use focal_types::models::Author;

    use super::*;

    fn post(id: i64, like_count: u32, liked_by_me: bool, comment_count: u32) -> Post {
        Post {
            id,
            image_url: format!("https://cdn.example/p/{id}.jpg"),
            caption: "caption".into(),
            created_at: Utc::now(),
            author: Author::new(1, "alice", "Alice"),
            like_count,
            comment_count,
            liked_by_me,
        }
    }

    #[test]
    fn test_first_ingest_wins_over_later_ingests() {
        let store = InteractionStore::new();
        store.ingest([&post(1, 5, false, 2)]);
        store.ingest([&post(1, 9, true, 7)]);
        store.ingest([&post(1, 0, false, 0)]);

        let snap = store.get(1).unwrap();
        assert_eq!(snap.like_count, 5);
        assert!(!snap.liked_by_me);
        assert_eq!(snap.comment_count, 2);
        assert_eq!(snap.provenance, Provenance::Server);
    }

    #[test]
    fn test_like_then_unlike_round_trips() {
        let store = InteractionStore::new();
        store.ingest([&post(1, 5, false, 2)]);

        store.apply_like(1);
        let snap = store.get(1).unwrap();
        assert_eq!(snap.like_count, 6);
        assert!(snap.liked_by_me);

        store.apply_unlike(1);
        let snap = store.get(1).unwrap();
        assert_eq!(snap.like_count, 5);
        assert!(!snap.liked_by_me);
    }

    #[test]
    fn test_stale_refetch_does_not_revert_local_mutation() {
        // Post 42 ingested at likeCount=5; liked; a page fetched before the
        // like lands reports 5 again — the overlay must stay at 6.
        let store = InteractionStore::new();
        store.ingest([&post(42, 5, false, 3)]);
        store.apply_like(42);

        store.ingest([&post(42, 5, false, 3)]);

        let snap = store.get(42).unwrap();
        assert_eq!(snap.like_count, 6);
        assert!(snap.liked_by_me);
        assert_eq!(snap.provenance, Provenance::Local);
    }

    #[test]
    fn test_comment_counter_mutations() {
        let store = InteractionStore::new();
        store.ingest([&post(7, 0, false, 1)]);

        store.apply_comment_posted(7);
        store.apply_comment_posted(7);
        assert_eq!(store.get(7).unwrap().comment_count, 3);

        store.apply_comment_deleted(7);
        assert_eq!(store.get(7).unwrap().comment_count, 2);
    }

    #[test]
    fn test_unlike_floors_at_zero() {
        let store = InteractionStore::new();
        store.ingest([&post(1, 0, true, 0)]);
        store.apply_unlike(1);
        assert_eq!(store.get(1).unwrap().like_count, 0);
    }

    #[test]
    fn test_mutation_on_unknown_id_is_noop() {
        let store = InteractionStore::new();
        store.apply_like(99);
        store.apply_comment_posted(99);
        assert!(store.get(99).is_none());
    }

    #[test]
    fn test_resolve_patches_fallback_fields() {
        let store = InteractionStore::new();
        store.ingest([&post(1, 5, false, 2)]);
        store.apply_like(1);

        // A stale list entry still carries the pre-like values.
        let stale = post(1, 5, false, 2);
        let resolved = store.resolve(&stale);
        assert_eq!(resolved.like_count, 6);
        assert!(resolved.liked_by_me);
        assert_eq!(resolved.comment_count, 2);
        // Non-owned fields come from the fallback.
        assert_eq!(resolved.caption, stale.caption);
    }

    #[test]
    fn test_resolve_without_record_returns_fallback() {
        let store = InteractionStore::new();
        let fallback = post(1, 5, false, 2);
        assert_eq!(store.resolve(&fallback), fallback);
    }

    #[test]
    fn test_clear_forgets_everything() {
        let store = InteractionStore::new();
        store.ingest([&post(1, 5, false, 2)]);
        store.clear();
        assert!(store.get(1).is_none());
    }
}
