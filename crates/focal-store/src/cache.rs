use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::debug;

/// Identity of one paginated list. Every list a view can display is bucketed
/// under exactly one key; invalidation and refetch fan out by key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryKey {
    Feed,
    Comments(i64),
    PostLikes(i64),
    MyLikes,
    MySaved,
    MyFollowers,
    MyFollowing,
    UserPosts(String),
    UserLikes(String),
    UserFollowers(String),
    UserFollowing(String),
    UserSearch(String),
}

type RefetchFuture = Pin<Box<dyn Future<Output = ()> + Send>>;
type RefetchFn = Box<dyn Fn() -> RefetchFuture + Send + Sync>;

/// Invalidation hub shared by all pagers.
///
/// Keeps a generation counter per query key. `invalidate` bumps the counter:
/// pagers that loaded under an older generation report themselves stale and
/// refetch from page 1 on their next read — already-displayed items are not
/// cleared in the meantime. `refetch` additionally wakes the refetch handlers
/// registered for the key, for the flows that must show fresh data
/// immediately (a freshly posted comment).
///
/// This is an explicit, injectable object rather than process-global state so
/// tests can run isolated instances.
#[derive(Default)]
pub struct QueryCache {
    generations: Mutex<HashMap<QueryKey, u64>>,
    refetchers: Mutex<HashMap<u64, (QueryKey, RefetchFn)>>,
    next_handler_id: AtomicU64,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current generation for a key. Never-invalidated keys are generation 0.
    pub fn generation(&self, key: &QueryKey) -> u64 {
        self.generations
            .lock()
            .expect("generation lock poisoned")
            .get(key)
            .copied()
            .unwrap_or(0)
    }

    /// Mark every cached page under `key` stale. Lazy: nothing is refetched
    /// until the next read.
    pub fn invalidate(&self, key: &QueryKey) {
        let mut generations = self.generations.lock().expect("generation lock poisoned");
        let generation = generations.entry(key.clone()).or_insert(0);
        *generation += 1;
        debug!(?key, generation = *generation, "query invalidated");
    }

    /// Invalidate `key` and immediately run every refetch handler registered
    /// for it, so open views reload without waiting for their next read.
    pub async fn refetch(&self, key: &QueryKey) {
        self.invalidate(key);

        // Build the futures under the lock, await them outside it.
        let pending: Vec<RefetchFuture> = {
            let refetchers = self.refetchers.lock().expect("refetcher lock poisoned");
            refetchers
                .values()
                .filter(|(k, _)| k == key)
                .map(|(_, f)| f())
                .collect()
        };

        debug!(?key, handlers = pending.len(), "query refetch");
        for fut in pending {
            fut.await;
        }
    }

    /// Register a refetch handler for a key. Returns an id the owner must
    /// pass to [`unregister_refetcher`](Self::unregister_refetcher) when it
    /// goes away.
    pub fn register_refetcher(&self, key: QueryKey, f: RefetchFn) -> u64 {
        let id = self.next_handler_id.fetch_add(1, Ordering::Relaxed);
        self.refetchers
            .lock()
            .expect("refetcher lock poisoned")
            .insert(id, (key, f));
        id
    }

    pub fn unregister_refetcher(&self, id: u64) {
        self.refetchers
            .lock()
            .expect("refetcher lock poisoned")
            .remove(&id);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::AtomicUsize;

    use super::*;

    #[test]
    fn test_invalidate_bumps_generation() {
        let cache = QueryCache::new();
        assert_eq!(cache.generation(&QueryKey::Feed), 0);

        cache.invalidate(&QueryKey::Feed);
        cache.invalidate(&QueryKey::Feed);
        assert_eq!(cache.generation(&QueryKey::Feed), 2);
        // Other keys untouched
        assert_eq!(cache.generation(&QueryKey::MyLikes), 0);
    }

    #[test]
    fn test_keys_with_parameters_are_independent() {
        let cache = QueryCache::new();
        cache.invalidate(&QueryKey::Comments(7));
        assert_eq!(cache.generation(&QueryKey::Comments(7)), 1);
        assert_eq!(cache.generation(&QueryKey::Comments(8)), 0);
    }

    #[tokio::test]
    async fn test_refetch_runs_only_matching_handlers() {
        let cache = QueryCache::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let other_hits = Arc::new(AtomicUsize::new(0));

        let h = hits.clone();
        cache.register_refetcher(
            QueryKey::Comments(7),
            Box::new(move || {
                let h = h.clone();
                Box::pin(async move {
                    h.fetch_add(1, Ordering::SeqCst);
                })
            }),
        );
        let o = other_hits.clone();
        cache.register_refetcher(
            QueryKey::Feed,
            Box::new(move || {
                let o = o.clone();
                Box::pin(async move {
                    o.fetch_add(1, Ordering::SeqCst);
                })
            }),
        );

        cache.refetch(&QueryKey::Comments(7)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert_eq!(other_hits.load(Ordering::SeqCst), 0);
        // refetch also marks the key stale
        assert_eq!(cache.generation(&QueryKey::Comments(7)), 1);
    }

    #[tokio::test]
    async fn test_unregistered_handler_not_called() {
        let cache = QueryCache::new();
        let hits = Arc::new(AtomicUsize::new(0));

        let h = hits.clone();
        let id = cache.register_refetcher(
            QueryKey::Feed,
            Box::new(move || {
                let h = h.clone();
                Box::pin(async move {
                    h.fetch_add(1, Ordering::SeqCst);
                })
            }),
        );
        cache.unregister_refetcher(id);

        cache.refetch(&QueryKey::Feed).await;
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }
}
