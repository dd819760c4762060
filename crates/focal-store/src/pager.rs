use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, OnceLock, Weak};

use tracing::{debug, warn};

use focal_types::api::Page;
use focal_types::error::ApiError;

use crate::cache::{QueryCache, QueryKey};

pub type PageFuture<T> = Pin<Box<dyn Future<Output = Result<Page<T>, ApiError>> + Send>>;
type FetchFn<T> = Box<dyn Fn(u32, u32) -> PageFuture<T> + Send + Sync>;

/// What a fetch trigger actually did. The no-op outcomes are part of the
/// contract: firing the trigger while a fetch is in flight, or past the last
/// page, must be safe and must not issue a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// A page was requested and applied.
    Fetched,
    /// Another fetch for this pager is in flight; nothing was issued.
    AlreadyInFlight,
    /// The last loaded page reported no next page; nothing was issued.
    Exhausted,
    /// (`ensure_loaded` only) data was already loaded and not stale.
    Fresh,
}

struct PagerState<T> {
    /// Loaded pages in ascending page order. The visible list is their
    /// concatenation — never reordered, never deduplicated.
    pages: Vec<Page<T>>,
    in_flight: bool,
    /// QueryCache generation snapshotted when page 1 was (re)loaded.
    loaded_generation: u64,
    last_error: Option<ApiError>,
}

/// Cursor-style page accumulator for one query key.
///
/// Wraps a page-fetch function (`(page, limit) -> Page<T>`, 1-based pages)
/// and accumulates responses in fetch order. Page N+1 is never requested
/// before page N's response has been applied, and at most one request is in
/// flight at a time.
///
/// The pager registers a refetch handler with the [`QueryCache`] on creation
/// (through a `Weak`, so the cache never keeps a dead pager alive) and
/// deregisters it on drop. Dropping the pager — or the future returned by a
/// fetch method — abandons the in-flight request; a response is only ever
/// applied under the pager's own lock, so a dropped pager cannot be updated.
pub struct Pager<T> {
    key: QueryKey,
    cache: Arc<QueryCache>,
    limit: u32,
    fetch: FetchFn<T>,
    state: Mutex<PagerState<T>>,
    handler_id: OnceLock<u64>,
}

/// Clears the in-flight flag even when the fetch future is dropped mid-await,
/// so an abandoned fetch can't wedge the pager.
struct FlightGuard<'a, T> {
    state: &'a Mutex<PagerState<T>>,
}

impl<T> Drop for FlightGuard<'_, T> {
    fn drop(&mut self) {
        self.state.lock().expect("pager lock poisoned").in_flight = false;
    }
}

impl<T: Clone + Send + 'static> Pager<T> {
    pub fn new<F>(cache: Arc<QueryCache>, key: QueryKey, limit: u32, fetch: F) -> Arc<Self>
    where
        F: Fn(u32, u32) -> PageFuture<T> + Send + Sync + 'static,
    {
        let pager = Arc::new(Self {
            key: key.clone(),
            cache: cache.clone(),
            limit,
            fetch: Box::new(fetch),
            state: Mutex::new(PagerState {
                pages: Vec::new(),
                in_flight: false,
                loaded_generation: 0,
                last_error: None,
            }),
            handler_id: OnceLock::new(),
        });

        let weak: Weak<Pager<T>> = Arc::downgrade(&pager);
        let id = cache.register_refetcher(
            key,
            Box::new(move || {
                let weak = weak.clone();
                Box::pin(async move {
                    if let Some(pager) = weak.upgrade() {
                        if let Err(e) = pager.refresh().await {
                            warn!(key = ?pager.key, error = %e, "refetch handler failed");
                        }
                    }
                })
            }),
        );
        let _ = pager.handler_id.set(id);

        pager
    }

    /// Request the page after the highest one loaded. Safe no-op when a fetch
    /// is in flight or the list is exhausted. With nothing loaded yet this
    /// performs the initial page-1 load.
    pub async fn fetch_next_page(&self) -> Result<FetchOutcome, ApiError> {
        let (next_page, replace) = {
            let mut state = self.state.lock().expect("pager lock poisoned");
            if state.in_flight {
                debug!(key = ?self.key, "fetch_next_page ignored: already in flight");
                return Ok(FetchOutcome::AlreadyInFlight);
            }
            if let Some(last) = state.pages.last() {
                if !last.pagination.has_next() {
                    debug!(key = ?self.key, "fetch_next_page ignored: exhausted");
                    return Ok(FetchOutcome::Exhausted);
                }
            }
            state.in_flight = true;
            let next = state.pages.len() as u32 + 1;
            (next, state.pages.is_empty())
        };

        self.run_fetch(next_page, replace).await
    }

    /// Drop everything loaded and refetch page 1. Loaded items stay visible
    /// until the new page 1 arrives; on failure they are kept as-is.
    pub async fn refresh(&self) -> Result<FetchOutcome, ApiError> {
        {
            let mut state = self.state.lock().expect("pager lock poisoned");
            if state.in_flight {
                return Ok(FetchOutcome::AlreadyInFlight);
            }
            state.in_flight = true;
        }
        self.run_fetch(1, true).await
    }

    /// Load page 1 if nothing is loaded yet, or if the query has been
    /// invalidated since the current pages were fetched.
    pub async fn ensure_loaded(&self) -> Result<FetchOutcome, ApiError> {
        let needs_fetch = {
            let state = self.state.lock().expect("pager lock poisoned");
            state.pages.is_empty()
                || self.cache.generation(&self.key) > state.loaded_generation
        };
        if !needs_fetch {
            return Ok(FetchOutcome::Fresh);
        }
        self.refresh().await
    }

    /// Mark this pager's own pages stale without touching other pagers.
    pub fn invalidate(&self) {
        self.cache.invalidate(&self.key);
    }

    // Caller must have set `in_flight` under the lock before calling.
    async fn run_fetch(&self, page_number: u32, replace: bool) -> Result<FetchOutcome, ApiError> {
        let _guard = FlightGuard { state: &self.state };

        // Snapshot before the request so an invalidation racing the fetch
        // still leaves the pager stale afterwards.
        let generation = self.cache.generation(&self.key);

        match (self.fetch)(page_number, self.limit).await {
            Ok(page) => {
                let mut state = self.state.lock().expect("pager lock poisoned");
                if replace {
                    state.pages.clear();
                    state.loaded_generation = generation;
                }
                debug!(
                    key = ?self.key,
                    page = page_number,
                    items = page.items.len(),
                    "page loaded"
                );
                state.pages.push(page);
                state.last_error = None;
                Ok(FetchOutcome::Fetched)
            }
            Err(e) => {
                warn!(key = ?self.key, page = page_number, error = %e, "page fetch failed");
                let mut state = self.state.lock().expect("pager lock poisoned");
                state.last_error = Some(e.clone());
                Err(e)
            }
        }
    }

    /// Concatenation of all loaded pages in fetch order.
    pub fn items(&self) -> Vec<T> {
        let state = self.state.lock().expect("pager lock poisoned");
        state
            .pages
            .iter()
            .flat_map(|p| p.items.iter().cloned())
            .collect()
    }

    pub fn has_next_page(&self) -> bool {
        let state = self.state.lock().expect("pager lock poisoned");
        match state.pages.last() {
            Some(last) => last.pagination.has_next(),
            // Nothing loaded yet: the initial page counts as "next".
            None => true,
        }
    }

    pub fn is_fetching(&self) -> bool {
        self.state.lock().expect("pager lock poisoned").in_flight
    }

    /// Whether the query has been invalidated since the current pages loaded.
    pub fn is_stale(&self) -> bool {
        let state = self.state.lock().expect("pager lock poisoned");
        !state.pages.is_empty() && self.cache.generation(&self.key) > state.loaded_generation
    }

    pub fn last_error(&self) -> Option<ApiError> {
        self.state
            .lock()
            .expect("pager lock poisoned")
            .last_error
            .clone()
    }

    pub fn pages_loaded(&self) -> usize {
        self.state.lock().expect("pager lock poisoned").pages.len()
    }

    /// Total item count reported by the most recent page, if any.
    pub fn total(&self) -> Option<u32> {
        let state = self.state.lock().expect("pager lock poisoned");
        state.pages.last().map(|p| p.pagination.total)
    }

    pub fn key(&self) -> &QueryKey {
        &self.key
    }
}

impl<T> Drop for Pager<T> {
    fn drop(&mut self) {
        if let Some(id) = self.handler_id.get() {
            self.cache.unregister_refetcher(*id);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use focal_types::api::Pagination;
    use tokio::sync::Notify;

    use super::*;

    fn page_of(range: std::ops::Range<i64>, page: u32, total_pages: u32) -> Page<i64> {
        let items: Vec<i64> = range.collect();
        Page {
            pagination: Pagination {
                page,
                limit: items.len() as u32,
                total: total_pages * items.len() as u32,
                total_pages,
            },
            items,
        }
    }

    /// Serves `total_pages` pages of 10 sequential numbers, counting requests.
    struct CountingServer {
        requests: AtomicU32,
        total_pages: u32,
        fail_next: AtomicU32,
    }

    impl CountingServer {
        fn new(total_pages: u32) -> Arc<Self> {
            Arc::new(Self {
                requests: AtomicU32::new(0),
                total_pages,
                fail_next: AtomicU32::new(0),
            })
        }

        fn pager(self: &Arc<Self>, cache: Arc<QueryCache>) -> Arc<Pager<i64>> {
            let server = self.clone();
            Pager::new(cache, QueryKey::Feed, 10, move |page, _limit| {
                let server = server.clone();
                Box::pin(async move {
                    server.requests.fetch_add(1, Ordering::SeqCst);
                    if server.fail_next.swap(0, Ordering::SeqCst) > 0 {
                        return Err(ApiError::Network("boom".into()));
                    }
                    let start = (page as i64 - 1) * 10;
                    Ok(page_of(start..start + 10, page, server.total_pages))
                })
            })
        }
    }

    #[tokio::test]
    async fn test_initial_fetch_loads_page_one() {
        let server = CountingServer::new(3);
        let pager = server.pager(Arc::new(QueryCache::new()));

        assert_eq!(pager.fetch_next_page().await.unwrap(), FetchOutcome::Fetched);
        assert_eq!(pager.items(), (0..10).collect::<Vec<_>>());
        assert!(pager.has_next_page());
        assert_eq!(server.requests.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_pages_concatenate_in_order() {
        let server = CountingServer::new(3);
        let pager = server.pager(Arc::new(QueryCache::new()));

        pager.fetch_next_page().await.unwrap();
        pager.fetch_next_page().await.unwrap();
        pager.fetch_next_page().await.unwrap();

        assert_eq!(pager.items(), (0..30).collect::<Vec<_>>());
        assert_eq!(pager.pages_loaded(), 3);
    }

    #[tokio::test]
    async fn test_fetch_next_page_scenario_one_request_for_page_two() {
        // Page 1 of 10 posts, totalPages=3; one trigger → exactly one request
        // for page 2; flattened list is 20 items in original order.
        let server = CountingServer::new(3);
        let pager = server.pager(Arc::new(QueryCache::new()));

        pager.fetch_next_page().await.unwrap();
        assert_eq!(server.requests.load(Ordering::SeqCst), 1);

        assert_eq!(pager.fetch_next_page().await.unwrap(), FetchOutcome::Fetched);
        assert_eq!(server.requests.load(Ordering::SeqCst), 2);
        assert_eq!(pager.items(), (0..20).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_no_request_when_exhausted() {
        let server = CountingServer::new(1);
        let pager = server.pager(Arc::new(QueryCache::new()));

        pager.fetch_next_page().await.unwrap();
        assert!(!pager.has_next_page());

        let outcome = pager.fetch_next_page().await.unwrap();
        assert_eq!(outcome, FetchOutcome::Exhausted);
        assert_eq!(server.requests.load(Ordering::SeqCst), 1);
        assert_eq!(pager.items().len(), 10);
    }

    #[tokio::test]
    async fn test_fetch_failure_keeps_loaded_pages_and_is_retryable() {
        let server = CountingServer::new(3);
        let pager = server.pager(Arc::new(QueryCache::new()));

        pager.fetch_next_page().await.unwrap();
        server.fail_next.store(1, Ordering::SeqCst);

        let err = pager.fetch_next_page().await.unwrap_err();
        assert!(err.is_retryable());
        assert_eq!(pager.items(), (0..10).collect::<Vec<_>>());
        assert_eq!(pager.last_error(), Some(ApiError::Network("boom".into())));

        // Re-triggering retries the same page.
        pager.fetch_next_page().await.unwrap();
        assert_eq!(pager.items(), (0..20).collect::<Vec<_>>());
        assert!(pager.last_error().is_none());
    }

    #[tokio::test]
    async fn test_invalidate_keeps_items_until_next_read() {
        let cache = Arc::new(QueryCache::new());
        let server = CountingServer::new(3);
        let pager = server.pager(cache.clone());

        pager.fetch_next_page().await.unwrap();
        pager.fetch_next_page().await.unwrap();
        assert_eq!(pager.items().len(), 20);

        cache.invalidate(&QueryKey::Feed);
        assert!(pager.is_stale());
        // Displayed data untouched until the next read.
        assert_eq!(pager.items().len(), 20);

        // Next read refetches from page 1 and replaces the accumulation.
        pager.ensure_loaded().await.unwrap();
        assert!(!pager.is_stale());
        assert_eq!(pager.items(), (0..10).collect::<Vec<_>>());
        assert_eq!(pager.pages_loaded(), 1);
    }

    #[tokio::test]
    async fn test_ensure_loaded_is_noop_when_fresh() {
        let server = CountingServer::new(3);
        let pager = server.pager(Arc::new(QueryCache::new()));

        pager.fetch_next_page().await.unwrap();
        let outcome = pager.ensure_loaded().await.unwrap();
        assert_eq!(outcome, FetchOutcome::Fresh);
        assert_eq!(server.requests.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_single_flight_second_trigger_is_noop() {
        let cache = Arc::new(QueryCache::new());
        let gate = Arc::new(Notify::new());
        let requests = Arc::new(AtomicU32::new(0));

        let g = gate.clone();
        let reqs = requests.clone();
        let pager = Pager::new(cache, QueryKey::Feed, 10, move |page, _| {
            let g = g.clone();
            let reqs = reqs.clone();
            Box::pin(async move {
                reqs.fetch_add(1, Ordering::SeqCst);
                g.notified().await;
                Ok(page_of(0..10, page, 3))
            })
        });

        let first = {
            let pager = pager.clone();
            tokio::spawn(async move { pager.fetch_next_page().await })
        };
        // Let the first fetch reach its await point.
        tokio::task::yield_now().await;
        while requests.load(Ordering::SeqCst) == 0 {
            tokio::task::yield_now().await;
        }

        assert!(pager.is_fetching());
        let outcome = pager.fetch_next_page().await.unwrap();
        assert_eq!(outcome, FetchOutcome::AlreadyInFlight);

        gate.notify_one();
        first.await.unwrap().unwrap();
        assert_eq!(requests.load(Ordering::SeqCst), 1);
        assert_eq!(pager.items().len(), 10);
    }

    #[tokio::test]
    async fn test_refetch_handler_deregistered_on_drop() {
        let cache = Arc::new(QueryCache::new());
        let server = CountingServer::new(3);
        let pager = server.pager(cache.clone());

        pager.fetch_next_page().await.unwrap();
        drop(pager);

        // No pager left: refetch must not fire any handler (and not panic).
        cache.refetch(&QueryKey::Feed).await;
        assert_eq!(server.requests.load(Ordering::SeqCst), 1);
    }
}
