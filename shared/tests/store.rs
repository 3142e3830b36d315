use std::cell::{Cell, RefCell};
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll};

use assert_matches::assert_matches;
use chrono::{DateTime, Duration, TimeZone, Utc};
use futures::executor::block_on;
use futures::join;

use shared::cache::QueryFamily;
use shared::views::{ListState, ReviewFilter};
use shared::{
    ApiError, CacheConfig, QueryCache, QueryKey, Review, ReviewApi, ReviewDetail,
    ReviewListResponse, ReviewQuery, ReviewStore, ReviewSubmitRequest, StatsSummary, Timestamp,
    Verdict,
};

/// Returns `Pending` once so concurrent callers interleave.
struct YieldOnce(bool);

impl Future for YieldOnce {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if self.0 {
            Poll::Ready(())
        } else {
            self.0 = true;
            cx.waker().wake_by_ref();
            Poll::Pending
        }
    }
}

fn yield_now() -> YieldOnce {
    YieldOnce(false)
}

#[derive(Default)]
struct Backend {
    pending: Cell<u64>,
    reviewed: Cell<u64>,
    list_calls: Cell<usize>,
    stats_calls: Cell<usize>,
    submit_calls: Cell<usize>,
    fail_submit: Cell<bool>,
    // run between the request going out and the response coming back
    on_list: RefCell<Option<Box<dyn Fn()>>>,
}

#[derive(Clone, Default)]
struct FakeApi {
    backend: Rc<Backend>,
}

impl FakeApi {
    fn with_pending(pending: u64) -> Self {
        let api = Self::default();
        api.backend.pending.set(pending);
        api
    }
}

impl ReviewApi for FakeApi {
    async fn list_reviews(&self, _query: &ReviewQuery) -> Result<ReviewListResponse, ApiError> {
        let b = &self.backend;
        b.list_calls.set(b.list_calls.get() + 1);
        // snapshot taken when the request is served
        let (pending, reviewed) = (b.pending.get(), b.reviewed.get());
        yield_now().await;
        if let Some(hook) = b.on_list.borrow_mut().take() {
            hook();
        }
        Ok(ReviewListResponse {
            items: Vec::new(),
            total: pending + reviewed,
            pending_count: pending,
            reviewed_count: reviewed,
        })
    }

    async fn get_review_detail(&self, task_id: &str) -> Result<ReviewDetail, ApiError> {
        yield_now().await;
        Err(ApiError::Http {
            status: 404,
            status_text: format!("Not Found {}", task_id),
        })
    }

    async fn submit_review(
        &self,
        task_id: &str,
        request: &ReviewSubmitRequest,
    ) -> Result<Review, ApiError> {
        let b = &self.backend;
        b.submit_calls.set(b.submit_calls.get() + 1);
        yield_now().await;
        if b.fail_submit.get() {
            return Err(ApiError::Http {
                status: 409,
                status_text: "Conflict".into(),
            });
        }
        b.pending.set(b.pending.get() - 1);
        b.reviewed.set(b.reviewed.get() + 1);
        Ok(Review {
            task_id: task_id.to_string(),
            verdict: request.verdict,
            reviewed_by: request.reviewed_by.clone(),
            reviewed_at: Timestamp::parse("2025-03-01T12:00:00Z").unwrap(),
            comment: request.comment.clone(),
        })
    }

    async fn get_stats(&self) -> Result<StatsSummary, ApiError> {
        let b = &self.backend;
        b.stats_calls.set(b.stats_calls.get() + 1);
        yield_now().await;
        Ok(StatsSummary {
            total: b.pending.get() + b.reviewed.get(),
            reviewed: b.reviewed.get(),
            pending: b.pending.get(),
            grade_match_count: 0,
            grade_match_rate: 0.0,
            verdict_distribution: Default::default(),
            gemini_grade_distribution: Default::default(),
            custom_grade_distribution: Default::default(),
            reviewer_stats: Vec::new(),
        })
    }
}

fn request() -> ReviewSubmitRequest {
    ReviewSubmitRequest {
        verdict: Verdict::CustomCorrect,
        comment: None,
        reviewed_by: "lee".into(),
    }
}

fn pending_query() -> ReviewQuery {
    ListState::default().with_filter(ReviewFilter::Pending).query()
}

struct FakeClock(Rc<Cell<DateTime<Utc>>>);

impl FakeClock {
    fn new() -> Self {
        Self(Rc::new(Cell::new(Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap())))
    }

    fn cache(&self) -> QueryCache {
        let now = self.0.clone();
        QueryCache::with_clock(CacheConfig::default(), move || now.get())
    }

    fn advance(&self, by: Duration) {
        self.0.set(self.0.get() + by);
    }
}

#[test]
fn concurrent_identical_reads_share_one_request() {
    let api = FakeApi::with_pending(5);
    let store = ReviewStore::new(api.clone(), QueryCache::default());
    let query = pending_query();

    let (a, b) = block_on(async { join!(store.reviews(&query), store.reviews(&query)) });

    assert_eq!(a.unwrap().pending_count, 5);
    assert_eq!(b.unwrap().pending_count, 5);
    assert_eq!(api.backend.list_calls.get(), 1);
}

#[test]
fn distinct_queries_are_cached_separately() {
    let api = FakeApi::with_pending(5);
    let store = ReviewStore::new(api.clone(), QueryCache::default());

    block_on(async {
        store.reviews(&pending_query()).await.unwrap();
        store.reviews(&ListState::default().query()).await.unwrap();
        store.reviews(&pending_query()).await.unwrap();
    });

    assert_eq!(api.backend.list_calls.get(), 2);
}

#[test]
fn fresh_entries_are_served_without_network() {
    let clock = FakeClock::new();
    let api = FakeApi::with_pending(3);
    let store = ReviewStore::new(api.clone(), clock.cache());

    block_on(store.stats()).unwrap();
    clock.advance(Duration::seconds(29));
    block_on(store.stats()).unwrap();
    assert_eq!(api.backend.stats_calls.get(), 1);
    assert!(store.cache().is_fresh(&QueryKey::Stats));

    clock.advance(Duration::seconds(1));
    assert!(!store.cache().is_fresh(&QueryKey::Stats));
    block_on(store.stats()).unwrap();
    assert_eq!(api.backend.stats_calls.get(), 2);
}

#[test]
fn submit_refreshes_pending_count() {
    let api = FakeApi::with_pending(4);
    let store = ReviewStore::new(api.clone(), QueryCache::default());
    let query = pending_query();

    let before = block_on(store.reviews(&query)).unwrap();
    assert_eq!(before.pending_count, 4);
    block_on(store.stats()).unwrap();

    let review = block_on(store.submit_review("task-1", &request())).unwrap();
    assert_eq!(review.reviewed_by, "lee");

    // still readable for display, but no longer fresh
    assert_eq!(store.cached_reviews(&query).map(|r| r.pending_count), Some(4));
    assert!(!store.cache().is_fresh(&QueryKey::Reviews(query.clone())));
    assert!(!store.cache().is_fresh(&QueryKey::Stats));

    let after = block_on(store.reviews(&query)).unwrap();
    assert_eq!(after.pending_count, 3);
    assert_eq!(after.reviewed_count, 1);
    assert_eq!(block_on(store.stats()).unwrap().pending, 3);
    assert_eq!(api.backend.list_calls.get(), 2);
}

#[test]
fn failed_submit_keeps_cache() {
    let api = FakeApi::with_pending(2);
    let store = ReviewStore::new(api.clone(), QueryCache::default());
    let query = pending_query();
    block_on(store.reviews(&query)).unwrap();

    api.backend.fail_submit.set(true);
    let err = block_on(store.submit_review("task-1", &request())).unwrap_err();
    assert_matches!(err, ApiError::Http { status: 409, .. });
    assert_eq!(err.to_string(), "API Error: 409 Conflict");

    assert!(store.cache().is_fresh(&QueryKey::Reviews(query.clone())));
    block_on(store.reviews(&query)).unwrap();
    assert_eq!(api.backend.list_calls.get(), 1);
}

#[test]
fn read_started_before_invalidation_is_not_stored() {
    let api = FakeApi::with_pending(6);
    let cache = QueryCache::default();
    let store = ReviewStore::new(api.clone(), cache.clone());
    let query = pending_query();

    // the list request is answered from pre-submit data, but the submit lands
    // before the response arrives
    let backend = api.backend.clone();
    let invalidating = cache.clone();
    *api.backend.on_list.borrow_mut() = Some(Box::new(move || {
        backend.pending.set(backend.pending.get() - 1);
        backend.reviewed.set(backend.reviewed.get() + 1);
        invalidating.invalidate(QueryFamily::Reviews);
    }));

    let old = block_on(store.reviews(&query)).unwrap();
    assert_eq!(old.pending_count, 6);
    assert!(store.cached_reviews(&query).is_none());

    let fresh = block_on(store.reviews(&query)).unwrap();
    assert_eq!(fresh.pending_count, 5);
    assert_eq!(api.backend.list_calls.get(), 2);
}

#[test]
fn failed_reads_are_not_cached() {
    let store = ReviewStore::new(FakeApi::default(), QueryCache::default());

    let err = block_on(store.review("missing")).unwrap_err();
    assert_matches!(err, ApiError::Http { status: 404, .. });
    assert!(store.cached_review("missing").is_none());
    assert!(!store.cache().is_fresh(&QueryKey::Review("missing".into())));
}

#[test]
fn unused_entries_are_evicted() {
    let clock = FakeClock::new();
    let api = FakeApi::with_pending(3);
    let store = ReviewStore::new(api.clone(), clock.cache());
    let pending = pending_query();

    block_on(store.stats()).unwrap();
    block_on(store.reviews(&pending)).unwrap();
    assert_eq!(store.cache().len(), 2);

    clock.advance(Duration::minutes(4));
    block_on(store.reviews(&pending)).unwrap();

    // stats was last read five minutes ago, the pending list one minute ago
    clock.advance(Duration::minutes(1));
    block_on(store.reviews(&ListState::default().query())).unwrap();
    assert_eq!(store.cache().len(), 2);
    assert!(store.cached_stats().is_none());
    assert!(store.cached_reviews(&pending).is_some());

    clock.advance(Duration::minutes(5));
    store.cache().invalidate(QueryFamily::Stats);
    assert!(store.cache().is_empty());
}

#[test]
fn evicted_entry_ignores_read_started_before_invalidation() {
    let clock = FakeClock::new();
    let api = FakeApi::with_pending(6);
    let cache = clock.cache();
    let store = ReviewStore::new(api.clone(), cache.clone());
    let query = pending_query();

    // the submit lands, the slot is evicted and the same key is read again
    // while the first response is still on its way
    let backend = api.backend.clone();
    let invalidating = cache.clone();
    let now = clock.0.clone();
    *api.backend.on_list.borrow_mut() = Some(Box::new(move || {
        backend.pending.set(backend.pending.get() - 1);
        invalidating.invalidate(QueryFamily::Reviews);
        now.set(now.get() + Duration::minutes(10));
        invalidating.invalidate(QueryFamily::Stats);
    }));

    let old = block_on(store.reviews(&query)).unwrap();
    assert_eq!(old.pending_count, 6);
    assert!(store.cached_reviews(&query).is_none());

    let fresh = block_on(store.reviews(&query)).unwrap();
    assert_eq!(fresh.pending_count, 5);
    assert_eq!(store.cached_reviews(&query).map(|r| r.pending_count), Some(5));
}
