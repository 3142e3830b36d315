use std::rc::Rc;

use crate::api::{ApiError, ReviewApi, ReviewQuery};
use crate::cache::{QueryCache, QueryFamily, QueryKey};
use crate::model::{Review, ReviewDetail, ReviewListResponse, ReviewSubmitRequest, StatsSummary};

/// A verdict can move a task between list filters, flips the detail's
/// `reviewed` flag and changes every aggregate.
pub const SUBMIT_INVALIDATES: [QueryFamily; 3] =
    [QueryFamily::Reviews, QueryFamily::Review, QueryFamily::Stats];

/// Review API reads behind the query cache.
pub struct ReviewStore<A> {
    api: A,
    cache: QueryCache,
}

impl<A> ReviewStore<A>
where
    A: ReviewApi + Clone + 'static,
{
    pub fn new(api: A, cache: QueryCache) -> Self {
        Self { api, cache }
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    pub async fn reviews(&self, query: &ReviewQuery) -> Result<Rc<ReviewListResponse>, ApiError> {
        let api = self.api.clone();
        let owned = query.clone();
        self.cache
            .fetch(QueryKey::Reviews(query.clone()), move || async move {
                api.list_reviews(&owned).await
            })
            .await
    }

    pub async fn review(&self, task_id: &str) -> Result<Rc<ReviewDetail>, ApiError> {
        let api = self.api.clone();
        let owned = task_id.to_string();
        self.cache
            .fetch(QueryKey::Review(task_id.to_string()), move || async move {
                api.get_review_detail(&owned).await
            })
            .await
    }

    pub async fn stats(&self) -> Result<Rc<StatsSummary>, ApiError> {
        let api = self.api.clone();
        self.cache
            .fetch(QueryKey::Stats, move || async move { api.get_stats().await })
            .await
    }

    pub fn cached_reviews(&self, query: &ReviewQuery) -> Option<Rc<ReviewListResponse>> {
        self.cache.peek(&QueryKey::Reviews(query.clone()))
    }

    pub fn cached_review(&self, task_id: &str) -> Option<Rc<ReviewDetail>> {
        self.cache.peek(&QueryKey::Review(task_id.to_string()))
    }

    pub fn cached_stats(&self) -> Option<Rc<StatsSummary>> {
        self.cache.peek(&QueryKey::Stats)
    }

    /// Records a verdict. On success every review, detail and stats entry is
    /// stale by the time this returns; on failure the cache is untouched.
    pub async fn submit_review(
        &self,
        task_id: &str,
        request: &ReviewSubmitRequest,
    ) -> Result<Review, ApiError> {
        let outcome = self
            .cache
            .mutate(self.api.submit_review(task_id, request), &SUBMIT_INVALIDATES)
            .await;
        match &outcome {
            Ok(review) => log::info!("review recorded for {} by {}", task_id, review.reviewed_by),
            Err(err) => log::error!("review submission for {} failed: {}", task_id, err),
        }
        outcome
    }
}
