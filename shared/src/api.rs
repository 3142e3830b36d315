use serde::{Deserialize, Serialize};

use crate::model::{Review, ReviewDetail, ReviewListResponse, ReviewSubmitRequest, StatsSummary};

/// Every failure of a review API call.
///
/// Callers do not branch on the variant; each one means "the request failed"
/// and is shown to the user as is.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    #[error("API Error: {status} {status_text}")]
    Http { status: u16, status_text: String },
    #[error("Network error: {0}")]
    Network(String),
    #[error("Failed to parse response: {0}")]
    Decode(String),
    #[error("Failed to build request: {0}")]
    Request(String),
}

/// Filter for the review list endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReviewQuery {
    pub reviewed: Option<bool>,
    pub grade_match: Option<bool>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl ReviewQuery {
    /// Query string without the leading `?`.
    ///
    /// Absent fields are left out; so are zero `limit`/`offset`, which the
    /// backend treats the same as absent.
    pub fn to_query_string(&self) -> String {
        let mut pairs = Vec::new();
        if let Some(reviewed) = self.reviewed {
            pairs.push(format!("reviewed={}", reviewed));
        }
        if let Some(grade_match) = self.grade_match {
            pairs.push(format!("grade_match={}", grade_match));
        }
        if let Some(limit) = self.limit.filter(|l| *l > 0) {
            pairs.push(format!("limit={}", limit));
        }
        if let Some(offset) = self.offset.filter(|o| *o > 0) {
            pairs.push(format!("offset={}", offset));
        }
        pairs.join("&")
    }
}

pub fn reviews_path(query: &ReviewQuery) -> String {
    let query = query.to_query_string();
    if query.is_empty() {
        "/api/reviews".to_string()
    } else {
        format!("/api/reviews?{}", query)
    }
}

pub fn review_path(task_id: &str) -> String {
    format!("/api/reviews/{}", urlencoding::encode(task_id))
}

pub const STATS_PATH: &str = "/api/reviews/stats";

/// The four calls of the review backend.
///
/// The browser client implements this over `fetch`; tests use in-memory
/// fakes. Futures are not `Send`: everything runs on the UI event loop.
#[allow(async_fn_in_trait)]
pub trait ReviewApi {
    async fn list_reviews(&self, query: &ReviewQuery) -> Result<ReviewListResponse, ApiError>;

    async fn get_review_detail(&self, task_id: &str) -> Result<ReviewDetail, ApiError>;

    async fn submit_review(
        &self,
        task_id: &str,
        request: &ReviewSubmitRequest,
    ) -> Result<Review, ApiError>;

    async fn get_stats(&self) -> Result<StatsSummary, ApiError>;
}
