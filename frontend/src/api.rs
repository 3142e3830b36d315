use std::rc::Rc;

use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use shared::api::{STATS_PATH, review_path, reviews_path};
use shared::{
    ApiError, AppConfig, Review, ReviewApi, ReviewDetail, ReviewListResponse, ReviewQuery,
    ReviewSubmitRequest, StatsSummary,
};

/// `ReviewApi` over the browser's `fetch`.
#[derive(Clone)]
pub struct ApiClient {
    config: Rc<AppConfig>,
}

impl ApiClient {
    pub fn new(config: Rc<AppConfig>) -> Self {
        Self { config }
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.config.api_url(path);
        log::debug!("GET {}", url);
        let response = Request::get(&url)
            .send()
            .await
            .map_err(|e| network_error(&url, e))?;
        decode(&url, response).await
    }
}

fn network_error(url: &str, err: gloo_net::Error) -> ApiError {
    log::error!("request to {} failed: {}", url, err);
    ApiError::Network(err.to_string())
}

async fn decode<T: DeserializeOwned>(url: &str, response: Response) -> Result<T, ApiError> {
    if !response.ok() {
        let err = ApiError::Http {
            status: response.status(),
            status_text: response.status_text(),
        };
        log::error!("{}: {}", url, err);
        return Err(err);
    }

    response.json::<T>().await.map_err(|e| {
        log::error!("unexpected response body from {}: {}", url, e);
        ApiError::Decode(e.to_string())
    })
}

impl ReviewApi for ApiClient {
    async fn list_reviews(&self, query: &ReviewQuery) -> Result<ReviewListResponse, ApiError> {
        self.get(&reviews_path(query)).await
    }

    async fn get_review_detail(&self, task_id: &str) -> Result<ReviewDetail, ApiError> {
        self.get(&review_path(task_id)).await
    }

    async fn submit_review(
        &self,
        task_id: &str,
        request: &ReviewSubmitRequest,
    ) -> Result<Review, ApiError> {
        let url = self.config.api_url(&review_path(task_id));
        log::debug!("POST {}", url);
        let response = Request::post(&url)
            .json(request)
            .map_err(|e| ApiError::Request(e.to_string()))?
            .send()
            .await
            .map_err(|e| network_error(&url, e))?;
        decode(&url, response).await
    }

    async fn get_stats(&self) -> Result<StatsSummary, ApiError> {
        self.get(STATS_PATH).await
    }
}
