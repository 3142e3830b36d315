use serde::{Deserialize, Serialize};

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://images.banpoom.co.kr";

/// Where the client finds the review API and the image host.
///
/// Served by the static host as `/app-config.json`; absent fields keep their
/// defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api_base_url: String,
    pub image_base_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            image_base_url: DEFAULT_IMAGE_BASE_URL.to_string(),
        }
    }
}

impl AppConfig {
    pub fn image_url(&self, key: &str) -> String {
        join_url(&self.image_base_url, key)
    }

    pub fn api_url(&self, path: &str) -> String {
        join_url(&self.api_base_url, path)
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_without_doubled_slashes() {
        let config = AppConfig {
            api_base_url: "http://api.local/".into(),
            image_base_url: "https://img.example".into(),
        };
        assert_eq!(config.image_url("/inspections/1.jpg"), "https://img.example/inspections/1.jpg");
        assert_eq!(config.image_url("a.jpg"), "https://img.example/a.jpg");
        assert_eq!(config.api_url("/api/reviews/stats"), "http://api.local/api/reviews/stats");
    }

    #[test]
    fn partial_document_keeps_defaults() {
        let config: AppConfig = serde_json::from_str(r#"{"api_base_url":"http://x"}"#).unwrap();
        assert_eq!(config.api_base_url, "http://x");
        assert_eq!(config.image_base_url, DEFAULT_IMAGE_BASE_URL);
    }
}
