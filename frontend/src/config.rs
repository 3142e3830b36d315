use gloo_net::http::Request;
use serde::Deserialize;
use shared::AppConfig;
use shared::config::{DEFAULT_API_URL, DEFAULT_IMAGE_BASE_URL};

const CONFIG_PATH: &str = "/app-config.json";

#[derive(Deserialize)]
struct ConfigDocument {
    api_base_url: Option<String>,
    image_base_url: Option<String>,
}

/// Settings baked in at build time.
pub fn compiled_config() -> AppConfig {
    AppConfig {
        api_base_url: option_env!("API_URL").unwrap_or(DEFAULT_API_URL).to_string(),
        image_base_url: option_env!("IMAGE_BASE_URL")
            .unwrap_or(DEFAULT_IMAGE_BASE_URL)
            .to_string(),
    }
}

/// Compiled settings overridden by whatever the host serves at `/app-config.json`.
pub async fn load_config() -> AppConfig {
    let mut config = compiled_config();

    let document = match Request::get(CONFIG_PATH).send().await {
        Ok(response) if response.ok() => response.json::<ConfigDocument>().await,
        Ok(response) => {
            log::warn!("{} returned {}, using built-in settings", CONFIG_PATH, response.status());
            return config;
        }
        Err(e) => {
            log::warn!("could not load {}: {}, using built-in settings", CONFIG_PATH, e);
            return config;
        }
    };

    match document {
        Ok(document) => {
            if let Some(url) = document.api_base_url.filter(|u| !u.is_empty()) {
                config.api_base_url = url;
            }
            if let Some(url) = document.image_base_url.filter(|u| !u.is_empty()) {
                config.image_base_url = url;
            }
        }
        Err(e) => log::warn!("ignoring malformed {}: {}", CONFIG_PATH, e),
    }

    log::info!("review API at {}", config.api_base_url);
    config
}
