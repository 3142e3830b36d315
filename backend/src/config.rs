use std::env;
use std::num::ParseIntError;
use std::path::PathBuf;

use shared::AppConfig;
use shared::config::{DEFAULT_API_URL, DEFAULT_IMAGE_BASE_URL};

const DEFAULT_PORT: u16 = 8081;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("PORT must be a port number, got {value:?}")]
    InvalidPort {
        value: String,
        #[source]
        source: ParseIntError,
    },
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub port: u16,
    pub frontend_dir: PathBuf,
    /// Handed to the browser as `/app-config.json`.
    pub app_config: AppConfig,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(value) => value
                .parse()
                .map_err(|source| ConfigError::InvalidPort { value, source })?,
            None => DEFAULT_PORT,
        };

        let frontend_dir = lookup("FRONTEND_DIR")
            .or_else(|| {
                lookup("CARGO_MANIFEST_DIR").map(|manifest_dir| format!("{}/../frontend/dist", manifest_dir))
            })
            .unwrap_or_else(|| "/usr/src/app/frontend/dist".to_string());

        Ok(Self {
            port,
            frontend_dir: PathBuf::from(frontend_dir),
            app_config: AppConfig {
                api_base_url: lookup("API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
                image_base_url: lookup("IMAGE_BASE_URL")
                    .unwrap_or_else(|| DEFAULT_IMAGE_BASE_URL.to_string()),
            },
        })
    }

    pub fn bind_address(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn settings(vars: &[(&str, &str)]) -> Result<Settings, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_without_environment() {
        let settings = settings(&[]).unwrap();
        assert_eq!(settings.port, 8081);
        assert_eq!(settings.bind_address(), "0.0.0.0:8081");
        assert_eq!(settings.frontend_dir, PathBuf::from("/usr/src/app/frontend/dist"));
        assert_eq!(settings.app_config, AppConfig::default());
    }

    #[test]
    fn environment_overrides() {
        let settings = settings(&[
            ("PORT", "9000"),
            ("CARGO_MANIFEST_DIR", "/src/backend"),
            ("API_URL", "https://reviews.internal"),
        ])
        .unwrap();
        assert_eq!(settings.port, 9000);
        assert_eq!(settings.frontend_dir, PathBuf::from("/src/backend/../frontend/dist"));
        assert_eq!(settings.app_config.api_base_url, "https://reviews.internal");
        assert_eq!(settings.app_config.image_base_url, DEFAULT_IMAGE_BASE_URL);
    }

    #[test]
    fn explicit_frontend_dir_wins() {
        let settings = settings(&[("FRONTEND_DIR", "/srv/dist"), ("CARGO_MANIFEST_DIR", "/x")]).unwrap();
        assert_eq!(settings.frontend_dir, PathBuf::from("/srv/dist"));
    }

    #[test]
    fn rejects_bad_port() {
        let err = settings(&[("PORT", "http")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPort { ref value, .. } if value == "http"));
        assert_eq!(err.to_string(), "PORT must be a port number, got \"http\"");
    }
}
