pub mod api;
pub mod cache;
pub mod config;
pub mod format;
pub mod grading;
pub mod model;
pub mod overlay;
pub mod route;
pub mod stats;
pub mod store;
pub mod timestamp;
pub mod views;

pub use strum::IntoEnumIterator;
pub use views::form;

pub use api::{ApiError, ReviewApi, ReviewQuery};
pub use cache::{CacheConfig, QueryCache, QueryFamily, QueryKey};
pub use config::AppConfig;
pub use model::*;
pub use route::Route;
pub use store::ReviewStore;
pub use timestamp::Timestamp;
