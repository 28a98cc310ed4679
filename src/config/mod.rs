//! Configuration module for signalform.

mod app_config;
mod helpers;
mod http_base;
mod http_retry;
mod loader;
mod muting_rule_loader;

pub use app_config::{AppConfig, DEFAULT_API_URL};
pub use helpers::{
    deserialize_api_url, deserialize_duration_from_ms, deserialize_duration_from_seconds,
    serialize_duration_to_seconds,
};
pub use http_base::BaseHttpClientConfig;
pub use http_retry::{HttpRetryConfig, JitterSetting};
pub use loader::{ConfigLoader, LoaderError};
pub use muting_rule_loader::{MutingRuleLoader, MutingRuleLoaderError};
