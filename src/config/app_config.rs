use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use url::Url;

use super::{BaseHttpClientConfig, HttpRetryConfig, deserialize_api_url};

/// Public SignalFx API realm used when no `api_url` is configured.
pub const DEFAULT_API_URL: &str = "https://api.signalfx.com";

/// Provides the default value for api_url.
fn default_api_url() -> Url {
    Url::parse(DEFAULT_API_URL).expect("default API URL is a valid URL")
}

/// Application configuration for signalform.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Session or org token sent as `X-SF-Token` with every request.
    pub auth_token: String,

    /// Base URL of the SignalFx API.
    #[serde(default = "default_api_url", deserialize_with = "deserialize_api_url")]
    pub api_url: Url,

    /// Path to the declared muting rules file.
    #[serde(skip_deserializing)]
    pub muting_rules_path: PathBuf,

    /// Path to the local state file.
    #[serde(skip_deserializing)]
    pub state_path: PathBuf,

    /// Configuration for HTTP client retry policies.
    #[serde(default)]
    pub http_retry_config: HttpRetryConfig,

    /// Configuration for the base HTTP client.
    #[serde(default)]
    pub http_base_config: BaseHttpClientConfig,
}

impl AppConfig {
    /// Creates a new `AppConfig` by reading `app.yaml` from the configuration
    /// directory, overlaid with `SIGNALFORM__*` environment variables.
    pub fn new(config_dir: Option<&str>) -> Result<Self, ConfigError> {
        let config_dir_str = config_dir.unwrap_or("configs");
        let s = Config::builder()
            .add_source(File::with_name(&format!("{}/app.yaml", config_dir_str)))
            .add_source(Environment::with_prefix("SIGNALFORM").separator("__"))
            .build()?;
        let mut config: Self = s.try_deserialize()?;

        if config.auth_token.trim().is_empty() {
            return Err(ConfigError::Message("auth_token must not be empty".to_string()));
        }

        // Resolve the rule and state files relative to the config directory.
        let config_path = Path::new(config_dir_str);
        config.muting_rules_path = config_path.join("muting_rules.yaml");
        config.state_path = config_path.join("state.json");

        Ok(config)
    }
}
