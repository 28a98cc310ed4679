//! Commands of the `signalform` binary.

pub mod apply;
pub mod delete;
pub mod get;

pub use apply::{ApplyArgs, ApplySummary, reconcile};
pub use delete::{DeleteArgs, delete_rule};
pub use get::{GetArgs, get_rule};

use thiserror::Error;

use crate::{
    config::{AppConfig, MutingRuleLoaderError},
    http_client::HttpClientError,
    persistence::{JsonFileStateRepository, error::PersistenceError},
    resource::{ResourceError, SignalFxClient},
};

/// Errors surfaced by the commands.
#[derive(Error, Debug)]
pub enum Error {
    /// The application configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    /// The HTTP client could not be built.
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] HttpClientError),
    /// The declared muting rules could not be loaded.
    #[error("Muting rule loading error: {0}")]
    MutingRuleLoading(#[from] MutingRuleLoaderError),
    /// The local state could not be read or written.
    #[error("State error: {0}")]
    Persistence(#[from] PersistenceError),
    /// A SignalFx operation failed.
    #[error("Muting rule operation failed: {0}")]
    Resource(#[from] ResourceError),
    /// Output could not be rendered.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
    /// The named rule is not recorded in the local state.
    #[error("No muting rule named '{0}' in state")]
    UnknownRule(String),
}

/// Everything a command needs: configuration, API client and state.
pub struct Context {
    /// Loaded application configuration.
    pub config: AppConfig,
    /// Client for the SignalFx API.
    pub client: SignalFxClient,
    /// Recorded state of managed rules.
    pub state: JsonFileStateRepository,
}

impl Context {
    /// Loads the configuration from `config_dir` and opens the state file.
    pub async fn load(config_dir: Option<&str>) -> Result<Self, Error> {
        tracing::debug!(config_dir = ?config_dir, "Loading application configuration...");
        let config = AppConfig::new(config_dir)?;
        tracing::debug!(api_url = %config.api_url, state_path = ?config.state_path, "Configuration loaded.");

        let client = SignalFxClient::from_config(&config)?;
        tracing::debug!(retry_policy = ?config.http_retry_config, "SignalFx client initialized.");

        let state = JsonFileStateRepository::open(&config.state_path).await?;

        Ok(Self { config, client, state })
    }
}
