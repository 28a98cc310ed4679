use reqwest::Client;
use reqwest_middleware::ClientWithMiddleware;
use std::sync::Arc;

use crate::{config::HttpRetryConfig, http_client::create_retryable_http_client};

/// Creates an HTTP client without retries for testing purposes.
pub fn create_test_http_client() -> Arc<ClientWithMiddleware> {
    let client = create_retryable_http_client(&HttpRetryConfig::default(), Client::new());

    Arc::new(client)
}
