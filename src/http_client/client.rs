//! Builds the HTTP client used for SignalFx API calls, with middleware for
//! retrying transient errors when a retry policy is configured.

use reqwest::Client as ReqwestClient;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{Jitter, RetryTransientMiddleware, policies::ExponentialBackoff};
use thiserror::Error;

use crate::config::{BaseHttpClientConfig, HttpRetryConfig, JitterSetting};

/// Errors that can occur while building an HTTP client.
#[derive(Debug, Error)]
pub enum HttpClientError {
    /// An error occurred while building the underlying `reqwest::Client`.
    #[error("Failed to create HTTP client: {0}")]
    HttpClientBuildError(String),
}

/// Creates the base `reqwest::Client` from the pool and timeout settings.
pub fn create_base_http_client(
    config: &BaseHttpClientConfig,
) -> Result<ReqwestClient, HttpClientError> {
    ReqwestClient::builder()
        .pool_max_idle_per_host(config.max_idle_per_host)
        .pool_idle_timeout(Some(config.idle_timeout))
        .connect_timeout(config.connect_timeout)
        .timeout(config.request_timeout)
        .build()
        .map_err(|e| HttpClientError::HttpClientBuildError(e.to_string()))
}

/// Wraps `base_client` in middleware.
///
/// The retry middleware is only installed when `config.max_retries` is
/// non-zero, so by default every call maps to exactly one request.
pub fn create_retryable_http_client(
    config: &HttpRetryConfig,
    base_client: ReqwestClient,
) -> ClientWithMiddleware {
    if config.max_retries == 0 {
        return ClientBuilder::new(base_client).build();
    }

    let policy_builder = match config.jitter {
        JitterSetting::None => ExponentialBackoff::builder().jitter(Jitter::None),
        JitterSetting::Full => ExponentialBackoff::builder().jitter(Jitter::Full),
    };

    let retry_policy = policy_builder
        .base(config.base_for_backoff)
        .retry_bounds(config.initial_backoff_ms, config.max_backoff_secs)
        .build_with_max_retries(config.max_retries);

    ClientBuilder::new(base_client)
        .with(RetryTransientMiddleware::new_with_policy(retry_policy))
        .build()
}

/// Creates the fully configured client in one step.
pub fn create_http_client(
    base_config: &BaseHttpClientConfig,
    retry_config: &HttpRetryConfig,
) -> Result<ClientWithMiddleware, HttpClientError> {
    let base_client = create_base_http_client(base_config)?;
    Ok(create_retryable_http_client(retry_config, base_client))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_http_client_with_defaults() {
        let client =
            create_http_client(&BaseHttpClientConfig::default(), &HttpRetryConfig::default());
        assert!(client.is_ok());
    }

    #[tokio::test]
    async fn test_no_retry_by_default() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/")
            .with_status(503)
            .expect(1)
            .create_async()
            .await;

        let client =
            create_http_client(&BaseHttpClientConfig::default(), &HttpRetryConfig::default())
                .unwrap();
        let response = client.get(server.url()).send().await.unwrap();

        assert_eq!(response.status(), 503);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_retries_transient_errors_when_configured() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/")
            .with_status(503)
            .expect(3)
            .create_async()
            .await;

        let retry_config = HttpRetryConfig {
            max_retries: 2,
            initial_backoff_ms: std::time::Duration::from_millis(1),
            max_backoff_secs: std::time::Duration::from_millis(5),
            jitter: JitterSetting::None,
            ..Default::default()
        };
        let client = create_http_client(&BaseHttpClientConfig::default(), &retry_config).unwrap();
        let response = client.get(server.url()).send().await.unwrap();

        assert_eq!(response.status(), 503);
        mock.assert_async().await;
    }
}
