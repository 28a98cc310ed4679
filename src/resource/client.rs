//! HTTP implementation of [`ResourceApi`] against the SignalFx REST API.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{
    Method, StatusCode,
    header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue},
};
use reqwest_middleware::ClientWithMiddleware;
use serde_json::Value;
use url::Url;

use super::{
    error::{RemoteError, ResourceError},
    traits::ResourceApi,
};
use crate::{
    config::AppConfig,
    http_client::{HttpClientError, create_http_client},
};

/// Header carrying the SignalFx auth token.
const AUTH_TOKEN_HEADER: HeaderName = HeaderName::from_static("x-sf-token");

/// Client for SignalFx resource endpoints.
#[derive(Debug, Clone)]
pub struct SignalFxClient {
    http: Arc<ClientWithMiddleware>,
    api_url: Url,
    auth_token: String,
}

impl SignalFxClient {
    /// Creates a client from an existing HTTP client.
    pub fn new(
        http: Arc<ClientWithMiddleware>,
        api_url: Url,
        auth_token: impl Into<String>,
    ) -> Self {
        Self {
            http,
            api_url,
            auth_token: auth_token.into(),
        }
    }

    /// Creates a client, and its HTTP client, from the application config.
    pub fn from_config(config: &AppConfig) -> Result<Self, HttpClientError> {
        let http = create_http_client(&config.http_base_config, &config.http_retry_config)?;
        Ok(Self::new(
            Arc::new(http),
            config.api_url.clone(),
            config.auth_token.clone(),
        ))
    }

    fn headers(&self) -> Result<HeaderMap, RemoteError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let mut token = HeaderValue::from_str(&self.auth_token)
            .map_err(|e| RemoteError::InvalidToken(e.to_string()))?;
        token.set_sensitive(true);
        headers.insert(AUTH_TOKEN_HEADER, token);
        Ok(headers)
    }

    /// Sends one request and decodes the JSON answer. An empty body decodes
    /// to `Value::Null`.
    #[tracing::instrument(skip(self, payload), level = "debug")]
    async fn send(
        &self,
        method: Method,
        url: &str,
        payload: Option<&Value>,
    ) -> Result<Value, ResourceError> {
        let mut request = self.http.request(method.clone(), url).headers(self.headers()?);
        if let Some(payload) = payload {
            request = request.json(payload);
        }

        let response = request.send().await.map_err(|source| RemoteError::Transport {
            url: url.to_string(),
            source,
        })?;

        let status = response.status();
        tracing::debug!(%status, "SignalFx responded.");

        if status == StatusCode::NOT_FOUND {
            return Err(ResourceError::NotFound { url: url.to_string() });
        }

        let body = response.bytes().await.map_err(|e| RemoteError::Transport {
            url: url.to_string(),
            source: e.into(),
        })?;

        if !status.is_success() {
            return Err(RemoteError::Status {
                method,
                url: url.to_string(),
                status,
                body: String::from_utf8_lossy(&body).into_owned(),
            }
            .into());
        }

        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }

        serde_json::from_slice(&body)
            .map_err(|source| RemoteError::Decode { url: url.to_string(), source }.into())
    }
}

#[async_trait]
impl ResourceApi for SignalFxClient {
    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    async fn create(&self, url: &str, payload: &Value) -> Result<Value, ResourceError> {
        self.send(Method::POST, url, Some(payload)).await
    }

    async fn read(&self, url: &str) -> Result<Value, ResourceError> {
        self.send(Method::GET, url, None).await
    }

    async fn update(&self, url: &str, payload: &Value) -> Result<Value, ResourceError> {
        self.send(Method::PUT, url, Some(payload)).await
    }

    async fn delete(&self, url: &str) -> Result<(), ResourceError> {
        self.send(Method::DELETE, url, None).await.map(|_| ())
    }
}
