//! The interface resource handlers use to reach the SignalFx API.

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use serde_json::Value;

use super::error::ResourceError;

/// Generic JSON REST operations on SignalFx resources.
///
/// Every method performs a single request. A `404` answer is reported as
/// [`ResourceError::NotFound`]; any other non-success status as
/// [`ResourceError::Remote`].
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ResourceApi: Send + Sync {
    /// Resolves an API path (e.g. `v2/alertmuting`) against the API base URL.
    fn endpoint(&self, path: &str) -> String;

    /// Creates a resource in the collection at `url`.
    async fn create(&self, url: &str, payload: &Value) -> Result<Value, ResourceError>;

    /// Reads the resource at `url`.
    async fn read(&self, url: &str) -> Result<Value, ResourceError>;

    /// Replaces the resource at `url`.
    async fn update(&self, url: &str, payload: &Value) -> Result<Value, ResourceError>;

    /// Deletes the resource at `url`.
    async fn delete(&self, url: &str) -> Result<(), ResourceError>;
}
