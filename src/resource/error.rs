//! Error types for resource operations.

use reqwest::{Method, StatusCode};
use thiserror::Error;

use crate::models::ValidationError;

/// Failure to turn a configuration into a request body. Never retried.
#[derive(Debug, Error)]
pub enum BuildError {
    /// The configuration was rejected before serialization.
    #[error("Invalid configuration: {0}")]
    Validation(#[from] ValidationError),

    /// The payload could not be serialized.
    #[error("Failed to serialize payload: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Failure reported by, or while talking to, the SignalFx API.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// The API answered with a non-success status.
    #[error("SignalFx returned status {status} for {method} {url}: {body}")]
    Status {
        /// HTTP method of the request.
        method: Method,
        /// Requested URL.
        url: String,
        /// Returned status.
        status: StatusCode,
        /// Response body, verbatim.
        body: String,
    },

    /// The request could not be sent or the response could not be read.
    #[error("Request to {url} failed: {source}")]
    Transport {
        /// Requested URL.
        url: String,
        /// Underlying transport error.
        source: reqwest_middleware::Error,
    },

    /// The response body is not the expected JSON document.
    #[error("Failed to decode response from {url}: {source}")]
    Decode {
        /// Requested URL.
        url: String,
        /// Underlying decoding error.
        source: serde_json::Error,
    },

    /// The auth token cannot be used as a header value.
    #[error("Invalid auth token: {0}")]
    InvalidToken(String),
}

/// Errors returned by resource operations.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// The request payload could not be built.
    #[error("Failed creating json payload: {0}")]
    Build(#[from] BuildError),

    /// The API call failed.
    #[error(transparent)]
    Remote(#[from] RemoteError),

    /// The resource no longer exists remotely.
    #[error("Resource not found at {url}")]
    NotFound {
        /// Requested URL.
        url: String,
    },
}

impl ResourceError {
    /// Returns `true` if the remote object does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ResourceError::NotFound { .. })
    }
}
