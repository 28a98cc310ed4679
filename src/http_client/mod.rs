//! This module provides the HTTP client shared by all SignalFx API calls.

mod client;

pub use client::{
    HttpClientError, create_base_http_client, create_http_client, create_retryable_http_client,
};
