//! SignalFx resources and the client used to manage them.

pub mod client;
pub mod error;
pub mod muting_rule;
pub mod payload;
pub mod response;
pub mod traits;

pub use client::SignalFxClient;
pub use error::{BuildError, RemoteError, ResourceError};
pub use traits::ResourceApi;
