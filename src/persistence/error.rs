//! This module contains the error types for the persistence layer.

use thiserror::Error;

/// Errors that can occur in the persistence layer.
#[derive(Error, Debug)]
pub enum PersistenceError {
    /// A general error occurred during a data store operation.
    #[error("A state store operation failed: {0}")]
    OperationFailed(String),

    /// An error occurred during serialization or deserialization.
    #[error("Failed to serialize or deserialize state: {0}")]
    SerializationError(String),

    /// The stored state has an unsupported shape.
    #[error("Unsupported state file: {0}")]
    InvalidInput(String),
}
