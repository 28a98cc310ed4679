//! This module contains the local state management of signalform.

pub mod error;
pub mod json_file;
pub mod traits;

pub use json_file::JsonFileStateRepository;
