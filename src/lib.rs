#![warn(missing_docs)]
//! signalform manages SignalFx alert muting rules declared in YAML files.

pub mod cmd;
pub mod config;
pub mod http_client;
pub mod models;
pub mod persistence;
pub mod resource;
pub mod test_helpers;
