//! A set of helpers for testing

mod http_client;
mod muting_rule;

pub use http_client::create_test_http_client;
pub use muting_rule::MutingRuleConfigBuilder;
