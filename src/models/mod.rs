//! This module contains the data models for signalform.

pub mod muting_rule;
pub mod state;

pub use muting_rule::{FilterRule, MutingRuleConfig, ValidationError};
pub use state::MutingRuleState;
