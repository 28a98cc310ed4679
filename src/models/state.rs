//! Locally recorded state of a muting rule that exists in SignalFx.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::muting_rule::{FilterRule, MutingRuleConfig};

fn default_synced() -> bool {
    true
}

/// The last known remote representation of a muting rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MutingRuleState {
    /// Identifier assigned by SignalFx.
    pub id: String,

    /// Whether the remote rule still matches what this tool last wrote.
    /// Cleared when a read finds a newer remote modification.
    #[serde(default = "default_synced")]
    pub synced: bool,

    /// Remote modification timestamp (ms since epoch) of the last write.
    pub last_updated: f64,

    /// URL of the muting rule.
    pub url: String,

    /// Description as stored remotely.
    #[serde(default)]
    pub description: String,

    /// Start of the muting period in ms since epoch.
    pub start_time: i64,

    /// End of the muting period in ms since epoch, `0` meaning indefinite.
    pub stop_time: i64,

    /// Filters as stored remotely.
    pub filters: BTreeSet<FilterRule>,
}

impl MutingRuleState {
    /// Returns `true` when the recorded remote state satisfies `config`.
    ///
    /// An undeclared start time matches any recorded start, since the API
    /// fills it in with the creation time.
    pub fn matches(&self, config: &MutingRuleConfig) -> bool {
        self.description == config.description_or_default()
            && config.start_time.is_none_or(|start| start == self.start_time)
            && self.stop_time == config.effective_stop_time()
            && self.filters == config.filters
    }

    /// Returns `true` when an update is needed to converge on `config`.
    pub fn needs_update(&self, config: &MutingRuleConfig) -> bool {
        !self.synced || !self.matches(config)
    }
}
