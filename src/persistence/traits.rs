//! This module contains the state management interface for signalform.

use std::collections::BTreeMap;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use super::error::PersistenceError;
use crate::models::MutingRuleState;

/// Stores the recorded state of managed muting rules, keyed by the local
/// name they are declared under.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait StateRepository: Send + Sync {
    /// Retrieves the recorded state of a muting rule.
    async fn get_muting_rule(&self, name: &str)
    -> Result<Option<MutingRuleState>, PersistenceError>;

    /// Records the state of a muting rule, replacing any previous entry.
    async fn set_muting_rule(
        &self,
        name: &str,
        state: &MutingRuleState,
    ) -> Result<(), PersistenceError>;

    /// Forgets a muting rule, returning the state it had.
    async fn remove_muting_rule(
        &self,
        name: &str,
    ) -> Result<Option<MutingRuleState>, PersistenceError>;

    /// Retrieves every recorded muting rule.
    async fn get_muting_rules(&self)
    -> Result<BTreeMap<String, MutingRuleState>, PersistenceError>;
}
