//! # Muting rule payload builder
//!
//! Turns a [`MutingRuleConfig`] into the JSON body accepted by the
//! `v2/alertmuting` endpoints:
//!
//! ```json
//! {
//!   "description": "maintenance",
//!   "start_time": 1700000000000,
//!   "stop_time": 0,
//!   "filters": [{ "property": "host", "propertyValue": "h1,h2", "not": false }]
//! }
//! ```
//!
//! Filters come from a set, so consumers must not rely on their order in the
//! emitted array. Property values are packed into one comma-joined string.

use serde::Serialize;
use serde_json::Value;

use super::error::BuildError;
use crate::models::{FilterRule, MutingRuleConfig};

/// Wire representation of a single filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterPayload {
    /// Filter property.
    pub property: String,
    /// Comma-joined property values.
    #[serde(rename = "propertyValue")]
    pub property_value: String,
    /// Negation flag.
    pub not: bool,
}

impl From<&FilterRule> for FilterPayload {
    fn from(filter: &FilterRule) -> Self {
        Self {
            property: filter.property.clone(),
            property_value: filter.joined_values(),
            not: filter.not,
        }
    }
}

/// Wire representation of a muting rule create or update request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MutingRulePayload {
    /// Rule description, empty when not declared.
    pub description: String,
    /// Start of the muting period, ms since epoch.
    pub start_time: i64,
    /// End of the muting period, ms since epoch, `0` for indefinite.
    pub stop_time: i64,
    /// Filters of the rule.
    pub filters: Vec<FilterPayload>,
}

impl MutingRulePayload {
    /// Validates `config` and converts it to its wire form.
    ///
    /// `default_start_time` is used when the configuration leaves
    /// `start_time` unset.
    pub fn from_config(
        config: &MutingRuleConfig,
        default_start_time: i64,
    ) -> Result<Self, BuildError> {
        config.validate()?;

        Ok(Self {
            description: config.description_or_default().to_string(),
            start_time: config.start_time.unwrap_or(default_start_time),
            stop_time: config.effective_stop_time(),
            filters: config.filters.iter().map(FilterPayload::from).collect(),
        })
    }

    /// Serializes the payload to a JSON value.
    pub fn to_json(&self) -> Result<Value, BuildError> {
        Ok(serde_json::to_value(self)?)
    }
}
