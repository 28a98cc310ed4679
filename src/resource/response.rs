//! Decoding of muting rules returned by the SignalFx API.

use serde::Deserialize;

use crate::models::{FilterRule, muting_rule::PROPERTY_VALUE_SEPARATOR};

/// `propertyValue` is documented as a string but some API versions return a
/// list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    /// Comma-joined values.
    Joined(String),
    /// One entry per value.
    List(Vec<String>),
}

impl PropertyValue {
    /// Returns the individual values. Splitting is the exact inverse of
    /// [`FilterRule::joined_values`], whitespace included.
    pub fn into_values(self) -> Vec<String> {
        match self {
            PropertyValue::Joined(joined) => {
                joined.split(PROPERTY_VALUE_SEPARATOR).map(str::to_string).collect()
            }
            PropertyValue::List(values) => values,
        }
    }
}

/// A filter as returned by the API.
#[derive(Debug, Clone, Deserialize)]
pub struct FilterResponse {
    /// Filter property.
    pub property: String,
    /// Filter values.
    #[serde(rename = "propertyValue", alias = "property_value")]
    pub property_value: PropertyValue,
    /// Negation flag.
    #[serde(default, alias = "NOT")]
    pub not: bool,
}

impl From<FilterResponse> for FilterRule {
    fn from(filter: FilterResponse) -> Self {
        FilterRule::new(filter.property, filter.property_value.into_values(), filter.not)
    }
}

/// A muting rule as returned by the API. Every field but `id` is optional so
/// that sparse create and update answers decode too.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MutingRuleResponse {
    /// Identifier assigned by SignalFx.
    pub id: String,
    /// Rule description.
    #[serde(default)]
    pub description: Option<String>,
    /// Start of the muting period, ms since epoch.
    #[serde(default, alias = "start_time")]
    pub start_time: Option<i64>,
    /// End of the muting period, ms since epoch.
    #[serde(default, alias = "stop_time")]
    pub stop_time: Option<i64>,
    /// Filters of the rule.
    #[serde(default)]
    pub filters: Option<Vec<FilterResponse>>,
    /// Creation timestamp, ms since epoch.
    #[serde(default)]
    pub created: Option<f64>,
    /// Last modification timestamp, ms since epoch.
    #[serde(default, alias = "last_updated")]
    pub last_updated: Option<f64>,
}

impl MutingRuleResponse {
    /// The most recent modification timestamp the API reported.
    pub fn modified_at(&self) -> Option<f64> {
        self.last_updated.or(self.created)
    }
}
