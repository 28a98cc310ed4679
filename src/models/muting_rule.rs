//! Declared configuration of a SignalFx alert muting rule.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Separator used by the API to pack several property values into one string.
pub const PROPERTY_VALUE_SEPARATOR: &str = ",";

/// A (property, values, negation) triple selecting the monitored entities a
/// muting rule applies to.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FilterRule {
    /// Dimension or property name, e.g. `host`.
    pub property: String,

    /// Accepted values for the property, in declaration order.
    pub property_value: Vec<String>,

    /// Negates the match.
    #[serde(default)]
    pub not: bool,
}

impl FilterRule {
    /// Creates a new filter.
    pub fn new(property: impl Into<String>, property_value: Vec<String>, not: bool) -> Self {
        Self {
            property: property.into(),
            property_value,
            not,
        }
    }

    /// The property values in their comma-joined wire form.
    pub fn joined_values(&self) -> String {
        self.property_value.join(PROPERTY_VALUE_SEPARATOR)
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.property.trim().is_empty() {
            return Err(ValidationError::EmptyProperty);
        }
        if self.property_value.is_empty() {
            return Err(ValidationError::NoPropertyValues {
                property: self.property.clone(),
            });
        }
        for value in &self.property_value {
            if value.trim().is_empty() {
                return Err(ValidationError::BlankPropertyValue {
                    property: self.property.clone(),
                });
            }
            if value.contains(PROPERTY_VALUE_SEPARATOR) {
                return Err(ValidationError::SeparatorInPropertyValue {
                    property: self.property.clone(),
                    value: value.clone(),
                });
            }
        }
        Ok(())
    }
}

/// User-authored configuration of a muting rule.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MutingRuleConfig {
    /// Free-form description.
    #[serde(default)]
    pub description: Option<String>,

    /// Start of the muting period in milliseconds since epoch. Defaults to
    /// the time of creation.
    #[serde(default)]
    pub start_time: Option<i64>,

    /// End of the muting period in milliseconds since epoch. `0` (the
    /// default) mutes indefinitely.
    #[serde(default)]
    pub stop_time: Option<i64>,

    /// Filters selecting what gets muted.
    #[serde(alias = "filter")]
    pub filters: BTreeSet<FilterRule>,
}

impl MutingRuleConfig {
    /// The stop time sent to the API when none is declared.
    pub const INDEFINITE_STOP_TIME: i64 = 0;

    /// Validates the configuration before it is turned into a payload.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.filters.is_empty() {
            return Err(ValidationError::NoFilters);
        }
        for filter in &self.filters {
            filter.validate()?;
        }

        if let Some(start) = self.start_time {
            if start < 0 {
                return Err(ValidationError::NegativeTime { field: "start_time", value: start });
            }
        }
        if let Some(stop) = self.stop_time {
            if stop < 0 {
                return Err(ValidationError::NegativeTime { field: "stop_time", value: stop });
            }
        }
        if let (Some(start), Some(stop)) = (self.start_time, self.stop_time) {
            if stop != Self::INDEFINITE_STOP_TIME && stop <= start {
                return Err(ValidationError::StopNotAfterStart { start, stop });
            }
        }

        Ok(())
    }

    /// The description as sent to the API.
    pub fn description_or_default(&self) -> &str {
        self.description.as_deref().unwrap_or_default()
    }

    /// The stop time as sent to the API.
    pub fn effective_stop_time(&self) -> i64 {
        self.stop_time.unwrap_or(Self::INDEFINITE_STOP_TIME)
    }
}

/// Reasons a muting rule configuration is rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// At least one filter is required.
    #[error("at least one filter is required")]
    NoFilters,

    /// A filter has a blank property name.
    #[error("filter property must not be empty")]
    EmptyProperty,

    /// A filter has no values.
    #[error("filter on '{property}' needs at least one property_value")]
    NoPropertyValues {
        /// Property of the offending filter.
        property: String,
    },

    /// A filter contains a blank value.
    #[error("filter on '{property}' contains a blank property_value")]
    BlankPropertyValue {
        /// Property of the offending filter.
        property: String,
    },

    /// A value contains the separator of the wire format.
    #[error("filter on '{property}' has value '{value}' containing ','")]
    SeparatorInPropertyValue {
        /// Property of the offending filter.
        property: String,
        /// The offending value.
        value: String,
    },

    /// A timestamp is negative.
    #[error("{field} must not be negative, got {value}")]
    NegativeTime {
        /// Name of the field.
        field: &'static str,
        /// The rejected value.
        value: i64,
    },

    /// The muting window is empty.
    #[error("stop_time {stop} must be after start_time {start}")]
    StopNotAfterStart {
        /// Declared start.
        start: i64,
        /// Declared stop.
        stop: i64,
    },
}
