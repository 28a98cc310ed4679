//! A builder for creating `MutingRuleConfig` instances in tests.

use crate::models::{FilterRule, MutingRuleConfig};

/// A builder for creating `MutingRuleConfig` instances in tests.
///
/// Without any `filter` call the built rule mutes `host: h1`.
#[derive(Default)]
pub struct MutingRuleConfigBuilder {
    description: Option<String>,
    start_time: Option<i64>,
    stop_time: Option<i64>,
    filters: Vec<FilterRule>,
}

impl MutingRuleConfigBuilder {
    /// Creates a new `MutingRuleConfigBuilder` instance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the description.
    pub fn description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    /// Sets the start time.
    pub fn start_time(mut self, start_time: i64) -> Self {
        self.start_time = Some(start_time);
        self
    }

    /// Sets the stop time.
    pub fn stop_time(mut self, stop_time: i64) -> Self {
        self.stop_time = Some(stop_time);
        self
    }

    /// Adds a filter.
    pub fn filter(mut self, property: &str, values: &[&str], not: bool) -> Self {
        let values = values.iter().map(|v| v.to_string()).collect();
        self.filters.push(FilterRule::new(property, values, not));
        self
    }

    /// Builds the `MutingRuleConfig` instance.
    pub fn build(self) -> MutingRuleConfig {
        let filters = if self.filters.is_empty() {
            vec![FilterRule::new("host", vec!["h1".to_string()], false)]
        } else {
            self.filters
        };

        MutingRuleConfig {
            description: self.description,
            start_time: self.start_time,
            stop_time: self.stop_time,
            filters: filters.into_iter().collect(),
        }
    }
}
