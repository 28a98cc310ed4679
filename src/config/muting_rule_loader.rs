//! Loads and validates declared muting rules from a YAML file.

use std::{collections::BTreeMap, path::PathBuf};

use thiserror::Error;

use super::loader::{ConfigLoader, LoaderError};
use crate::models::muting_rule::{MutingRuleConfig, ValidationError};

/// Loads muting rule declarations, keyed by their local name.
pub struct MutingRuleLoader {
    path: PathBuf,
}

/// Errors that can occur while loading muting rule declarations.
#[derive(Debug, Error)]
pub enum MutingRuleLoaderError {
    /// An error occurred during the loading process.
    #[error("Failed to load muting rule configuration: {0}")]
    Loader(#[from] LoaderError),

    /// A declared muting rule is invalid.
    #[error("Invalid muting rule '{name}': {source}")]
    Invalid {
        /// The local name of the offending rule.
        name: String,
        /// What is wrong with it.
        source: ValidationError,
    },
}

impl MutingRuleLoader {
    /// Creates a new `MutingRuleLoader` instance.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Loads the `muting_rules` map and validates every entry.
    pub fn load(&self) -> Result<BTreeMap<String, MutingRuleConfig>, MutingRuleLoaderError> {
        let loader = ConfigLoader::new(self.path.clone());
        let rules: BTreeMap<String, MutingRuleConfig> = loader.load("muting_rules")?;

        for (name, rule) in &rules {
            rule.validate().map_err(|source| MutingRuleLoaderError::Invalid {
                name: name.clone(),
                source,
            })?;
        }

        tracing::debug!(path = ?self.path, count = rules.len(), "Loaded muting rules.");
        Ok(rules)
    }
}

#[cfg(test)]
mod tests {
    use std::{fs::File, io::Write};

    use tempfile::TempDir;

    use super::*;
    use crate::models::muting_rule::FilterRule;

    fn create_test_file(dir: &TempDir, filename: &str, content: &str) -> PathBuf {
        let path = dir.path().join(filename);
        let mut file = File::create(&path).unwrap();
        writeln!(file, "{}", content).unwrap();
        path
    }

    #[test]
    fn test_load_valid_rules() {
        let dir = TempDir::new().unwrap();
        let content = r#"
muting_rules:
  maintenance:
    description: "maintenance"
    stop_time: 1700000000000
    filters:
      - property: "host"
        property_value: ["h1", "h2"]
  staging:
    start_time: 1600000000000
    filter:
      - property: "env"
        property_value: ["staging"]
        not: true
"#;
        let path = create_test_file(&dir, "muting_rules.yaml", content);
        let rules = MutingRuleLoader::new(path).load().unwrap();

        assert_eq!(rules.len(), 2);

        let maintenance = &rules["maintenance"];
        assert_eq!(maintenance.description.as_deref(), Some("maintenance"));
        assert_eq!(maintenance.start_time, None);
        assert_eq!(maintenance.stop_time, Some(1_700_000_000_000));
        assert!(maintenance.filters.contains(&FilterRule::new(
            "host",
            vec!["h1".to_string(), "h2".to_string()],
            false
        )));

        let staging = &rules["staging"];
        assert_eq!(staging.start_time, Some(1_600_000_000_000));
        let filter = staging.filters.iter().next().unwrap();
        assert!(filter.not);
    }

    #[test]
    fn test_load_rejects_rule_without_filters() {
        let dir = TempDir::new().unwrap();
        let content = r#"
muting_rules:
  broken:
    description: "no filters"
    filters: []
"#;
        let path = create_test_file(&dir, "muting_rules.yaml", content);
        let err = MutingRuleLoader::new(path).load().unwrap_err();

        match err {
            MutingRuleLoaderError::Invalid { name, source } => {
                assert_eq!(name, "broken");
                assert!(matches!(source, ValidationError::NoFilters));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_load_rejects_empty_property_value() {
        let dir = TempDir::new().unwrap();
        let content = r#"
muting_rules:
  broken:
    filters:
      - property: "host"
        property_value: []
"#;
        let path = create_test_file(&dir, "muting_rules.yaml", content);
        let err = MutingRuleLoader::new(path).load().unwrap_err();

        assert!(err.to_string().contains("host"));
    }

    #[test]
    fn test_load_missing_filters_key_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let content = r#"
muting_rules:
  broken:
    description: "missing filters"
"#;
        let path = create_test_file(&dir, "muting_rules.yaml", content);
        let err = MutingRuleLoader::new(path).load().unwrap_err();

        assert!(matches!(err, MutingRuleLoaderError::Loader(LoaderError::ParseError(_))));
    }
}
