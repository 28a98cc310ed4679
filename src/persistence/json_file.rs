//! A [`StateRepository`] backed by a JSON document on disk.

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::{fs, sync::Mutex};

use super::{error::PersistenceError, traits::StateRepository};
use crate::models::MutingRuleState;

/// Version of the on-disk layout.
const STATE_FILE_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct StateDocument {
    version: u32,
    #[serde(default)]
    muting_rules: BTreeMap<String, MutingRuleState>,
}

/// Keeps the whole state in memory and rewrites the file after every change.
pub struct JsonFileStateRepository {
    path: PathBuf,
    muting_rules: Mutex<BTreeMap<String, MutingRuleState>>,
}

impl JsonFileStateRepository {
    /// Opens the state file at `path`. A missing file is an empty state.
    #[tracing::instrument(level = "debug")]
    pub async fn open(path: &Path) -> Result<Self, PersistenceError> {
        let muting_rules = match fs::read_to_string(path).await {
            Ok(content) => {
                let document: StateDocument = serde_json::from_str(&content)
                    .map_err(|e| PersistenceError::SerializationError(e.to_string()))?;
                if document.version != STATE_FILE_VERSION {
                    return Err(PersistenceError::InvalidInput(format!(
                        "expected version {STATE_FILE_VERSION}, found {}",
                        document.version
                    )));
                }
                document.muting_rules
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No state file yet, starting empty.");
                BTreeMap::new()
            }
            Err(e) => {
                return Err(PersistenceError::OperationFailed(format!(
                    "Failed to read {}: {e}",
                    path.display()
                )));
            }
        };

        tracing::debug!(count = muting_rules.len(), "State loaded.");
        Ok(Self {
            path: path.to_path_buf(),
            muting_rules: Mutex::new(muting_rules),
        })
    }

    /// Writes the document next to the target and renames it into place so
    /// readers never observe a partial file.
    async fn persist(
        &self,
        muting_rules: &BTreeMap<String, MutingRuleState>,
    ) -> Result<(), PersistenceError> {
        let document = StateDocument {
            version: STATE_FILE_VERSION,
            muting_rules: muting_rules.clone(),
        };
        let content = serde_json::to_string_pretty(&document)
            .map_err(|e| PersistenceError::SerializationError(e.to_string()))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(|e| {
                PersistenceError::OperationFailed(format!(
                    "Failed to create {}: {e}",
                    parent.display()
                ))
            })?;
        }

        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, content).await.map_err(|e| {
            PersistenceError::OperationFailed(format!("Failed to write {}: {e}", tmp_path.display()))
        })?;
        fs::rename(&tmp_path, &self.path).await.map_err(|e| {
            tracing::error!(error = %e, path = ?self.path, "Failed to replace state file.");
            PersistenceError::OperationFailed(format!(
                "Failed to replace {}: {e}",
                self.path.display()
            ))
        })?;

        Ok(())
    }
}

#[async_trait]
impl StateRepository for JsonFileStateRepository {
    async fn get_muting_rule(
        &self,
        name: &str,
    ) -> Result<Option<MutingRuleState>, PersistenceError> {
        Ok(self.muting_rules.lock().await.get(name).cloned())
    }

    #[tracing::instrument(skip(self, state), level = "debug")]
    async fn set_muting_rule(
        &self,
        name: &str,
        state: &MutingRuleState,
    ) -> Result<(), PersistenceError> {
        let mut muting_rules = self.muting_rules.lock().await;
        muting_rules.insert(name.to_string(), state.clone());
        self.persist(&muting_rules).await
    }

    #[tracing::instrument(skip(self), level = "debug")]
    async fn remove_muting_rule(
        &self,
        name: &str,
    ) -> Result<Option<MutingRuleState>, PersistenceError> {
        let mut muting_rules = self.muting_rules.lock().await;
        let removed = muting_rules.remove(name);
        if removed.is_some() {
            self.persist(&muting_rules).await?;
        }
        Ok(removed)
    }

    async fn get_muting_rules(
        &self,
    ) -> Result<BTreeMap<String, MutingRuleState>, PersistenceError> {
        Ok(self.muting_rules.lock().await.clone())
    }
}
