//! Converges SignalFx on the declared muting rules.

use std::{collections::BTreeMap, fmt, path::PathBuf};

use clap::Parser;

use super::{Context, Error};
use crate::{
    config::MutingRuleLoader,
    models::MutingRuleConfig,
    persistence::traits::StateRepository,
    resource::{ResourceApi, muting_rule},
};

/// Arguments shared by the `apply` and `plan` commands.
#[derive(Parser, Debug)]
pub struct ApplyArgs {
    /// Path to the muting rules file. Defaults to `muting_rules.yaml` in the
    /// config directory.
    #[arg(short, long)]
    rules: Option<String>,
}

/// Names of the rules affected by a run, per kind of change.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ApplySummary {
    /// Rules created, including recreated ones.
    pub created: Vec<String>,
    /// Rules updated.
    pub updated: Vec<String>,
    /// Rules already matching their declaration.
    pub unchanged: Vec<String>,
    /// Rules deleted because they are no longer declared.
    pub deleted: Vec<String>,
}

impl ApplySummary {
    /// Returns `true` when nothing needs to change.
    pub fn is_empty(&self) -> bool {
        self.created.is_empty() && self.updated.is_empty() && self.deleted.is_empty()
    }
}

impl fmt::Display for ApplySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for name in &self.created {
            writeln!(f, "  + {name}")?;
        }
        for name in &self.updated {
            writeln!(f, "  ~ {name}")?;
        }
        for name in &self.deleted {
            writeln!(f, "  - {name}")?;
        }
        write!(
            f,
            "{} to create, {} to update, {} unchanged, {} to delete",
            self.created.len(),
            self.updated.len(),
            self.unchanged.len(),
            self.deleted.len()
        )
    }
}

/// Compares the declared rules with the recorded and remote state, and
/// unless `dry_run` is set, creates, updates and deletes rules until they
/// match.
///
/// Recorded rules are re-read first. One that no longer exists remotely is
/// dropped from state and created again.
pub async fn reconcile(
    api: &dyn ResourceApi,
    state: &dyn StateRepository,
    declared: &BTreeMap<String, MutingRuleConfig>,
    dry_run: bool,
) -> Result<ApplySummary, Error> {
    let recorded = state.get_muting_rules().await?;
    let mut summary = ApplySummary::default();

    for (name, config) in declared {
        let Some(current) = recorded.get(name) else {
            summary.created.push(name.clone());
            if !dry_run {
                let created = muting_rule::create(api, config).await?;
                state.set_muting_rule(name, &created).await?;
            }
            continue;
        };

        let mut current = current.clone();
        match muting_rule::read(api, &mut current).await {
            Ok(()) if current.needs_update(config) => {
                summary.updated.push(name.clone());
                if !dry_run {
                    let updated = muting_rule::update(api, &current, config).await?;
                    state.set_muting_rule(name, &updated).await?;
                }
            }
            Ok(()) => {
                summary.unchanged.push(name.clone());
                if !dry_run {
                    state.set_muting_rule(name, &current).await?;
                }
            }
            Err(e) if e.is_not_found() => {
                tracing::warn!(name, id = %current.id, "Muting rule no longer exists, recreating.");
                summary.created.push(name.clone());
                if !dry_run {
                    state.remove_muting_rule(name).await?;
                    let created = muting_rule::create(api, config).await?;
                    state.set_muting_rule(name, &created).await?;
                }
            }
            Err(e) => return Err(e.into()),
        }
    }

    for (name, current) in recorded.iter().filter(|(name, _)| !declared.contains_key(*name)) {
        summary.deleted.push(name.clone());
        if !dry_run {
            muting_rule::delete(api, &current.id).await?;
            state.remove_muting_rule(name).await?;
        }
    }

    Ok(summary)
}

/// Runs `apply`, or `plan` when `dry_run` is set.
pub async fn execute(
    args: ApplyArgs,
    config_dir: Option<&str>,
    dry_run: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let context = Context::load(config_dir).await?;

    let rules_path = args
        .rules
        .map(PathBuf::from)
        .unwrap_or_else(|| context.config.muting_rules_path.clone());
    let declared = MutingRuleLoader::new(rules_path).load().map_err(Error::from)?;
    tracing::info!(count = declared.len(), dry_run, "Reconciling muting rules.");

    let summary = reconcile(&context.client, &context.state, &declared, dry_run).await?;

    if dry_run && summary.is_empty() {
        println!("No changes. Muting rules match the configuration.");
    } else {
        println!("{summary}");
    }

    Ok(())
}
