//! Refreshes and prints a single managed muting rule.

use clap::Parser;

use super::{Context, Error};
use crate::{
    models::MutingRuleState,
    persistence::traits::StateRepository,
    resource::{ResourceApi, muting_rule},
};

/// Arguments of the `get` command.
#[derive(Parser, Debug)]
pub struct GetArgs {
    /// Local name of the muting rule.
    name: String,
}

/// Refreshes the recorded state of `name` from SignalFx.
///
/// A rule that no longer exists remotely is dropped from state and reported
/// as not found.
pub async fn get_rule(
    api: &dyn ResourceApi,
    state: &dyn StateRepository,
    name: &str,
) -> Result<MutingRuleState, Error> {
    let mut current = state
        .get_muting_rule(name)
        .await?
        .ok_or_else(|| Error::UnknownRule(name.to_string()))?;

    match muting_rule::read(api, &mut current).await {
        Ok(()) => {
            state.set_muting_rule(name, &current).await?;
            Ok(current)
        }
        Err(e) if e.is_not_found() => {
            tracing::warn!(name, id = %current.id, "Muting rule no longer exists, dropping it from state.");
            state.remove_muting_rule(name).await?;
            Err(e.into())
        }
        Err(e) => Err(e.into()),
    }
}

/// Runs `get`.
pub async fn execute(
    args: GetArgs,
    config_dir: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let context = Context::load(config_dir).await?;

    let rule = get_rule(&context.client, &context.state, &args.name).await?;
    if !rule.synced {
        tracing::warn!(name = %args.name, "Muting rule differs from the last applied version.");
    }
    let rendered = serde_json::to_string_pretty(&rule).map_err(Error::from)?;
    println!("{rendered}");

    Ok(())
}
