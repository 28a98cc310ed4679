//! Deletes a single managed muting rule.

use clap::Parser;

use super::{Context, Error};
use crate::{
    models::MutingRuleState,
    persistence::traits::StateRepository,
    resource::{ResourceApi, muting_rule},
};

/// Arguments of the `delete` command.
#[derive(Parser, Debug)]
pub struct DeleteArgs {
    /// Local name of the muting rule.
    name: String,
}

/// Deletes the rule recorded as `name` and forgets it.
pub async fn delete_rule(
    api: &dyn ResourceApi,
    state: &dyn StateRepository,
    name: &str,
) -> Result<MutingRuleState, Error> {
    let current = state
        .get_muting_rule(name)
        .await?
        .ok_or_else(|| Error::UnknownRule(name.to_string()))?;

    muting_rule::delete(api, &current.id).await?;
    state.remove_muting_rule(name).await?;

    Ok(current)
}

/// Runs `delete`.
pub async fn execute(
    args: DeleteArgs,
    config_dir: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let context = Context::load(config_dir).await?;

    let deleted = delete_rule(&context.client, &context.state, &args.name).await?;
    println!("Deleted muting rule '{}' ({}).", args.name, deleted.id);

    Ok(())
}
