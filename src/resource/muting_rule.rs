//! Create, read, update and delete handlers for alert muting rules.
//!
//! Each handler issues one API call through the supplied [`ResourceApi`]
//! and never retries. Create and update add a read only when the API answers
//! without a modification timestamp.

use chrono::Utc;
use serde_json::Value;

use super::{
    error::{RemoteError, ResourceError},
    payload::MutingRulePayload,
    response::MutingRuleResponse,
    traits::ResourceApi,
};
use crate::models::{MutingRuleConfig, MutingRuleState};

/// API path of the muting rule collection.
pub const MUTING_RULE_PATH: &str = "v2/alertmuting";

fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

/// URL of the muting rule collection.
pub fn collection_url(api: &dyn ResourceApi) -> String {
    api.endpoint(MUTING_RULE_PATH)
}

/// URL of a single muting rule.
pub fn rule_url(api: &dyn ResourceApi, id: &str) -> String {
    format!("{}/{}", collection_url(api), id)
}

fn decode(url: &str, body: Value) -> Result<MutingRuleResponse, ResourceError> {
    serde_json::from_value(body)
        .map_err(|source| RemoteError::Decode { url: url.to_string(), source }.into())
}

/// Builds the state recorded after a successful create or update. Fields
/// the API echoed back take precedence over what was sent.
///
/// An answer without a modification timestamp is followed by a fetch, so
/// `last_updated` always holds a server clock reading.
async fn written_state(
    api: &dyn ResourceApi,
    response: MutingRuleResponse,
    config: &MutingRuleConfig,
    payload: &MutingRulePayload,
) -> Result<MutingRuleState, ResourceError> {
    let Some(last_updated) = response.modified_at() else {
        tracing::debug!(id = %response.id, "Write answer has no timestamp, fetching the rule.");
        return fetch(api, &response.id).await;
    };

    Ok(MutingRuleState {
        url: rule_url(api, &response.id),
        id: response.id,
        synced: true,
        last_updated,
        description: response.description.unwrap_or_else(|| payload.description.clone()),
        start_time: response.start_time.unwrap_or(payload.start_time),
        stop_time: response.stop_time.unwrap_or(payload.stop_time),
        filters: response
            .filters
            .map(|filters| filters.into_iter().map(Into::into).collect())
            .unwrap_or_else(|| config.filters.clone()),
    })
}

/// Creates a muting rule and returns its recorded state.
///
/// An undeclared `start_time` defaults to the current time.
#[tracing::instrument(skip(api, config), level = "debug")]
pub async fn create(
    api: &dyn ResourceApi,
    config: &MutingRuleConfig,
) -> Result<MutingRuleState, ResourceError> {
    let payload = MutingRulePayload::from_config(config, now_ms())?;
    let url = collection_url(api);

    let body = api.create(&url, &payload.to_json()?).await?;
    let response = decode(&url, body)?;
    let state = written_state(api, response, config, &payload).await?;

    tracing::info!(id = %state.id, "Muting rule created.");
    Ok(state)
}

/// Fetches the remote representation of the muting rule `id`.
///
/// Returns [`ResourceError::NotFound`] if the rule no longer exists.
#[tracing::instrument(skip(api), level = "debug")]
pub async fn fetch(api: &dyn ResourceApi, id: &str) -> Result<MutingRuleState, ResourceError> {
    let url = rule_url(api, id);
    let body = api.read(&url).await?;
    let response = decode(&url, body)?;

    Ok(MutingRuleState {
        last_updated: response.modified_at().unwrap_or_default(),
        id: response.id,
        synced: true,
        url,
        description: response.description.unwrap_or_default(),
        start_time: response.start_time.unwrap_or_default(),
        stop_time: response.stop_time.unwrap_or(MutingRuleConfig::INDEFINITE_STOP_TIME),
        filters: response
            .filters
            .unwrap_or_default()
            .into_iter()
            .map(Into::into)
            .collect(),
    })
}

/// Refreshes `state` from the API.
///
/// Remote fields overwrite the local ones. When the rule was modified after
/// the last write recorded in `state`, `synced` is cleared; `last_updated`
/// is left as is so the flag persists until the next update.
#[tracing::instrument(skip(api, state), fields(id = %state.id), level = "debug")]
pub async fn read(api: &dyn ResourceApi, state: &mut MutingRuleState) -> Result<(), ResourceError> {
    let remote = fetch(api, &state.id).await?;

    if remote.last_updated > state.last_updated {
        tracing::warn!(
            remote_last_updated = remote.last_updated,
            local_last_updated = state.last_updated,
            "Muting rule was modified outside signalform."
        );
        state.synced = false;
    }

    state.url = remote.url;
    state.description = remote.description;
    state.start_time = remote.start_time;
    state.stop_time = remote.stop_time;
    state.filters = remote.filters;

    Ok(())
}

/// Replaces the muting rule recorded in `state` with `config`.
///
/// An undeclared `start_time` keeps the recorded start of the muting window.
#[tracing::instrument(skip(api, state, config), fields(id = %state.id), level = "debug")]
pub async fn update(
    api: &dyn ResourceApi,
    state: &MutingRuleState,
    config: &MutingRuleConfig,
) -> Result<MutingRuleState, ResourceError> {
    let default_start = if state.start_time > 0 { state.start_time } else { now_ms() };
    let payload = MutingRulePayload::from_config(config, default_start)?;
    let url = rule_url(api, &state.id);

    let body = api.update(&url, &payload.to_json()?).await?;
    // Some API versions answer updates without a body.
    let response = match body {
        Value::Null => MutingRuleResponse {
            id: state.id.clone(),
            description: None,
            start_time: None,
            stop_time: None,
            filters: None,
            created: None,
            last_updated: None,
        },
        body => decode(&url, body)?,
    };
    let updated = written_state(api, response, config, &payload).await?;

    tracing::info!(id = %updated.id, "Muting rule updated.");
    Ok(updated)
}

/// Deletes the muting rule `id`. A rule that is already gone counts as
/// deleted.
#[tracing::instrument(skip(api), level = "debug")]
pub async fn delete(api: &dyn ResourceApi, id: &str) -> Result<(), ResourceError> {
    let url = rule_url(api, id);
    match api.delete(&url).await {
        Ok(()) => {
            tracing::info!(id, "Muting rule deleted.");
            Ok(())
        }
        Err(e) if e.is_not_found() => {
            tracing::debug!(id, "Muting rule was already absent.");
            Ok(())
        }
        Err(e) => Err(e),
    }
}
