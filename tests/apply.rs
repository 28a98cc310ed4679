//! End-to-end tests of `apply` from a config directory against a mock
//! SignalFx API

use std::fs;

use mockito::Matcher;
use serde_json::json;
use signalform::{
    cmd::{Context, reconcile},
    config::MutingRuleLoader,
    persistence::traits::StateRepository,
};
use tempfile::TempDir;

fn write_config_dir(api_url: &str, rules: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("app.yaml"),
        format!("auth_token: \"e2e-token\"\napi_url: \"{api_url}\"\n"),
    )
    .unwrap();
    fs::write(dir.path().join("muting_rules.yaml"), rules).unwrap();
    dir
}

const RULES: &str = r#"
muting_rules:
  maintenance:
    description: "maintenance"
    start_time: 1700000000000
    filters:
      - property: "host"
        property_value: ["h1", "h2"]
"#;

#[tokio::test]
async fn test_apply_creates_then_is_idempotent() {
    let mut server = mockito::Server::new_async().await;
    let dir = write_config_dir(&server.url(), RULES);

    let create_mock = server
        .mock("POST", "/v2/alertmuting")
        .match_header("x-sf-token", "e2e-token")
        .match_body(Matcher::PartialJson(json!({
            "filters": [{"property": "host", "propertyValue": "h1,h2", "not": false}]
        })))
        .with_status(200)
        .with_body(r#"{"id": "EX1", "lastUpdated": 100}"#)
        .expect(1)
        .create_async()
        .await;

    let context = Context::load(dir.path().to_str()).await.unwrap();
    let declared = MutingRuleLoader::new(context.config.muting_rules_path.clone()).load().unwrap();

    let summary = reconcile(&context.client, &context.state, &declared, false).await.unwrap();
    assert_eq!(summary.created, vec!["maintenance".to_string()]);
    create_mock.assert_async().await;
    assert!(dir.path().join("state.json").exists());

    // Second run: the remote rule matches, nothing is written.
    let read_mock = server
        .mock("GET", "/v2/alertmuting/EX1")
        .with_status(200)
        .with_body(
            json!({
                "id": "EX1",
                "description": "maintenance",
                "startTime": 1_700_000_000_000_i64,
                "stopTime": 0,
                "lastUpdated": 100,
                "filters": [{"property": "host", "propertyValue": "h1,h2", "NOT": false}]
            })
            .to_string(),
        )
        .expect(1)
        .create_async()
        .await;
    let update_mock = server
        .mock("PUT", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let context = Context::load(dir.path().to_str()).await.unwrap();
    let summary = reconcile(&context.client, &context.state, &declared, false).await.unwrap();

    assert!(summary.is_empty());
    assert_eq!(summary.unchanged, vec!["maintenance".to_string()]);
    read_mock.assert_async().await;
    update_mock.assert_async().await;
}

#[tokio::test]
async fn test_apply_deletes_rules_removed_from_config() {
    let mut server = mockito::Server::new_async().await;
    let dir = write_config_dir(&server.url(), RULES);

    server
        .mock("POST", "/v2/alertmuting")
        .with_status(200)
        .with_body(r#"{"id": "EX1", "lastUpdated": 100}"#)
        .create_async()
        .await;

    let context = Context::load(dir.path().to_str()).await.unwrap();
    let declared = MutingRuleLoader::new(context.config.muting_rules_path.clone()).load().unwrap();
    reconcile(&context.client, &context.state, &declared, false).await.unwrap();

    let delete_mock = server
        .mock("DELETE", "/v2/alertmuting/EX1")
        .with_status(204)
        .expect(1)
        .create_async()
        .await;

    let summary = reconcile(&context.client, &context.state, &Default::default(), false)
        .await
        .unwrap();

    assert_eq!(summary.deleted, vec!["maintenance".to_string()]);
    delete_mock.assert_async().await;
    assert!(context.state.get_muting_rules().await.unwrap().is_empty());
}
