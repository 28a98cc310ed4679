//! Integration tests for the muting rule resource against a mock SignalFx API

use mockito::Matcher;
use serde_json::json;
use signalform::{
    models::{FilterRule, MutingRuleConfig},
    resource::{ResourceApi, ResourceError, SignalFxClient, muting_rule},
    test_helpers::{MutingRuleConfigBuilder, create_test_http_client},
};
use url::Url;

const TOKEN: &str = "test-token";

fn create_client(server: &mockito::ServerGuard) -> SignalFxClient {
    SignalFxClient::new(create_test_http_client(), Url::parse(&server.url()).unwrap(), TOKEN)
}

fn maintenance_config() -> MutingRuleConfig {
    MutingRuleConfigBuilder::new()
        .description("maintenance")
        .start_time(1_700_000_000_000)
        .filter("host", &["h1", "h2"], false)
        .build()
}

#[tokio::test]
async fn test_create_sends_expected_payload() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v2/alertmuting")
        .match_header("x-sf-token", TOKEN)
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({
            "description": "maintenance",
            "start_time": 1_700_000_000_000_i64,
            "stop_time": 0,
            "filters": [{"property": "host", "propertyValue": "h1,h2", "not": false}]
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id": "EX1", "lastUpdated": 1700000000100}"#)
        .create_async()
        .await;

    let client = create_client(&server);
    let state = muting_rule::create(&client, &maintenance_config()).await.unwrap();

    mock.assert_async().await;
    assert_eq!(state.id, "EX1");
    assert_eq!(state.url, format!("{}/v2/alertmuting/EX1", server.url()));
    assert_eq!(state.last_updated, 1_700_000_000_100.0);
    assert!(state.synced);
}

#[tokio::test]
async fn test_create_failure_surfaces_status_and_body() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v2/alertmuting")
        .with_status(400)
        .with_body("Bad request: invalid filter")
        .expect(1)
        .create_async()
        .await;

    let client = create_client(&server);
    let err = muting_rule::create(&client, &maintenance_config()).await.unwrap_err();

    mock.assert_async().await;
    let message = err.to_string();
    assert!(message.contains("400"));
    assert!(message.contains("Bad request: invalid filter"));
}

#[tokio::test]
async fn test_lifecycle_delete_then_read_is_not_found() {
    let mut server = mockito::Server::new_async().await;
    let client = create_client(&server);

    let create_mock = server
        .mock("POST", "/v2/alertmuting")
        .with_status(200)
        .with_body(r#"{"id": "EX1", "lastUpdated": 100}"#)
        .create_async()
        .await;
    let mut state = muting_rule::create(&client, &maintenance_config()).await.unwrap();
    create_mock.assert_async().await;

    let read_mock = server
        .mock("GET", "/v2/alertmuting/EX1")
        .match_header("x-sf-token", TOKEN)
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
        .create_async()
        .await;
    muting_rule::read(&client, &mut state).await.unwrap();
    read_mock.assert_async().await;
    assert!(state.synced);
    assert!(state.matches(&maintenance_config()));

    let update_mock = server
        .mock("PUT", "/v2/alertmuting/EX1")
        .match_body(Matcher::PartialJson(json!({
            "description": "extended",
            "stop_time": 1_800_000_000_000_i64
        })))
        .with_status(200)
        .with_body(r#"{"id": "EX1", "lastUpdated": 200}"#)
        .create_async()
        .await;
    let extended = MutingRuleConfigBuilder::new()
        .description("extended")
        .start_time(1_700_000_000_000)
        .stop_time(1_800_000_000_000)
        .filter("host", &["h1", "h2"], false)
        .build();
    let state = muting_rule::update(&client, &state, &extended).await.unwrap();
    update_mock.assert_async().await;
    assert_eq!(state.last_updated, 200.0);
    assert_eq!(state.stop_time, 1_800_000_000_000);

    let delete_mock = server
        .mock("DELETE", "/v2/alertmuting/EX1")
        .with_status(204)
        .create_async()
        .await;
    muting_rule::delete(&client, &state.id).await.unwrap();
    delete_mock.assert_async().await;

    read_mock.remove_async().await;
    server
        .mock("GET", "/v2/alertmuting/EX1")
        .with_status(404)
        .create_async()
        .await;
    let err = muting_rule::fetch(&client, &state.id).await.unwrap_err();
    assert!(matches!(err, ResourceError::NotFound { .. }));
}

#[tokio::test]
async fn test_delete_of_missing_rule_succeeds() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("DELETE", "/v2/alertmuting/gone")
        .with_status(404)
        .create_async()
        .await;

    let client = create_client(&server);
    assert!(muting_rule::delete(&client, "gone").await.is_ok());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_fetch_decodes_remote_rule() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/v2/alertmuting/EX2")
        .with_status(200)
        .with_body(
            r#"{
                "id": "EX2",
                "startTime": 10,
                "stopTime": 20,
                "lastUpdated": 30,
                "filters": [
                    {"property": "env", "propertyValue": "prod,staging", "NOT": true},
                    {"property": "host", "propertyValue": ["h1"]}
                ]
            }"#,
        )
        .create_async()
        .await;

    let client = create_client(&server);
    let state = muting_rule::fetch(&client, "EX2").await.unwrap();

    assert_eq!(state.url, client.endpoint("v2/alertmuting/EX2"));
    assert_eq!(state.description, "");
    assert_eq!((state.start_time, state.stop_time), (10, 20));
    assert_eq!(state.filters.len(), 2);
    assert!(state.filters.contains(&FilterRule::new(
        "env",
        vec!["prod".to_string(), "staging".to_string()],
        true
    )));
}
