use chrono::{DateTime, Duration, Utc};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod common;

use common::{rc_err, rc_ok, setup_recording_client, setup_test_client};
use linstor_client::{LinstorError, PropsModify, UPDATED_KEY};

#[tokio::test]
async fn test_get_passes_special_characters_through() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/key-value-store/test-instance-with-special-chars!@%23"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "name": "test-instance-with-special-chars!@#",
            "props": { "a": "1" }
        }])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = setup_test_client(&mock_server.uri());
    let store = client
        .key_value_store()
        .get("test-instance-with-special-chars!@#")
        .await
        .unwrap()
        .expect("instance should exist");

    assert_eq!(store.name, "test-instance-with-special-chars!@#");
    assert_eq!(store.get("a"), Some("1"));
}

#[tokio::test]
async fn test_get_unknown_instance_is_none() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/key-value-store/nothing"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let client = setup_test_client(&mock_server.uri());
    assert_eq!(client.key_value_store().get("nothing").await.unwrap(), None);
}

#[tokio::test]
async fn test_modify_injects_updated_stamp() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/v1/key-value-store/console"))
        .and(body_partial_json(json!({
            "override_props": { "theme": "dark", "lang": "de" },
            "delete_props": ["legacy"]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([rc_ok("Updated")])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (client, recorder) = setup_recording_client(&mock_server.uri());
    let before = Utc::now();
    let reply = client
        .key_value_store()
        .modify(
            "console",
            PropsModify::new()
                .set("theme", "dark")
                .set("lang", "de")
                .delete("legacy"),
        )
        .await
        .unwrap();
    let after = Utc::now();

    assert!(reply.outcome().is_success());
    // Key-value store responses are never reported.
    assert_eq!(recorder.count(), 0);

    let received = mock_server.received_requests().await.unwrap();
    let body: Value = serde_json::from_slice(&received[0].body).unwrap();
    let overrides = body["override_props"].as_object().unwrap();
    assert_eq!(overrides.len(), 3);

    let stamp = overrides[UPDATED_KEY].as_str().unwrap();
    assert!(stamp.ends_with('Z'), "{stamp}");
    assert_eq!(stamp.len(), "2026-10-18T09:30:00.000Z".len(), "{stamp}");
    let stamped: DateTime<Utc> = stamp.parse().unwrap();
    assert!(stamped >= before - Duration::milliseconds(1));
    assert!(stamped <= after);
}

#[tokio::test]
async fn test_modify_with_no_props_still_stamps() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/v1/key-value-store/empty"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([rc_ok("Updated")])))
        .mount(&mock_server)
        .await;

    let client = setup_test_client(&mock_server.uri());
    client
        .key_value_store()
        .modify("empty", PropsModify::new())
        .await
        .unwrap();

    let received = mock_server.received_requests().await.unwrap();
    let body: Value = serde_json::from_slice(&received[0].body).unwrap();
    let overrides = body["override_props"].as_object().unwrap();
    assert_eq!(overrides.keys().collect::<Vec<_>>(), vec![UPDATED_KEY]);
    assert!(body.get("delete_props").is_none());
}

#[tokio::test]
async fn test_list_and_delete() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/key-value-store"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "name": "console", "props": { "theme": "dark" } },
            { "name": "gui" }
        ])))
        .mount(&mock_server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/v1/key-value-store/gui"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([rc_ok("Deleted")])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = setup_test_client(&mock_server.uri());
    let stores = client.key_value_store().list().await.unwrap();
    assert_eq!(
        stores.iter().map(|s| s.name.as_str()).collect::<Vec<_>>(),
        vec!["console", "gui"]
    );
    assert!(stores[1].props.is_empty());

    let reply = client.key_value_store().delete("gui").await.unwrap();
    assert!(reply.outcome().is_success());
}

#[tokio::test]
async fn test_get_failure_carries_context_and_reports() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/key-value-store/broken"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!([rc_err("Database locked")])))
        .mount(&mock_server)
        .await;

    let client = setup_test_client(&mock_server.uri());
    let err = client.key_value_store().get("broken").await.unwrap_err();

    assert_eq!(err.controller_message(), Some("Database locked"));
    match err {
        LinstorError::RequestFailed { context, status, .. } => {
            assert_eq!(context, "Failed to get key value store broken");
            assert_eq!(status.as_u16(), 500);
        }
        other => panic!("Expected RequestFailed, got {other:?}"),
    }
}
