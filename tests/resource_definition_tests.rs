use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod common;

use common::{rc_err, rc_ok, setup_test_client};
use linstor_client::{
    AutoSelectFilter, BatchOutcome, LinstorError, ResourceDefinition, ResourceDefinitionModify,
    SpawnStep,
};

#[tokio::test]
async fn test_spawn_runs_every_step() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/resource-definitions"))
        .and(body_json(json!({
            "resource_definition": { "name": "pvc-1", "resource_group_name": "gold", "props": {}, "flags": [] }
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([rc_ok("RD created")])))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/resource-definitions/pvc-1/volume-definitions"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([rc_ok("VD created")])))
        .expect(2)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/resource-definitions/pvc-1/autoplace"))
        .and(body_json(json!({ "select_filter": { "place_count": 2 } })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([rc_ok("Placed")])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = setup_test_client(&mock_server.uri());
    let report = client
        .resource_definitions()
        .spawn(
            ResourceDefinition::new("pvc-1").in_group("gold"),
            &[1024, 2048],
            AutoSelectFilter::place_count(2),
        )
        .await
        .unwrap();

    assert!(report.is_complete());
    assert_eq!(
        report.steps.iter().map(|(step, _)| *step).collect::<Vec<_>>(),
        vec![
            SpawnStep::ResourceDefinition,
            SpawnStep::VolumeDefinition(0),
            SpawnStep::VolumeDefinition(1),
            SpawnStep::AutoPlace,
        ]
    );

    let received = mock_server.received_requests().await.unwrap();
    let sizes: Vec<u64> = received
        .iter()
        .filter(|r| r.url.path().ends_with("/volume-definitions"))
        .map(|r| {
            let body: serde_json::Value = serde_json::from_slice(&r.body).unwrap();
            body["volume_definition"]["size_kib"].as_u64().unwrap()
        })
        .collect();
    assert_eq!(sizes, vec![1024, 2048]);
}

#[tokio::test]
async fn test_spawn_stops_at_first_failed_step() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/resource-definitions"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([rc_ok("RD created")])))
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/resource-definitions/pvc-2/volume-definitions"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!([rc_err("Size too small")])))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/resource-definitions/pvc-2/autoplace"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([rc_ok("Placed")])))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = setup_test_client(&mock_server.uri());
    let report = client
        .resource_definitions()
        .spawn(
            ResourceDefinition::new("pvc-2"),
            &[1, 2],
            AutoSelectFilter::place_count(1),
        )
        .await
        .unwrap();

    assert!(!report.is_complete());
    assert_eq!(report.failed_step(), Some(SpawnStep::VolumeDefinition(0)));
    assert_eq!(report.steps.len(), 2);
    assert_eq!(report.steps[1].1.reports()[0].message, "Size too small");
}

#[tokio::test]
async fn test_spawn_stops_on_partial_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/resource-definitions"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([rc_ok("RD created"), rc_err("Port pool exhausted")])),
        )
        .mount(&mock_server)
        .await;

    let client = setup_test_client(&mock_server.uri());
    let report = client
        .resource_definitions()
        .spawn(ResourceDefinition::new("pvc-3"), &[1], AutoSelectFilter::default())
        .await
        .unwrap();

    assert_eq!(report.failed_step(), Some(SpawnStep::ResourceDefinition));
    assert_eq!(report.steps[0].1.outcome(), BatchOutcome::Partial);
    assert_eq!(mock_server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_get_and_modify() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/resource-definitions/r0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "name": "r0",
            "resource_group_name": "DfltRscGrp",
            "props": { "DrbdPrimarySetOn": "ALPHA" }
        }])))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/resource-definitions/gone"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/v1/resource-definitions/r0"))
        .and(body_json(json!({ "resource_group": "gold" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([rc_ok("Modified")])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = setup_test_client(&mock_server.uri());
    let handler = client.resource_definitions();

    let rd = handler.get("r0").await.unwrap();
    assert_eq!(rd.resource_group_name.as_deref(), Some("DfltRscGrp"));
    assert!(rd.flags.is_empty());

    let err = handler.get("gone").await.unwrap_err();
    assert!(matches!(err, LinstorError::NotFound(_)));

    let modify = ResourceDefinitionModify {
        resource_group: Some("gold".into()),
        ..ResourceDefinitionModify::default()
    };
    assert!(handler.modify("r0", &modify).await.unwrap().outcome().is_success());
}
