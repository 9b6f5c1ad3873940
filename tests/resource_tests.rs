use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod common;

use common::{rc_err, rc_ok, setup_recording_client, setup_test_client};
use linstor_client::{
    BatchOutcome, ResourceCreate, ResourceGroup, ResourceGroupSpawn, SnapshotCreate,
    SnapshotRestore,
};

#[tokio::test]
async fn test_view_resources() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/view/resources"))
        .and(query_param("resources", "pvc-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "name": "pvc-1",
                "node_name": "alpha",
                "state": { "in_use": true },
                "volumes": [{ "volume_number": 0, "state": { "disk_state": "UpToDate" } }]
            },
            {
                "name": "pvc-1",
                "node_name": "beta",
                "flags": ["DRBD_DISKLESS"]
            }
        ])))
        .mount(&mock_server)
        .await;

    let client = setup_test_client(&mock_server.uri());
    let resources = client.resources().list().resources(["pvc-1"]).send().await.unwrap();

    assert!(resources[0].in_use());
    assert_eq!(
        resources[0].volumes[0].state.as_ref().unwrap().disk_state.as_deref(),
        Some("UpToDate")
    );
    assert!(resources[1].is_diskless());
    assert!(!resources[1].in_use());
}

#[tokio::test]
async fn test_create_and_toggle_resource() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/resource-definitions/r0/resources/gamma"))
        .and(body_json(json!({ "resource": { "flags": ["DRBD_DISKLESS"] } })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([rc_ok("Created")])))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/v1/resource-definitions/r0/resources/gamma/toggle-disk/diskful"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([rc_ok("Toggled")])))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/v1/resource-definitions/r0/resources/gamma/migrate-disk/alpha"))
        .and(query_param("storage_pool", "thin"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([rc_ok("Migrating")])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = setup_test_client(&mock_server.uri());
    let resources = client.resources();

    let reply = resources.create("r0", "gamma", &ResourceCreate::diskless()).await.unwrap();
    assert!(reply.outcome().is_success());
    assert!(resources.toggle_diskful("r0", "gamma").await.unwrap().is_data());
    assert!(resources
        .migrate_disk("r0", "alpha", "gamma", Some("thin"))
        .await
        .unwrap()
        .is_data());
}

#[tokio::test]
async fn test_partial_delete_is_reported() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/v1/resource-definitions/r0/resources/alpha"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            rc_ok("Resource deleted on alpha"),
            rc_err("Satellite beta did not answer")
        ])))
        .mount(&mock_server)
        .await;

    let (client, recorder) = setup_recording_client(&mock_server.uri());
    let reply = client.resources().delete("r0", "alpha").await.unwrap();

    assert_eq!(reply.outcome(), BatchOutcome::Partial);
    assert!(linstor_client::partially_success(reply.data().map(Vec::as_slice)));
    assert_eq!(recorder.count(), 1);
}

#[tokio::test]
async fn test_resource_groups() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/resource-groups/gold"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "name": "gold",
            "select_filter": { "place_count": 3, "storage_pool": "thin" }
        }])))
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/resource-groups"))
        .and(body_json(json!({
            "name": "silver",
            "description": "two replicas",
            "props": {},
            "select_filter": { "place_count": 2 }
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([rc_ok("Created")])))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/resource-groups/gold/spawn"))
        .and(body_json(json!({
            "resource_definition_name": "pvc-9",
            "volume_sizes": [4096],
            "definitions_only": true
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([rc_ok("Spawned")])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = setup_test_client(&mock_server.uri());
    let groups = client.resource_groups();

    let gold = groups.get("gold").await.unwrap();
    assert_eq!(gold.select_filter.place_count, Some(3));

    let silver = ResourceGroup::new("silver")
        .description("two replicas")
        .select_filter(linstor_client::AutoSelectFilter::place_count(2));
    assert!(groups.create(&silver).await.unwrap().is_data());

    let spawn = ResourceGroupSpawn::new("pvc-9", vec![4096]).definitions_only();
    assert!(groups.spawn("gold", &spawn).await.unwrap().outcome().is_success());
}

#[tokio::test]
async fn test_snapshots() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/view/snapshots"))
        .and(query_param("resources", "r0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "name": "snap1",
            "resource_name": "r0",
            "nodes": ["alpha"],
            "flags": ["SUCCESSFUL"],
            "snapshots": [
                { "node_name": "alpha", "create_timestamp": 1700000000500_i64 },
                { "node_name": "beta", "create_timestamp": 1700000000000_i64 }
            ]
        }])))
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/resource-definitions/r0/snapshots"))
        .and(body_json(json!({ "name": "snap2", "nodes": ["alpha"] })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([rc_ok("Created")])))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/resource-definitions/r0/snapshot-restore-resource/snap1"))
        .and(body_json(json!({ "to_resource": "r0-restored" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([rc_ok("Restored")])))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/resource-definitions/r0/snapshot-rollback/snap1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([rc_ok("Rolled back")])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (client, recorder) = setup_recording_client(&mock_server.uri());
    let snapshots = client.snapshots();

    let list = snapshots.list().resources(["r0"]).send().await.unwrap();
    assert!(list[0].is_successful());
    assert_eq!(list[0].created_at_millis(), Some(1700000000000));

    let create = SnapshotCreate::new("snap2").on_nodes(["alpha"]);
    assert!(snapshots.create("r0", &create).await.unwrap().is_data());

    let restore = SnapshotRestore {
        to_resource: "r0-restored".into(),
        nodes: Vec::new(),
    };
    assert!(snapshots.restore("r0", "snap1", &restore).await.unwrap().is_data());
    assert!(snapshots.rollback("r0", "snap1").await.unwrap().is_data());

    // Only the rollback and restore URLs lack the "snapshots" segment.
    assert_eq!(recorder.count(), 2);
}
