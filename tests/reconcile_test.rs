//! End-to-end reconciliation tests against a mock Cloudflare API

use std::time::Duration;

use httpmock::prelude::*;
use serde_json::json;

use cfddns::config::{RecordConfig, ZoneConfig};
use cfddns::reconcile::Outcome;
use cfddns::{CloudflareClient, Error, Reconciler};

const ZONE_ID: &str = "0123456789abcdef0123456789abcdef";
const GLOBAL_KEY: &str = "0123456789abcdef0123456789abcdef01234";

fn client_for(server: &MockServer, credential: &str) -> CloudflareClient {
    CloudflareClient::new("user@example.com", credential, Duration::from_secs(5))
        .expect("client")
        .with_api_base(server.base_url())
}

fn token() -> String {
    "a".repeat(40)
}

fn zone(records: Vec<RecordConfig>) -> ZoneConfig {
    ZoneConfig {
        id: ZONE_ID.to_string(),
        records,
    }
}

fn record(id: &str, name: &str) -> RecordConfig {
    RecordConfig {
        id: id.to_string(),
        name: name.to_string(),
    }
}

fn read_response(content: &str) -> serde_json::Value {
    json!({
        "success": true,
        "errors": [],
        "messages": [],
        "result": {
            "id": "rec1",
            "type": "A",
            "name": "example.com",
            "content": content,
            "ttl": 1,
            "proxied": true
        }
    })
}

#[tokio::test]
async fn unchanged_record_issues_no_write() {
    let server = MockServer::start_async().await;
    let get = server
        .mock_async(|when, then| {
            when.method(GET)
                .path(format!("/zones/{ZONE_ID}/dns_records/rec1"));
            then.status(200).json_body(read_response("203.0.113.5"));
        })
        .await;
    let put = server
        .mock_async(|when, then| {
            when.method(PUT);
            then.status(200).json_body(json!({ "success": true }));
        })
        .await;

    let client = client_for(&server, &token());
    let reconciler = Reconciler::new(&client);
    let zones = vec![zone(vec![record("rec1", "example.com")])];

    let reports = reconciler.run(&zones, "203.0.113.5").await;

    assert_eq!(reports.len(), 1);
    assert!(matches!(reports[0].outcome, Outcome::Unchanged));
    assert_eq!(format!("{}", reports[0]), "IP for example.com unchanged");
    get.assert_async().await;
    assert_eq!(put.hits_async().await, 0);
}

#[tokio::test]
async fn changed_record_is_rewritten_with_fixed_payload() {
    let server = MockServer::start_async().await;
    let _get = server
        .mock_async(|when, then| {
            when.method(GET)
                .path(format!("/zones/{ZONE_ID}/dns_records/rec2"));
            then.status(200).json_body(read_response("198.51.100.1"));
        })
        .await;
    // type/ttl/proxied are invariant; only name and content follow the call
    let put = server
        .mock_async(|when, then| {
            when.method(PUT)
                .path(format!("/zones/{ZONE_ID}/dns_records/rec2"))
                .json_body(json!({
                    "type": "A",
                    "name": "api.example.com",
                    "content": "203.0.113.9",
                    "ttl": 1,
                    "proxied": true
                }));
            then.status(200)
                .json_body(json!({ "success": true, "errors": [], "result": {} }));
        })
        .await;

    let client = client_for(&server, &token());
    let reconciler = Reconciler::new(&client);
    let zones = vec![zone(vec![record("rec2", "api.example.com")])];

    let reports = reconciler.run(&zones, "203.0.113.9").await;

    assert_eq!(reports.len(), 1);
    match &reports[0].outcome {
        Outcome::Updated { previous, current } => {
            assert_eq!(previous, "198.51.100.1");
            assert_eq!(current, "203.0.113.9");
        }
        other => panic!("expected Updated, got {other:?}"),
    }
    assert_eq!(
        format!("{}", reports[0]),
        "updated api.example.com from 198.51.100.1 to 203.0.113.9"
    );
    put.assert_async().await;
}

#[tokio::test]
async fn provider_rejection_is_reported_and_run_continues() {
    let server = MockServer::start_async().await;
    let _get1 = server
        .mock_async(|when, then| {
            when.method(GET)
                .path(format!("/zones/{ZONE_ID}/dns_records/rec1"));
            then.status(200).json_body(read_response("198.51.100.1"));
        })
        .await;
    let _put1 = server
        .mock_async(|when, then| {
            when.method(PUT)
                .path(format!("/zones/{ZONE_ID}/dns_records/rec1"));
            then.status(200).json_body(json!({
                "success": false,
                "errors": [{ "code": 81057, "message": "Record already exists." }]
            }));
        })
        .await;
    let get2 = server
        .mock_async(|when, then| {
            when.method(GET)
                .path(format!("/zones/{ZONE_ID}/dns_records/rec2"));
            then.status(200).json_body(read_response("203.0.113.9"));
        })
        .await;

    let client = client_for(&server, &token());
    let reconciler = Reconciler::new(&client);
    let zones = vec![zone(vec![
        record("rec1", "example.com"),
        record("rec2", "api.example.com"),
    ])];

    let reports = reconciler.run(&zones, "203.0.113.9").await;

    assert_eq!(reports.len(), 2);
    match &reports[0].outcome {
        Outcome::Rejected { response } => {
            assert_eq!(response["success"], json!(false));
            assert_eq!(response["errors"][0]["code"], json!(81057));
        }
        other => panic!("expected Rejected, got {other:?}"),
    }
    assert!(format!("{}", reports[0]).starts_with("failed to update example.com:"));
    assert!(matches!(reports[1].outcome, Outcome::Unchanged));
    get2.assert_async().await;
}

#[tokio::test]
async fn record_failure_does_not_skip_later_records() {
    let server = MockServer::start_async().await;
    let _get1 = server
        .mock_async(|when, then| {
            when.method(GET)
                .path(format!("/zones/{ZONE_ID}/dns_records/rec1"));
            then.status(500).body("internal error");
        })
        .await;
    let get2 = server
        .mock_async(|when, then| {
            when.method(GET)
                .path(format!("/zones/{ZONE_ID}/dns_records/rec2"));
            then.status(200).json_body(read_response("203.0.113.5"));
        })
        .await;

    let client = client_for(&server, &token());
    let reconciler = Reconciler::new(&client);
    let zones = vec![zone(vec![
        record("rec1", "example.com"),
        record("rec2", "api.example.com"),
    ])];

    let reports = reconciler.run(&zones, "203.0.113.5").await;

    assert_eq!(reports.len(), 2);
    match &reports[0].outcome {
        Outcome::Failed { error } => assert!(matches!(error, Error::Network(_))),
        other => panic!("expected Failed, got {other:?}"),
    }
    assert!(matches!(reports[1].outcome, Outcome::Unchanged));
    get2.assert_async().await;
}

#[tokio::test]
async fn malformed_read_response_is_a_parse_failure() {
    let server = MockServer::start_async().await;
    let _get = server
        .mock_async(|when, then| {
            when.method(GET)
                .path(format!("/zones/{ZONE_ID}/dns_records/rec1"));
            then.status(200).json_body(json!({ "success": true, "result": {} }));
        })
        .await;

    let client = client_for(&server, &token());
    let reconciler = Reconciler::new(&client);
    let zones = vec![zone(vec![record("rec1", "example.com")])];

    let reports = reconciler.run(&zones, "203.0.113.5").await;

    assert_eq!(reports.len(), 1);
    match &reports[0].outcome {
        Outcome::Failed { error } => assert!(matches!(error, Error::Parse(_))),
        other => panic!("expected Failed, got {other:?}"),
    }
}

#[tokio::test]
async fn reconciliation_is_idempotent() {
    let server = MockServer::start_async().await;
    let get = server
        .mock_async(|when, then| {
            when.method(GET)
                .path(format!("/zones/{ZONE_ID}/dns_records/rec1"));
            then.status(200).json_body(read_response("203.0.113.5"));
        })
        .await;
    let put = server
        .mock_async(|when, then| {
            when.method(PUT);
            then.status(200).json_body(json!({ "success": true }));
        })
        .await;

    let client = client_for(&server, &token());
    let reconciler = Reconciler::new(&client);
    let zones = vec![zone(vec![record("rec1", "example.com")])];

    for _ in 0..2 {
        let reports = reconciler.run(&zones, "203.0.113.5").await;
        assert!(matches!(reports[0].outcome, Outcome::Unchanged));
    }

    assert_eq!(get.hits_async().await, 2);
    assert_eq!(put.hits_async().await, 0);
}

#[tokio::test]
async fn global_key_credential_sends_email_and_key_headers() {
    let server = MockServer::start_async().await;
    let get = server
        .mock_async(|when, then| {
            when.method(GET)
                .path(format!("/zones/{ZONE_ID}/dns_records/rec1"))
                .header("x-auth-email", "user@example.com")
                .header("x-auth-key", GLOBAL_KEY);
            then.status(200).json_body(read_response("203.0.113.5"));
        })
        .await;

    let client = client_for(&server, GLOBAL_KEY);
    let reconciler = Reconciler::new(&client);
    let zones = vec![zone(vec![record("rec1", "example.com")])];

    let reports = reconciler.run(&zones, "203.0.113.5").await;
    assert!(matches!(reports[0].outcome, Outcome::Unchanged));
    get.assert_async().await;
}

#[tokio::test]
async fn token_credential_sends_bearer_header() {
    let server = MockServer::start_async().await;
    let token = token();
    let get = server
        .mock_async(|when, then| {
            when.method(GET)
                .path(format!("/zones/{ZONE_ID}/dns_records/rec1"))
                .header("authorization", format!("Bearer {token}"));
            then.status(200).json_body(read_response("203.0.113.5"));
        })
        .await;

    let client = client_for(&server, &token);
    let reconciler = Reconciler::new(&client);
    let zones = vec![zone(vec![record("rec1", "example.com")])];

    let reports = reconciler.run(&zones, "203.0.113.5").await;
    assert!(matches!(reports[0].outcome, Outcome::Unchanged));
    get.assert_async().await;
}

#[tokio::test]
async fn zones_and_records_run_in_configuration_order() {
    let server = MockServer::start_async().await;
    for rec in ["r1a", "r1b"] {
        server
            .mock_async(|when, then| {
                when.method(GET)
                    .path(format!("/zones/{ZONE_ID}/dns_records/{rec}"));
                then.status(200).json_body(read_response("203.0.113.5"));
            })
            .await;
    }
    let second_zone = "fedcba9876543210fedcba9876543210";
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path(format!("/zones/{second_zone}/dns_records/r2a"));
            then.status(200).json_body(read_response("203.0.113.5"));
        })
        .await;

    let client = client_for(&server, &token());
    let reconciler = Reconciler::new(&client);
    let zones = vec![
        zone(vec![record("r1a", "a.example.com"), record("r1b", "b.example.com")]),
        ZoneConfig {
            id: second_zone.to_string(),
            records: vec![record("r2a", "c.example.net")],
        },
    ];

    let reports = reconciler.run(&zones, "203.0.113.5").await;
    let names: Vec<&str> = reports.iter().map(|r| r.record_name.as_str()).collect();
    assert_eq!(names, ["a.example.com", "b.example.com", "c.example.net"]);
    assert_eq!(reports[2].zone_id, second_zone);
}
