//! Integration tests for the centralized table client using wiremock

mod common;

use common::*;

use drawat_config::RetryConfig;
use drawat_store::{StoreError, TableClient, http_client};

use std::time::Duration;

use serde_json::{Value, json};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_partial_json, header, method, path},
};

#[tokio::test]
async fn test_list_rows_keeps_server_order_and_skips_malformed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(TABLE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            table_row(BOB, Value::Null, now()),
            {"did": "did:plc:broken"},
            table_row(ALICE, points_json(ALICE, 2), now()),
        ])))
        .mount(&server)
        .await;

    let rows = table_client(&server, None).list_rows().await.unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].did.as_str(), BOB);
    assert_eq!(rows[1].did.as_str(), ALICE);
}

#[tokio::test]
async fn test_bearer_sent_when_configured() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(TABLE_PATH))
        .and(header("authorization", "Bearer dev-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = table_client(&server, Some("dev-key"));

    assert!(client.sends_bearer());
    assert!(client.list_rows().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_no_authorization_header_without_bearer() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(TABLE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    table_client(&server, None).list_rows().await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(!requests[0].headers.contains_key("authorization"));
}

#[tokio::test]
async fn test_upsert_sends_did_vector_and_timestamp() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(TABLE_PATH))
        .and(body_partial_json(json!({
            "did": ALICE,
            "vector": points_json(ALICE, 3),
            "updated_at": "2025-06-01T12:00:00.000Z",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;

    let points: Vec<_> = serde_json::from_value(points_json(ALICE, 3)).unwrap();
    table_client(&server, None)
        .upsert_row(&did(ALICE), Some(&points), now())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_register_style_upsert_sends_null_vector() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(TABLE_PATH))
        .and(body_partial_json(json!({"did": CAROL, "vector": null})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    table_client(&server, None)
        .upsert_row(&did(CAROL), None, now())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_delete_sends_did() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path(TABLE_PATH))
        .and(body_partial_json(json!({"did": ALICE})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    table_client(&server, None)
        .delete_row(&did(ALICE))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_server_error_surfaces_as_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(TABLE_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("database unavailable"))
        .mount(&server)
        .await;

    let err = table_client(&server, None).list_rows().await.unwrap_err();

    match err {
        StoreError::Api {
            status, message, ..
        } => {
            assert_eq!(status, 500);
            assert!(message.contains("database unavailable"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_transient_failure_is_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(TABLE_PATH))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(TABLE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            table_row(ALICE, Value::Null, now()),
        ])))
        .mount(&server)
        .await;

    let retry = RetryConfig {
        max_attempts: 3,
        initial_delay_ms: 10,
        jitter: false,
        ..RetryConfig::default()
    };
    let client = TableClient::new(
        &format!("{}{}", server.uri(), TABLE_PATH),
        None,
        http_client(Duration::from_secs(5)).unwrap(),
        retry,
    );

    let rows = client.list_rows().await.unwrap();

    assert_eq!(rows.len(), 1);
}
