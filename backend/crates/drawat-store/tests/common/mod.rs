#![allow(dead_code)]

use drawat_config::RetryConfig;
use drawat_core::{Did, FixedClock, StrokePoint};
use drawat_store::{RepoClient, TableClient, http_client};

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, SecondsFormat, TimeZone, Utc};
use serde_json::{Value, json};
use wiremock::MockServer;

pub const TABLE_PATH: &str = "/api/vectors";
pub const GET_RECORD_PATH: &str = "/xrpc/com.atproto.repo.getRecord";
pub const PUT_RECORD_PATH: &str = "/xrpc/com.atproto.repo.putRecord";
pub const DELETE_RECORD_PATH: &str = "/xrpc/com.atproto.repo.deleteRecord";

pub const ALICE: &str = "did:plc:alice";
pub const BOB: &str = "did:plc:bob";
pub const CAROL: &str = "did:plc:carol";

pub fn did(value: &str) -> Did {
    Did::new(value).unwrap()
}

pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
}

pub fn frozen_clock() -> Arc<FixedClock> {
    Arc::new(FixedClock::new(now()))
}

pub fn stamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn point(x: f64, y: f64, is_new_stroke: bool, author: &str) -> StrokePoint {
    StrokePoint::new(x, y, "#112233", 2.0, is_new_stroke, author)
}

pub fn points_json(author: &str, count: usize) -> Value {
    let points: Vec<StrokePoint> = (0..count)
        .map(|i| point(i as f64, i as f64, i == 0, author))
        .collect();
    serde_json::to_value(points).unwrap()
}

pub fn table_row(did: &str, vector: Value, updated_at: DateTime<Utc>) -> Value {
    json!({
        "did": did,
        "vector": vector,
        "created_at": stamp(updated_at),
        "updated_at": stamp(updated_at),
    })
}

pub fn repo_record(did: &str, paths: Value, created_at: DateTime<Utc>) -> Value {
    json!({
        "uri": format!("at://{did}/blue.drawat.vector/self"),
        "cid": "bafyreitest",
        "value": {
            "$type": "blue.drawat.vector",
            "did": did,
            "paths": paths,
            "createdAt": stamp(created_at),
        }
    })
}

pub fn record_not_found() -> Value {
    json!({"error": "RecordNotFound", "message": "Could not locate record"})
}

pub fn table_client(server: &MockServer, bearer: Option<&str>) -> TableClient {
    TableClient::new(
        &format!("{}{}", server.uri(), TABLE_PATH),
        bearer,
        http_client(Duration::from_secs(5)).unwrap(),
        RetryConfig::disabled(),
    )
}

pub fn repo_client(server: &MockServer) -> RepoClient {
    RepoClient::new(
        &server.uri(),
        http_client(Duration::from_secs(5)).unwrap(),
        RetryConfig::disabled(),
    )
}
