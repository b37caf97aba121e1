#![allow(dead_code)]

use drawat_config::RetryConfig;
use drawat_core::{Did, FixedClock, StrokePoint};
use drawat_session::{Session, SessionContext, TokenSet};
use drawat_store::{RecordStore, RepoClient, StoreBackend, TableClient, http_client};

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use chrono::{DateTime, SecondsFormat, TimeZone, Utc};
use serde_json::{Value, json};
use wiremock::matchers::path;
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

pub const TABLE_PATH: &str = "/api/vectors";
pub const GET_RECORD_PATH: &str = "/xrpc/com.atproto.repo.getRecord";
pub const PUT_RECORD_PATH: &str = "/xrpc/com.atproto.repo.putRecord";
pub const DELETE_RECORD_PATH: &str = "/xrpc/com.atproto.repo.deleteRecord";

pub const A: &str = "did:plc:aaaa";
pub const B: &str = "did:plc:bbbb";
pub const C: &str = "did:plc:cccc";

pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
}

pub fn stamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn did(value: &str) -> Did {
    Did::new(value).unwrap()
}

pub fn points(author: &str, xs: &[f64]) -> Vec<StrokePoint> {
    xs.iter()
        .enumerate()
        .map(|(i, x)| StrokePoint::new(*x, *x, "#000000", 1.0, i == 0, author))
        .collect()
}

pub fn row(did: &str, vector: Value, updated_at: DateTime<Utc>) -> Value {
    json!({
        "did": did,
        "vector": vector,
        "created_at": stamp(updated_at),
        "updated_at": stamp(updated_at),
    })
}

pub fn drawn(did: &str, xs: &[f64], updated_at: DateTime<Utc>) -> Value {
    row(did, serde_json::to_value(points(did, xs)).unwrap(), updated_at)
}

/// In-memory stand-in for the centralized table endpoint.
#[derive(Clone, Default)]
pub struct FakeTable {
    rows: Arc<Mutex<Vec<Value>>>,
}

impl FakeTable {
    pub fn with_rows(rows: Vec<Value>) -> Self {
        Self {
            rows: Arc::new(Mutex::new(rows)),
        }
    }

    pub fn rows(&self) -> Vec<Value> {
        self.rows.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub async fn mount(&self, server: &MockServer) {
        Mock::given(path(TABLE_PATH))
            .respond_with(self.clone())
            .mount(server)
            .await;
    }
}

impl Respond for FakeTable {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let mut rows = self.rows.lock().unwrap_or_else(PoisonError::into_inner);
        let body: Value = serde_json::from_slice(&request.body).unwrap_or(Value::Null);
        let did = body["did"].clone();

        match request.method.as_str() {
            "GET" => ResponseTemplate::new(200).set_body_json(rows.clone()),
            "POST" => {
                let updated = json!({
                    "did": did,
                    "vector": body["vector"],
                    "created_at": body["updated_at"],
                    "updated_at": body["updated_at"],
                });
                match rows.iter_mut().find(|r| r["did"] == did) {
                    Some(existing) => *existing = updated,
                    None => rows.push(updated),
                }
                ResponseTemplate::new(201)
            }
            "DELETE" => {
                rows.retain(|r| r["did"] != did);
                ResponseTemplate::new(200)
            }
            _ => ResponseTemplate::new(405),
        }
    }
}

pub fn table_client(server: &MockServer) -> TableClient {
    TableClient::new(
        &format!("{}{}", server.uri(), TABLE_PATH),
        None,
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

pub fn centralized(server: &MockServer, clock: Arc<FixedClock>) -> Arc<RecordStore> {
    Arc::new(RecordStore::new(
        StoreBackend::CentralizedOnly {
            table: table_client(server),
        },
        clock,
    ))
}

pub fn decentralized(server: &MockServer, clock: Arc<FixedClock>) -> Arc<RecordStore> {
    Arc::new(RecordStore::new(
        StoreBackend::DecentralizedOnly {
            repo: repo_client(server),
            directory: table_client(server),
        },
        clock,
    ))
}

pub fn dual(server: &MockServer, clock: Arc<FixedClock>) -> Arc<RecordStore> {
    Arc::new(RecordStore::new(
        StoreBackend::Dual {
            repo: repo_client(server),
            table: table_client(server),
        },
        clock,
    ))
}

pub fn frozen_clock() -> Arc<FixedClock> {
    Arc::new(FixedClock::new(now()))
}

/// Context signed in as `who`, with tokens for `service`.
pub fn signed_in(who: &str, service: &str) -> SessionContext {
    let context = SessionContext::new();
    context.begin_initialize();
    context.authenticate(Session::from_tokens(
        did(who),
        "someone.test",
        service,
        TokenSet {
            access_token: format!("access-{who}"),
            refresh_token: None,
            token_type: "Bearer".into(),
            scope: None,
            expires_in: None,
            sub: None,
        },
        now(),
    ));
    context
}
