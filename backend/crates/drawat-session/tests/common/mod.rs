#![allow(dead_code)]

use drawat_config::{Environment, RetryConfig};
use drawat_core::FixedClock;
use drawat_session::{ClientMetadata, SessionContext, SessionManager, SessionStorage};
use drawat_store::{RecordStore, RepoClient, StoreBackend, TableClient, http_client};

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};
use serde_json::{Value, json};
use tempfile::TempDir;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TABLE_PATH: &str = "/api/vectors";
pub const RESOLVE_HANDLE_PATH: &str = "/xrpc/com.atproto.identity.resolveHandle";
pub const TOKEN_PATH: &str = "/oauth/token";
pub const REVOKE_PATH: &str = "/oauth/revoke";
pub const DELETE_RECORD_PATH: &str = "/xrpc/com.atproto.repo.deleteRecord";

pub const ALICE: &str = "did:plc:alice";
pub const ALICE_HANDLE: &str = "alice.test";

pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
}

pub struct Harness {
    pub server: MockServer,
    pub dir: TempDir,
    pub clock: Arc<FixedClock>,
    pub context: SessionContext,
    pub manager: SessionManager,
}

impl Harness {
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        let dir = TempDir::new().unwrap();
        Self::with(server, dir)
    }

    /// A second process sharing the same provider and config directory.
    pub fn restart(self) -> Self {
        Self::with(self.server, self.dir)
    }

    fn with(server: MockServer, dir: TempDir) -> Self {
        let clock = Arc::new(FixedClock::new(now()));
        let http = http_client(Duration::from_secs(5)).unwrap();
        let store = Arc::new(RecordStore::new(
            StoreBackend::Dual {
                repo: RepoClient::new(&server.uri(), http.clone(), RetryConfig::disabled()),
                table: TableClient::new(
                    &format!("{}{}", server.uri(), TABLE_PATH),
                    None,
                    http.clone(),
                    RetryConfig::disabled(),
                ),
            },
            clock.clone(),
        ));
        let context = SessionContext::new();
        let manager = SessionManager::new(
            context.clone(),
            ClientMetadata::for_environment(Environment::Development, "http://127.0.0.1:5173"),
            http,
            store,
            clock.clone(),
            SessionStorage::in_dir(dir.path()),
        );

        Self {
            server,
            dir,
            clock,
            context,
            manager,
        }
    }

    pub fn provider(&self) -> String {
        self.server.uri()
    }

    pub async fn mount_resolve_handle(&self) {
        Mock::given(method("GET"))
            .and(path(RESOLVE_HANDLE_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"did": ALICE})))
            .mount(&self.server)
            .await;
    }

    /// Answer the authorization-code grant.
    pub async fn mount_token(&self, body: Value) {
        Mock::given(method("POST"))
            .and(path(TOKEN_PATH))
            .and(body_string_contains("grant_type=authorization_code"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    pub async fn mount_table_writes(&self) {
        Mock::given(method("POST"))
            .and(path(TABLE_PATH))
            .respond_with(ResponseTemplate::new(200))
            .mount(&self.server)
            .await;
        Mock::given(method("DELETE"))
            .and(path(TABLE_PATH))
            .respond_with(ResponseTemplate::new(200))
            .mount(&self.server)
            .await;
    }
}

pub fn token_body(access: &str) -> Value {
    json!({
        "access_token": access,
        "refresh_token": format!("{access}-refresh"),
        "token_type": "DPoP",
        "scope": "atproto transition:generic",
        "expires_in": 3600,
        "sub": ALICE,
    })
}

pub fn query_value(url: &url::Url, key: &str) -> Option<String> {
    url.query_pairs()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}
