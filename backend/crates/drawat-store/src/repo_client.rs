use crate::http::ensure_success;
use crate::{StoreError, StoreResult, with_retry};

use drawat_config::RetryConfig;
use drawat_core::models::timestamp;
use drawat_core::{
    Agent, Did, StrokePoint, VECTOR_COLLECTION, VECTOR_RECORD_KEY, VectorRecord, decode_paths,
};

use chrono::{DateTime, SecondsFormat, Utc};
use log::debug;
use reqwest::Client as ReqwestClient;
use serde::{Deserialize, Serialize};
use serde_json::Value;

const GET_RECORD: &str = "com.atproto.repo.getRecord";
const PUT_RECORD: &str = "com.atproto.repo.putRecord";
const DELETE_RECORD: &str = "com.atproto.repo.deleteRecord";

#[derive(Deserialize)]
struct GetRecordResponse {
    value: RecordValue,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecordValue {
    #[serde(default)]
    paths: Option<Value>,
    #[serde(deserialize_with = "timestamp::deserialize")]
    created_at: DateTime<Utc>,
}

#[derive(Serialize)]
struct RecordBody<'a> {
    #[serde(rename = "$type")]
    kind: &'static str,
    paths: &'a [StrokePoint],
    #[serde(rename = "createdAt")]
    created_at: String,
}

#[derive(Serialize)]
struct PutRecordRequest<'a> {
    repo: &'a Did,
    collection: &'static str,
    rkey: &'static str,
    record: RecordBody<'a>,
}

#[derive(Serialize)]
struct DeleteRecordRequest<'a> {
    repo: &'a Did,
    collection: &'static str,
    rkey: &'static str,
}

/// XRPC client for the `blue.drawat.vector/self` record in each user's repository.
///
/// Reads go to the configured public service without credentials; writes go
/// to the agent's own service with its bearer token.
pub struct RepoClient {
    pub service: String,
    client: ReqwestClient,
    retry: RetryConfig,
}

impl RepoClient {
    pub fn new(service: &str, client: ReqwestClient, retry: RetryConfig) -> Self {
        Self {
            service: service.trim_end_matches('/').to_string(),
            client,
            retry,
        }
    }

    fn xrpc_url(service: &str, method: &str) -> String {
        format!("{}/xrpc/{}", service, method)
    }

    /// Fetch the identity's record. A repository without one yields `None`.
    pub async fn get_record(&self, did: &Did) -> StoreResult<Option<VectorRecord>> {
        let url = Self::xrpc_url(&self.service, GET_RECORD);

        let result = with_retry(&self.retry, "get repository record", || async {
            let response = self
                .client
                .get(&url)
                .query(&[
                    ("repo", did.as_str()),
                    ("collection", VECTOR_COLLECTION),
                    ("rkey", VECTOR_RECORD_KEY),
                ])
                .send()
                .await?;
            let response = ensure_success(response).await?;
            Ok::<_, StoreError>(response.json::<GetRecordResponse>().await?)
        })
        .await;

        let response = match result {
            Ok(response) => response,
            Err(e) if e.is_not_found() => {
                debug!("No repository record for DID: {}", did);
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        let paths = decode_paths(response.value.paths)?;

        Ok(Some(VectorRecord {
            did: did.clone(),
            paths,
            updated_at: response.value.created_at,
        }))
    }

    /// Replace the record in the agent's repository, stamping `createdAt = now`.
    pub async fn put_record(
        &self,
        agent: &Agent,
        paths: &[StrokePoint],
        now: DateTime<Utc>,
    ) -> StoreResult<()> {
        let body = PutRecordRequest {
            repo: &agent.did,
            collection: VECTOR_COLLECTION,
            rkey: VECTOR_RECORD_KEY,
            record: RecordBody {
                kind: VECTOR_COLLECTION,
                paths,
                created_at: now.to_rfc3339_opts(SecondsFormat::Millis, true),
            },
        };

        let response = self
            .client
            .post(Self::xrpc_url(&agent.service, PUT_RECORD))
            .bearer_auth(agent.access_token())
            .json(&body)
            .send()
            .await?;
        ensure_success(response).await?;

        debug!("Put repository record for DID: {}", agent.did);
        Ok(())
    }

    pub async fn delete_record(&self, agent: &Agent) -> StoreResult<()> {
        let body = DeleteRecordRequest {
            repo: &agent.did,
            collection: VECTOR_COLLECTION,
            rkey: VECTOR_RECORD_KEY,
        };

        let response = self
            .client
            .post(Self::xrpc_url(&agent.service, DELETE_RECORD))
            .bearer_auth(agent.access_token())
            .json(&body)
            .send()
            .await?;
        ensure_success(response).await?;

        debug!("Deleted repository record for DID: {}", agent.did);
        Ok(())
    }
}

/// Repository writes need an agent signed in as the record's owner.
#[track_caller]
pub(crate) fn require_agent<'a>(agent: Option<&'a Agent>, did: &Did) -> StoreResult<&'a Agent> {
    match agent {
        Some(agent) if &agent.did == did => Ok(agent),
        Some(agent) => Err(StoreError::unauthenticated(format!(
            "agent for {} cannot write the record of {}",
            agent.did, did
        ))),
        None => Err(StoreError::unauthenticated(format!(
            "no signed-in agent to write the record of {}",
            did
        ))),
    }
}
