use crate::http::ensure_success;
use crate::{StoreError, StoreResult, TableRow, with_retry};

use drawat_config::RetryConfig;
use drawat_core::{Did, StrokePoint, encode_paths};

use chrono::{DateTime, SecondsFormat, Utc};
use log::{debug, warn};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client as ReqwestClient, Method};
use serde::Serialize;
use serde_json::Value;

/// Client for the centralized table's single method-dispatched endpoint.
///
/// `GET` lists rows, `POST` upserts a row, `DELETE` removes one.
pub struct TableClient {
    pub endpoint: String,
    bearer: Option<String>,
    client: ReqwestClient,
    retry: RetryConfig,
}

impl TableClient {
    /// Create a new client
    ///
    /// # Arguments
    /// * `endpoint` - Table endpoint URL
    /// * `bearer` - API key sent as `Authorization: Bearer`; pass `None` in production
    pub fn new(
        endpoint: &str,
        bearer: Option<&str>,
        client: ReqwestClient,
        retry: RetryConfig,
    ) -> Self {
        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            bearer: bearer.map(String::from),
            client,
            retry,
        }
    }

    pub fn sends_bearer(&self) -> bool {
        self.bearer.is_some()
    }

    fn request(&self, method: Method) -> reqwest::RequestBuilder {
        let mut req = self
            .client
            .request(method, &self.endpoint)
            .header(CONTENT_TYPE, "application/json");

        if let Some(ref key) = self.bearer {
            req = req.bearer_auth(key);
        }

        req
    }

    /// List every row, in server order.
    ///
    /// Rows that fail to parse are skipped so one bad writer cannot hide
    /// everybody else.
    pub async fn list_rows(&self) -> StoreResult<Vec<TableRow>> {
        let raw: Vec<Value> = with_retry(&self.retry, "list table rows", || async {
            let response = ensure_success(self.request(Method::GET).send().await?).await?;
            Ok::<_, StoreError>(response.json::<Vec<Value>>().await?)
        })
        .await?;

        let total = raw.len();
        let rows: Vec<TableRow> = raw
            .into_iter()
            .filter_map(|value| match serde_json::from_value::<TableRow>(value) {
                Ok(row) => Some(row),
                Err(e) => {
                    warn!("[WARN] Skipping malformed table row: {}", e);
                    None
                }
            })
            .collect();

        debug!("Listed {} table rows ({} usable)", total, rows.len());
        Ok(rows)
    }

    /// Upsert the row for `did`. `vector = None` registers the identity
    /// without drawable paths.
    pub async fn upsert_row(
        &self,
        did: &Did,
        vector: Option<&[StrokePoint]>,
        updated_at: DateTime<Utc>,
    ) -> StoreResult<()> {
        #[derive(Serialize)]
        struct UpsertRequest<'a> {
            did: &'a Did,
            vector: Option<Value>,
            updated_at: String,
        }

        let body = UpsertRequest {
            did,
            vector: vector.map(encode_paths).transpose()?,
            updated_at: updated_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        };

        with_retry(&self.retry, "upsert table row", || async {
            ensure_success(self.request(Method::POST).json(&body).send().await?).await?;
            Ok::<_, StoreError>(())
        })
        .await
    }

    pub async fn delete_row(&self, did: &Did) -> StoreResult<()> {
        #[derive(Serialize)]
        struct DeleteRequest<'a> {
            did: &'a Did,
        }

        let body = DeleteRequest { did };

        with_retry(&self.retry, "delete table row", || async {
            ensure_success(self.request(Method::DELETE).json(&body).send().await?).await?;
            Ok::<_, StoreError>(())
        })
        .await
    }
}
