use crate::{StoreError, StoreResult};

use std::time::Duration;

use reqwest::{Client as ReqwestClient, Response};
use serde_json::Value;

const USER_AGENT: &str = concat!("drawat/", env!("CARGO_PKG_VERSION"));

/// Shared HTTP client; every request is bounded by `timeout`.
pub fn http_client(timeout: Duration) -> StoreResult<ReqwestClient> {
    ReqwestClient::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
        .map_err(StoreError::from_reqwest)
}

/// Pass successful responses through; turn anything else into `StoreError::Api`.
///
/// XRPC errors look like `{"error": "...", "message": "..."}`; the table
/// endpoint may answer with any JSON or plain text.
pub(crate) async fn ensure_success(response: Response) -> StoreResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    let body: Value = serde_json::from_str(&text).unwrap_or(Value::Null);

    let code = body
        .get("error")
        .and_then(|v| v.as_str())
        .unwrap_or("UNKNOWN")
        .to_string();
    let message = body
        .get("message")
        .and_then(|v| v.as_str())
        .map(String::from)
        .unwrap_or_else(|| {
            if text.is_empty() {
                status.canonical_reason().unwrap_or("Unknown error").to_string()
            } else {
                text.clone()
            }
        });

    Err(StoreError::api_error(status.as_u16(), code, message))
}
