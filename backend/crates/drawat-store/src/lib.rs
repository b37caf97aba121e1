//! Remote record store adapter.
//!
//! A uniform facade over the user-owned repository (AT Protocol XRPC) and
//! the centralized table mirror, selected once from configuration.

pub(crate) mod error;
pub(crate) mod http;
pub(crate) mod record_store;
pub(crate) mod repo_client;
pub(crate) mod retry;
pub(crate) mod table_client;
pub(crate) mod table_row;
pub(crate) mod write_report;

#[cfg(test)]
mod tests;

pub use error::{Result as StoreResult, StoreError};
pub use http::http_client;
pub use record_store::{RecordStore, StoreBackend};
pub use repo_client::RepoClient;
pub use retry::{Backoff, IsRetryable, with_retry};
pub use table_client::TableClient;
pub use table_row::TableRow;
pub use write_report::{Backend, BackendOutcome, WriteReport};
