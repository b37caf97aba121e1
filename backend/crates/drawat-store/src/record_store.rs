use crate::repo_client::require_agent;
use crate::{
    Backend, RepoClient, StoreError, StoreResult, TableClient, TableRow, WriteReport, http_client,
};

use drawat_config::{Config, StoreMode};
use drawat_core::{Agent, Clock, Did, StrokePoint, VectorRecord};

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use log::{debug, info, warn};

/// Which backends hold records, fixed at construction.
///
/// Every variant carries a table client: holder discovery always scans the
/// centralized table, even when records live only in user repositories.
pub enum StoreBackend {
    DecentralizedOnly {
        repo: RepoClient,
        directory: TableClient,
    },
    CentralizedOnly {
        table: TableClient,
    },
    Dual {
        repo: RepoClient,
        table: TableClient,
    },
}

impl StoreBackend {
    pub fn mode(&self) -> StoreMode {
        match self {
            Self::DecentralizedOnly { .. } => StoreMode::Decentralized,
            Self::CentralizedOnly { .. } => StoreMode::Centralized,
            Self::Dual { .. } => StoreMode::Dual,
        }
    }

    fn table(&self) -> &TableClient {
        match self {
            Self::DecentralizedOnly { directory, .. } => directory,
            Self::CentralizedOnly { table } | Self::Dual { table, .. } => table,
        }
    }
}

/// Uniform record operations over the configured backends.
pub struct RecordStore {
    backend: StoreBackend,
    clock: Arc<dyn Clock>,
    /// Rows from the last directory scan, reused by table-backed reads
    snapshot: Mutex<HashMap<Did, TableRow>>,
}

impl RecordStore {
    pub fn new(backend: StoreBackend, clock: Arc<dyn Clock>) -> Self {
        Self {
            backend,
            clock,
            snapshot: Mutex::new(HashMap::new()),
        }
    }

    /// Build the store described by `config.store`.
    ///
    /// The table bearer is only attached outside production.
    pub fn from_config(config: &Config, clock: Arc<dyn Clock>) -> StoreResult<Self> {
        let table_url = config
            .store
            .table_url
            .as_deref()
            .ok_or_else(|| StoreError::config("store.table_url is not set"))?;

        let client = http_client(config.sync.request_timeout())?;
        let table = TableClient::new(
            table_url,
            config.table_bearer(),
            client.clone(),
            config.retry.clone(),
        );
        let repo = RepoClient::new(&config.store.repo_service, client, config.retry.clone());

        let backend = match config.store.mode {
            StoreMode::Decentralized => StoreBackend::DecentralizedOnly {
                repo,
                directory: table,
            },
            StoreMode::Centralized => StoreBackend::CentralizedOnly { table },
            StoreMode::Dual => StoreBackend::Dual { repo, table },
        };

        info!(
            "Record store ready (mode: {}, table bearer: {})",
            backend.mode().as_str(),
            backend.table().sends_bearer()
        );

        Ok(Self::new(backend, clock))
    }

    pub fn backend(&self) -> &StoreBackend {
        &self.backend
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    fn snapshot(&self) -> std::sync::MutexGuard<'_, HashMap<Did, TableRow>> {
        self.snapshot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Identities that hold (or registered) a record, in table order, without duplicates.
    pub async fn list_record_holders(&self) -> StoreResult<Vec<Did>> {
        let rows = self.backend.table().list_rows().await?;

        let mut holders = Vec::with_capacity(rows.len());
        let mut snapshot = HashMap::with_capacity(rows.len());
        for row in rows {
            if snapshot.contains_key(&row.did) {
                debug!("Ignoring duplicate table row for DID: {}", row.did);
                continue;
            }
            holders.push(row.did.clone());
            snapshot.insert(row.did.clone(), row);
        }

        *self.snapshot() = snapshot;
        Ok(holders)
    }

    /// Fetch one identity's record. Errors are per identity; callers isolate them.
    pub async fn get_record(&self, did: &Did) -> StoreResult<Option<VectorRecord>> {
        match &self.backend {
            StoreBackend::DecentralizedOnly { repo, .. } => repo.get_record(did).await,
            StoreBackend::CentralizedOnly { .. } => self.mirror_record(did).await,
            StoreBackend::Dual { repo, .. } => match repo.get_record(did).await {
                Ok(Some(record)) => Ok(Some(record)),
                Ok(None) => self.mirror_record(did).await,
                Err(repo_err) => match self.mirror_record(did).await {
                    Ok(Some(record)) => {
                        warn!(
                            "[WARN] Repository read failed for DID: {}, using table row: {}",
                            did, repo_err
                        );
                        Ok(Some(record))
                    }
                    _ => Err(repo_err),
                },
            },
        }
    }

    async fn mirror_record(&self, did: &Did) -> StoreResult<Option<VectorRecord>> {
        let cached = self.snapshot().get(did).cloned();
        if let Some(row) = cached {
            return Ok(Some(row.into_record()));
        }

        let rows = self.backend.table().list_rows().await?;
        Ok(rows
            .into_iter()
            .find(|row| &row.did == did)
            .map(TableRow::into_record))
    }

    /// Replace the identity's record wholesale, stamped with the current time.
    pub async fn put_record(
        &self,
        agent: Option<&Agent>,
        did: &Did,
        paths: &[StrokePoint],
    ) -> WriteReport {
        let now = self.clock.now();
        let mut report = WriteReport::default();

        match &self.backend {
            StoreBackend::DecentralizedOnly { repo, .. } => {
                report.record(Backend::Repository, put_repo(repo, agent, did, paths, now).await);
            }
            StoreBackend::CentralizedOnly { table } => {
                report.record(Backend::Table, table.upsert_row(did, Some(paths), now).await);
            }
            StoreBackend::Dual { repo, table } => {
                report.record(Backend::Repository, put_repo(repo, agent, did, paths, now).await);
                report.record(Backend::Table, table.upsert_row(did, Some(paths), now).await);
            }
        }

        self.snapshot().remove(did);
        info!(
            "Put record for DID: {} ({} points, complete: {})",
            did,
            paths.len(),
            report.is_complete()
        );
        report
    }

    /// Remove the identity's record from every backend that may hold it.
    pub async fn delete_record(&self, agent: Option<&Agent>, did: &Did) -> WriteReport {
        let mut report = WriteReport::default();

        match &self.backend {
            StoreBackend::DecentralizedOnly { repo, directory } => {
                report.record(Backend::Repository, delete_repo(repo, agent, did).await);
                report.record(Backend::Table, directory.delete_row(did).await);
            }
            StoreBackend::CentralizedOnly { table } => {
                report.record(Backend::Table, table.delete_row(did).await);
            }
            StoreBackend::Dual { repo, table } => {
                report.record(Backend::Repository, delete_repo(repo, agent, did).await);
                report.record(Backend::Table, table.delete_row(did).await);
            }
        }

        self.snapshot().remove(did);
        info!(
            "Deleted record for DID: {} (complete: {})",
            did,
            report.is_complete()
        );
        report
    }

    /// Make the identity discoverable before it has drawn anything.
    pub async fn register_holder(&self, did: &Did) -> StoreResult<()> {
        let placeholder = VectorRecord::placeholder(did.clone(), self.clock.now());
        self.backend
            .table()
            .upsert_row(&placeholder.did, placeholder.paths.as_deref(), placeholder.updated_at)
            .await?;
        self.snapshot().remove(did);
        info!("Registered record holder: {}", did);
        Ok(())
    }
}

async fn put_repo(
    repo: &RepoClient,
    agent: Option<&Agent>,
    did: &Did,
    paths: &[StrokePoint],
    now: chrono::DateTime<chrono::Utc>,
) -> StoreResult<()> {
    let agent = require_agent(agent, did)?;
    repo.put_record(agent, paths, now).await
}

async fn delete_repo(repo: &RepoClient, agent: Option<&Agent>, did: &Did) -> StoreResult<()> {
    let agent = require_agent(agent, did)?;
    match repo.delete_record(agent).await {
        Err(e) if e.is_not_found() => Ok(()),
        other => other,
    }
}
