use crate::{Canvas, CanvasUpdate, PullResult, ShutdownGuard};

use drawat_core::{Agent, Clock, Did, StrokePoint};
use drawat_session::SessionContext;
use drawat_store::{RecordStore, WriteReport};

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use log::{debug, error, info, warn};
use tokio::sync::Mutex;
use tokio::time::{MissedTickBehavior, interval};

/// Reconciles the local identity's paths with every other holder's record.
pub struct SyncEngine {
    store: Arc<RecordStore>,
    clock: Arc<dyn Clock>,
}

impl SyncEngine {
    /// Retention is judged against the store's clock.
    pub fn new(store: Arc<RecordStore>) -> Self {
        let clock = Arc::clone(store.clock());
        Self { store, clock }
    }

    pub fn store(&self) -> &Arc<RecordStore> {
        &self.store
    }

    /// Fetch every holder's record and split them into own and others.
    ///
    /// A failed listing yields an empty result; a failed fetch only skips
    /// that identity.
    pub async fn pull(&self, local: Option<&Did>) -> PullResult {
        let holders = match self.store.list_record_holders().await {
            Ok(holders) => holders,
            Err(e) => {
                error!("Failed to get records: {}", e);
                return PullResult::default();
            }
        };

        let now = self.clock.now();
        let fetched = join_all(
            holders
                .iter()
                .map(|did| async move { (did, self.store.get_record(did).await) }),
        )
        .await;

        let mut own_record = None;
        let mut others_records = Vec::new();

        for (did, result) in fetched {
            let record = match result {
                Ok(Some(record)) => record,
                Ok(None) => {
                    debug!("No record for DID: {}", did);
                    continue;
                }
                Err(e) => {
                    warn!("[WARN] Failed to get record for DID: {}, skipping: {}", did, e);
                    continue;
                }
            };

            if !record.is_retained(now) {
                debug!("Record for DID: {} is past retention", did);
                continue;
            }
            if !record.has_drawable_paths() {
                continue;
            }

            if local == Some(did) {
                own_record = Some(record);
            } else {
                others_records.push(record);
            }
        }

        others_records.sort_by_key(|record| record.updated_at);

        let result = PullResult {
            own_record,
            others_records,
            holder_identities: holders,
        };
        info!(
            "[INFO] Successfully got records, length: {}",
            result.others_paths().count() + result.own_paths().len()
        );
        result
    }

    /// Send the full local path sequence; there is no incremental sync.
    pub async fn push(
        &self,
        agent: Option<&Agent>,
        local: &Did,
        paths: &[StrokePoint],
    ) -> WriteReport {
        self.store.put_record(agent, local, paths).await
    }

    /// Pull into `canvas`, discarding the result if the identity changed meanwhile.
    pub async fn sync_canvas(&self, context: &SessionContext, canvas: &Mutex<Canvas>) -> CanvasUpdate {
        let observed = context.identity();
        let result = self.pull(observed.did.as_ref()).await;
        let current = context.identity();

        canvas.lock().await.apply(&observed, &current, result)
    }

    /// Push unsaved local paths for the signed-in identity.
    ///
    /// Returns `None` when nothing needed pushing.
    pub async fn push_canvas(
        &self,
        context: &SessionContext,
        canvas: &Mutex<Canvas>,
    ) -> Option<WriteReport> {
        let identity = context.identity();
        let did = identity.did?;

        let paths = {
            let canvas = canvas.lock().await;
            if !canvas.is_dirty() || canvas.owner() != Some(&did) {
                return None;
            }
            canvas.own_paths().to_vec()
        };

        let agent = context.agent();
        let report = self.push(agent.as_ref(), &did, &paths).await;

        if report.is_complete() && context.epoch() == identity.epoch {
            let mut canvas = canvas.lock().await;
            if canvas.own_paths() == paths.as_slice() {
                canvas.mark_pushed();
            }
        }
        Some(report)
    }

    /// Push then pull every `period` until shutdown. Returns the number of
    /// pulls applied to the canvas.
    pub async fn run_polling(
        &self,
        context: &SessionContext,
        canvas: &Mutex<Canvas>,
        period: Duration,
        mut shutdown: ShutdownGuard,
    ) -> u64 {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut applied = 0;

        info!("Polling every {:?}", period);
        loop {
            tokio::select! {
                _ = shutdown.wait() => break,
                _ = ticker.tick() => {
                    self.push_canvas(context, canvas).await;
                    match self.sync_canvas(context, canvas).await {
                        CanvasUpdate::Applied { others, own } => {
                            applied += 1;
                            debug!("Canvas rebuilt: {} others' points, {} own", others, own);
                        }
                        CanvasUpdate::Discarded => {
                            info!("Identity changed during pull, result discarded");
                        }
                    }
                }
            }
        }

        info!("Polling stopped after {} pulls", applied);
        applied
    }
}
