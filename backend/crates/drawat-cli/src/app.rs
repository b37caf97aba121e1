use crate::{CliError, CliResult, Commands};

use drawat_config::Config;
use drawat_core::{Clock, StrokePoint, decode_paths, split_strokes};
use drawat_session::{CallbackParams, ClientMetadata, SessionContext, SessionManager};
use drawat_store::{RecordStore, WriteReport};
use drawat_sync::{Canvas, PullResult, ShutdownGuard, SyncEngine};

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use log::{info, warn};
use serde_json::{Value, json};
use tokio::sync::Mutex;

/// Everything one command invocation needs, wired from configuration.
pub struct App {
    config: Config,
    context: SessionContext,
    sessions: SessionManager,
    engine: SyncEngine,
}

impl App {
    pub fn new(config: Config, config_dir: &Path, clock: Arc<dyn Clock>) -> CliResult<Self> {
        let store = Arc::new(RecordStore::from_config(&config, Arc::clone(&clock))?);
        let context = SessionContext::new();
        let sessions = SessionManager::from_config(
            &config,
            config_dir,
            context.clone(),
            Arc::clone(&store),
            clock,
        )?;
        let engine = SyncEngine::new(store);

        Ok(Self {
            config,
            context,
            sessions,
            engine,
        })
    }

    /// Run one command. `shutdown` is only consulted by `watch`.
    pub async fn run(&self, command: Commands, shutdown: Option<ShutdownGuard>) -> CliResult<Value> {
        if command != Commands::ClientMetadata {
            let state = self.sessions.initialize(&self.config.oauth.provider).await;
            info!("Session state: {}", state);
        }

        match command {
            Commands::ClientMetadata => {
                let metadata = ClientMetadata::for_environment(
                    self.config.environment,
                    &self.config.public_url,
                );
                Ok(serde_json::to_value(metadata)?)
            }

            Commands::Login { handle, provider } => {
                let provider = provider.as_deref().unwrap_or(&self.config.oauth.provider);
                let url = self.sessions.login(provider, &handle).await.ok_or_else(|| {
                    CliError::input(format!("could not start a login for {handle}"))
                })?;
                Ok(json!({ "authorization_url": url.as_str() }))
            }

            Commands::Callback { code, state, iss } => {
                let params = CallbackParams { code, state, iss };
                let did = self
                    .sessions
                    .handle_callback(&params)
                    .await
                    .ok_or_else(|| CliError::input("login callback was rejected"))?;
                Ok(json!({ "did": did, "state": self.context.state() }))
            }

            Commands::Logout => {
                let did = self
                    .sessions
                    .current_did()
                    .ok_or_else(|| CliError::input("not signed in"))?;
                let report = self.sessions.logout(&did).await;
                Ok(json!({
                    "did": did,
                    "complete": report.is_complete(),
                    "record": write_report_json(&report.record),
                    "token_revoked": report.token_revoked,
                    "caches_cleared": report.caches_cleared,
                }))
            }

            Commands::Status => {
                let session = self.context.session();
                Ok(json!({
                    "state": self.context.state(),
                    "did": session.as_ref().map(|s| &s.did),
                    "handle": session.as_ref().map(|s| &s.handle),
                    "expires_at": session.as_ref().map(|s| s.expires_at),
                    "environment": self.config.environment.as_str(),
                    "store_mode": self.config.store.mode.as_str(),
                }))
            }

            Commands::Pull { strokes } => {
                let local = self.sessions.current_did();
                let result = self.engine.pull(local.as_ref()).await;
                if strokes {
                    Ok(stroke_summary(&result))
                } else {
                    Ok(serde_json::to_value(&result)?)
                }
            }

            Commands::Push { file } => {
                let agent = self
                    .sessions
                    .agent()
                    .ok_or_else(|| CliError::input("sign in before pushing"))?;
                let paths = read_points(&file)?;
                let report = self.engine.push(Some(&agent), &agent.did, &paths).await;
                Ok(json!({
                    "did": agent.did,
                    "points": paths.len(),
                    "complete": report.is_complete(),
                    "backends": write_report_json(&report),
                }))
            }

            Commands::Watch { interval_secs } => {
                let shutdown =
                    shutdown.ok_or_else(|| CliError::input("watch needs a shutdown signal"))?;
                let period = interval_secs
                    .map(Duration::from_secs)
                    .unwrap_or_else(|| self.config.sync.poll_interval());
                let canvas = Mutex::new(Canvas::new());
                let pulls = self
                    .engine
                    .run_polling(&self.context, &canvas, period, shutdown)
                    .await;
                let canvas = canvas.lock().await;
                Ok(json!({
                    "pulls": pulls,
                    "holders": canvas.holder_count(),
                    "points": canvas.merged_paths().len(),
                }))
            }
        }
    }
}

fn write_report_json(report: &WriteReport) -> Value {
    Value::Array(
        report
            .outcomes
            .iter()
            .map(|o| json!({ "backend": o.backend.to_string(), "error": o.error }))
            .collect(),
    )
}

fn stroke_summary(result: &PullResult) -> Value {
    let others: Vec<StrokePoint> = result.others_paths().cloned().collect();
    let summarize = |points: &[StrokePoint]| -> Vec<Value> {
        split_strokes(points)
            .iter()
            .map(|s| json!({ "author": s.author(), "color": s.color(), "points": s.len() }))
            .collect()
    };

    json!({
        "holders": result.holder_identities.len(),
        "others": summarize(&others),
        "own": summarize(result.own_paths()),
    })
}

/// Points accepted either as a JSON array or as the string-encoded form
/// older records use.
fn read_points(path: &Path) -> CliResult<Vec<StrokePoint>> {
    let contents = std::fs::read_to_string(path).map_err(|e| CliError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let value: Value = serde_json::from_str(&contents)
        .map_err(|e| CliError::input(format!("{} is not JSON: {e}", path.display())))?;

    let paths = decode_paths(Some(value))
        .map_err(|e| CliError::input(e.to_string()))?
        .unwrap_or_default();
    if paths.is_empty() {
        warn!("[WARN] {} holds no points; the record will be emptied", path.display());
    }
    Ok(paths)
}
