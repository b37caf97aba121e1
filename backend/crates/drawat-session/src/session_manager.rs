use crate::{
    ClientMetadata, FileHandleCache, HandleCache, OAuthClient, PendingLogin, PendingLoginSlot,
    Pkce, Session, SessionContext, SessionError, SessionResult, SessionState, SessionStore,
};

use drawat_config::Config;
use drawat_core::{Agent, Clock, Did};
use drawat_store::{RecordStore, WriteReport, http_client};

use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};

use log::{debug, error, info, warn};
use reqwest::Client as ReqwestClient;
use url::Url;
use uuid::Uuid;

/// Query parameters of the OAuth redirect back to the app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackParams {
    pub code: String,
    pub state: String,
    pub iss: Option<String>,
}

/// Which logout steps went through. Every step is attempted.
#[derive(Debug, Clone, Default)]
pub struct LogoutReport {
    pub record: WriteReport,
    pub token_revoked: bool,
    pub caches_cleared: bool,
}

impl LogoutReport {
    pub fn is_complete(&self) -> bool {
        self.record.is_complete() && self.token_revoked && self.caches_cleared
    }
}

/// Local persistence used by the session manager.
pub struct SessionStorage {
    pub handle_cache: Arc<dyn HandleCache>,
    pub sessions: SessionStore,
    pub pending: PendingLoginSlot,
}

impl SessionStorage {
    pub fn in_dir(config_dir: &Path) -> Self {
        Self {
            handle_cache: Arc::new(FileHandleCache::in_dir(config_dir)),
            sessions: SessionStore::in_dir(config_dir),
            pending: PendingLoginSlot::in_dir(config_dir),
        }
    }
}

/// Establishes and tears down the signed-in identity.
///
/// Failures never escape: they are logged and the context is left
/// `Anonymous` (or unchanged).
pub struct SessionManager {
    context: SessionContext,
    metadata: ClientMetadata,
    http: ReqwestClient,
    store: Arc<RecordStore>,
    clock: Arc<dyn Clock>,
    storage: SessionStorage,
    client: Mutex<Option<Arc<OAuthClient>>>,
}

impl SessionManager {
    pub fn new(
        context: SessionContext,
        metadata: ClientMetadata,
        http: ReqwestClient,
        store: Arc<RecordStore>,
        clock: Arc<dyn Clock>,
        storage: SessionStorage,
    ) -> Self {
        Self {
            context,
            metadata,
            http,
            store,
            clock,
            storage,
            client: Mutex::new(None),
        }
    }

    /// Wire a manager from configuration, keeping its files in `config_dir`.
    pub fn from_config(
        config: &Config,
        config_dir: &Path,
        context: SessionContext,
        store: Arc<RecordStore>,
        clock: Arc<dyn Clock>,
    ) -> SessionResult<Self> {
        let metadata = ClientMetadata::for_environment(config.environment, &config.public_url);
        let http = http_client(config.sync.request_timeout())?;

        Ok(Self::new(
            context,
            metadata,
            http,
            store,
            clock,
            SessionStorage::in_dir(config_dir),
        ))
    }

    pub fn context(&self) -> &SessionContext {
        &self.context
    }

    pub fn agent(&self) -> Option<Agent> {
        self.context.agent()
    }

    pub fn current_did(&self) -> Option<Did> {
        self.context.current_did()
    }

    /// Reuse the client when it targets `provider`, otherwise build a new one.
    fn client_for(&self, provider: &str) -> Arc<OAuthClient> {
        let mut slot = self.client.lock().unwrap_or_else(PoisonError::into_inner);
        let provider = provider.trim_end_matches('/');

        if let Some(client) = slot.as_ref().filter(|c| c.provider == provider) {
            return Arc::clone(client);
        }

        let client = Arc::new(OAuthClient::new(
            provider,
            self.metadata.clone(),
            self.http.clone(),
        ));
        *slot = Some(Arc::clone(&client));
        client
    }

    /// Build the OAuth client and restore a persisted session.
    ///
    /// Calling again after initialization only returns the current state.
    pub async fn initialize(&self, provider: &str) -> SessionState {
        let client = self.client_for(provider);

        if !self.context.begin_initialize() {
            let state = self.context.state();
            if !state.is_initialized() {
                debug!("OAuth client initialization already in progress");
            }
            return state;
        }

        match self.restore(&client).await {
            Ok(Some(session)) => {
                info!("[INFO] Restored session for {}", session.did);
                self.context.authenticate(session);
            }
            Ok(None) => {
                info!("[INFO] OAuth client initialized, no stored session");
                self.context.become_anonymous();
            }
            Err(e) => {
                error!("OAuth client initialization failed: {}", e);
                self.context.become_anonymous();
            }
        }

        self.context.state()
    }

    async fn restore(&self, client: &OAuthClient) -> SessionResult<Option<Session>> {
        let Some(session) = self.storage.sessions.load()? else {
            return Ok(None);
        };

        let now = self.clock.now();
        if !session.is_expired(now) {
            return Ok(Some(session));
        }

        let Some(refresh_token) = session.refresh_token.clone() else {
            warn!(
                "[WARN] Stored session for {} expired without a refresh token",
                session.did
            );
            self.storage.sessions.clear()?;
            return Ok(None);
        };

        let tokens = if client.provider == session.pds_url {
            client.refresh(&refresh_token).await?
        } else {
            self.client_for(&session.pds_url)
                .refresh(&refresh_token)
                .await?
        };

        let refreshed = session.refreshed(tokens, now);
        self.storage.sessions.save(&refreshed)?;
        Ok(Some(refreshed))
    }

    /// Start a login; returns the URL the user must open.
    pub async fn login(&self, provider: &str, handle: &str) -> Option<Url> {
        self.initialize(provider).await;

        match self.try_login(provider, handle).await {
            Ok(url) => Some(url),
            Err(e) => {
                error!("failed to log-in: {}", e);
                None
            }
        }
    }

    async fn try_login(&self, provider: &str, handle: &str) -> SessionResult<Url> {
        let client = self.client_for(provider);
        let handle = handle.trim().trim_start_matches('@');

        let did = client.resolve_handle(handle).await?;
        self.storage.handle_cache.remember(handle, &did)?;

        let pkce = Pkce::generate();
        let state = Uuid::new_v4().to_string();
        let url = client.authorization_url(handle, &pkce, &state)?;

        self.storage.pending.save(&PendingLogin {
            provider: client.provider.clone(),
            handle: handle.to_string(),
            state,
            code_verifier: pkce.verifier,
            created_at: self.clock.now(),
        })?;

        info!("[INFO] Login started for {} ({})", handle, did);
        Ok(url)
    }

    /// Finish a login from the redirect parameters.
    pub async fn handle_callback(&self, params: &CallbackParams) -> Option<Did> {
        match self.try_callback(params).await {
            Ok(did) => Some(did),
            Err(e) => {
                error!("OAuth callback failed: {}", e);
                if self.context.state() != SessionState::Authenticated {
                    self.context.become_anonymous();
                }
                None
            }
        }
    }

    async fn try_callback(&self, params: &CallbackParams) -> SessionResult<Did> {
        let pending = self
            .storage
            .pending
            .take(self.clock.now())?
            .ok_or_else(|| SessionError::flow("no pending login to complete"))?;

        self.initialize(&pending.provider).await;
        let client = self.client_for(&pending.provider);

        if params.state != pending.state {
            return Err(SessionError::flow("state does not match the pending login"));
        }
        if let Some(iss) = params.iss.as_deref()
            && iss.trim_end_matches('/') != client.provider
        {
            return Err(SessionError::flow(format!(
                "issuer {iss} does not match provider {}",
                client.provider
            )));
        }

        let did = self
            .storage
            .handle_cache
            .lookup_identity_by_handle(&pending.handle)?
            .ok_or_else(|| {
                SessionError::flow(format!("no cached identity for handle {}", pending.handle))
            })?;

        let tokens = client
            .exchange_code(&params.code, &pending.code_verifier)
            .await?;
        if let Some(sub) = tokens.sub.as_deref()
            && sub != did.as_str()
        {
            return Err(SessionError::flow(format!(
                "tokens were issued for {sub}, expected {did}"
            )));
        }

        let session = Session::from_tokens(
            did.clone(),
            &pending.handle,
            &client.provider,
            tokens,
            self.clock.now(),
        );
        self.storage.sessions.save(&session)?;
        self.context.authenticate(session);

        if let Err(e) = self.store.register_holder(&did).await {
            warn!("[WARN] Could not register {} as a record holder: {}", did, e);
        }

        info!("[INFO] {} was successfully authenticated", did);
        Ok(did)
    }

    /// Delete the identity's record, revoke its token and clear local state.
    ///
    /// The record goes first, while the token can still sign the repository
    /// delete.
    pub async fn logout(&self, did: &Did) -> LogoutReport {
        let session = self.context.session().filter(|s| &s.did == did);
        let agent = session.as_ref().map(Session::agent);

        let record = self.store.delete_record(agent.as_ref(), did).await;

        let token_revoked = match session.as_ref() {
            Some(session) => {
                let token = session
                    .refresh_token
                    .as_deref()
                    .unwrap_or(&session.access_token);
                match self.client_for(&session.pds_url).revoke(token).await {
                    Ok(()) => true,
                    Err(e) => {
                        error!("failed to revoke token for {}: {}", did, e);
                        false
                    }
                }
            }
            None => {
                warn!("[WARN] No active session for {}, nothing to revoke", did);
                false
            }
        };

        let caches_cleared = self.clear_local(session.as_ref());
        self.context.teardown();

        let report = LogoutReport {
            record,
            token_revoked,
            caches_cleared,
        };
        if report.is_complete() {
            info!("[INFO] successful log-out");
        } else {
            warn!("[WARN] log-out finished with failures: {:?}", report);
        }
        report
    }

    fn clear_local(&self, session: Option<&Session>) -> bool {
        let mut cleared = true;

        if let Err(e) = self.storage.sessions.clear() {
            error!("failed to clear stored session: {}", e);
            cleared = false;
        }
        if let Some(session) = session
            && let Err(e) = self.storage.handle_cache.forget(&session.handle)
        {
            error!("failed to clear handle cache entry: {}", e);
            cleared = false;
        }
        if let Err(e) = self.storage.pending.clear() {
            error!("failed to clear pending login: {}", e);
            cleared = false;
        }

        cleared
    }
}
