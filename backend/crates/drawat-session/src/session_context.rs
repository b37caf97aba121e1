use crate::{Session, SessionState};

use drawat_core::{Agent, Did};

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use log::{info, warn};

/// Who is signed in, as observed at one moment.
///
/// Two snapshots are equal only if no identity change happened between them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentitySnapshot {
    pub epoch: u64,
    pub did: Option<Did>,
}

#[derive(Debug, Default)]
struct Inner {
    state: SessionState,
    session: Option<Session>,
    agent: Option<Agent>,
    epoch: u64,
}

/// Shared session state handed to the session manager and the sync engine.
///
/// Clones share the same state.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    inner: Arc<RwLock<Inner>>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn state(&self) -> SessionState {
        self.read().state
    }

    pub fn session(&self) -> Option<Session> {
        self.read().session.clone()
    }

    pub fn agent(&self) -> Option<Agent> {
        self.read().agent.clone()
    }

    pub fn current_did(&self) -> Option<Did> {
        self.read().session.as_ref().map(|s| s.did.clone())
    }

    pub fn epoch(&self) -> u64 {
        self.read().epoch
    }

    pub fn identity(&self) -> IdentitySnapshot {
        let inner = self.read();
        IdentitySnapshot {
            epoch: inner.epoch,
            did: inner.session.as_ref().map(|s| s.did.clone()),
        }
    }

    /// Move `Uninitialized -> Initializing`. Returns false if someone already did.
    pub fn begin_initialize(&self) -> bool {
        let mut inner = self.write();
        if !inner.state.can_transition_to(SessionState::Initializing) {
            return false;
        }
        inner.state = SessionState::Initializing;
        true
    }

    /// Install `session` as the signed-in identity.
    ///
    /// Replacing a different identity tears the old one down first, so
    /// observers see two epoch bumps.
    pub fn authenticate(&self, session: Session) {
        let mut inner = self.write();

        if inner.state == SessionState::Authenticated {
            let same_identity = inner.session.as_ref().is_some_and(|s| s.did == session.did);
            if same_identity {
                inner.agent = Some(session.agent());
                inner.session = Some(session);
                return;
            }
            Self::clear(&mut inner);
        }

        if !inner.state.can_transition_to(SessionState::Authenticated) {
            warn!(
                "[WARN] Refusing session transition {} -> authenticated",
                inner.state
            );
            return;
        }

        info!("[INFO] Authenticated as {}", session.did);
        inner.agent = Some(session.agent());
        inner.session = Some(session);
        inner.state = SessionState::Authenticated;
        inner.epoch += 1;
    }

    /// Finish initialization without an identity.
    pub fn become_anonymous(&self) {
        let mut inner = self.write();
        match inner.state {
            SessionState::Anonymous => {}
            SessionState::Authenticated => Self::clear(&mut inner),
            state if state.can_transition_to(SessionState::Anonymous) => {
                inner.state = SessionState::Anonymous;
            }
            state => warn!("[WARN] Refusing session transition {} -> anonymous", state),
        }
    }

    /// Drop the session and agent and bump the epoch.
    pub fn teardown(&self) {
        let mut inner = self.write();
        Self::clear(&mut inner);
    }

    fn clear(inner: &mut Inner) {
        inner.session = None;
        inner.agent = None;
        if inner.state == SessionState::Authenticated {
            inner.state = SessionState::Anonymous;
        }
        inner.epoch += 1;
    }
}
