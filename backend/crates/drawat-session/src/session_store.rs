use crate::{Session, SessionResult, json_file};

use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

pub const SESSION_FILENAME: &str = "oauth_session.json";

/// Durable single-slot session storage with an in-memory mirror.
#[derive(Debug)]
pub struct SessionStore {
    path: PathBuf,
    mirror: Mutex<Option<Session>>,
}

impl SessionStore {
    pub fn in_dir(config_dir: &Path) -> Self {
        Self {
            path: config_dir.join(SESSION_FILENAME),
            mirror: Mutex::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn save(&self, session: &Session) -> SessionResult<()> {
        json_file::write(&self.path, session)?;
        *self.mirror.lock().unwrap_or_else(PoisonError::into_inner) = Some(session.clone());
        Ok(())
    }

    pub fn load(&self) -> SessionResult<Option<Session>> {
        let mut mirror = self.mirror.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(session) = mirror.as_ref() {
            return Ok(Some(session.clone()));
        }

        let stored: Option<Session> = json_file::read(&self.path)?;
        mirror.clone_from(&stored);
        Ok(stored)
    }

    /// Mirror is dropped even when the file cannot be removed.
    pub fn clear(&self) -> SessionResult<()> {
        *self.mirror.lock().unwrap_or_else(PoisonError::into_inner) = None;
        json_file::remove(&self.path)
    }
}
