use crate::{SessionResult, json_file};

use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeDelta, Utc};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

pub const PENDING_LOGIN_FILENAME: &str = "pending_login.json";

/// How long a started login may wait for its callback.
pub const PENDING_LOGIN_TTL: TimeDelta = TimeDelta::minutes(10);

/// What the callback needs to finish a login started by another process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingLogin {
    pub provider: String,
    pub handle: String,
    pub state: String,
    pub code_verifier: String,
    pub created_at: DateTime<Utc>,
}

impl PendingLogin {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now - self.created_at > PENDING_LOGIN_TTL
    }
}

#[derive(Debug)]
pub struct PendingLoginSlot {
    path: PathBuf,
}

impl PendingLoginSlot {
    pub fn in_dir(config_dir: &Path) -> Self {
        Self {
            path: config_dir.join(PENDING_LOGIN_FILENAME),
        }
    }

    pub fn save(&self, pending: &PendingLogin) -> SessionResult<()> {
        json_file::write(&self.path, pending)
    }

    /// Remove and return the pending login; expired or unreadable entries
    /// count as absent. The file is gone afterwards either way.
    pub fn take(&self, now: DateTime<Utc>) -> SessionResult<Option<PendingLogin>> {
        let read: SessionResult<Option<PendingLogin>> = json_file::read(&self.path);
        json_file::remove(&self.path)?;

        let pending = match read {
            Ok(pending) => pending,
            Err(e) => {
                warn!("[WARN] Discarding unreadable pending login: {}", e);
                None
            }
        };

        match pending {
            Some(p) if p.is_expired(now) => {
                warn!(
                    "[WARN] Discarding pending login for {} started at {}",
                    p.handle, p.created_at
                );
                Ok(None)
            }
            Some(p) => Ok(Some(p)),
            None => {
                debug!("No pending login");
                Ok(None)
            }
        }
    }

    pub fn clear(&self) -> SessionResult<()> {
        json_file::remove(&self.path)
    }
}
