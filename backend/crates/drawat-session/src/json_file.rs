//! Small JSON documents kept in the configuration directory.

use crate::{SessionError, SessionResult};

use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Returns `Ok(None)` if the file does not exist.
pub(crate) fn read<T: DeserializeOwned>(path: &Path) -> SessionResult<Option<T>> {
    if !path.exists() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(path).map_err(|e| SessionError::io(path, e))?;
    Ok(Some(serde_json::from_str(&content)?))
}

pub(crate) fn write<T: Serialize>(path: &Path, value: &T) -> SessionResult<()> {
    if let Some(dir) = path.parent()
        && !dir.exists()
    {
        std::fs::create_dir_all(dir).map_err(|e| SessionError::io(dir, e))?;
    }

    let content = serde_json::to_string_pretty(value)?;
    std::fs::write(path, content).map_err(|e| SessionError::io(path, e))
}

/// Silently succeeds if the file does not exist.
pub(crate) fn remove(path: &Path) -> SessionResult<()> {
    if path.exists() {
        std::fs::remove_file(path).map_err(|e| SessionError::io(path, e))?;
    }
    Ok(())
}
