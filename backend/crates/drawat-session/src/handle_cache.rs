use crate::{SessionResult, json_file};

use drawat_core::Did;

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

pub const HANDLE_CACHE_FILENAME: &str = "handle_cache.json";

/// Handle to identity lookups remembered across the login redirect.
pub trait HandleCache: Send + Sync {
    fn lookup_identity_by_handle(&self, handle: &str) -> SessionResult<Option<Did>>;
    fn remember(&self, handle: &str, did: &Did) -> SessionResult<()>;
    fn forget(&self, handle: &str) -> SessionResult<()>;
}

/// JSON map `{handle: did}` stored in the configuration directory.
#[derive(Debug)]
pub struct FileHandleCache {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileHandleCache {
    pub fn in_dir(config_dir: &Path) -> Self {
        Self {
            path: config_dir.join(HANDLE_CACHE_FILENAME),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> SessionResult<BTreeMap<String, Did>> {
        Ok(json_file::read(&self.path)?.unwrap_or_default())
    }
}

impl HandleCache for FileHandleCache {
    fn lookup_identity_by_handle(&self, handle: &str) -> SessionResult<Option<Did>> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(self.load()?.remove(handle))
    }

    fn remember(&self, handle: &str, did: &Did) -> SessionResult<()> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut entries = self.load()?;
        entries.insert(handle.to_string(), did.clone());
        json_file::write(&self.path, &entries)
    }

    fn forget(&self, handle: &str) -> SessionResult<()> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut entries = self.load()?;
        if entries.remove(handle).is_some() {
            json_file::write(&self.path, &entries)?;
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MemoryHandleCache {
    entries: Mutex<HashMap<String, Did>>,
}

impl MemoryHandleCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HandleCache for MemoryHandleCache {
    fn lookup_identity_by_handle(&self, handle: &str) -> SessionResult<Option<Did>> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(handle).cloned())
    }

    fn remember(&self, handle: &str, did: &Did) -> SessionResult<()> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(handle.to_string(), did.clone());
        Ok(())
    }

    fn forget(&self, handle: &str) -> SessionResult<()> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.remove(handle);
        Ok(())
    }
}
