use crate::StoreError;

use std::fmt;

use log::warn;

/// Physical backend touched by a write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Repository,
    Table,
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Repository => f.write_str("repository"),
            Self::Table => f.write_str("table"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendOutcome {
    pub backend: Backend,
    /// `None` when the write landed
    pub error: Option<String>,
}

/// Per-backend result of a best-effort write. No rollback is attempted, so
/// a dual write can leave one backend updated and the other stale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteReport {
    pub outcomes: Vec<BackendOutcome>,
}

impl WriteReport {
    pub(crate) fn record(&mut self, backend: Backend, result: Result<(), StoreError>) {
        let error = match result {
            Ok(()) => None,
            Err(e) => {
                warn!("[WARN] {} write failed: {}", backend, e);
                Some(e.to_string())
            }
        };
        self.outcomes.push(BackendOutcome { backend, error });
    }

    /// Every backend that was attempted accepted the write.
    pub fn is_complete(&self) -> bool {
        self.outcomes.iter().all(|o| o.error.is_none())
    }

    pub fn any_succeeded(&self) -> bool {
        self.outcomes.iter().any(|o| o.error.is_none())
    }

    pub fn succeeded(&self, backend: Backend) -> bool {
        self.outcomes
            .iter()
            .any(|o| o.backend == backend && o.error.is_none())
    }

    pub fn failures(&self) -> impl Iterator<Item = &BackendOutcome> {
        self.outcomes.iter().filter(|o| o.error.is_some())
    }
}
