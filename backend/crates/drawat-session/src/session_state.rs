use std::fmt;

use serde::Serialize;

/// Lifecycle of the session context.
///
/// `Uninitialized -> Initializing -> {Authenticated, Anonymous}`, then
/// `Anonymous <-> Authenticated`. Nothing returns to `Uninitialized`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    #[default]
    Uninitialized,
    Initializing,
    Authenticated,
    Anonymous,
}

impl SessionState {
    pub fn can_transition_to(self, next: SessionState) -> bool {
        use SessionState::*;

        matches!(
            (self, next),
            (Uninitialized, Initializing)
                | (Initializing, Authenticated)
                | (Initializing, Anonymous)
                | (Anonymous, Authenticated)
                | (Authenticated, Anonymous)
        )
    }

    pub fn is_initialized(self) -> bool {
        matches!(self, Self::Authenticated | Self::Anonymous)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Uninitialized => "uninitialized",
            Self::Initializing => "initializing",
            Self::Authenticated => "authenticated",
            Self::Anonymous => "anonymous",
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
