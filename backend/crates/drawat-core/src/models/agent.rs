use crate::Did;

use std::fmt;

/// Authorization context for writing to the signed-in identity's repository.
///
/// Derived from the active session; carries the bearer token, so `Debug`
/// never prints it.
#[derive(Clone, PartialEq, Eq)]
pub struct Agent {
    pub did: Did,
    /// Base URL of the repository host (e.g. `https://bsky.social`)
    pub service: String,
    access_token: String,
}

impl Agent {
    pub fn new(did: Did, service: &str, access_token: impl Into<String>) -> Self {
        Self {
            did,
            service: service.trim_end_matches('/').to_string(),
            access_token: access_token.into(),
        }
    }

    pub fn access_token(&self) -> &str {
        &self.access_token
    }
}

impl fmt::Debug for Agent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Agent")
            .field("did", &self.did)
            .field("service", &self.service)
            .field("access_token", &"<redacted>")
            .finish()
    }
}
