//! Session management: OAuth login against an AT Protocol provider, local
//! session persistence and the shared identity context.

pub(crate) mod client_metadata;
pub(crate) mod error;
pub(crate) mod handle_cache;
pub(crate) mod json_file;
pub(crate) mod oauth_client;
pub(crate) mod pending_login;
pub(crate) mod pkce;
pub(crate) mod session;
pub(crate) mod session_context;
pub(crate) mod session_manager;
pub(crate) mod session_state;
pub(crate) mod session_store;

#[cfg(test)]
mod tests;

pub use client_metadata::{ClientMetadata, OAUTH_SCOPE};
pub use error::{Result as SessionResult, SessionError};
pub use handle_cache::{FileHandleCache, HANDLE_CACHE_FILENAME, HandleCache, MemoryHandleCache};
pub use oauth_client::OAuthClient;
pub use pending_login::{PENDING_LOGIN_FILENAME, PENDING_LOGIN_TTL, PendingLogin, PendingLoginSlot};
pub use pkce::Pkce;
pub use session::{Session, TokenSet};
pub use session_context::{IdentitySnapshot, SessionContext};
pub use session_manager::{CallbackParams, LogoutReport, SessionManager, SessionStorage};
pub use session_state::SessionState;
pub use session_store::{SESSION_FILENAME, SessionStore};
