
use crate::{Session, TokenSet};

use drawat_core::Did;

use chrono::{DateTime, TimeZone, Utc};

pub(crate) fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
}

pub(crate) fn tokens(access: &str, refresh: Option<&str>, expires_in: Option<i64>) -> TokenSet {
    TokenSet {
        access_token: access.to_string(),
        refresh_token: refresh.map(String::from),
        token_type: "DPoP".to_string(),
        scope: Some("atproto transition:generic".to_string()),
        expires_in,
        sub: None,
    }
}

pub(crate) fn session(did: &str) -> Session {
    Session::from_tokens(
        Did::new(did).unwrap(),
        "alice.test",
        "https://bsky.social/",
        tokens("access", Some("refresh"), Some(3600)),
        now(),
    )
}
