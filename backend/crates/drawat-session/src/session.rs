use drawat_core::{Agent, Did};

use std::fmt;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// Token endpoint response.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct TokenSet {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    #[serde(default)]
    pub scope: Option<String>,
    /// Lifetime of the access token in seconds
    #[serde(default)]
    pub expires_in: Option<i64>,
    /// Identity the tokens were issued for
    #[serde(default)]
    pub sub: Option<String>,
}

fn default_token_type() -> String {
    String::from("Bearer")
}

impl fmt::Debug for TokenSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenSet")
            .field("token_type", &self.token_type)
            .field("scope", &self.scope)
            .field("expires_in", &self.expires_in)
            .field("sub", &self.sub)
            .finish_non_exhaustive()
    }
}

/// Credential material for the signed-in identity, persisted between runs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub did: Did,
    pub handle: String,
    /// Provider that issued the tokens; repository writes go here as well
    pub pds_url: String,
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub token_type: String,
    pub scope: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn from_tokens(
        did: Did,
        handle: &str,
        pds_url: &str,
        tokens: TokenSet,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            did,
            handle: handle.to_string(),
            pds_url: pds_url.trim_end_matches('/').to_string(),
            expires_at: tokens
                .expires_in
                .map(|secs| now + TimeDelta::seconds(secs)),
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            token_type: tokens.token_type,
            scope: tokens.scope,
        }
    }

    /// Apply a refresh response; providers may omit a rotated refresh token.
    pub fn refreshed(self, tokens: TokenSet, now: DateTime<Utc>) -> Self {
        let refresh_token = tokens.refresh_token.clone().or(self.refresh_token);
        Self {
            refresh_token,
            ..Session::from_tokens(self.did, &self.handle, &self.pds_url, tokens, now)
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }

    pub fn agent(&self) -> Agent {
        Agent::new(self.did.clone(), &self.pds_url, self.access_token.clone())
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("did", &self.did)
            .field("handle", &self.handle)
            .field("pds_url", &self.pds_url)
            .field("token_type", &self.token_type)
            .field("scope", &self.scope)
            .field("expires_at", &self.expires_at)
            .finish_non_exhaustive()
    }
}
