use crate::{ConfigErrorResult, DEFAULT_PROVIDER, validate_http_url};

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OAuthConfig {
    /// Authorization server and handle resolver used when no provider is given
    pub provider: String,
}

impl Default for OAuthConfig {
    fn default() -> Self {
        Self {
            provider: String::from(DEFAULT_PROVIDER),
        }
    }
}

impl OAuthConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        validate_http_url("oauth.provider", &self.provider)
    }
}
