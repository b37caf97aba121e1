use crate::{ConfigError, ConfigErrorResult, DEFAULT_REPO_SERVICE, validate_http_url};

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// Which physical backends hold vector records.
///
/// The centralized table is always needed for holder discovery; the mode
/// only decides where the paths themselves are read from and written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreMode {
    Decentralized,
    Centralized,
    #[default]
    Dual,
}

impl StoreMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Decentralized => "decentralized",
            Self::Centralized => "centralized",
            Self::Dual => "dual",
        }
    }
}

impl fmt::Display for StoreMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StoreMode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "decentralized" => Ok(Self::Decentralized),
            "centralized" => Ok(Self::Centralized),
            "dual" => Ok(Self::Dual),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub mode: StoreMode,
    /// Single method-dispatched endpoint of the centralized table
    pub table_url: Option<String>,
    /// Bearer key for the table; only sent outside production
    pub api_key: Option<String>,
    /// Public repository service used for unauthenticated record reads
    pub repo_service: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            mode: StoreMode::default(),
            table_url: None,
            api_key: None,
            repo_service: String::from(DEFAULT_REPO_SERVICE),
        }
    }
}

impl StoreConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        match self.table_url {
            Some(ref url) => validate_http_url("store.table_url", url)?,
            None => {
                return Err(ConfigError::missing(
                    "store.table_url",
                    "set DRAWAT_STORE_TABLE_URL",
                ));
            }
        }

        validate_http_url("store.repo_service", &self.repo_service)?;

        if let Some(ref key) = self.api_key
            && key.trim().is_empty()
        {
            return Err(ConfigError::invalid("store.api_key", "cannot be blank"));
        }

        Ok(())
    }
}
