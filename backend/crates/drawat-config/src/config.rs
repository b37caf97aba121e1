use crate::{
    CONFIG_DIR_ENV, CONFIG_FILENAME, ConfigError, ConfigErrorResult, DEFAULT_CONFIG_DIRNAME,
    DEFAULT_PUBLIC_URL, Environment, LoggingConfig, OAuthConfig, RetryConfig, StoreConfig,
    SyncConfig, validate_http_url,
};

use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub environment: Environment,
    /// Public origin of the drawing app; OAuth redirect and client ids hang off it
    pub public_url: String,
    pub oauth: OAuthConfig,
    pub store: StoreConfig,
    pub sync: SyncConfig,
    pub retry: RetryConfig,
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            public_url: String::from(DEFAULT_PUBLIC_URL),
            oauth: OAuthConfig::default(),
            store: StoreConfig::default(),
            sync: SyncConfig::default(),
            retry: RetryConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Load config.
    ///
    /// Loading order:
    /// 1. Check for DRAWAT_CONFIG_DIR env var, else use ./.drawat/
    /// 2. Auto-create config directory if it doesn't exist
    /// 3. Load config.toml if it exists, else use defaults
    /// 4. Apply DRAWAT_* environment variable overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let config_dir = Self::config_dir()?;

        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::Io {
                path: config_dir.clone(),
                source: e,
            })?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    fn load_toml(path: &Path) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the config directory.
    /// Priority: DRAWAT_CONFIG_DIR env var > ./.drawat/ (relative to cwd)
    pub fn config_dir() -> ConfigErrorResult<PathBuf> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir().map_err(|e| ConfigError::Io {
            path: PathBuf::from("."),
            source: e,
        })?;
        Ok(cwd.join(DEFAULT_CONFIG_DIRNAME))
    }

    /// Validate all configuration.
    /// Call after load() to catch all errors at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        validate_http_url("public_url", &self.public_url)?;
        self.oauth.validate()?;
        self.store.validate()?;
        self.sync.validate()?;
        self.retry.validate()?;

        if let Some(ref file) = self.logging.file
            && (Path::new(file).is_absolute() || file.contains(".."))
        {
            return Err(ConfigError::invalid(
                "logging.file",
                "must be relative and cannot contain '..'",
            ));
        }

        Ok(())
    }

    /// Whether requests to the centralized table should carry the API key.
    pub fn table_bearer(&self) -> Option<&str> {
        if self.environment.is_production() {
            None
        } else {
            self.store.api_key.as_deref()
        }
    }

    /// Log configuration summary (NEVER logs secrets).
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!("  environment: {}", self.environment);
        info!("  public_url: {}", self.public_url);
        info!("  oauth: provider={}", self.oauth.provider);
        info!(
            "  store: mode={}, table={}, repo={}, api_key={}",
            self.store.mode,
            self.store.table_url.as_deref().unwrap_or("<unset>"),
            self.store.repo_service,
            if self.table_bearer().is_some() {
                "sent"
            } else {
                "not sent"
            }
        );
        info!(
            "  sync: poll={}s, timeout={}s",
            self.sync.poll_interval_secs, self.sync.request_timeout_secs
        );
        info!(
            "  retry: attempts={}, initial={}ms, max={}s, backoff={}x",
            self.retry.max_attempts,
            self.retry.initial_delay_ms,
            self.retry.max_delay_secs,
            self.retry.backoff_multiplier
        );
        info!(
            "  logging: {} (colored: {})",
            *self.logging.level, self.logging.colored
        );
    }

    fn apply_env_overrides(&mut self) {
        Self::apply_env_parse("DRAWAT_ENVIRONMENT", &mut self.environment);
        Self::apply_env_string("DRAWAT_PUBLIC_URL", &mut self.public_url);

        // OAuth
        Self::apply_env_string("DRAWAT_OAUTH_PROVIDER", &mut self.oauth.provider);

        // Store
        Self::apply_env_parse("DRAWAT_STORE_MODE", &mut self.store.mode);
        Self::apply_env_option_string("DRAWAT_STORE_TABLE_URL", &mut self.store.table_url);
        Self::apply_env_option_string("DRAWAT_STORE_API_KEY", &mut self.store.api_key);
        Self::apply_env_string("DRAWAT_STORE_REPO_SERVICE", &mut self.store.repo_service);

        // Sync
        Self::apply_env_parse(
            "DRAWAT_SYNC_POLL_INTERVAL_SECS",
            &mut self.sync.poll_interval_secs,
        );
        Self::apply_env_parse(
            "DRAWAT_SYNC_REQUEST_TIMEOUT_SECS",
            &mut self.sync.request_timeout_secs,
        );

        // Retry
        Self::apply_env_parse("DRAWAT_RETRY_MAX_ATTEMPTS", &mut self.retry.max_attempts);
        Self::apply_env_parse(
            "DRAWAT_RETRY_INITIAL_DELAY_MS",
            &mut self.retry.initial_delay_ms,
        );
        Self::apply_env_parse("DRAWAT_RETRY_MAX_DELAY_SECS", &mut self.retry.max_delay_secs);
        Self::apply_env_parse(
            "DRAWAT_RETRY_BACKOFF_MULTIPLIER",
            &mut self.retry.backoff_multiplier,
        );
        Self::apply_env_bool("DRAWAT_RETRY_JITTER", &mut self.retry.jitter);

        // Logging
        Self::apply_env_parse("DRAWAT_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("DRAWAT_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_option_string("DRAWAT_LOG_FILE", &mut self.logging.file);
    }

    /// Helper: Apply environment variable override for String values
    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Helper: Apply environment variable override for bool values
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = matches!(val.to_lowercase().as_str(), "true" | "1" | "yes");
        }
    }

    /// Helper: Apply environment variable override for parseable values
    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }

    /// Helper: Apply environment variable override for Option<String> values
    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = Some(val);
        }
    }
}
