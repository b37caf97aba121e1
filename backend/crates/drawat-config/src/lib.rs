mod config;
mod environment;
mod error;
mod log_level;
mod logging_config;
mod oauth_config;
mod retry_config;
mod store_config;
mod sync_config;

#[cfg(test)]
mod tests;

pub use config::Config;
pub use environment::Environment;
pub use error::{ConfigError, ConfigErrorResult};
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use oauth_config::OAuthConfig;
pub use retry_config::RetryConfig;
pub use store_config::{StoreConfig, StoreMode};
pub use sync_config::SyncConfig;

const CONFIG_DIR_ENV: &str = "DRAWAT_CONFIG_DIR";
const DEFAULT_CONFIG_DIRNAME: &str = ".drawat";
const CONFIG_FILENAME: &str = "config.toml";

const DEFAULT_PUBLIC_URL: &str = "http://127.0.0.1:5173";
const DEFAULT_PROVIDER: &str = "https://bsky.social";
const DEFAULT_REPO_SERVICE: &str = "https://bsky.social";

const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_DIRECTORY: &str = "log";

/// Validate that a configured endpoint is an absolute http(s) URL.
fn validate_http_url(field: &'static str, value: &str) -> ConfigErrorResult<()> {
    let parsed = url::Url::parse(value).map_err(|e| ConfigError::invalid_url(field, value, e))?;

    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(ConfigError::invalid_url(
            field,
            value,
            format!("unsupported scheme {other}"),
        )),
    }
}
