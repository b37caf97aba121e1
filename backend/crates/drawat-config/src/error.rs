use std::fmt::Display;
use std::ops::RangeInclusive;
use std::panic::Location;
use std::path::PathBuf;
use std::result::Result as StdResult;

use error_location::ErrorLocation;
use thiserror::Error as ThisError;

#[derive(ThisError, Debug)]
pub enum ConfigError {
    #[error("{field} must be {min}-{max}, got {actual} {location}")]
    OutOfRange {
        field: &'static str,
        min: String,
        max: String,
        actual: String,
        location: ErrorLocation,
    },

    #[error("{field} is not a usable http(s) URL ({value}): {reason} {location}")]
    InvalidUrl {
        field: &'static str,
        value: String,
        reason: String,
        location: ErrorLocation,
    },

    #[error("{field} is required ({hint}) {location}")]
    Missing {
        field: &'static str,
        hint: &'static str,
        location: ErrorLocation,
    },

    #[error("{field}: {message} {location}")]
    Invalid {
        field: &'static str,
        message: String,
        location: ErrorLocation,
    },

    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML parse error in {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl ConfigError {
    #[track_caller]
    pub fn invalid<S: Into<String>>(field: &'static str, message: S) -> Self {
        ConfigError::Invalid {
            field,
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn missing(field: &'static str, hint: &'static str) -> Self {
        ConfigError::Missing {
            field,
            hint,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn invalid_url(field: &'static str, value: &str, reason: impl Display) -> Self {
        ConfigError::InvalidUrl {
            field,
            value: value.to_string(),
            reason: reason.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

/// Reject `actual` outside the inclusive `range`.
#[track_caller]
pub(crate) fn check_range<T: PartialOrd + Display>(
    field: &'static str,
    actual: T,
    range: &RangeInclusive<T>,
) -> ConfigErrorResult<()> {
    if range.contains(&actual) {
        return Ok(());
    }
    Err(ConfigError::OutOfRange {
        field,
        min: range.start().to_string(),
        max: range.end().to_string(),
        actual: actual.to_string(),
        location: ErrorLocation::from(Location::caller()),
    })
}

pub type ConfigErrorResult<T> = StdResult<T, ConfigError>;
