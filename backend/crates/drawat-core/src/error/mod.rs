use crate::ErrorLocation;

use std::result::Result as StdResult;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid DID: {value:?} {location}")]
    InvalidDid {
        value: String,
        location: ErrorLocation,
    },

    #[error("Invalid timestamp: {value:?} {location}")]
    InvalidTimestamp {
        value: String,
        location: ErrorLocation,
    },

    #[error("Invalid path payload: {message} {location}")]
    InvalidPaths {
        message: String,
        location: ErrorLocation,
    },

    #[error("JSON error: {source} {location}")]
    Json {
        #[source]
        source: serde_json::Error,
        location: ErrorLocation,
    },
}

pub type Result<T> = StdResult<T, CoreError>;
