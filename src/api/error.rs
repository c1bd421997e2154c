use crate::readings::error::DecodeError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to read response body from {0}")]
    Body(String, #[source] reqwest::Error),

    #[error("Failed to decode sensor readings")]
    Decode(#[from] DecodeError),

    #[error("Server rejected the credentials for {url}")]
    Unauthorized { url: String },

    #[error("Failed to build request URL from base '{base}'")]
    InvalidUrl {
        base: String,
        #[source]
        source: url::ParseError,
    },
}
