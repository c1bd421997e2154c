use thiserror::Error;

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Response body is not valid JSON")]
    InvalidJson(#[source] serde_json::Error),

    #[error("Expected a JSON array of readings, found {found}")]
    NotAnArray { found: &'static str },

    // Wrong field types, or an element that is not an object
    #[error("Reading at index {index} has an invalid shape")]
    InvalidRecord {
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Reading at index {index} has no timestamp")]
    MissingTimestamp { index: usize },

    #[error("Reading at index {index} has an unparseable timestamp '{value}'")]
    InvalidTimestamp { index: usize, value: String },
}
