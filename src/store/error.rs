use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to determine data directory")]
    DataDirResolution,

    #[error("Store path '{0}' exists but is not a directory")]
    NotADirectory(PathBuf),

    #[error("Failed to create store directory '{0}'")]
    DirCreation(PathBuf, #[source] std::io::Error),

    #[error("Failed to read store file '{0}'")]
    Read(PathBuf, #[source] std::io::Error),

    #[error("Failed to write store file '{0}'")]
    Write(PathBuf, #[source] std::io::Error),

    #[error("Store file '{0}' does not contain a JSON object of strings")]
    Decode(PathBuf, #[source] serde_json::Error),

    #[error("Failed to encode store contents")]
    Encode(#[source] serde_json::Error),
}
