use crate::api::error::FetchError;
use crate::store::error::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("No session token stored, log in first")]
    NotAuthenticated,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Environment variable {0} is not set")]
    MissingVar(&'static str),

    #[error("Environment variable {name} has invalid value '{value}'")]
    InvalidVar { name: &'static str, value: String },

    #[error("Invalid API url '{value}'")]
    InvalidUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Poll interval must be greater than zero")]
    ZeroPollInterval,

    #[error("Rolling window must hold at least one sample")]
    ZeroRollingWindow,
}
