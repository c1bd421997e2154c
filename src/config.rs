//! Runtime configuration of the dashboard, built in code or read from the environment.

use crate::aggregation::aggregator::AggregationConfig;
use crate::error::ConfigError;
use crate::polling::controller::DEFAULT_POLL_INTERVAL;
use crate::presentation::thresholds::Thresholds;
use crate::presentation::view::{ViewSettings, DEFAULT_FAILURE_NOTICE_THRESHOLD};
use bon::Builder;
use log::debug;
use std::str::FromStr;
use std::time::Duration;
use url::Url;

pub const API_URL_VAR: &str = "ENVSENSE_API_URL";
pub const POLL_INTERVAL_VAR: &str = "ENVSENSE_POLL_INTERVAL_SECS";
pub const ROLLING_WINDOW_VAR: &str = "ENVSENSE_ROLLING_WINDOW";
pub const REQUEST_TIMEOUT_VAR: &str = "ENVSENSE_REQUEST_TIMEOUT_SECS";

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Settings of a [`crate::Dashboard`].
///
/// # Examples
///
/// ```
/// use envsense::DashboardConfig;
/// use std::time::Duration;
///
/// let config = DashboardConfig::builder()
///     .base_url("http://localhost:8080/api/".parse().unwrap())
///     .poll_interval(Duration::from_secs(30))
///     .build();
///
/// assert_eq!(config.request_timeout, Duration::from_secs(10));
/// assert_eq!(config.aggregation.rolling_window, 120);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Builder)]
pub struct DashboardConfig {
    /// Root of the API; `data`, `login` and `register` are resolved against it.
    pub base_url: Url,
    #[builder(default = DEFAULT_POLL_INTERVAL)]
    pub poll_interval: Duration,
    #[builder(default = DEFAULT_REQUEST_TIMEOUT)]
    pub request_timeout: Duration,
    #[builder(default)]
    pub aggregation: AggregationConfig,
    #[builder(default)]
    pub thresholds: Thresholds,
    #[builder(default = DEFAULT_FAILURE_NOTICE_THRESHOLD)]
    pub failure_notice_threshold: u32,
}

impl DashboardConfig {
    /// Reads the configuration from the environment, loading a `.env` file first if present.
    ///
    /// `ENVSENSE_API_URL` is required. `ENVSENSE_POLL_INTERVAL_SECS`, `ENVSENSE_ROLLING_WINDOW`
    /// and `ENVSENSE_REQUEST_TIMEOUT_SECS` override the defaults when set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the url is missing or malformed, when a numeric variable
    /// does not parse, or when the result fails [`DashboardConfig::validate`].
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Ok(path) = dotenv::dotenv() {
            debug!("Loaded environment from {}", path.display());
        }
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let raw_url = lookup(API_URL_VAR).ok_or(ConfigError::MissingVar(API_URL_VAR))?;
        let base_url = Url::parse(&raw_url).map_err(|source| ConfigError::InvalidUrl {
            value: raw_url.clone(),
            source,
        })?;

        let mut config = Self::builder().base_url(base_url).build();
        if let Some(secs) = parse_var::<u64>(&lookup, POLL_INTERVAL_VAR)? {
            config.poll_interval = Duration::from_secs(secs);
        }
        if let Some(secs) = parse_var::<u64>(&lookup, REQUEST_TIMEOUT_VAR)? {
            config.request_timeout = Duration::from_secs(secs);
        }
        if let Some(window) = parse_var::<usize>(&lookup, ROLLING_WINDOW_VAR)? {
            config.aggregation.rolling_window = window;
        }
        config.validate()?;
        Ok(config)
    }

    /// Rejects settings the controller or the aggregator cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.poll_interval.is_zero() {
            return Err(ConfigError::ZeroPollInterval);
        }
        if self.aggregation.rolling_window == 0 {
            return Err(ConfigError::ZeroRollingWindow);
        }
        Ok(())
    }

    pub fn view_settings(&self) -> ViewSettings {
        ViewSettings {
            aggregation: self.aggregation,
            thresholds: self.thresholds,
            failure_notice_threshold: self.failure_notice_threshold,
        }
    }
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<Option<T>, ConfigError> {
    match lookup(name) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidVar { name, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults_from_minimal_environment() {
        let config =
            DashboardConfig::from_lookup(lookup(&[(API_URL_VAR, "http://localhost:8080/api/")]))
                .unwrap();

        assert_eq!(config.base_url.as_str(), "http://localhost:8080/api/");
        assert_eq!(config.poll_interval, Duration::from_secs(10));
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert_eq!(config.aggregation, AggregationConfig::default());
        assert_eq!(config.failure_notice_threshold, 2);
    }

    #[test]
    fn test_overrides() {
        let config = DashboardConfig::from_lookup(lookup(&[
            (API_URL_VAR, "http://localhost:8080/api/"),
            (POLL_INTERVAL_VAR, "30"),
            (REQUEST_TIMEOUT_VAR, " 5 "),
            (ROLLING_WINDOW_VAR, "60"),
        ]))
        .unwrap();

        assert_eq!(config.poll_interval, Duration::from_secs(30));
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.aggregation.rolling_window, 60);
    }

    #[test]
    fn test_missing_url() {
        let err = DashboardConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar(API_URL_VAR)));
    }

    #[test]
    fn test_invalid_values() {
        let err = DashboardConfig::from_lookup(lookup(&[(API_URL_VAR, "not a url")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl { .. }));

        let err = DashboardConfig::from_lookup(lookup(&[
            (API_URL_VAR, "http://localhost:8080/"),
            (POLL_INTERVAL_VAR, "ten"),
        ]))
        .unwrap_err();
        assert!(
            matches!(err, ConfigError::InvalidVar { name: POLL_INTERVAL_VAR, ref value } if value == "ten")
        );

        let err = DashboardConfig::from_lookup(lookup(&[
            (API_URL_VAR, "http://localhost:8080/"),
            (POLL_INTERVAL_VAR, "0"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::ZeroPollInterval));

        let err = DashboardConfig::from_lookup(lookup(&[
            (API_URL_VAR, "http://localhost:8080/"),
            (ROLLING_WINDOW_VAR, "0"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::ZeroRollingWindow));
    }
}
