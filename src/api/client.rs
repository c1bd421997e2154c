//! HTTP client for the sensor data API.
//!
//! Covers the three endpoints the dashboard talks to: `GET /data` for readings and
//! `POST /login` / `POST /register` for obtaining a session token.

use crate::api::error::FetchError;
use crate::readings::decoder::decode_readings;
use crate::types::reading::Reading;
use log::{info, warn};
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

/// Optional filters for `GET /data`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataQuery {
    pub user_id: Option<String>,
    pub device_id: Option<String>,
}

impl DataQuery {
    fn pairs(&self) -> Vec<(&'static str, &str)> {
        let mut pairs = Vec::with_capacity(2);
        if let Some(user_id) = &self.user_id {
            pairs.push(("userId", user_id.as_str()));
        }
        if let Some(device_id) = &self.device_id {
            pairs.push(("deviceId", device_id.as_str()));
        }
        pairs
    }
}

#[derive(Serialize)]
struct Credentials<'a> {
    username: &'a str,
    password: &'a str,
}

/// Body of a successful `POST /login`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(rename = "userId", default)]
    pub user_id: Option<String>,
}

/// Thin wrapper around a `reqwest::Client` bound to the API base URL.
///
/// Cloning is cheap; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: Url,
    http: Client,
}

impl ApiClient {
    /// Creates a client for `base_url`. Every request times out after `request_timeout`.
    pub fn new(base_url: Url, request_timeout: Duration) -> Result<Self, FetchError> {
        let http = Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| FetchError::NetworkRequest(base_url.to_string(), e))?;
        Ok(Self::with_client(base_url, http))
    }

    /// Uses an already configured `reqwest::Client`.
    pub fn with_client(mut base_url: Url, http: Client) -> Self {
        // Url::join replaces the last path segment unless the base ends with a slash
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Self { base_url, http }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub(crate) fn endpoint(&self, path: &str) -> Result<Url, FetchError> {
        self.base_url
            .join(path)
            .map_err(|source| FetchError::InvalidUrl {
                base: self.base_url.to_string(),
                source,
            })
    }

    /// Fetches and strictly decodes the readings array, oldest first.
    ///
    /// # Errors
    ///
    /// * [`FetchError::NetworkRequest`] if the request could not be sent or timed out.
    /// * [`FetchError::HttpStatus`] for any non-2xx response.
    /// * [`FetchError::Body`] if the body could not be read.
    /// * [`FetchError::Decode`] if the body is not a well-formed readings array.
    pub async fn fetch_readings(
        &self,
        query: &DataQuery,
        token: Option<&str>,
    ) -> Result<Vec<Reading>, FetchError> {
        let url = self.endpoint("data")?;
        let mut request = self.http.get(url.clone()).query(&query.pairs());
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| FetchError::NetworkRequest(url.to_string(), e))?;
        let response = check_status(&url, response)?;
        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::Body(url.to_string(), e))?;

        let readings = decode_readings(&body)?;
        info!("Fetched {} readings from {}", readings.len(), url);
        Ok(readings)
    }

    /// Exchanges credentials for a session token.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Unauthorized`] when the server answers 401, and the same transport
    /// errors as [`ApiClient::fetch_readings`] otherwise.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, FetchError> {
        let url = self.endpoint("login")?;
        let response = self
            .http
            .post(url.clone())
            .json(&Credentials { username, password })
            .send()
            .await
            .map_err(|e| FetchError::NetworkRequest(url.to_string(), e))?;

        if response.status() == StatusCode::UNAUTHORIZED {
            return Err(FetchError::Unauthorized {
                url: url.to_string(),
            });
        }
        let response = check_status(&url, response)?;
        response
            .json::<LoginResponse>()
            .await
            .map_err(|e| FetchError::Body(url.to_string(), e))
    }

    /// Creates an account. The server answers `201 Created` on success.
    pub async fn register(&self, username: &str, password: &str) -> Result<(), FetchError> {
        let url = self.endpoint("register")?;
        let response = self
            .http
            .post(url.clone())
            .json(&Credentials { username, password })
            .send()
            .await
            .map_err(|e| FetchError::NetworkRequest(url.to_string(), e))?;
        check_status(&url, response)?;
        info!("Registered user '{}'", username);
        Ok(())
    }
}

fn check_status(url: &Url, response: Response) -> Result<Response, FetchError> {
    match response.error_for_status() {
        Ok(resp) => Ok(resp),
        Err(e) => {
            warn!("HTTP error for {}: {:?}", url, e);
            Err(if let Some(status) = e.status() {
                FetchError::HttpStatus {
                    url: url.to_string(),
                    status,
                    source: e,
                }
            } else {
                FetchError::NetworkRequest(url.to_string(), e)
            })
        }
    }
}
