use crate::api::client::{ApiClient, DataQuery};
use crate::api::error::FetchError;
use crate::types::reading::Reading;
use std::future::Future;

/// Where the controller gets its readings from.
///
/// Implemented by [`ApiReadingSource`] for the real API; tests plug in scripted sources.
pub trait ReadingSource: Send + Sync + 'static {
    /// Fetches the complete reading history, oldest first.
    fn fetch(&self) -> impl Future<Output = Result<Vec<Reading>, FetchError>> + Send;
}

/// Reads from `GET /data` with the session's identifiers and bearer token.
#[derive(Debug, Clone)]
pub struct ApiReadingSource {
    client: ApiClient,
    query: DataQuery,
    token: Option<String>,
}

impl ApiReadingSource {
    pub fn new(client: ApiClient, query: DataQuery, token: Option<String>) -> Self {
        Self {
            client,
            query,
            token,
        }
    }

    pub fn query(&self) -> &DataQuery {
        &self.query
    }
}

impl ReadingSource for ApiReadingSource {
    async fn fetch(&self) -> Result<Vec<Reading>, FetchError> {
        self.client
            .fetch_readings(&self.query, self.token.as_deref())
            .await
    }
}
