//! The main entry point: ties configuration, session, API client and polling together.

use crate::api::client::ApiClient;
use crate::config::DashboardConfig;
use crate::error::DashboardError;
use crate::polling::connectivity::{ConnectivityProbe, ManualConnectivity};
use crate::polling::controller::PollingController;
use crate::polling::source::ApiReadingSource;
use crate::polling::state::PollingState;
use crate::presentation::view::DashboardView;
use crate::store::session::Session;
use crate::store::KeyValueStore;
use bon::bon;
use log::info;
use std::sync::Arc;

/// The client side of the sensor dashboard.
///
/// A `Dashboard` knows where the API lives and how to summarise what it returns. It
/// authenticates against the API, keeps the session in a [`KeyValueStore`] and starts the
/// [`PollingController`] that keeps the readings fresh.
///
/// # Examples
///
/// ```no_run
/// # use envsense::{Dashboard, DashboardError, MemoryStore};
/// # async fn run() -> Result<(), DashboardError> {
/// let dashboard = Dashboard::from_env()?;
/// let mut store = MemoryStore::new();
/// let session = dashboard.login(&mut store, "alice", "secret").await?;
///
/// let controller = dashboard.start_polling().session(&session).call();
/// let mut updates = controller.subscribe();
/// # let _ = updates.changed().await;
/// let view = dashboard.view(&updates.borrow());
/// println!("Temperature now: {}", view.current(envsense::Metric::Temperature));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Dashboard {
    config: DashboardConfig,
    client: ApiClient,
}

#[bon]
impl Dashboard {
    /// Creates a dashboard from an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::Config`] if the configuration does not validate, and
    /// [`DashboardError::Fetch`] if the HTTP client cannot be built.
    pub fn new(config: DashboardConfig) -> Result<Self, DashboardError> {
        config.validate()?;
        let client = ApiClient::new(config.base_url.clone(), config.request_timeout)?;
        Ok(Self { config, client })
    }

    /// Creates a dashboard configured from the environment (and `.env`); see
    /// [`DashboardConfig::from_env`].
    pub fn from_env() -> Result<Self, DashboardError> {
        Self::new(DashboardConfig::from_env()?)
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Logs in and stores the resulting session in `store`. A device already selected in
    /// `store` is kept.
    ///
    /// # Errors
    ///
    /// * [`DashboardError::Fetch`] with [`crate::FetchError::Unauthorized`] for bad credentials,
    ///   or any other transport error.
    /// * [`DashboardError::Store`] if the session cannot be written.
    pub async fn login(
        &self,
        store: &mut impl KeyValueStore,
        username: &str,
        password: &str,
    ) -> Result<Session, DashboardError> {
        let response = self.client.login(username, password).await?;
        let device_id = Session::load(store).and_then(|s| s.device_id);
        let session = Session::from_login(response, device_id);
        session.save(store)?;
        info!("Logged in as '{}'", username);
        Ok(session)
    }

    pub async fn register(&self, username: &str, password: &str) -> Result<(), DashboardError> {
        Ok(self.client.register(username, password).await?)
    }

    /// Removes the session from `store`.
    pub fn logout(store: &mut impl KeyValueStore) -> Result<(), DashboardError> {
        Session::clear(store)?;
        info!("Logged out");
        Ok(())
    }

    /// The stored session.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::NotAuthenticated`] when no token is stored.
    pub fn session(store: &impl KeyValueStore) -> Result<Session, DashboardError> {
        Session::load(store).ok_or(DashboardError::NotAuthenticated)
    }

    /// Starts polling `GET /data` with the identifiers and token of `session`.
    ///
    /// This method uses a builder pattern.
    ///
    /// # Arguments
    ///
    /// * `.session(&Session)`: **Required.** The authenticated session, see [`Dashboard::session`].
    /// * `.connectivity(Arc<dyn ConnectivityProbe>)`: Optional. Source of online/offline events.
    ///   Without one the dashboard assumes it is always online.
    ///
    /// Must be called from within a Tokio runtime.
    #[builder]
    pub fn start_polling(
        &self,
        session: &Session,
        connectivity: Option<Arc<dyn ConnectivityProbe>>,
    ) -> PollingController {
        let connectivity =
            connectivity.unwrap_or_else(|| Arc::new(ManualConnectivity::new(true)));
        let source = ApiReadingSource::new(
            self.client.clone(),
            session.data_query(),
            Some(session.token.clone()),
        );
        PollingController::start(source, connectivity, self.config.poll_interval)
    }

    /// Derives everything the dashboard shows from `state`, using this dashboard's settings.
    pub fn view(&self, state: &PollingState) -> DashboardView {
        DashboardView::derive(state, &self.config.view_settings())
    }
}
