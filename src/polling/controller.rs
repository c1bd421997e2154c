use crate::api::error::FetchError;
use crate::polling::connectivity::ConnectivityProbe;
use crate::polling::source::ReadingSource;
use crate::polling::state::{PollingState, ViewMode};
use crate::types::date_range::DateRange;
use crate::types::metric::Metric;
use crate::types::reading::Reading;
use chrono::Utc;
use log::{debug, info, warn};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{broadcast, mpsc, watch};
use tokio::task::{JoinHandle, JoinSet};
use tokio::time::{interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(10);
const OUTCOME_CAPACITY: usize = 64;

/// What happened to one scheduled or requested fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    /// A fetch succeeded and replaced the history.
    Updated { revision: u64, readings: usize },
    /// A fetch failed; the previous data was kept.
    Failed { consecutive_failures: u32 },
    /// A tick came while offline; no request was made.
    SkippedOffline,
    /// A response arrived after the response of a newer request had been applied, and was
    /// dropped.
    Stale { sequence: u64 },
}

type FetchResult = (u64, Result<Vec<Reading>, FetchError>);

/// Hands out increasing request numbers and remembers the newest one applied.
#[derive(Debug, Default)]
struct RequestSequencer {
    issued: u64,
    applied: u64,
}

impl RequestSequencer {
    fn issue(&mut self) -> u64 {
        self.issued += 1;
        self.issued
    }

    /// Claims `sequence` for applying. Fails when a newer response was already applied.
    fn try_apply(&mut self, sequence: u64) -> bool {
        if sequence <= self.applied {
            return false;
        }
        self.applied = sequence;
        true
    }
}

/// Periodically fetches readings on a background task and owns the [`PollingState`].
///
/// The first fetch is issued immediately, then one every `poll_interval`. Ticks that come
/// while the [`ConnectivityProbe`] reports offline are skipped, and coming back online fetches
/// right away. Fetches may overlap when a request takes longer than the interval. Every
/// response is applied unless the response of a newer request was applied first, in which case
/// it is dropped as stale.
///
/// Stopping the controller (through [`PollingController::shutdown`] or by dropping it) cancels
/// the ticker, aborts in-flight requests and releases the connectivity subscription. No state
/// changes happen afterwards.
///
/// Must be started from within a Tokio runtime.
///
/// # Examples
///
/// ```no_run
/// use envsense::{ApiClient, ApiReadingSource, DataQuery, ManualConnectivity, PollingController};
/// use std::sync::Arc;
/// use std::time::Duration;
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let client = ApiClient::new("https://sensors.example.com/api/".parse()?, Duration::from_secs(10))?;
/// let source = ApiReadingSource::new(client, DataQuery::default(), Some("token".to_string()));
/// let connectivity = Arc::new(ManualConnectivity::new(true));
///
/// let controller = PollingController::start(source, connectivity, Duration::from_secs(10));
/// let mut updates = controller.subscribe();
/// updates.changed().await?;
/// println!("{} readings", updates.borrow().history.len());
/// controller.shutdown().await;
/// # Ok(())
/// # }
/// ```
pub struct PollingController {
    state: Arc<watch::Sender<PollingState>>,
    refresh: mpsc::Sender<()>,
    outcomes: broadcast::Sender<PollOutcome>,
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl PollingController {
    pub fn start<S: ReadingSource>(
        source: S,
        connectivity: Arc<dyn ConnectivityProbe>,
        poll_interval: Duration,
    ) -> Self {
        let online = connectivity.is_online();
        let (state_tx, _) = watch::channel(PollingState::new(online));
        let state = Arc::new(state_tx);
        let (refresh, refresh_rx) = mpsc::channel(1);
        let (outcomes, _) = broadcast::channel(OUTCOME_CAPACITY);
        let cancel = CancellationToken::new();

        let poll_loop = PollLoop {
            source: Arc::new(source),
            state: Arc::clone(&state),
            outcomes: outcomes.clone(),
            in_flight: JoinSet::new(),
            sequencer: RequestSequencer::default(),
        };
        info!(
            "Starting polling every {:?} ({})",
            poll_interval,
            if online { "online" } else { "offline" }
        );
        let task = tokio::spawn(poll_loop.run(
            connectivity.subscribe(),
            refresh_rx,
            poll_interval,
            cancel.clone(),
        ));

        Self {
            state,
            refresh,
            outcomes,
            cancel,
            task: Some(task),
        }
    }

    /// A snapshot of the current state.
    pub fn state(&self) -> PollingState {
        self.state.borrow().clone()
    }

    /// Follows state changes. The receiver starts with the current state marked as seen.
    pub fn subscribe(&self) -> watch::Receiver<PollingState> {
        self.state.subscribe()
    }

    /// Follows what each tick did. Only outcomes after this call are delivered.
    pub fn outcomes(&self) -> broadcast::Receiver<PollOutcome> {
        self.outcomes.subscribe()
    }

    pub fn is_running(&self) -> bool {
        !self.cancel.is_cancelled()
    }

    pub fn select_metric(&self, metric: Metric) {
        self.update(|s| s.select_metric(metric));
    }

    pub fn set_view_mode(&self, mode: ViewMode) {
        self.update(|s| s.set_view_mode(mode));
    }

    pub fn toggle_view_mode(&self) {
        self.update(|s| s.set_view_mode(s.view_mode.toggled()));
    }

    pub fn toggle_trend_overlay(&self) {
        self.update(PollingState::toggle_trend_overlay);
    }

    pub fn set_date_range(&self, range: DateRange) {
        self.update(|s| s.set_date_range(range));
    }

    pub fn reset_date_range(&self) {
        self.set_date_range(DateRange::unbounded());
    }

    pub fn select_last_24_hours(&self) {
        self.set_date_range(DateRange::last_24_hours(Utc::now()));
    }

    /// Requests a fetch now, outside the regular schedule. Ignored while offline.
    ///
    /// Requests made before the loop gets to them collapse into one fetch.
    pub fn refresh(&self) {
        match self.refresh.try_send(()) {
            Ok(()) => {}
            Err(TrySendError::Full(())) => debug!("Refresh already pending"),
            Err(TrySendError::Closed(())) => debug!("Refresh requested after polling stopped"),
        }
    }

    /// Stops polling and waits for the background task to finish.
    pub async fn shutdown(mut self) {
        self.cancel.cancel();
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                warn!("Polling task ended abnormally: {e}");
            }
        }
    }

    fn update(&self, transition: impl FnOnce(&mut PollingState)) {
        if self.cancel.is_cancelled() {
            return;
        }
        self.state.send_modify(transition);
    }
}

impl Drop for PollingController {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

struct PollLoop<S> {
    source: Arc<S>,
    state: Arc<watch::Sender<PollingState>>,
    outcomes: broadcast::Sender<PollOutcome>,
    in_flight: JoinSet<FetchResult>,
    sequencer: RequestSequencer,
}

impl<S: ReadingSource> PollLoop<S> {
    async fn run(
        mut self,
        mut connectivity: watch::Receiver<bool>,
        mut refresh: mpsc::Receiver<()>,
        poll_interval: Duration,
        cancel: CancellationToken,
    ) {
        let mut connectivity_open = true;
        let mut ticker = interval(poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                Some(joined) = self.in_flight.join_next(), if !self.in_flight.is_empty() => {
                    match joined {
                        Ok((sequence, result)) => self.apply(sequence, result),
                        Err(e) => warn!("Fetch task failed: {e}"),
                    }
                }
                changed = connectivity.changed(), if connectivity_open => {
                    if changed.is_err() {
                        debug!("Connectivity probe went away, keeping last known state");
                        connectivity_open = false;
                        continue;
                    }
                    let online = *connectivity.borrow_and_update();
                    self.connectivity_changed(online);
                }
                Some(()) = refresh.recv() => self.poll(),
                _ = ticker.tick() => self.poll(),
            }
        }

        self.in_flight.abort_all();
        info!("Polling stopped");
    }

    fn poll(&mut self) {
        if !self.state.borrow().is_online {
            debug!("Offline, skipping fetch");
            self.state.send_modify(PollingState::mark_offline_skip);
            self.emit(PollOutcome::SkippedOffline);
            return;
        }
        let sequence = self.sequencer.issue();
        let source = Arc::clone(&self.source);
        debug!("Issuing fetch #{sequence}");
        self.in_flight
            .spawn(async move { (sequence, source.fetch().await) });
    }

    fn connectivity_changed(&mut self, online: bool) {
        if self.state.borrow().is_online == online {
            return;
        }
        self.state.send_modify(|s| s.set_online(online));
        if online {
            info!("Back online, fetching now");
            self.poll();
        } else {
            warn!("Went offline, pausing fetches");
        }
    }

    fn apply(&mut self, sequence: u64, result: Result<Vec<Reading>, FetchError>) {
        if !self.sequencer.try_apply(sequence) {
            debug!("Dropping response of fetch #{sequence}, a newer response was already applied");
            self.emit(PollOutcome::Stale { sequence });
            return;
        }
        match result {
            Ok(readings) => {
                let count = readings.len();
                let mut revision = 0;
                self.state.send_modify(|s| {
                    s.apply_success(readings);
                    revision = s.revision;
                });
                debug!("Fetch #{sequence} returned {count} readings");
                self.emit(PollOutcome::Updated {
                    revision,
                    readings: count,
                });
            }
            Err(e) => {
                warn!("Fetch #{sequence} failed: {e}");
                let mut consecutive_failures = 0;
                self.state.send_modify(|s| {
                    s.apply_failure(e);
                    consecutive_failures = s.consecutive_failures;
                });
                self.emit(PollOutcome::Failed {
                    consecutive_failures,
                });
            }
        }
    }

    fn emit(&self, outcome: PollOutcome) {
        // No subscribers is fine.
        let _ = self.outcomes.send(outcome);
    }
}
