//! The single mutable record of the dashboard, owned by the polling controller.

use crate::api::error::FetchError;
use crate::types::date_range::DateRange;
use crate::types::metric::Metric;
use crate::types::reading::Reading;
use std::sync::Arc;

/// Which chart the dashboard shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ViewMode {
    #[default]
    LineChart,
    DonutChart,
}

impl ViewMode {
    pub fn toggled(self) -> Self {
        match self {
            ViewMode::LineChart => ViewMode::DonutChart,
            ViewMode::DonutChart => ViewMode::LineChart,
        }
    }
}

/// Non-blocking banner shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// Connectivity is down; fetches are paused and the last known data is shown.
    Offline,
    /// The last `attempts` fetches failed in a row.
    FetchFailing { attempts: u32 },
}

/// Everything the dashboard knows at a point in time.
///
/// Only the [`crate::PollingController`] changes this record. Consumers read it through
/// [`crate::PollingController::state`] or [`crate::PollingController::subscribe`] and derive
/// their views from it; see [`crate::DashboardView::derive`].
#[derive(Debug, Clone)]
pub struct PollingState {
    pub is_online: bool,
    /// Set while offline, and whenever a tick was skipped because of it.
    pub offline_notice: bool,
    /// Error of the most recent failed fetch, cleared by the next success.
    pub last_error: Option<Arc<FetchError>>,
    pub consecutive_failures: u32,
    pub latest: Option<Reading>,
    /// The full history of the last successful fetch, oldest first.
    pub history: Arc<[Reading]>,
    /// Bumped every time `history` is replaced.
    pub revision: u64,
    pub selected_metric: Metric,
    pub view_mode: ViewMode,
    /// Draw the average as a flat line over the line chart.
    pub show_trend_overlay: bool,
    pub date_range: DateRange,
}

impl PollingState {
    pub fn new(is_online: bool) -> Self {
        Self {
            is_online,
            offline_notice: !is_online,
            last_error: None,
            consecutive_failures: 0,
            latest: None,
            history: Arc::from(Vec::new()),
            revision: 0,
            selected_metric: Metric::default(),
            view_mode: ViewMode::default(),
            show_trend_overlay: false,
            date_range: DateRange::unbounded(),
        }
    }

    /// The banner to show, if any. Being offline takes precedence over fetch failures.
    pub fn notice(&self, failure_threshold: u32) -> Option<Notice> {
        if self.offline_notice {
            Some(Notice::Offline)
        } else if self.consecutive_failures > 0 && self.consecutive_failures >= failure_threshold {
            Some(Notice::FetchFailing {
                attempts: self.consecutive_failures,
            })
        } else {
            None
        }
    }

    pub(crate) fn apply_success(&mut self, readings: Vec<Reading>) {
        if let Some(last) = readings.last() {
            self.latest = Some(*last);
        }
        self.history = Arc::from(readings);
        self.revision += 1;
        self.last_error = None;
        self.consecutive_failures = 0;
    }

    pub(crate) fn apply_failure(&mut self, error: FetchError) {
        self.last_error = Some(Arc::new(error));
        self.consecutive_failures = self.consecutive_failures.saturating_add(1);
    }

    pub(crate) fn set_online(&mut self, online: bool) {
        self.is_online = online;
        self.offline_notice = !online;
    }

    pub(crate) fn mark_offline_skip(&mut self) {
        self.offline_notice = true;
    }

    pub(crate) fn select_metric(&mut self, metric: Metric) {
        self.selected_metric = metric;
    }

    pub(crate) fn set_view_mode(&mut self, mode: ViewMode) {
        self.view_mode = mode;
    }

    pub(crate) fn toggle_trend_overlay(&mut self) {
        self.show_trend_overlay = !self.show_trend_overlay;
    }

    pub(crate) fn set_date_range(&mut self, range: DateRange) {
        self.date_range = range;
    }
}

impl Default for PollingState {
    fn default() -> Self {
        Self::new(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::readings::error::DecodeError;
    use chrono::{TimeZone, Utc};

    fn reading(t: f64) -> Reading {
        Reading::new(t, 50.0, 300.0, Utc.with_ymd_and_hms(2024, 11, 2, 8, 0, 0).unwrap())
    }

    fn decode_failure() -> FetchError {
        FetchError::Decode(DecodeError::NotAnArray { found: "null" })
    }

    #[test]
    fn test_success_replaces_history_and_clears_errors() {
        let mut state = PollingState::new(true);
        state.apply_failure(decode_failure());
        state.apply_success(vec![reading(20.0), reading(21.0)]);

        assert_eq!(state.history.len(), 2);
        assert_eq!(state.latest, Some(reading(21.0)));
        assert_eq!(state.revision, 1);
        assert!(state.last_error.is_none());
        assert_eq!(state.consecutive_failures, 0);
    }

    #[test]
    fn test_failure_keeps_previous_data() {
        let mut state = PollingState::new(true);
        state.apply_success(vec![reading(20.0)]);
        let history = Arc::clone(&state.history);

        state.apply_failure(decode_failure());
        state.apply_failure(decode_failure());

        assert!(Arc::ptr_eq(&history, &state.history));
        assert_eq!(state.latest, Some(reading(20.0)));
        assert_eq!(state.revision, 1);
        assert_eq!(state.consecutive_failures, 2);
        assert_eq!(state.notice(2), Some(Notice::FetchFailing { attempts: 2 }));
        assert_eq!(state.notice(3), None);
    }

    #[test]
    fn test_empty_response_keeps_latest() {
        let mut state = PollingState::new(true);
        state.apply_success(vec![reading(20.0)]);
        state.apply_success(Vec::new());

        assert!(state.history.is_empty());
        assert_eq!(state.latest, Some(reading(20.0)));
        assert_eq!(state.revision, 2);
    }

    #[test]
    fn test_offline_notice_takes_precedence() {
        let mut state = PollingState::new(true);
        assert_eq!(state.notice(1), None);

        state.apply_failure(decode_failure());
        state.set_online(false);
        assert_eq!(state.notice(1), Some(Notice::Offline));

        state.set_online(true);
        assert_eq!(state.notice(1), Some(Notice::FetchFailing { attempts: 1 }));
    }

    #[test]
    fn test_view_mode_toggle() {
        assert_eq!(ViewMode::LineChart.toggled(), ViewMode::DonutChart);
        assert_eq!(ViewMode::DonutChart.toggled(), ViewMode::LineChart);
    }
}
