use crate::aggregation::aggregator::{aggregate_with_rolling, AggregationConfig};
use crate::filtering::filter_readings;
use crate::polling::state::{Notice, PollingState, ViewMode};
use crate::presentation::display::DisplayValue;
use crate::presentation::donut::{to_donut_slices, DonutChart};
use crate::presentation::line_chart::{to_line_chart, LineChart};
use crate::presentation::thresholds::{ThresholdAlert, Thresholds};
use crate::trend_detection::detect_trends;
use crate::types::date_range::DateRange;
use crate::types::metric::Metric;
use crate::types::reading::Reading;
use crate::types::summary::AggregateSummary;
use crate::types::trend::TrendState;
use bon::Builder;
use serde::Serialize;

pub const DEFAULT_FAILURE_NOTICE_THRESHOLD: u32 = 2;

/// Parameters for turning a [`PollingState`] into a [`DashboardView`].
#[derive(Debug, Clone, Copy, PartialEq, Builder)]
pub struct ViewSettings {
    #[builder(default)]
    pub aggregation: AggregationConfig,
    #[builder(default)]
    pub thresholds: Thresholds,
    /// Consecutive failed fetches before [`Notice::FetchFailing`] is shown.
    #[builder(default = DEFAULT_FAILURE_NOTICE_THRESHOLD)]
    pub failure_notice_threshold: u32,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self::builder().build()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Chart {
    Line(LineChart),
    Donut(DonutChart),
}

/// Everything the dashboard renders, derived from one [`PollingState`].
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub latest: Option<Reading>,
    /// Direction of the last change, from the full history.
    pub trends: TrendState,
    /// Statistics over the selected date range, rolling indices over the full history.
    pub summary: AggregateSummary,
    /// Out-of-range values of `latest`.
    pub alerts: Vec<ThresholdAlert>,
    pub selected_metric: Metric,
    pub date_range: DateRange,
    pub chart: Chart,
    pub notice: Option<Notice>,
}

impl DashboardView {
    pub fn derive(state: &PollingState, settings: &ViewSettings) -> Self {
        let filtered = filter_readings(&state.history, &state.date_range);
        let summary = aggregate_with_rolling(&filtered, &state.history, &settings.aggregation);
        let metric = state.selected_metric;

        let chart = match state.view_mode {
            ViewMode::LineChart => Chart::Line(to_line_chart(
                &filtered,
                &summary,
                metric,
                state.show_trend_overlay,
            )),
            ViewMode::DonutChart => Chart::Donut(to_donut_slices(&summary, metric)),
        };

        Self {
            latest: state.latest,
            trends: detect_trends(&state.history),
            summary,
            alerts: state
                .latest
                .map(|reading| settings.thresholds.alerts(&reading))
                .unwrap_or_default(),
            selected_metric: metric,
            date_range: state.date_range,
            chart,
            notice: state.notice(settings.failure_notice_threshold),
        }
    }

    /// Dew point of the summary, shown as the placeholder when it is undefined (humidity at or
    /// below zero).
    pub fn dew_point(&self) -> DisplayValue {
        DisplayValue::for_metric(self.summary.dew_point, Metric::Temperature)
    }

    pub fn heat_index(&self) -> DisplayValue {
        DisplayValue::for_metric(self.summary.heat_index, Metric::Temperature)
    }

    /// The current value of `metric`, or the placeholder before the first reading arrived.
    pub fn current(&self, metric: Metric) -> DisplayValue {
        let value = self
            .latest
            .map_or(f64::NAN, |reading| metric.value_of(&reading));
        DisplayValue::for_metric(value, metric)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::summary::MoldRisk;
    use crate::types::trend::Trend;
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 11, 2, 8, 0, 0).unwrap()
    }

    fn state_with(readings: Vec<Reading>) -> PollingState {
        let mut state = PollingState::new(true);
        state.apply_success(readings);
        state
    }

    #[test]
    fn test_view_before_first_fetch() {
        let view = DashboardView::derive(&PollingState::new(true), &ViewSettings::default());

        assert_eq!(view.latest, None);
        assert_eq!(view.summary, AggregateSummary::empty());
        assert!(view.alerts.is_empty());
        assert_eq!(view.notice, None);
        assert_eq!(view.current(Metric::Temperature).to_string(), "—");
        assert!(matches!(view.chart, Chart::Line(ref chart) if chart.points.is_empty()));
    }

    #[test]
    fn test_filtered_statistics_with_full_history_trends() {
        let mut state = state_with(vec![
            Reading::new(20.0, 75.0, 300.0, t0()),
            Reading::new(25.0, 75.0, 400.0, t0() + Duration::hours(1)),
            Reading::new(24.0, 75.0, 1200.0, t0() + Duration::hours(2)),
        ]);
        state.date_range = DateRange::until(t0() + Duration::hours(1));

        let settings = ViewSettings::builder()
            .aggregation(AggregationConfig {
                rolling_window: 3,
                ..AggregationConfig::default()
            })
            .build();
        let view = DashboardView::derive(&state, &settings);

        assert_eq!(view.summary.sample_count, 2);
        assert_eq!(view.summary.temperature.average, 22.5);
        assert_eq!(view.summary.rolling_temperature, 23.0);
        assert_eq!(view.summary.mold_risk, MoldRisk::High);
        assert_eq!(view.trends.temperature, Trend::Down);
        assert_eq!(view.trends.luminosity, Trend::Up);
        assert_eq!(view.alerts.len(), 1);
        assert_eq!(view.alerts[0].metric, Metric::Luminosity);
        assert_eq!(view.current(Metric::Luminosity).to_string(), "1200.00 lux");
    }

    #[test]
    fn test_dry_air_dew_point_renders_placeholder() {
        let state = state_with(vec![
            Reading::new(24.0, 0.0, 300.0, t0()),
            Reading::new(25.0, 0.0, 300.0, t0() + Duration::hours(1)),
        ]);

        let view = DashboardView::derive(&state, &ViewSettings::default());
        assert!(view.summary.dew_point.is_nan());
        assert_eq!(view.dew_point().to_string(), "—");
        assert_eq!(view.heat_index().to_string(), "19.00°C");
        assert_eq!(view.current(Metric::Humidity).to_string(), "0.00%");
    }

    #[test]
    fn test_chart_follows_view_mode() {
        let mut state = state_with(vec![
            Reading::new(20.0, 50.0, 300.0, t0()),
            Reading::new(25.0, 60.0, 400.0, t0() + Duration::hours(1)),
        ]);
        state.selected_metric = Metric::Humidity;
        state.show_trend_overlay = true;

        let view = DashboardView::derive(&state, &ViewSettings::default());
        match view.chart {
            Chart::Line(chart) => {
                assert_eq!(chart.metric, Metric::Humidity);
                assert_eq!(chart.average, Some(55.0));
                assert_eq!(chart.points.len(), 2);
            }
            Chart::Donut(_) => panic!("expected a line chart"),
        }

        state.view_mode = ViewMode::DonutChart;
        let view = DashboardView::derive(&state, &ViewSettings::default());
        match view.chart {
            Chart::Donut(donut) => {
                assert_eq!(donut.slices[0].value, 55.0);
                assert_eq!(donut.slices[1].value, 45.0);
            }
            Chart::Line(_) => panic!("expected a donut chart"),
        }
    }

    #[test]
    fn test_failure_notice_threshold() {
        let mut state = state_with(vec![Reading::new(20.0, 50.0, 300.0, t0())]);
        state.consecutive_failures = 2;

        let settings = ViewSettings::builder().failure_notice_threshold(3).build();
        assert_eq!(DashboardView::derive(&state, &settings).notice, None);

        let view = DashboardView::derive(&state, &ViewSettings::default());
        assert_eq!(view.notice, Some(Notice::FetchFailing { attempts: 2 }));
    }
}
