use crate::types::metric::Metric;
use crate::types::reading::Reading;
use crate::types::summary::AggregateSummary;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// One point of a time series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
}

/// Data for the line chart of one metric.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineChart {
    pub metric: Metric,
    pub points: Vec<SeriesPoint>,
    /// Value of the flat average line drawn over the series, when enabled.
    pub average: Option<f64>,
}

/// Projects `readings` onto `metric`, keeping order and length.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use envsense::{to_line_series, Metric, Reading};
///
/// let t0 = Utc.with_ymd_and_hms(2024, 11, 2, 8, 0, 0).unwrap();
/// let series = to_line_series(&[Reading::new(20.0, 50.0, 300.0, t0)], Metric::Humidity);
/// assert_eq!(series[0].value, 50.0);
/// assert_eq!(series[0].timestamp, t0);
/// ```
pub fn to_line_series(readings: &[Reading], metric: Metric) -> Vec<SeriesPoint> {
    readings
        .iter()
        .map(|reading| SeriesPoint {
            timestamp: reading.timestamp,
            value: metric.value_of(reading),
        })
        .collect()
}

/// Builds the line chart of `metric`, adding the average of `summary` as an overlay when
/// `show_average` is set.
pub fn to_line_chart(
    readings: &[Reading],
    summary: &AggregateSummary,
    metric: Metric,
    show_average: bool,
) -> LineChart {
    LineChart {
        metric,
        points: to_line_series(readings, metric),
        average: show_average.then(|| summary.average(metric)),
    }
}
