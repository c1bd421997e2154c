//! Computes the [`AggregateSummary`] of a reading sequence.

use crate::aggregation::comfort::{dew_point, heat_index};
use crate::aggregation::rolling::RollingIndices;
use crate::types::metric::Metric;
use crate::types::reading::Reading;
use crate::types::summary::{AggregateSummary, MetricStats};

/// Number of samples in the rolling window: one hour of readings at a 30 second cadence.
pub const DEFAULT_ROLLING_WINDOW: usize = 120;

/// What the rolling sums are divided by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RollingDivisor {
    /// Always divide by the configured window size, even when fewer samples are available.
    /// Short histories therefore produce proportionally lower rolling averages.
    #[default]
    Window,
    /// Divide by the number of samples actually in the window.
    SampleCount,
}

/// Parameters of the aggregation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregationConfig {
    /// Number of most recent samples the rolling indices are computed over. Should approximate
    /// one hour at the expected sampling cadence.
    pub rolling_window: usize,
    pub divisor: RollingDivisor,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            rolling_window: DEFAULT_ROLLING_WINDOW,
            divisor: RollingDivisor::default(),
        }
    }
}

/// Summarises `readings`: averages, extrema, heat index and dew point over the whole input,
/// and rolling indices over its last `rolling_window` samples.
///
/// An empty input gives [`AggregateSummary::empty`].
///
/// # Examples
///
/// ```
/// use chrono::{Duration, TimeZone, Utc};
/// use envsense::{aggregate, AggregationConfig, Reading};
///
/// let t0 = Utc.with_ymd_and_hms(2024, 11, 2, 8, 0, 0).unwrap();
/// let readings = [
///     Reading::new(20.0, 50.0, 300.0, t0),
///     Reading::new(25.0, 60.0, 400.0, t0 + Duration::hours(1)),
/// ];
///
/// let summary = aggregate(&readings, &AggregationConfig::default());
/// assert_eq!(summary.temperature.average, 22.5);
/// assert_eq!(summary.humidity.max, 60.0);
/// assert_eq!(summary.luminosity.min, 300.0);
/// ```
pub fn aggregate(readings: &[Reading], config: &AggregationConfig) -> AggregateSummary {
    aggregate_with_rolling(readings, readings, config)
}

/// Like [`aggregate`], but takes the rolling indices from `rolling_source` instead of
/// `readings`.
///
/// The dashboard uses this to compute statistics over the user's date range while keeping the
/// rolling indices on the full fetched history.
pub fn aggregate_with_rolling(
    readings: &[Reading],
    rolling_source: &[Reading],
    config: &AggregationConfig,
) -> AggregateSummary {
    if readings.is_empty() && rolling_source.is_empty() {
        return AggregateSummary::empty();
    }

    let rolling = RollingIndices::compute(rolling_source, config);
    let mut summary = AggregateSummary {
        mold_risk: rolling.mold_risk,
        light_condition: rolling.light_condition,
        rolling_temperature: rolling.temperature,
        rolling_humidity: rolling.humidity,
        rolling_luminosity: rolling.luminosity,
        ..AggregateSummary::empty()
    };
    if readings.is_empty() {
        return summary;
    }

    summary.temperature = metric_stats(readings, Metric::Temperature);
    summary.humidity = metric_stats(readings, Metric::Humidity);
    summary.luminosity = metric_stats(readings, Metric::Luminosity);
    summary.heat_index = heat_index(summary.temperature.average, summary.humidity.average);
    summary.dew_point = dew_point(summary.temperature.average, summary.humidity.average);
    summary.sample_count = readings.len();
    summary
}

/// Mean, minimum and maximum of `metric`. `readings` must not be empty.
fn metric_stats(readings: &[Reading], metric: Metric) -> MetricStats {
    let (sum, min, max) = readings.iter().map(|r| metric.value_of(r)).fold(
        (0.0, f64::INFINITY, f64::NEG_INFINITY),
        |(sum, min, max), value| (sum + value, min.min(value), max.max(value)),
    );
    MetricStats {
        average: sum / readings.len() as f64,
        min,
        max,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::summary::{LightCondition, MoldRisk};
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 11, 2, 8, 0, 0).unwrap()
    }

    fn series(values: &[(f64, f64, f64)]) -> Vec<Reading> {
        values
            .iter()
            .enumerate()
            .map(|(i, &(t, h, l))| Reading::new(t, h, l, t0() + Duration::seconds(30 * i as i64)))
            .collect()
    }

    #[test]
    fn test_empty_input_gives_zero_summary() {
        let summary = aggregate(&[], &AggregationConfig::default());
        assert_eq!(summary, AggregateSummary::empty());
    }

    #[test]
    fn test_two_reading_scenario() {
        let readings = vec![
            Reading::new(20.0, 50.0, 300.0, t0()),
            Reading::new(25.0, 60.0, 400.0, t0() + Duration::hours(1)),
        ];
        let summary = aggregate(&readings, &AggregationConfig::default());

        assert_eq!(summary.temperature.average, 22.5);
        assert_eq!(summary.temperature.min, 20.0);
        assert_eq!(summary.temperature.max, 25.0);
        assert_eq!(summary.humidity.average, 55.0);
        assert_eq!(summary.luminosity.average, 350.0);
        assert_eq!(summary.sample_count, 2);
        assert!((summary.heat_index - heat_index(22.5, 55.0)).abs() < 1e-12);
        assert!((summary.dew_point - dew_point(22.5, 55.0)).abs() < 1e-12);
        // Two samples over a 120 window: rolling humidity 110 / 120, luminosity 700 / 120
        assert_eq!(summary.mold_risk, MoldRisk::Low);
        assert_eq!(summary.light_condition, LightCondition::Low);
    }

    #[test]
    fn test_extrema_bracket_the_average() {
        let readings = series(&[
            (18.2, 41.0, 120.0),
            (-3.5, 99.0, 0.0),
            (31.0, 12.5, 2048.0),
            (22.0, 55.5, 640.0),
            (22.0, 55.5, 640.0),
        ]);
        let summary = aggregate(&readings, &AggregationConfig::default());

        for metric in Metric::ALL {
            let stats = summary.stats(metric);
            assert!(stats.max >= stats.average, "{metric}: {stats:?}");
            assert!(stats.average >= stats.min, "{metric}: {stats:?}");
        }
        assert_eq!(summary.temperature.min, -3.5);
        assert_eq!(summary.luminosity.max, 2048.0);
    }

    #[test]
    fn test_single_reading_without_humidity_has_nan_dew_point() {
        let readings = series(&[(21.0, 0.0, 500.0)]);
        let summary = aggregate(&readings, &AggregationConfig::default());
        assert!(summary.dew_point.is_nan());
        assert_eq!(summary.temperature.average, 21.0);
    }

    #[test]
    fn test_rolling_uses_last_120_of_200() {
        let mut values = vec![(5.0, 20.0, 10.0); 80];
        values.extend(vec![(25.0, 90.0, 700.0); 120]);
        let readings = series(&values);

        let summary = aggregate(&readings, &AggregationConfig::default());
        assert_eq!(summary.sample_count, 200);
        assert_eq!(summary.rolling_temperature, 25.0);
        assert_eq!(summary.rolling_humidity, 90.0);
        assert_eq!(summary.mold_risk, MoldRisk::High);
        assert_eq!(summary.light_condition, LightCondition::Moderate);
        // The overall averages still cover all 200 readings
        assert_eq!(summary.temperature.average, (80.0 * 5.0 + 120.0 * 25.0) / 200.0);
    }

    #[test]
    fn test_rolling_source_independent_of_window() {
        let history = series(&vec![(26.0, 85.0, 1200.0); 150]);
        let filtered: Vec<Reading> = Vec::new();

        let summary = aggregate_with_rolling(&filtered, &history, &AggregationConfig::default());
        assert_eq!(summary.sample_count, 0);
        assert_eq!(summary.temperature, MetricStats::default());
        assert_eq!(summary.mold_risk, MoldRisk::High);
        assert_eq!(summary.light_condition, LightCondition::High);
    }
}
