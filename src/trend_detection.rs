use crate::types::metric::Metric;
use crate::types::reading::Reading;
use crate::types::trend::{Trend, TrendState};

/// Compares the last two readings of `history` metric by metric.
///
/// Pass the full, unfiltered history: trends describe the latest movement of the sensor and
/// do not depend on the selected date range. With fewer than two readings every metric is
/// [`Trend::Stable`].
///
/// # Examples
///
/// ```
/// use chrono::{Duration, TimeZone, Utc};
/// use envsense::{detect_trends, Reading, Trend};
///
/// let t0 = Utc.with_ymd_and_hms(2024, 11, 2, 8, 0, 0).unwrap();
/// let history = [
///     Reading::new(20.0, 50.0, 300.0, t0),
///     Reading::new(25.0, 45.0, 300.0, t0 + Duration::seconds(30)),
/// ];
///
/// let trends = detect_trends(&history);
/// assert_eq!(trends.temperature, Trend::Up);
/// assert_eq!(trends.humidity, Trend::Down);
/// assert_eq!(trends.luminosity, Trend::Stable);
/// ```
pub fn detect_trends(history: &[Reading]) -> TrendState {
    let [.., previous, latest] = history else {
        return TrendState::default();
    };
    let trend = |metric: Metric| Trend::between(metric.value_of(latest), metric.value_of(previous));

    TrendState {
        temperature: trend(Metric::Temperature),
        humidity: trend(Metric::Humidity),
        luminosity: trend(Metric::Luminosity),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn reading(minute: i64, t: f64, h: f64, l: f64) -> Reading {
        let t0 = Utc.with_ymd_and_hms(2024, 11, 2, 8, 0, 0).unwrap();
        Reading::new(t, h, l, t0 + Duration::minutes(minute))
    }

    #[test]
    fn test_fewer_than_two_readings_is_stable() {
        assert_eq!(detect_trends(&[]), TrendState::default());
        assert_eq!(detect_trends(&[reading(0, 20.0, 50.0, 300.0)]), TrendState::default());
    }

    #[test]
    fn test_only_last_two_readings_matter() {
        let history = [
            reading(0, 40.0, 10.0, 2000.0),
            reading(1, 20.0, 50.0, 300.0),
            reading(2, 20.0, 55.0, 250.0),
        ];
        let trends = detect_trends(&history);
        assert_eq!(trends.get(Metric::Temperature), Trend::Stable);
        assert_eq!(trends.get(Metric::Humidity), Trend::Up);
        assert_eq!(trends.get(Metric::Luminosity), Trend::Down);
    }
}
