use crate::types::metric::Metric;
use crate::types::reading::Reading;
use serde::Serialize;

/// Inclusive range of values considered normal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Where `value` falls outside the bounds, if it does. `NaN` is never out of bounds.
    pub fn violation(&self, value: f64) -> Option<AlertKind> {
        if value < self.min {
            Some(AlertKind::BelowMin)
        } else if value > self.max {
            Some(AlertKind::AboveMax)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AlertKind {
    BelowMin,
    AboveMax,
}

/// A current value outside its normal range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ThresholdAlert {
    pub metric: Metric,
    pub value: f64,
    pub bounds: Bounds,
    pub kind: AlertKind,
}

/// Normal ranges per metric. Defaults: 0–30 °C, 20–80 % and 100–1000 lux.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Thresholds {
    pub temperature: Bounds,
    pub humidity: Bounds,
    pub luminosity: Bounds,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            temperature: Bounds::new(0.0, 30.0),
            humidity: Bounds::new(20.0, 80.0),
            luminosity: Bounds::new(100.0, 1000.0),
        }
    }
}

impl Thresholds {
    pub fn bounds(&self, metric: Metric) -> &Bounds {
        match metric {
            Metric::Temperature => &self.temperature,
            Metric::Humidity => &self.humidity,
            Metric::Luminosity => &self.luminosity,
        }
    }

    pub fn check(&self, metric: Metric, value: f64) -> Option<ThresholdAlert> {
        let bounds = *self.bounds(metric);
        bounds.violation(value).map(|kind| ThresholdAlert {
            metric,
            value,
            bounds,
            kind,
        })
    }

    /// Alerts for every metric of `reading` that is out of range, in [`Metric::ALL`] order.
    pub fn alerts(&self, reading: &Reading) -> Vec<ThresholdAlert> {
        Metric::ALL
            .into_iter()
            .filter_map(|metric| self.check(metric, metric.value_of(reading)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn reading(t: f64, h: f64, l: f64) -> Reading {
        Reading::new(t, h, l, Utc.with_ymd_and_hms(2024, 11, 2, 8, 0, 0).unwrap())
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let thresholds = Thresholds::default();
        assert!(thresholds.alerts(&reading(0.0, 20.0, 100.0)).is_empty());
        assert!(thresholds.alerts(&reading(30.0, 80.0, 1000.0)).is_empty());
    }

    #[test]
    fn test_out_of_range_values_alert() {
        let alerts = Thresholds::default().alerts(&reading(31.5, 50.0, 40.0));

        assert_eq!(alerts.len(), 2);
        assert_eq!(alerts[0].metric, Metric::Temperature);
        assert_eq!(alerts[0].kind, AlertKind::AboveMax);
        assert_eq!(alerts[0].value, 31.5);
        assert_eq!(alerts[1].metric, Metric::Luminosity);
        assert_eq!(alerts[1].kind, AlertKind::BelowMin);
        assert_eq!(alerts[1].bounds, Bounds::new(100.0, 1000.0));
    }

    #[test]
    fn test_nan_does_not_alert() {
        assert_eq!(Thresholds::default().check(Metric::Humidity, f64::NAN), None);
    }
}
