use crate::types::metric::Metric;
use crate::types::summary::AggregateSummary;
use serde::Serialize;

pub const REMAINING_LABEL: &str = "Remaining";
/// Scale maximum of the humidity donut, in percent.
pub const HUMIDITY_SCALE_MAX: f64 = 100.0;
/// Scale maximum of the luminosity donut: the sensor's 10-bit ADC range.
pub const LUMINOSITY_SCALE_MAX: f64 = 1024.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DonutSlice {
    pub label: &'static str,
    pub value: f64,
}

/// The average of one metric shown against its scale maximum.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DonutChart {
    pub metric: Metric,
    /// The average slice first, then the remaining part of the scale.
    pub slices: [DonutSlice; 2],
    pub maximum: f64,
    /// Average as a percentage of `maximum`, `None` when that is not a finite number.
    pub percentage: Option<f64>,
}

/// The value the donut of `metric` is drawn against.
///
/// Temperature has no fixed scale, so the window's maximum temperature is used.
pub fn donut_maximum(summary: &AggregateSummary, metric: Metric) -> f64 {
    match metric {
        Metric::Temperature => summary.temperature.max,
        Metric::Humidity => HUMIDITY_SCALE_MAX,
        Metric::Luminosity => LUMINOSITY_SCALE_MAX,
    }
}

/// Splits the scale of `metric` into its average and the remainder. Values are rounded to two
/// decimals and the remainder never goes below zero.
///
/// # Examples
///
/// ```
/// use envsense::{to_donut_slices, AggregateSummary, Metric};
///
/// let mut summary = AggregateSummary::empty();
/// summary.humidity.average = 55.0;
///
/// let donut = to_donut_slices(&summary, Metric::Humidity);
/// assert_eq!(donut.slices[0].value, 55.0);
/// assert_eq!(donut.slices[1].value, 45.0);
/// assert_eq!(donut.percentage, Some(55.0));
/// ```
pub fn to_donut_slices(summary: &AggregateSummary, metric: Metric) -> DonutChart {
    let average = summary.average(metric);
    let maximum = donut_maximum(summary, metric);
    let remaining = (maximum - average).max(0.0);
    let percentage = round2(average / maximum * 100.0);

    DonutChart {
        metric,
        slices: [
            DonutSlice {
                label: metric.label(),
                value: round2(average),
            },
            DonutSlice {
                label: REMAINING_LABEL,
                value: round2(remaining),
            },
        ],
        maximum,
        percentage: percentage.is_finite().then_some(percentage),
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(temperature_avg: f64, temperature_max: f64, luminosity_avg: f64) -> AggregateSummary {
        let mut summary = AggregateSummary::empty();
        summary.temperature.average = temperature_avg;
        summary.temperature.max = temperature_max;
        summary.luminosity.average = luminosity_avg;
        summary
    }

    #[test]
    fn test_temperature_uses_window_maximum() {
        let donut = to_donut_slices(&summary(22.5, 25.0, 0.0), Metric::Temperature);

        assert_eq!(donut.slices[0].label, "Temperature");
        assert_eq!(donut.slices[0].value, 22.5);
        assert_eq!(donut.slices[1].label, REMAINING_LABEL);
        assert_eq!(donut.slices[1].value, 2.5);
        assert_eq!(donut.maximum, 25.0);
        assert_eq!(donut.percentage, Some(90.0));
    }

    #[test]
    fn test_luminosity_above_scale_is_clamped() {
        let donut = to_donut_slices(&summary(0.0, 0.0, 1500.0), Metric::Luminosity);

        assert_eq!(donut.slices[0].value, 1500.0);
        assert_eq!(donut.slices[1].value, 0.0);
        assert_eq!(donut.percentage, Some(146.48));
    }

    #[test]
    fn test_values_are_rounded() {
        let donut = to_donut_slices(&summary(0.0, 0.0, 333.333), Metric::Luminosity);

        assert_eq!(donut.slices[0].value, 333.33);
        assert_eq!(donut.slices[1].value, 690.67);
        assert_eq!(donut.percentage, Some(32.55));
    }

    #[test]
    fn test_zero_temperature_scale_has_no_percentage() {
        let donut = to_donut_slices(&AggregateSummary::empty(), Metric::Temperature);

        assert_eq!(donut.slices[0].value, 0.0);
        assert_eq!(donut.slices[1].value, 0.0);
        assert_eq!(donut.percentage, None);
    }
}
