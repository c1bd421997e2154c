//! Types produced by the aggregator: per-metric statistics and the derived comfort indices.

use crate::types::metric::Metric;
use serde::Serialize;

/// Average and extrema of one metric over a reading sequence.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct MetricStats {
    pub average: f64,
    pub min: f64,
    pub max: f64,
}

/// Mould risk derived from the rolling temperature and humidity averages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum MoldRisk {
    High,
    #[default]
    Low,
}

impl MoldRisk {
    /// `High` when rolling humidity is above 70 % and rolling temperature above 20 °C.
    ///
    /// # Examples
    ///
    /// ```
    /// use envsense::MoldRisk;
    ///
    /// assert_eq!(MoldRisk::classify(21.0, 75.0), MoldRisk::High);
    /// assert_eq!(MoldRisk::classify(20.0, 75.0), MoldRisk::Low);
    /// assert_eq!(MoldRisk::classify(25.0, 70.0), MoldRisk::Low);
    /// ```
    pub fn classify(rolling_temperature: f64, rolling_humidity: f64) -> Self {
        if rolling_humidity > 70.0 && rolling_temperature > 20.0 {
            MoldRisk::High
        } else {
            MoldRisk::Low
        }
    }
}

/// Lighting condition derived from the rolling luminosity average.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum LightCondition {
    /// Below 200 lux.
    #[default]
    Low,
    /// 200 to 1000 lux, both inclusive.
    Moderate,
    /// Above 1000 lux.
    High,
}

impl LightCondition {
    /// `NaN` classifies as [`LightCondition::Low`].
    pub fn classify(rolling_luminosity: f64) -> Self {
        if rolling_luminosity.is_nan() || rolling_luminosity < 200.0 {
            LightCondition::Low
        } else if rolling_luminosity <= 1000.0 {
            LightCondition::Moderate
        } else {
            LightCondition::High
        }
    }
}

/// Statistics and comfort indices computed over a reading sequence.
///
/// Built in one go by [`crate::aggregate`] (or [`crate::aggregate_with_rolling`]) and never
/// patched afterwards. For an empty input every number is `0.0`, `mold_risk` is
/// [`MoldRisk::Low`] and `light_condition` is [`LightCondition::Low`]; see
/// [`AggregateSummary::empty`].
///
/// `dew_point` is `NaN` whenever the average humidity is zero or negative. Treat it as
/// "undefined" when displaying; [`crate::DisplayValue`] does that for you.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct AggregateSummary {
    pub temperature: MetricStats,
    pub humidity: MetricStats,
    pub luminosity: MetricStats,
    /// Simplified thermal comfort index, °C.
    pub heat_index: f64,
    /// Magnus-formula dew point, °C.
    pub dew_point: f64,
    pub mold_risk: MoldRisk,
    pub light_condition: LightCondition,
    pub rolling_temperature: f64,
    pub rolling_humidity: f64,
    pub rolling_luminosity: f64,
    /// Number of readings the statistics were computed over.
    pub sample_count: usize,
}

impl AggregateSummary {
    /// The summary of an empty sequence.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn stats(&self, metric: Metric) -> &MetricStats {
        match metric {
            Metric::Temperature => &self.temperature,
            Metric::Humidity => &self.humidity,
            Metric::Luminosity => &self.luminosity,
        }
    }

    pub fn average(&self, metric: Metric) -> f64 {
        self.stats(metric).average
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_light_condition_boundaries() {
        assert_eq!(LightCondition::classify(0.0), LightCondition::Low);
        assert_eq!(LightCondition::classify(199.99), LightCondition::Low);
        assert_eq!(LightCondition::classify(200.0), LightCondition::Moderate);
        assert_eq!(LightCondition::classify(1000.0), LightCondition::Moderate);
        assert_eq!(LightCondition::classify(1000.01), LightCondition::High);
        assert_eq!(LightCondition::classify(f64::NAN), LightCondition::Low);
    }

    #[test]
    fn test_empty_summary_baseline() {
        let summary = AggregateSummary::empty();
        for metric in Metric::ALL {
            assert_eq!(*summary.stats(metric), MetricStats::default());
        }
        assert_eq!(summary.heat_index, 0.0);
        assert_eq!(summary.dew_point, 0.0);
        assert_eq!(summary.mold_risk, MoldRisk::Low);
        assert_eq!(summary.light_condition, LightCondition::Low);
        assert_eq!(summary.sample_count, 0);
    }
}
