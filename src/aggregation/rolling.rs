//! Short-horizon averages over a fixed-count suffix of the history, feeding the mould risk and
//! lighting indices.

use crate::aggregation::aggregator::{AggregationConfig, RollingDivisor};
use crate::types::metric::Metric;
use crate::types::reading::Reading;
use crate::types::summary::{LightCondition, MoldRisk};

/// Rolling averages of the most recent `rolling_window` readings, and the indices derived
/// from them.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RollingIndices {
    pub temperature: f64,
    pub humidity: f64,
    pub luminosity: f64,
    pub mold_risk: MoldRisk,
    pub light_condition: LightCondition,
}

impl RollingIndices {
    pub fn compute(readings: &[Reading], config: &AggregationConfig) -> Self {
        let window = config.rolling_window;
        let tail = &readings[readings.len().saturating_sub(window)..];

        let divisor = match config.divisor {
            RollingDivisor::Window => window as f64,
            RollingDivisor::SampleCount => tail.len() as f64,
        };
        let average = |metric: Metric| {
            if tail.is_empty() || divisor == 0.0 {
                return 0.0;
            }
            tail.iter().map(|r| metric.value_of(r)).sum::<f64>() / divisor
        };

        let temperature = average(Metric::Temperature);
        let humidity = average(Metric::Humidity);
        let luminosity = average(Metric::Luminosity);

        Self {
            temperature,
            humidity,
            luminosity,
            mold_risk: MoldRisk::classify(temperature, humidity),
            light_condition: LightCondition::classify(luminosity),
        }
    }
}
