//! Defines the `Metric` selector shared by the aggregation, trend and presentation layers.

use crate::types::reading::Reading;
use serde::Serialize;
use std::fmt;

/// One of the three quantities a sensor reports.
///
/// Used to select which series a chart shows and to read the matching field out of a
/// [`Reading`].
///
/// # Examples
///
/// ```
/// use envsense::Metric;
///
/// assert_eq!(Metric::Humidity.unit(), "%");
/// assert_eq!(Metric::Luminosity.to_string(), "luminosity");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    /// Air temperature in degrees Celsius.
    #[default]
    Temperature,
    /// Relative humidity in percent (0-100).
    Humidity,
    /// Illuminance in lux.
    Luminosity,
}

impl Metric {
    /// All metrics, in dashboard order.
    pub const ALL: [Metric; 3] = [Metric::Temperature, Metric::Humidity, Metric::Luminosity];

    /// Returns the value of this metric in `reading`.
    pub fn value_of(self, reading: &Reading) -> f64 {
        match self {
            Metric::Temperature => reading.temperature,
            Metric::Humidity => reading.humidity,
            Metric::Luminosity => reading.luminosity,
        }
    }

    /// Human readable label, used as the first donut slice label.
    pub fn label(self) -> &'static str {
        match self {
            Metric::Temperature => "Temperature",
            Metric::Humidity => "Humidity",
            Metric::Luminosity => "Luminosity",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Metric::Temperature => "°C",
            Metric::Humidity => "%",
            Metric::Luminosity => "lux",
        }
    }

    /// Field name of this metric in the API payload.
    pub(crate) fn field_name(self) -> &'static str {
        match self {
            Metric::Temperature => "temperature",
            Metric::Humidity => "humidity",
            Metric::Luminosity => "luminosity",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.field_name())
    }
}
