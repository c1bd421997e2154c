use chrono::{DateTime, Utc};
use serde::Serialize;

/// One timestamped environmental sample.
///
/// Readings are produced by [`crate::decode_readings`] from the API response and are never
/// mutated afterwards. Within one sequence timestamps are non-decreasing as delivered by the
/// data source; nothing in this crate re-sorts them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Reading {
    /// Degrees Celsius.
    pub temperature: f64,
    /// Relative humidity, percent.
    pub humidity: f64,
    /// Lux, non-negative.
    pub luminosity: f64,
    pub timestamp: DateTime<Utc>,
}

impl Reading {
    pub fn new(temperature: f64, humidity: f64, luminosity: f64, timestamp: DateTime<Utc>) -> Self {
        Self {
            temperature,
            humidity,
            luminosity,
            timestamp,
        }
    }
}
