//! Strict decoding of the `/data` response body into [`Reading`]s.
//!
//! The API is trusted for nothing: the body must be a JSON array, every element must be an
//! object whose numeric fields (when present) are numbers, and every element must carry a
//! parseable timestamp. A single bad element rejects the whole response so that callers never
//! see a partially decoded history.

use crate::readings::error::DecodeError;
use crate::types::reading::Reading;
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::Deserialize;
use serde_json::Value;

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Wire shape of one element. Absent or `null` numbers decode as `None` and become `0.0`;
/// extra fields such as `_id` or `deviceId` are ignored.
#[derive(Debug, Deserialize)]
struct RawReading {
    #[serde(default)]
    temperature: Option<f64>,
    #[serde(default)]
    humidity: Option<f64>,
    #[serde(default)]
    luminosity: Option<f64>,
    #[serde(default)]
    timestamp: Option<String>,
}

/// Decodes a complete response body.
///
/// # Errors
///
/// Returns [`DecodeError::InvalidJson`] if the body is not JSON, [`DecodeError::NotAnArray`]
/// if it is JSON but not an array, and the element-level errors of [`decode_reading`] for the
/// first element that fails.
///
/// # Examples
///
/// ```
/// use envsense::decode_readings;
///
/// let body = br#"[
///     {"temperature": 21.5, "humidity": 40, "luminosity": 310, "timestamp": "2024-11-02T08:00:00Z"},
///     {"temperature": 21.7, "timestamp": "2024-11-02T08:00:30Z"}
/// ]"#;
/// let readings = decode_readings(body).unwrap();
/// assert_eq!(readings.len(), 2);
/// assert_eq!(readings[1].humidity, 0.0);
/// ```
pub fn decode_readings(body: &[u8]) -> Result<Vec<Reading>, DecodeError> {
    let value: Value = serde_json::from_slice(body).map_err(DecodeError::InvalidJson)?;
    let elements = match value {
        Value::Array(elements) => elements,
        other => {
            return Err(DecodeError::NotAnArray {
                found: json_kind(&other),
            })
        }
    };

    elements
        .into_iter()
        .enumerate()
        .map(|(index, element)| decode_reading(index, element))
        .collect()
}

/// Decodes one element of the response array. `index` is only used for error reporting.
pub fn decode_reading(index: usize, element: Value) -> Result<Reading, DecodeError> {
    let raw: RawReading = serde_json::from_value(element)
        .map_err(|source| DecodeError::InvalidRecord { index, source })?;

    let timestamp_str = raw
        .timestamp
        .ok_or(DecodeError::MissingTimestamp { index })?;
    let timestamp =
        parse_timestamp(&timestamp_str).ok_or_else(|| DecodeError::InvalidTimestamp {
            index,
            value: timestamp_str.clone(),
        })?;

    Ok(Reading {
        temperature: raw.temperature.unwrap_or(0.0),
        humidity: raw.humidity.unwrap_or(0.0),
        luminosity: raw.luminosity.unwrap_or(0.0),
        timestamp,
    })
}

/// Parses an ISO-8601 instant. Offsets are honoured; timestamps without an offset are taken
/// to be UTC.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|naive| Utc.from_utc_datetime(&naive))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
