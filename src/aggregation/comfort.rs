//! Thermal comfort approximations computed from average temperature and humidity.

const MAGNUS_B: f64 = 17.62;
const MAGNUS_C: f64 = 243.12;

/// Simplified heat index in °C: `t - (0.55 - 0.0055 * h) * (t - 14.5)`.
///
/// Humidity is not clamped to 0-100.
///
/// # Examples
///
/// ```
/// use envsense::heat_index;
///
/// // At 14.5 °C the correction term vanishes regardless of humidity.
/// assert_eq!(heat_index(14.5, 80.0), 14.5);
/// assert!((heat_index(30.0, 50.0) - 25.7375).abs() < 1e-9);
/// ```
pub fn heat_index(temperature: f64, humidity: f64) -> f64 {
    temperature - (0.55 - 0.0055 * humidity) * (temperature - 14.5)
}

/// Dew point in °C using the Magnus approximation.
///
/// Returns `NaN` for `humidity <= 0` (the logarithm is undefined there), and the `NaN` is
/// passed through rather than replaced.
pub fn dew_point(temperature: f64, humidity: f64) -> f64 {
    let gamma = (humidity / 100.0).ln() + MAGNUS_B * temperature / (MAGNUS_C + temperature);
    MAGNUS_C * gamma / (MAGNUS_B - gamma)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dew_point_saturated_air_equals_temperature() {
        for t in [-5.0, 0.0, 12.5, 25.0] {
            assert!((dew_point(t, 100.0) - t).abs() < 1e-9, "t = {t}");
        }
    }

    #[test]
    fn test_dew_point_reference_value() {
        // 20 °C at 50 % RH has a dew point of about 9.3 °C
        let dp = dew_point(20.0, 50.0);
        assert!((dp - 9.26).abs() < 0.05, "dew point was {dp}");
    }

    #[test]
    fn test_dew_point_nan_without_humidity() {
        // ln(0) is -inf, which makes the ratio -inf / inf
        assert!(dew_point(20.0, 0.0).is_nan());
        assert!(dew_point(20.0, -3.0).is_nan());
    }

    #[test]
    fn test_heat_index_values() {
        assert!((heat_index(22.5, 55.0) - 20.52).abs() < 1e-9);
        assert_eq!(heat_index(0.0, 0.0), 0.0 - 0.55 * (0.0 - 14.5));
    }
}
