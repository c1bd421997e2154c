use crate::types::metric::Metric;
use std::fmt;

/// Shown instead of a number that cannot be displayed (`NaN`, infinities).
pub const PLACEHOLDER: &str = "—";

const DEFAULT_DECIMALS: usize = 2;

/// A number ready for display, with an optional unit.
///
/// Non-finite values render as [`PLACEHOLDER`] without their unit.
///
/// # Examples
///
/// ```
/// use envsense::{DisplayValue, Metric};
///
/// assert_eq!(DisplayValue::for_metric(21.456, Metric::Temperature).to_string(), "21.46°C");
/// assert_eq!(DisplayValue::for_metric(512.0, Metric::Luminosity).to_string(), "512.00 lux");
/// assert_eq!(DisplayValue::new(f64::NAN).to_string(), "—");
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayValue {
    value: f64,
    unit: Option<&'static str>,
    decimals: usize,
}

impl DisplayValue {
    pub fn new(value: f64) -> Self {
        Self {
            value,
            unit: None,
            decimals: DEFAULT_DECIMALS,
        }
    }

    pub fn for_metric(value: f64, metric: Metric) -> Self {
        Self::new(value).with_unit(metric.unit())
    }

    pub fn with_unit(mut self, unit: &'static str) -> Self {
        self.unit = Some(unit);
        self
    }

    pub fn with_decimals(mut self, decimals: usize) -> Self {
        self.decimals = decimals;
        self
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn is_defined(&self) -> bool {
        self.value.is_finite()
    }
}

impl fmt::Display for DisplayValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_defined() {
            return f.write_str(PLACEHOLDER);
        }
        write!(f, "{:.*}", self.decimals, self.value)?;
        match self.unit {
            // Word units are spaced, symbols are not: "512.00 lux" but "21.00°C".
            Some(unit) if unit.starts_with(char::is_alphabetic) => write!(f, " {unit}"),
            Some(unit) => f.write_str(unit),
            None => Ok(()),
        }
    }
}

/// Formats `value` with `decimals` digits, or returns [`PLACEHOLDER`] when it is not finite.
pub fn format_value(value: f64, decimals: usize) -> String {
    DisplayValue::new(value).with_decimals(decimals).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_finite_values_use_placeholder() {
        assert_eq!(format_value(f64::NAN, 2), PLACEHOLDER);
        assert_eq!(format_value(f64::INFINITY, 2), PLACEHOLDER);
        assert_eq!(
            DisplayValue::for_metric(f64::NEG_INFINITY, Metric::Humidity).to_string(),
            PLACEHOLDER
        );
    }

    #[test]
    fn test_units_and_precision() {
        assert_eq!(format_value(9.255, 1), "9.3");
        assert_eq!(format_value(-3.0, 0), "-3");
        assert_eq!(DisplayValue::for_metric(55.0, Metric::Humidity).to_string(), "55.00%");
        assert_eq!(
            DisplayValue::for_metric(20.5, Metric::Temperature)
                .with_decimals(1)
                .to_string(),
            "20.5°C"
        );
    }
}
