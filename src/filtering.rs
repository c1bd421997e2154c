use crate::types::date_range::{DateRange, IntoInstant};
use crate::types::reading::Reading;

/// Restricts `readings` to those whose timestamp lies within `range` (bounds inclusive).
///
/// Order is preserved and nothing is duplicated. With an unbounded range the output equals
/// the input, and applying the same range twice gives the same result as applying it once.
pub fn filter_readings(readings: &[Reading], range: &DateRange) -> Vec<Reading> {
    if range.is_unbounded() {
        return readings.to_vec();
    }
    readings
        .iter()
        .filter(|reading| range.contains(reading.timestamp))
        .copied()
        .collect()
}

pub trait ReadingFilterExt {
    /// Filters readings by a [`DateRange`] (inclusive).
    ///
    /// # Arguments
    /// * `range`: The range to keep. Missing bounds are unbounded.
    ///
    /// # Returns
    /// A new `Vec` with the matching readings in their original order.
    fn filter_range(&self, range: &DateRange) -> Vec<Reading>;

    /// Keeps readings at or after `start`.
    fn since(&self, start: impl IntoInstant) -> Vec<Reading>;

    /// Keeps readings at or before `end`.
    fn until(&self, end: impl IntoInstant) -> Vec<Reading>;
}

impl ReadingFilterExt for [Reading] {
    fn filter_range(&self, range: &DateRange) -> Vec<Reading> {
        filter_readings(self, range)
    }

    fn since(&self, start: impl IntoInstant) -> Vec<Reading> {
        filter_readings(self, &DateRange::since(start))
    }

    fn until(&self, end: impl IntoInstant) -> Vec<Reading> {
        filter_readings(self, &DateRange::until(end))
    }
}
