//! Contains the inclusive `DateRange` used to restrict which readings feed the statistics and
//! the line chart.

use chrono::{DateTime, Duration, FixedOffset, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Conversion of the various chrono datetime flavours into a UTC instant.
///
/// Naive values are interpreted as UTC. A `NaiveDate` resolves to midnight at the start of
/// that day.
pub trait IntoInstant {
    fn into_instant(self) -> DateTime<Utc>;
}

impl IntoInstant for DateTime<Utc> {
    fn into_instant(self) -> DateTime<Utc> {
        self
    }
}

impl IntoInstant for DateTime<Local> {
    fn into_instant(self) -> DateTime<Utc> {
        self.with_timezone(&Utc)
    }
}

impl IntoInstant for DateTime<FixedOffset> {
    fn into_instant(self) -> DateTime<Utc> {
        self.with_timezone(&Utc)
    }
}

impl IntoInstant for NaiveDateTime {
    fn into_instant(self) -> DateTime<Utc> {
        Utc.from_utc_datetime(&self)
    }
}

impl IntoInstant for NaiveDate {
    fn into_instant(self) -> DateTime<Utc> {
        Utc.from_utc_datetime(&self.and_time(chrono::NaiveTime::MIN))
    }
}

/// An optional start and optional end instant, both inclusive.
///
/// A missing bound means "unbounded on that side"; a range with neither bound lets every
/// reading through.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use envsense::DateRange;
///
/// let start = Utc.with_ymd_and_hms(2024, 11, 2, 8, 0, 0).unwrap();
/// let end = Utc.with_ymd_and_hms(2024, 11, 2, 9, 0, 0).unwrap();
///
/// let range = DateRange::between(start, end);
/// assert!(range.contains(start));
/// assert!(range.contains(end));
/// assert!(!range.contains(end + chrono::Duration::seconds(1)));
/// assert!(DateRange::unbounded().is_unbounded());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateRange {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl DateRange {
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn between(start: impl IntoInstant, end: impl IntoInstant) -> Self {
        Self {
            start: Some(start.into_instant()),
            end: Some(end.into_instant()),
        }
    }

    pub fn since(start: impl IntoInstant) -> Self {
        Self {
            start: Some(start.into_instant()),
            end: None,
        }
    }

    pub fn until(end: impl IntoInstant) -> Self {
        Self {
            start: None,
            end: Some(end.into_instant()),
        }
    }

    /// The 24 hours ending at `now`, which is what the dashboard shows by default.
    pub fn last_24_hours(now: impl IntoInstant) -> Self {
        let now = now.into_instant();
        Self {
            start: Some(now - Duration::days(1)),
            end: Some(now),
        }
    }

    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// Returns `true` if `instant` lies inside the range, bounds included.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start.map_or(true, |start| instant >= start)
            && self.end.map_or(true, |end| instant <= end)
    }
}
