use crate::types::metric::Metric;
use serde::Serialize;

/// Direction of change between the two most recent readings of a metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Trend {
    Up,
    Down,
    #[default]
    Stable,
}

impl Trend {
    /// Classifies the move from `previous` to `current`.
    ///
    /// # Examples
    ///
    /// ```
    /// use envsense::Trend;
    ///
    /// assert_eq!(Trend::between(21.5, 21.0), Trend::Up);
    /// assert_eq!(Trend::between(20.0, 21.0), Trend::Down);
    /// assert_eq!(Trend::between(21.0, 21.0), Trend::Stable);
    /// ```
    pub fn between(current: f64, previous: f64) -> Self {
        if current > previous {
            Trend::Up
        } else if current < previous {
            Trend::Down
        } else {
            Trend::Stable
        }
    }

    /// Arrow glyph shown next to the current value.
    pub fn symbol(self) -> &'static str {
        match self {
            Trend::Up => "↑",
            Trend::Down => "↓",
            Trend::Stable => "=",
        }
    }
}

/// Per-metric trend directions. Defaults to all [`Trend::Stable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TrendState {
    pub temperature: Trend,
    pub humidity: Trend,
    pub luminosity: Trend,
}

impl TrendState {
    pub fn get(&self, metric: Metric) -> Trend {
        match metric {
            Metric::Temperature => self.temperature,
            Metric::Humidity => self.humidity,
            Metric::Luminosity => self.luminosity,
        }
    }
}
