mod aggregation;
mod api;
mod config;
mod dashboard;
mod error;
mod filtering;
mod polling;
mod presentation;
mod readings;
mod store;
mod trend_detection;
mod types;
mod utils;

pub use dashboard::Dashboard;
pub use error::{ConfigError, DashboardError};

pub use config::*;

pub use api::client::*;
pub use api::error::FetchError;

pub use readings::decoder::{decode_reading, decode_readings, parse_timestamp};
pub use readings::error::DecodeError;

pub use filtering::{filter_readings, ReadingFilterExt};

pub use aggregation::aggregator::*;
pub use aggregation::comfort::{dew_point, heat_index};
pub use aggregation::rolling::RollingIndices;

pub use trend_detection::detect_trends;

pub use polling::connectivity::{ConnectivityProbe, ManualConnectivity};
pub use polling::controller::{PollOutcome, PollingController, DEFAULT_POLL_INTERVAL};
pub use polling::source::{ApiReadingSource, ReadingSource};
pub use polling::state::{Notice, PollingState, ViewMode};

pub use presentation::display::{format_value, DisplayValue, PLACEHOLDER};
pub use presentation::donut::*;
pub use presentation::line_chart::*;
pub use presentation::thresholds::*;
pub use presentation::view::*;

pub use store::error::StoreError;
pub use store::file::FileStore;
pub use store::memory::MemoryStore;
pub use store::session::*;
pub use store::KeyValueStore;

pub use types::date_range::{DateRange, IntoInstant};
pub use types::metric::Metric;
pub use types::reading::Reading;
pub use types::summary::*;
pub use types::trend::{Trend, TrendState};
