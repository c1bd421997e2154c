pub mod date_range;
pub mod metric;
pub mod reading;
pub mod summary;
pub mod trend;
