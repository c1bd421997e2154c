pub mod aggregator;
pub mod comfort;
pub mod rolling;
