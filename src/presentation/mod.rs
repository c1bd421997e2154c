pub mod display;
pub mod donut;
pub mod line_chart;
pub mod thresholds;
pub mod view;
