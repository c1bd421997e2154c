//! Summarises a saved `/data` response without touching the network.
//!
//! Usage: `cargo run --example offline_summary -- readings.json`

use envsense::{
    aggregate, decode_readings, detect_trends, to_donut_slices, AggregationConfig, DateRange,
    DisplayValue, Metric, ReadingFilterExt, RollingDivisor,
};
use std::path::PathBuf;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let path: PathBuf = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .ok_or("expected the path of a JSON readings file")?;
    let readings = decode_readings(&std::fs::read(&path)?)?;
    println!("{} readings in {}", readings.len(), path.display());

    let Some(last) = readings.last() else {
        return Ok(());
    };
    let last_day = readings.filter_range(&DateRange::last_24_hours(last.timestamp));
    let config = AggregationConfig {
        divisor: RollingDivisor::SampleCount,
        ..AggregationConfig::default()
    };
    let summary = aggregate(&last_day, &config);
    let trends = detect_trends(&readings);

    for metric in Metric::ALL {
        let stats = summary.stats(metric);
        let donut = to_donut_slices(&summary, metric);
        println!(
            "{:<12} avg {} min {} max {} {} ({}% of scale)",
            metric.label(),
            DisplayValue::for_metric(stats.average, metric),
            DisplayValue::for_metric(stats.min, metric),
            DisplayValue::for_metric(stats.max, metric),
            trends.get(metric).symbol(),
            donut
                .percentage
                .map_or_else(|| DisplayValue::new(f64::NAN).to_string(), |p| p.to_string()),
        );
    }
    println!(
        "mold risk {:?}, light {:?}",
        summary.mold_risk, summary.light_condition
    );
    Ok(())
}
