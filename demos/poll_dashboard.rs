//! Polls the API configured in `.env` and prints the dashboard on every update.
//!
//! Needs `ENVSENSE_API_URL`. Without a stored session it logs in with `ENVSENSE_USERNAME` and
//! `ENVSENSE_PASSWORD`. Stop with Ctrl+C.

use envsense::{Chart, Dashboard, DashboardError, FileStore, Metric, Notice};
use log::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .format_timestamp_secs()
        .init();

    let dashboard = Dashboard::from_env()?;
    let mut store = FileStore::open_default()?;
    let session = match Dashboard::session(&store) {
        Ok(session) => session,
        Err(DashboardError::NotAuthenticated) => {
            let username = std::env::var("ENVSENSE_USERNAME")?;
            let password = std::env::var("ENVSENSE_PASSWORD")?;
            dashboard.login(&mut store, &username, &password).await?
        }
        Err(e) => return Err(e.into()),
    };

    let controller = dashboard.start_polling().session(&session).call();
    controller.toggle_trend_overlay();
    let mut updates = controller.subscribe();

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("Ctrl+C received, stopping");
                break;
            }
            changed = updates.changed() => {
                if changed.is_err() {
                    error!("Polling stopped unexpectedly");
                    break;
                }
                let view = dashboard.view(&updates.borrow_and_update());
                print_view(&view);
            }
        }
    }

    controller.shutdown().await;
    Ok(())
}

fn print_view(view: &envsense::DashboardView) {
    match view.notice {
        Some(Notice::Offline) => println!("[offline] showing last known data"),
        Some(Notice::FetchFailing { attempts }) => {
            println!("[warning] the last {attempts} fetches failed")
        }
        None => {}
    }
    for metric in Metric::ALL {
        println!(
            "{:<12} {:>12} {}  avg {}",
            metric.label(),
            view.current(metric).to_string(),
            view.trends.get(metric).symbol(),
            envsense::DisplayValue::for_metric(view.summary.average(metric), metric),
        );
    }
    println!(
        "heat index {}  dew point {}  mold risk {:?}  light {:?}",
        view.heat_index(),
        view.dew_point(),
        view.summary.mold_risk,
        view.summary.light_condition,
    );
    for alert in &view.alerts {
        println!("! {} out of range: {:?}", alert.metric.label(), alert.kind);
    }
    if let Chart::Line(chart) = &view.chart {
        println!("{} points in the {} chart", chart.points.len(), chart.metric);
    }
    println!();
}
