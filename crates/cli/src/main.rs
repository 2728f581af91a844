//! Minimal terminal presentation for the job dashboard controller.
//!
//! Activates the view controller against a live collection resource and
//! renders every published ViewState snapshot as a log line. Ctrl-C
//! deactivates the view, which stops the poll timer and ends the
//! process.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use jobdeck_client::JobsApi;
use jobdeck_view::config::DashboardConfig;
use jobdeck_view::controller::JobsController;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "jobdeck=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = DashboardConfig::from_env();
    tracing::info!(
        base_url = %config.base_url,
        poll_secs = config.poll_interval.as_secs(),
        "Starting job dashboard",
    );

    let client = Arc::new(JobsApi::new(config.base_url.clone()));
    let handle = JobsController::activate(client, config);
    let mut state = handle.state();

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            changed = state.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = state.borrow_and_update().clone();
                if let Some(error) = &snapshot.last_error {
                    tracing::warn!(%error, "View error");
                }
                tracing::info!(
                    page = snapshot.page.page_number,
                    total_pages = snapshot.page.total_pages(),
                    visible = snapshot.jobs.len(),
                    loading = snapshot.loading,
                    "View updated",
                );
            }
        }
    }

    handle.deactivate().await;
    tracing::info!("Dashboard stopped");
}
