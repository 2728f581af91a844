//! Dashboard configuration loaded from environment variables.

use std::time::Duration;

/// Collection endpoint and refresh tuning for one dashboard view.
///
/// The poll interval is the single knob trading freshness against load;
/// polling is the only staleness-repair mechanism, since the resource
/// offers no push channel.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Base URL of the job collection resource.
    pub base_url: String,
    /// Interval between background refreshes of the current page.
    pub poll_interval: Duration,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000/jobs/".into(),
            poll_interval: Duration::from_secs(30),
        }
    }
}

impl DashboardConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var              | Default                       |
    /// |----------------------|-------------------------------|
    /// | `JOBS_API_URL`       | `http://127.0.0.1:8000/jobs/` |
    /// | `POLL_INTERVAL_SECS` | `30`                          |
    ///
    /// Panics at startup if `POLL_INTERVAL_SECS` is set but not a valid
    /// integer; a misconfigured interval should not be silently replaced.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let base_url = std::env::var("JOBS_API_URL").unwrap_or(defaults.base_url);

        let poll_interval = std::env::var("POLL_INTERVAL_SECS")
            .ok()
            .map(|raw| {
                raw.parse()
                    .expect("POLL_INTERVAL_SECS must be a valid u64")
            })
            .map(Duration::from_secs)
            .unwrap_or(defaults.poll_interval);

        Self {
            base_url,
            poll_interval,
        }
    }
}
