use metrics::{counter, gauge};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

/// Install the Prometheus exporter as the global recorder and pre-register
/// the panel's metrics. Returns the handle whose `render()` produces the
/// scrape payload.
pub fn init_metrics() -> anyhow::Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new().install_recorder()?;

    // Pre-register so the series appear before the first increment.
    for poller in ["status", "market"] {
        counter!("poll_ticks_total", "poller" => poller).absolute(0);
        counter!("poll_failures_total", "poller" => poller).absolute(0);
    }
    for kind in ["control", "settings"] {
        counter!("commands_sent_total", "kind" => kind).absolute(0);
        counter!("commands_failed_total", "kind" => kind).absolute(0);
    }
    gauge!("tournaments_listed").set(0.0);

    Ok(handle)
}

/// A handle backed by a recorder that is not installed globally.
/// Used where several panels live in one process (tests).
pub fn detached_handle() -> PrometheusHandle {
    PrometheusBuilder::new().build_recorder().handle()
}
