use std::sync::Arc;

use metrics::counter;
use tokio::sync::watch;
use tokio::time::Duration;

use crate::backend::Backend;
use crate::render::{render_dashboard, render_trade_stats};
use crate::services::poll_loop::run_poll_loop;
use crate::view::ViewSink;

/// One status refresh: status first, then trade stats once status has
/// resolved. Each result is rendered as soon as it arrives. Failures are
/// logged only; the view keeps the last good snapshot.
///
/// Returns `true` when both reads succeeded.
pub async fn refresh_status(backend: &dyn Backend, view: &dyn ViewSink) -> bool {
    let status = match backend.status().await {
        Ok(s) => s,
        Err(e) => {
            counter!("poll_failures_total", "poller" => "status").increment(1);
            tracing::warn!(error = %e, "Status poll: failed to fetch status");
            return false;
        }
    };
    view.apply(render_dashboard(&status));

    match backend.trade_stats().await {
        Ok(stats) => {
            tracing::debug!(
                recent = stats.recent_trades.len(),
                pending = stats.pending_trades,
                "Status poll: trade stats rendered"
            );
            view.apply(render_trade_stats(&stats));
            true
        }
        Err(e) => {
            counter!("poll_failures_total", "poller" => "status").increment(1);
            tracing::warn!(error = %e, "Status poll: failed to fetch trade stats");
            false
        }
    }
}

/// Poll status and trade history every `every` until shutdown.
pub async fn run_status_poller(
    backend: Arc<dyn Backend>,
    view: Arc<dyn ViewSink>,
    every: Duration,
    shutdown: watch::Receiver<bool>,
) {
    run_poll_loop("status", every, shutdown, move || {
        let backend = Arc::clone(&backend);
        let view = Arc::clone(&view);
        async move {
            refresh_status(backend.as_ref(), view.as_ref()).await;
        }
    })
    .await;
}
