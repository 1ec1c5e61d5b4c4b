use std::sync::Arc;

use metrics::counter;
use tokio::sync::watch;
use tokio::time::Duration;

use crate::backend::Backend;
use crate::render::render_analysis;
use crate::services::poll_loop::run_poll_loop;
use crate::view::{ChartAdapter, ViewSink};

/// One market refresh. The same analysis document feeds both the text
/// summary and the chart.
pub async fn refresh_market(backend: &dyn Backend, view: &dyn ViewSink, chart: &ChartAdapter) -> bool {
    match backend.market_analysis().await {
        Ok(analysis) => {
            view.apply(render_analysis(&analysis));
            let redrawn = chart.update_chart(&analysis);
            tracing::debug!(
                patterns = analysis.patterns.len(),
                candles = analysis.candles.len(),
                redrawn,
                "Market poll: analysis rendered"
            );
            true
        }
        Err(e) => {
            counter!("poll_failures_total", "poller" => "market").increment(1);
            tracing::warn!(error = %e, "Market poll: failed to fetch analysis");
            false
        }
    }
}

/// Poll market analysis every `every` until shutdown.
pub async fn run_market_poller(
    backend: Arc<dyn Backend>,
    view: Arc<dyn ViewSink>,
    chart: Arc<ChartAdapter>,
    every: Duration,
    shutdown: watch::Receiver<bool>,
) {
    run_poll_loop("market", every, shutdown, move || {
        let backend = Arc::clone(&backend);
        let view = Arc::clone(&view);
        let chart = Arc::clone(&chart);
        async move {
            refresh_market(backend.as_ref(), view.as_ref(), &chart).await;
        }
    })
    .await;
}
