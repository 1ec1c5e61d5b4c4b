use std::sync::{Arc, Mutex, PoisonError};

use serde_json::Value;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::Duration;

use crate::backend::Backend;
use crate::errors::PanelError;
use crate::models::{CommandMessage, ControlAction, Setting};
use crate::services::{
    refresh_status, run_market_poller, run_status_poller, CommandGateway,
    JoinOutcome, TournamentFlow,
};
use crate::view::{ChartAdapter, ChartSink, Confirm, Region, ViewPatch, ViewSink, ViewStore};

pub const DOCUMENT_UPLOAD_UNAVAILABLE: &str = "Document upload is not available yet.";

/// The application context: one per panel, constructed explicitly and
/// shared by reference. Owns the polling tasks; `shutdown` stops them.
pub struct PanelContext {
    backend: Arc<dyn Backend>,
    gateway: CommandGateway,
    view: Arc<dyn ViewSink>,
    chart: Arc<ChartAdapter>,
    tournaments: TournamentFlow,
    poll_interval: Duration,
    shutdown_tx: watch::Sender<bool>,
    tasks: Mutex<Vec<JoinHandle<()>>>,
}

impl PanelContext {
    pub fn new(
        backend: Arc<dyn Backend>,
        view: Arc<dyn ViewSink>,
        chart_sink: Arc<dyn ChartSink>,
        poll_interval: Duration,
    ) -> Self {
        let gateway = CommandGateway::new(Arc::clone(&backend));
        let tournaments = TournamentFlow::new(Arc::clone(&backend), gateway.clone(), Arc::clone(&view));
        let (shutdown_tx, _) = watch::channel(false);

        Self {
            backend,
            gateway,
            view,
            chart: Arc::new(ChartAdapter::new(chart_sink)),
            tournaments,
            poll_interval,
            shutdown_tx,
            tasks: Mutex::new(Vec::new()),
        }
    }

    /// `store` serves as both the view and the chart sink.
    pub fn with_store(backend: Arc<dyn Backend>, store: Arc<ViewStore>, poll_interval: Duration) -> Self {
        Self::new(backend, store.clone(), store, poll_interval)
    }

    pub fn gateway(&self) -> &CommandGateway {
        &self.gateway
    }

    pub fn tournaments(&self) -> &TournamentFlow {
        &self.tournaments
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Initialize the chart and spawn both pollers. Calling it again while
    /// they run does nothing; after `shutdown` the pollers exit immediately.
    pub fn start(&self) {
        self.chart.ensure_initialized();

        let mut tasks = self.tasks.lock().unwrap_or_else(PoisonError::into_inner);
        if !tasks.is_empty() {
            tracing::debug!("Pollers already running");
            return;
        }

        tasks.push(tokio::spawn(run_status_poller(
            Arc::clone(&self.backend),
            Arc::clone(&self.view),
            self.poll_interval,
            self.shutdown_tx.subscribe(),
        )));
        tasks.push(tokio::spawn(run_market_poller(
            Arc::clone(&self.backend),
            Arc::clone(&self.view),
            Arc::clone(&self.chart),
            self.poll_interval,
            self.shutdown_tx.subscribe(),
        )));

        tracing::info!(
            interval_secs = self.poll_interval.as_secs_f64(),
            "Panel pollers started"
        );
    }

    /// Stop the pollers and wait for them to exit.
    pub async fn shutdown(&self) {
        self.shutdown_tx.send_replace(true);

        let handles: Vec<JoinHandle<()>> = {
            let mut tasks = self.tasks.lock().unwrap_or_else(PoisonError::into_inner);
            tasks.drain(..).collect()
        };
        for handle in handles {
            if let Err(e) = handle.await {
                tracing::error!(error = %e, "Poller task ended abnormally");
            }
        }
        tracing::info!("Panel shut down");
    }

    /// Whether the backend answers a status read. Nothing is rendered.
    pub async fn backend_reachable(&self) -> bool {
        match self.backend.status().await {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!(error = %e, "Backend health check failed");
                false
            }
        }
    }

    /// Out-of-band status refresh, outside the poll cadence.
    pub async fn refresh_status(&self) -> bool {
        refresh_status(self.backend.as_ref(), self.view.as_ref()).await
    }

    // -----------------------------------------------------------------------
    // Bot control
    // -----------------------------------------------------------------------

    /// Bot/trading control. Joining goes through [`Self::join_tournament`].
    pub async fn control(&self, action: ControlAction) -> Result<CommandMessage, PanelError> {
        if action == ControlAction::JoinTournament {
            return Err(PanelError::Invalid(
                "join_tournament requires a tournament id".into(),
            ));
        }
        let result = self.gateway.send(action, None).await;
        self.finish_command(result).await
    }

    pub async fn start_bot(&self) -> Result<CommandMessage, PanelError> {
        self.control(ControlAction::Start).await
    }

    pub async fn stop_bot(&self) -> Result<CommandMessage, PanelError> {
        self.control(ControlAction::Stop).await
    }

    pub async fn start_trading(&self) -> Result<CommandMessage, PanelError> {
        self.control(ControlAction::StartTrading).await
    }

    pub async fn stop_trading(&self) -> Result<CommandMessage, PanelError> {
        self.control(ControlAction::StopTrading).await
    }

    // -----------------------------------------------------------------------
    // Settings
    // -----------------------------------------------------------------------

    /// Route a loosely typed `{setting, value}` pair to the matching setter.
    pub async fn change_setting(&self, setting: Setting, value: Value) -> Result<CommandMessage, PanelError> {
        let result = match setting {
            Setting::Asset => match as_text(&value) {
                Ok(asset) => self.gateway.set_asset(&asset).await,
                Err(e) => Err(e),
            },
            Setting::CurrentAsset => match as_text(&value) {
                Ok(asset) => self.gateway.set_current_asset(&asset).await,
                Err(e) => Err(e),
            },
            Setting::Timeframe => match as_seconds(&value) {
                Ok(secs) => self.gateway.set_timeframe(secs).await,
                Err(e) => Err(e),
            },
            Setting::CurrentTimeframe => match as_seconds(&value) {
                Ok(secs) => self.gateway.set_current_timeframe(secs).await,
                Err(e) => Err(e),
            },
            Setting::MinConfidence => match as_fraction(&value) {
                Ok(c) => self.gateway.set_min_confidence(c).await,
                Err(e) => Err(e),
            },
        };
        self.finish_command(result).await
    }

    // -----------------------------------------------------------------------
    // Tournaments
    // -----------------------------------------------------------------------

    pub async fn open_tournaments(&self) {
        self.tournaments.open().await;
    }

    pub async fn close_tournaments(&self) {
        self.tournaments.close().await;
    }

    pub async fn dismiss_tournaments(&self, inside_content: bool) -> bool {
        self.tournaments.dismiss(inside_content).await
    }

    pub async fn join_tournament(&self, id: &str, confirm: &dyn Confirm) -> JoinOutcome {
        let outcome = self.tournaments.join(id, confirm).await;
        if matches!(outcome, JoinOutcome::Joined { .. } | JoinOutcome::Failed { .. }) {
            self.refresh_status().await;
        }
        outcome
    }

    // -----------------------------------------------------------------------
    // Documents
    // -----------------------------------------------------------------------

    /// Record a selected PDF. Upload itself is not performed.
    pub fn select_document(&self, file_name: &str) -> Result<String, PanelError> {
        let name = file_name.trim();
        if !name.to_ascii_lowercase().ends_with(".pdf") {
            return Err(PanelError::Invalid("only PDF documents are accepted".into()));
        }

        self.view
            .apply(ViewPatch::new().text(Region::DocumentSelection, format!("Selected: {name}")));
        self.view.alert(DOCUMENT_UPLOAD_UNAVAILABLE);
        tracing::info!(file_name = name, "Document selected; upload not available");
        Ok(DOCUMENT_UPLOAD_UNAVAILABLE.to_string())
    }

    /// Alert the outcome and refresh status unless nothing was sent.
    async fn finish_command(
        &self,
        result: Result<CommandMessage, PanelError>,
    ) -> Result<CommandMessage, PanelError> {
        match &result {
            Ok(msg) => self.view.alert(&msg.message),
            Err(e) => self.view.alert(&e.alert_text()),
        }
        if !matches!(result, Err(PanelError::Invalid(_))) {
            self.refresh_status().await;
        }
        result
    }
}

fn as_text(value: &Value) -> Result<String, PanelError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        other => Err(PanelError::Invalid(format!("expected a string, got {other}"))),
    }
}

fn as_seconds(value: &Value) -> Result<u64, PanelError> {
    match value {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && *f >= 0.0 && f.fract() == 0.0 && *f <= u64::MAX as f64)
                .map(|f| f as u64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
    .ok_or_else(|| PanelError::Invalid(format!("expected whole seconds, got {value}")))
}

fn as_fraction(value: &Value) -> Result<f64, PanelError> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
    .ok_or_else(|| PanelError::Invalid(format!("expected a number, got {value}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_setting_value_coercion() {
        assert_eq!(as_seconds(&json!(300)).unwrap(), 300);
        assert_eq!(as_seconds(&json!("60")).unwrap(), 60);
        assert!(as_seconds(&json!(-5)).is_err());
        assert_eq!(as_seconds(&json!(300.0)).unwrap(), 300);
        assert!(as_seconds(&json!(300.5)).is_err());
        assert!(as_seconds(&json!(-60.0)).is_err());
        assert_eq!(as_fraction(&json!("0.8")).unwrap(), 0.8);
        assert!(as_text(&json!(5)).is_err());
    }
}
