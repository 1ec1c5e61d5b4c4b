pub mod client;

use async_trait::async_trait;

use crate::errors::PanelError;
use crate::models::{
    CommandMessage, MarketAnalysis, SettingChange, StatusSnapshot, Tournament, TradeStatsSnapshot,
};

pub use client::HttpBackend;

/// The trading backend as seen by the panel: one method per endpoint.
#[async_trait]
pub trait Backend: Send + Sync {
    /// `GET /api/status`
    async fn status(&self) -> Result<StatusSnapshot, PanelError>;

    /// `GET /api/trades/history`
    async fn trade_stats(&self) -> Result<TradeStatsSnapshot, PanelError>;

    /// `GET /api/market/analysis`
    async fn market_analysis(&self) -> Result<MarketAnalysis, PanelError>;

    /// `GET /api/tournaments/free`
    async fn free_tournaments(&self) -> Result<Vec<Tournament>, PanelError>;

    /// `POST /api/control` with an already assembled `{action, ...payload}` body.
    async fn control(&self, body: serde_json::Value) -> Result<CommandMessage, PanelError>;

    /// `POST /api/settings`
    async fn settings(&self, change: SettingChange) -> Result<CommandMessage, PanelError>;
}
