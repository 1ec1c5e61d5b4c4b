use serde::{Deserialize, Serialize};

/// Response of `GET /api/status`. Missing fields fall back to their
/// defaults so a partially populated backend still renders.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusSnapshot {
    pub is_running: bool,
    pub is_trading: bool,
    pub connected: bool,
    pub simulation_mode: bool,
    pub balance: f64,
    pub total_trades: u64,
    pub agent_stats: AgentStats,
    pub knowledge_stats: KnowledgeStats,
    pub current_asset: String,
    /// Candle timeframe in seconds.
    pub current_timeframe: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentStats {
    pub total_experiences: u64,
    pub win_rate: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KnowledgeStats {
    pub total_concepts: u64,
}
