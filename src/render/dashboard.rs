use crate::models::StatusSnapshot;
use crate::view::{Region, Tone, ViewPatch};

use super::{currency, percent, timeframe};

/// Indicators and stats owned by the status poll.
pub fn render_dashboard(status: &StatusSnapshot) -> ViewPatch {
    let (bot, bot_tone) = if status.is_running {
        ("Running", Tone::On)
    } else {
        ("Stopped", Tone::Off)
    };

    let (trading, trading_tone) = if status.is_trading {
        ("Trading", Tone::On)
    } else {
        ("Idle", Tone::Off)
    };

    let (connection, connection_tone) = match (status.connected, status.simulation_mode) {
        (false, _) => ("Disconnected", Tone::Off),
        (true, true) => ("Simulated", Tone::On),
        (true, false) => ("Live", Tone::On),
    };

    let (mode, mode_tone) = if status.simulation_mode {
        ("Simulation", Tone::Neutral)
    } else {
        ("Live", Tone::On)
    };

    let asset = if status.current_asset.is_empty() {
        "-".to_string()
    } else {
        status.current_asset.clone()
    };

    ViewPatch::new()
        .toned(Region::BotStatus, bot, bot_tone)
        .toned(Region::TradingStatus, trading, trading_tone)
        .toned(Region::ConnectionStatus, connection, connection_tone)
        .toned(Region::ModeStatus, mode, mode_tone)
        .text(Region::Balance, currency(status.balance))
        .text(Region::TotalTrades, status.total_trades.to_string())
        .text(
            Region::AgentExperiences,
            status.agent_stats.total_experiences.to_string(),
        )
        .text(Region::AgentWinRate, percent(status.agent_stats.win_rate, 2))
        .text(
            Region::KnowledgeConcepts,
            status.knowledge_stats.total_concepts.to_string(),
        )
        .text(Region::CurrentAsset, asset)
        .text(Region::CurrentTimeframe, timeframe(status.current_timeframe))
}
