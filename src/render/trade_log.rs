use crate::models::{Trade, TradeOutcome, TradeStatsSnapshot};
use crate::view::{Region, Row, Table, Tone, ViewPatch};

use super::{currency, percent};

pub const NO_TRADES: &str = "No trades yet";

/// Trade-stats fields plus the history table, rebuilt from scratch.
pub fn render_trade_stats(stats: &TradeStatsSnapshot) -> ViewPatch {
    let rows = if stats.recent_trades.is_empty() {
        vec![Row::text(vec![NO_TRADES.to_string()])]
    } else {
        stats.recent_trades.iter().map(trade_row).collect()
    };

    ViewPatch::new()
        .text(Region::TotalWins, stats.total_wins.to_string())
        .text(Region::TradeWinRate, percent(stats.win_rate, 2))
        .text(Region::PendingTrades, stats.pending_trades.to_string())
        .rows(Table::TradeHistory, rows)
}

fn trade_row(trade: &Trade) -> Row {
    let (outcome, tone) = match trade.outcome {
        Some(TradeOutcome::Win) => ("Win", Tone::Win),
        Some(TradeOutcome::Loss) => ("Loss", Tone::Loss),
        Some(TradeOutcome::Unknown) => ("Unknown", Tone::Neutral),
        None => ("Pending", Tone::Neutral),
    };

    let time = trade
        .created_at
        .map(|t| t.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "-".into());

    Row {
        cells: vec![
            time,
            trade.asset.clone(),
            currency(trade.amount),
            trade.direction.to_uppercase(),
            outcome.to_string(),
            trade.profit.map(currency).unwrap_or_else(|| "-".into()),
        ],
        tone,
        action: None,
    }
}
