//! View model shared by the renderers and whatever applies their output.
//!
//! Renderers never touch a view directly: they return a [`ViewPatch`] and a
//! [`ViewSink`] applies it. [`ViewStore`] is the in-process sink used by the
//! panel server and by tests.

pub mod chart;
pub mod store;

use serde::{Deserialize, Serialize};

pub use chart::{CandleSeries, ChartAdapter, ChartLayout};
pub use store::{ViewEvent, ViewState, ViewStore};

/// Every single-value display slot of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    // Indicators
    BotStatus,
    TradingStatus,
    ConnectionStatus,
    ModeStatus,
    // Stats
    Balance,
    TotalTrades,
    AgentExperiences,
    AgentWinRate,
    KnowledgeConcepts,
    CurrentAsset,
    CurrentTimeframe,
    // Trade stats
    TotalWins,
    TradeWinRate,
    PendingTrades,
    // Market analysis
    MarketTrend,
    RsiValue,
    PatternCount,
    NearestSupport,
    NearestResistance,
    AnalysisDetail,
    // Tournament modal
    TournamentStatus,
    // Document picker
    DocumentSelection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Table {
    TradeHistory,
    Tournaments,
}

/// Styling class attached to a field or row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    On,
    Off,
    Win,
    Loss,
    Neutral,
}

/// A button attached to a table row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowAction {
    pub id: String,
    pub label: String,
    pub disabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub cells: Vec<String>,
    pub tone: Tone,
    pub action: Option<RowAction>,
}

impl Row {
    pub fn text(cells: Vec<String>) -> Self {
        Self {
            cells,
            tone: Tone::Neutral,
            action: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ViewOp {
    SetField {
        region: Region,
        text: String,
        tone: Option<Tone>,
    },
    /// Clears the table and rebuilds it from `rows`.
    ReplaceRows { table: Table, rows: Vec<Row> },
    SetModal { open: bool },
}

/// Ordered list of view mutations produced by one render call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewPatch {
    pub ops: Vec<ViewOp>,
}

impl ViewPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, region: Region, text: impl Into<String>) -> Self {
        self.ops.push(ViewOp::SetField {
            region,
            text: text.into(),
            tone: None,
        });
        self
    }

    pub fn toned(mut self, region: Region, text: impl Into<String>, tone: Tone) -> Self {
        self.ops.push(ViewOp::SetField {
            region,
            text: text.into(),
            tone: Some(tone),
        });
        self
    }

    pub fn rows(mut self, table: Table, rows: Vec<Row>) -> Self {
        self.ops.push(ViewOp::ReplaceRows { table, rows });
        self
    }

    pub fn modal(mut self, open: bool) -> Self {
        self.ops.push(ViewOp::SetModal { open });
        self
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Text of the last `SetField` for `region`, if any.
    pub fn field(&self, region: Region) -> Option<&str> {
        self.ops.iter().rev().find_map(|op| match op {
            ViewOp::SetField { region: r, text, .. } if *r == region => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn tone(&self, region: Region) -> Option<Tone> {
        self.ops.iter().rev().find_map(|op| match op {
            ViewOp::SetField { region: r, tone, .. } if *r == region => *tone,
            _ => None,
        })
    }

    pub fn table(&self, table: Table) -> Option<&[Row]> {
        self.ops.iter().rev().find_map(|op| match op {
            ViewOp::ReplaceRows { table: t, rows } if *t == table => Some(rows.as_slice()),
            _ => None,
        })
    }
}

/// Applies render output. Called from any task, so implementations must
/// tolerate stale or out-of-order patches.
pub trait ViewSink: Send + Sync {
    fn apply(&self, patch: ViewPatch);

    /// Blocking user-facing message.
    fn alert(&self, message: &str);
}

/// The charting renderer.
pub trait ChartSink: Send + Sync {
    fn init(&self, layout: &ChartLayout, series: &CandleSeries);

    /// Redraw the existing chart in place.
    fn redraw(&self, series: &CandleSeries);
}

/// Interactive yes/no confirmation.
pub trait Confirm: Send + Sync {
    fn confirm(&self, message: &str) -> bool;
}

/// A confirmation answered before the action was requested.
#[derive(Debug, Clone, Copy)]
pub struct Answer(pub bool);

impl Confirm for Answer {
    fn confirm(&self, _message: &str) -> bool {
        self.0
    }
}
