use serde::{Deserialize, Serialize};

/// Response of `GET /api/market/analysis`. Replaced wholesale every tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketAnalysis {
    pub trend: Option<String>,
    pub patterns: Vec<PatternHit>,
    pub indicators: Indicators,
    pub levels: Levels,
    /// Most recent first, as the backend stores them.
    pub candles: Vec<Candle>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternHit {
    pub pattern: String,
    #[serde(default)]
    pub signal: String,
    /// In `[0, 1]`.
    #[serde(default)]
    pub strength: f64,
}

/// Only RSI is displayed; the backend's other indicators are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Indicators {
    pub rsi: Option<Rsi>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rsi {
    pub value: f64,
    #[serde(default)]
    pub signal: String,
}

/// Support and resistance, each ordered nearest-first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Levels {
    pub support: Vec<PriceLevel>,
    pub resistance: Vec<PriceLevel>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceLevel {
    pub price: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}
