pub mod command;
pub mod market;
pub mod status;
pub mod tournament;
pub mod trade;

pub use command::{CommandMessage, ControlAction, Setting, SettingChange};
pub use market::{Candle, Indicators, Levels, MarketAnalysis, PatternHit, PriceLevel, Rsi};
pub use status::{AgentStats, KnowledgeStats, StatusSnapshot};
pub use tournament::Tournament;
pub use trade::{Trade, TradeOutcome, TradeStatsSnapshot};
