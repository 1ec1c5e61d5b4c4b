use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// ControlAction: `POST /api/control`
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlAction {
    Start,
    Stop,
    StartTrading,
    StopTrading,
    JoinTournament,
}

impl ControlAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ControlAction::Start => "start",
            ControlAction::Stop => "stop",
            ControlAction::StartTrading => "start_trading",
            ControlAction::StopTrading => "stop_trading",
            ControlAction::JoinTournament => "join_tournament",
        }
    }
}

impl fmt::Display for ControlAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// SettingChange: `POST /api/settings`
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Setting {
    Asset,
    Timeframe,
    MinConfidence,
    CurrentAsset,
    CurrentTimeframe,
}

impl fmt::Display for Setting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Setting::Asset => "asset",
            Setting::Timeframe => "timeframe",
            Setting::MinConfidence => "min_confidence",
            Setting::CurrentAsset => "current_asset",
            Setting::CurrentTimeframe => "current_timeframe",
        };
        f.write_str(s)
    }
}

/// Wire body `{setting, value}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingChange {
    pub setting: Setting,
    pub value: serde_json::Value,
}

/// Every command endpoint answers with at least a human-readable message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandMessage {
    pub message: String,
}
