use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::sync::Notify;

use tradepanel::backend::Backend;
use tradepanel::errors::PanelError;
use tradepanel::models::{
    CommandMessage, MarketAnalysis, SettingChange, StatusSnapshot, Tournament, TradeStatsSnapshot,
};

/// A backend failure as scripted by a test: `(status, message)`.
pub type Failure = (u16, String);
pub type Reply<T> = Result<T, Failure>;

/// Every request the panel made, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Status,
    TradeStats,
    MarketAnalysis,
    FreeTournaments,
    Control(Value),
    Settings(SettingChange),
}

struct Step<T> {
    delay: Duration,
    reply: Reply<T>,
}

/// Queued replies, then `fallback` forever.
struct Script<T> {
    queue: VecDeque<Step<T>>,
    fallback: Reply<T>,
}

impl<T: Clone> Script<T> {
    fn new(fallback: T) -> Self {
        Self {
            queue: VecDeque::new(),
            fallback: Ok(fallback),
        }
    }

    fn next(&mut self) -> Step<T> {
        self.queue.pop_front().unwrap_or_else(|| Step {
            delay: Duration::ZERO,
            reply: self.fallback.clone(),
        })
    }
}

/// Scripted in-memory backend.
pub struct FakeBackend {
    calls: Mutex<Vec<Call>>,
    status: Mutex<Script<StatusSnapshot>>,
    trade_stats: Mutex<Script<TradeStatsSnapshot>>,
    market: Mutex<Script<MarketAnalysis>>,
    tournaments: Mutex<Script<Vec<Tournament>>>,
    control: Mutex<Script<CommandMessage>>,
    settings: Mutex<Script<CommandMessage>>,
    /// When set, control requests park until notified.
    control_gate: Mutex<Option<Arc<Notify>>>,
}

#[allow(dead_code)]
impl FakeBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            status: Mutex::new(Script::new(StatusSnapshot::default())),
            trade_stats: Mutex::new(Script::new(TradeStatsSnapshot::default())),
            market: Mutex::new(Script::new(MarketAnalysis::default())),
            tournaments: Mutex::new(Script::new(Vec::new())),
            control: Mutex::new(Script::new(message("OK"))),
            settings: Mutex::new(Script::new(message("Setting updated"))),
            control_gate: Mutex::new(None),
        })
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| pred(c)).count()
    }

    pub fn control_bodies(&self) -> Vec<Value> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Control(body) => Some(body),
                _ => None,
            })
            .collect()
    }

    pub fn set_status(&self, reply: Reply<StatusSnapshot>) {
        self.status.lock().unwrap().fallback = reply;
    }

    pub fn push_status(&self, delay: Duration, reply: Reply<StatusSnapshot>) {
        self.status.lock().unwrap().queue.push_back(Step { delay, reply });
    }

    pub fn set_trade_stats(&self, reply: Reply<TradeStatsSnapshot>) {
        self.trade_stats.lock().unwrap().fallback = reply;
    }

    pub fn set_market(&self, reply: Reply<MarketAnalysis>) {
        self.market.lock().unwrap().fallback = reply;
    }

    pub fn set_tournaments(&self, reply: Reply<Vec<Tournament>>) {
        self.tournaments.lock().unwrap().fallback = reply;
    }

    pub fn push_tournaments(&self, delay: Duration, reply: Reply<Vec<Tournament>>) {
        self.tournaments.lock().unwrap().queue.push_back(Step { delay, reply });
    }

    pub fn set_control(&self, reply: Reply<CommandMessage>) {
        self.control.lock().unwrap().fallback = reply;
    }

    pub fn set_settings(&self, reply: Reply<CommandMessage>) {
        self.settings.lock().unwrap().fallback = reply;
    }

    /// Hold every control request until the returned handle is notified.
    pub fn gate_control(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.control_gate.lock().unwrap() = Some(Arc::clone(&gate));
        gate
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

async fn play<T: Clone>(script: &Mutex<Script<T>>) -> Result<T, PanelError> {
    let step = script.lock().unwrap().next();
    if !step.delay.is_zero() {
        tokio::time::sleep(step.delay).await;
    }
    step.reply
        .map_err(|(status, message)| PanelError::Rejected { status, message })
}

#[async_trait]
impl Backend for FakeBackend {
    async fn status(&self) -> Result<StatusSnapshot, PanelError> {
        self.record(Call::Status);
        play(&self.status).await
    }

    async fn trade_stats(&self) -> Result<TradeStatsSnapshot, PanelError> {
        self.record(Call::TradeStats);
        play(&self.trade_stats).await
    }

    async fn market_analysis(&self) -> Result<MarketAnalysis, PanelError> {
        self.record(Call::MarketAnalysis);
        play(&self.market).await
    }

    async fn free_tournaments(&self) -> Result<Vec<Tournament>, PanelError> {
        self.record(Call::FreeTournaments);
        play(&self.tournaments).await
    }

    async fn control(&self, body: Value) -> Result<CommandMessage, PanelError> {
        self.record(Call::Control(body));
        let gate = self.control_gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        play(&self.control).await
    }

    async fn settings(&self, change: SettingChange) -> Result<CommandMessage, PanelError> {
        self.record(Call::Settings(change));
        play(&self.settings).await
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

#[allow(dead_code)]
pub fn message(text: &str) -> CommandMessage {
    CommandMessage {
        message: text.to_string(),
    }
}

#[allow(dead_code)]
pub fn failure(status: u16, message: &str) -> Failure {
    (status, message.to_string())
}

#[allow(dead_code)]
pub fn status_with_balance(balance: f64) -> StatusSnapshot {
    serde_json::from_value(json!({
        "is_running": true,
        "connected": true,
        "simulation_mode": false,
        "balance": balance,
        "total_trades": 10,
        "agent_stats": {"total_experiences": 100, "win_rate": 0.6},
        "knowledge_stats": {"total_concepts": 5},
        "current_asset": "EURUSD",
        "current_timeframe": 300
    }))
    .unwrap()
}

#[allow(dead_code)]
pub fn analysis_with_candles(count: usize) -> MarketAnalysis {
    let candles: Vec<Value> = (0..count)
        .map(|i| {
            let base = 1.1 + i as f64 * 0.001;
            json!({"open": base, "high": base + 0.002, "low": base - 0.002, "close": base + 0.001})
        })
        .collect();

    serde_json::from_value(json!({
        "trend": "bullish",
        "patterns": [{"pattern": "hammer", "signal": "buy", "strength": 0.8}],
        "indicators": {"rsi": {"value": 55.123, "signal": "neutral"}},
        "levels": {"support": [{"price": 1.0950}], "resistance": [{"price": 1.1050}]},
        "candles": candles
    }))
    .unwrap()
}

#[allow(dead_code)]
pub fn tournament(id: &str, name: &str) -> Tournament {
    Tournament {
        id: id.to_string(),
        name: name.to_string(),
        prize_pool: 500.0,
        participants: 12,
        status: "invitation_open".to_string(),
        entry_fee: 0.0,
    }
}
