use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::Serialize;
use tokio::sync::broadcast;

use super::{CandleSeries, ChartLayout, ChartSink, Region, Row, Table, Tone, ViewOp, ViewPatch, ViewSink};

/// Alerts kept for late subscribers.
const MAX_ALERTS: usize = 50;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Field {
    pub text: String,
    pub tone: Option<Tone>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChartState {
    pub layout: Option<ChartLayout>,
    pub series: CandleSeries,
    pub redraws: u64,
}

/// Everything currently displayed.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ViewState {
    pub fields: BTreeMap<Region, Field>,
    pub tables: BTreeMap<Table, Vec<Row>>,
    pub modal_open: bool,
    pub chart: ChartState,
    pub alerts: Vec<String>,
}

/// Changes pushed to connected dashboard clients.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum ViewEvent {
    #[serde(rename = "patch")]
    Patch(ViewPatch),

    #[serde(rename = "alert")]
    Alert { message: String },

    #[serde(rename = "chart_init")]
    ChartInit(ChartLayout),

    #[serde(rename = "chart")]
    Chart(CandleSeries),

    /// Full state, sent once when a client connects.
    #[serde(rename = "snapshot")]
    Snapshot(ViewState),
}

/// In-memory view tree. Implements both sinks and broadcasts every change.
pub struct ViewStore {
    state: Mutex<ViewState>,
    events: broadcast::Sender<ViewEvent>,
}

impl Default for ViewStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewStore {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(256);
        Self {
            state: Mutex::new(ViewState::default()),
            events,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ViewEvent> {
        self.events.subscribe()
    }

    pub fn snapshot(&self) -> ViewState {
        self.lock().clone()
    }

    pub fn field_text(&self, region: Region) -> Option<String> {
        self.lock().fields.get(&region).map(|f| f.text.clone())
    }

    pub fn field_tone(&self, region: Region) -> Option<Tone> {
        self.lock().fields.get(&region).and_then(|f| f.tone)
    }

    pub fn rows(&self, table: Table) -> Vec<Row> {
        self.lock().tables.get(&table).cloned().unwrap_or_default()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.lock().alerts.clone()
    }

    pub fn chart(&self) -> ChartState {
        self.lock().chart.clone()
    }

    pub fn modal_open(&self) -> bool {
        self.lock().modal_open
    }

    fn lock(&self) -> MutexGuard<'_, ViewState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, event: ViewEvent) {
        // No subscribers is fine.
        let _ = self.events.send(event);
    }
}

impl ViewSink for ViewStore {
    fn apply(&self, patch: ViewPatch) {
        if patch.is_empty() {
            return;
        }
        {
            let mut state = self.lock();
            for op in &patch.ops {
                match op {
                    ViewOp::SetField { region, text, tone } => {
                        state.fields.insert(
                            *region,
                            Field {
                                text: text.clone(),
                                tone: *tone,
                            },
                        );
                    }
                    ViewOp::ReplaceRows { table, rows } => {
                        state.tables.insert(*table, rows.clone());
                    }
                    ViewOp::SetModal { open } => state.modal_open = *open,
                }
            }
        }
        self.publish(ViewEvent::Patch(patch));
    }

    fn alert(&self, message: &str) {
        tracing::info!(alert = message, "Alert shown");
        {
            let mut state = self.lock();
            state.alerts.push(message.to_string());
            if state.alerts.len() > MAX_ALERTS {
                let excess = state.alerts.len() - MAX_ALERTS;
                state.alerts.drain(..excess);
            }
        }
        self.publish(ViewEvent::Alert {
            message: message.to_string(),
        });
    }
}

impl ChartSink for ViewStore {
    fn init(&self, layout: &ChartLayout, series: &CandleSeries) {
        {
            let mut state = self.lock();
            state.chart.layout = Some(layout.clone());
            state.chart.series = series.clone();
        }
        self.publish(ViewEvent::ChartInit(layout.clone()));
    }

    fn redraw(&self, series: &CandleSeries) {
        {
            let mut state = self.lock();
            state.chart.series = series.clone();
            state.chart.redraws += 1;
        }
        self.publish(ViewEvent::Chart(series.clone()));
    }
}
