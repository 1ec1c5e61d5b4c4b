use std::collections::HashSet;
use std::sync::Arc;

use metrics::gauge;
use serde::Serialize;
use tokio::sync::Mutex;

use crate::backend::Backend;
use crate::models::Tournament;
use crate::render::render_modal;
use crate::services::command_gateway::CommandGateway;
use crate::view::{Confirm, ViewSink};

pub const LOADING_STATUS: &str = "Loading tournaments...";
pub const LOAD_FAILED_STATUS: &str = "Failed to load tournaments.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ModalPhase {
    #[default]
    Closed,
    Loading,
    Loaded,
    Error,
}

/// Result of a join click.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum JoinOutcome {
    Joined { message: String },
    /// Carries the alert text shown to the user.
    Failed { message: String },
    /// The user said no; nothing was sent.
    Declined,
    /// A join for this id is already outstanding.
    AlreadyJoining,
    /// The modal is not showing a loaded list containing this id.
    Unavailable,
}

/// Read-only copy of the controller state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TournamentSnapshot {
    pub phase: ModalPhase,
    pub tournaments: Vec<Tournament>,
    pub in_flight: Vec<String>,
    pub status_line: Option<String>,
}

#[derive(Debug, Default)]
struct Session {
    phase: ModalPhase,
    /// Bumped on every open/close so late list responses can be dropped.
    generation: u64,
    tournaments: Vec<Tournament>,
    /// Outstanding join requests. Survives close/reopen: a sent join can't
    /// be cancelled.
    in_flight: HashSet<String>,
    status_line: Option<String>,
}

/// Tournament modal lifecycle and the optimistic join flow. The rendered
/// rows are always derived from `Session`, never read back from the view.
pub struct TournamentFlow {
    backend: Arc<dyn Backend>,
    gateway: CommandGateway,
    view: Arc<dyn ViewSink>,
    session: Mutex<Session>,
}

impl TournamentFlow {
    pub fn new(backend: Arc<dyn Backend>, gateway: CommandGateway, view: Arc<dyn ViewSink>) -> Self {
        Self {
            backend,
            gateway,
            view,
            session: Mutex::new(Session::default()),
        }
    }

    pub async fn snapshot(&self) -> TournamentSnapshot {
        let s = self.session.lock().await;
        let mut in_flight: Vec<String> = s.in_flight.iter().cloned().collect();
        in_flight.sort();
        TournamentSnapshot {
            phase: s.phase,
            tournaments: s.tournaments.clone(),
            in_flight,
            status_line: s.status_line.clone(),
        }
    }

    /// Closed/any → Loading → Loaded | Error. Prior list state is always
    /// discarded.
    pub async fn open(&self) -> ModalPhase {
        let generation = {
            let mut s = self.session.lock().await;
            s.generation += 1;
            s.phase = ModalPhase::Loading;
            s.tournaments.clear();
            s.status_line = Some(LOADING_STATUS.into());
            self.render(&s);
            s.generation
        };
        tracing::info!("Tournament modal opened");
        self.load(generation, None).await
    }

    pub async fn close(&self) {
        let mut s = self.session.lock().await;
        s.generation += 1;
        s.phase = ModalPhase::Closed;
        s.tournaments.clear();
        s.status_line = None;
        self.render(&s);
        tracing::debug!("Tournament modal closed");
    }

    /// A click on the modal. Only clicks on the background region (outside
    /// the content box) close it. Returns whether the modal closed.
    pub async fn dismiss(&self, inside_content: bool) -> bool {
        if inside_content {
            return false;
        }
        self.close().await;
        true
    }

    /// Loaded → Joining(id) → Loaded.
    pub async fn join(&self, id: &str, confirm: &dyn Confirm) -> JoinOutcome {
        let name = {
            let s = self.session.lock().await;
            if s.in_flight.contains(id) {
                return JoinOutcome::AlreadyJoining;
            }
            match (s.phase, s.tournaments.iter().find(|t| t.id == id)) {
                (ModalPhase::Loaded, Some(t)) => t.name.clone(),
                _ => return JoinOutcome::Unavailable,
            }
        };

        if !confirm.confirm(&format!("Join tournament \"{name}\"?")) {
            tracing::debug!(tournament_id = id, "Join declined");
            return JoinOutcome::Declined;
        }

        // Disable the row before anything goes on the wire.
        let generation = {
            let mut s = self.session.lock().await;
            if s.in_flight.contains(id) {
                return JoinOutcome::AlreadyJoining;
            }
            if s.phase != ModalPhase::Loaded {
                return JoinOutcome::Unavailable;
            }
            s.in_flight.insert(id.to_string());
            s.status_line = Some(format!("Joining tournament {id}..."));
            self.render(&s);
            s.generation
        };

        tracing::info!(tournament_id = id, "Joining tournament");

        match self.gateway.join_tournament(id).await {
            Ok(msg) => {
                self.view.alert(&msg.message);
                // The refetched list replaces the row that was disabled.
                self.load(generation, Some(id)).await;
                JoinOutcome::Joined {
                    message: msg.message,
                }
            }
            Err(e) => {
                let alert = e.alert_text();
                self.view.alert(&alert);

                let mut s = self.session.lock().await;
                s.in_flight.remove(id);
                if s.generation == generation && s.phase != ModalPhase::Closed {
                    s.status_line = None;
                }
                self.render(&s);
                JoinOutcome::Failed { message: alert }
            }
        }
    }

    /// Fetch the list for `generation`. `completed_join` is cleared from the
    /// in-flight set in the same critical section as the new rows land.
    async fn load(&self, generation: u64, completed_join: Option<&str>) -> ModalPhase {
        let result = self.backend.free_tournaments().await;

        let mut s = self.session.lock().await;
        if let Some(id) = completed_join {
            s.in_flight.remove(id);
        }

        if s.generation != generation || s.phase == ModalPhase::Closed {
            tracing::debug!("Discarding tournament list for a stale modal session");
            if completed_join.is_some() {
                self.render(&s);
            }
            return s.phase;
        }

        match result {
            Ok(list) => {
                gauge!("tournaments_listed").set(list.len() as f64);
                tracing::info!(count = list.len(), "Tournament list loaded");
                s.phase = ModalPhase::Loaded;
                s.tournaments = list;
                s.status_line = None;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to fetch tournaments");
                s.phase = ModalPhase::Error;
                s.tournaments.clear();
                s.status_line = Some(LOAD_FAILED_STATUS.into());
            }
        }

        self.render(&s);
        s.phase
    }

    fn render(&self, s: &Session) {
        self.view.apply(render_modal(
            s.phase,
            &s.tournaments,
            &s.in_flight,
            s.status_line.as_deref(),
        ));
    }
}
