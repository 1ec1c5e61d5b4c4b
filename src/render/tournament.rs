use std::collections::HashSet;

use crate::models::Tournament;
use crate::services::tournament_flow::ModalPhase;
use crate::view::{Region, Row, RowAction, Table, Tone, ViewPatch};

use super::{currency, status_label};

pub const NO_TOURNAMENTS: &str = "No active tournaments found";
pub const JOIN_LABEL: &str = "Join";
pub const JOINING_LABEL: &str = "Joining...";
pub const FREE_ENTRY: &str = "Free";

/// The whole modal, derived from the controller's state. Rows whose id is
/// in `in_flight` render disabled with the placeholder label.
pub fn render_modal(
    phase: ModalPhase,
    tournaments: &[Tournament],
    in_flight: &HashSet<String>,
    status_line: Option<&str>,
) -> ViewPatch {
    let rows = match phase {
        ModalPhase::Loaded => tournament_rows(tournaments, in_flight),
        ModalPhase::Closed | ModalPhase::Loading | ModalPhase::Error => Vec::new(),
    };

    ViewPatch::new()
        .modal(phase != ModalPhase::Closed)
        .rows(Table::Tournaments, rows)
        .text(Region::TournamentStatus, status_line.unwrap_or_default())
}

pub fn tournament_rows(tournaments: &[Tournament], in_flight: &HashSet<String>) -> Vec<Row> {
    if tournaments.is_empty() {
        return vec![Row::text(vec![NO_TOURNAMENTS.to_string()])];
    }

    tournaments
        .iter()
        .map(|t| {
            let joining = in_flight.contains(&t.id);
            Row {
                cells: vec![
                    t.name.clone(),
                    currency(t.prize_pool),
                    t.participants.to_string(),
                    status_label(&t.status),
                    entry_fee_label(t.entry_fee),
                ],
                tone: Tone::Neutral,
                action: Some(RowAction {
                    id: t.id.clone(),
                    label: if joining { JOINING_LABEL } else { JOIN_LABEL }.to_string(),
                    disabled: joining,
                }),
            }
        })
        .collect()
}

fn entry_fee_label(fee: f64) -> String {
    if fee > 0.0 {
        currency(fee)
    } else {
        FREE_ENTRY.to_string()
    }
}
