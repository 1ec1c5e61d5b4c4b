//! User actions. Each handler drives the same flow a dashboard click would,
//! so alerts and view updates reach every connected client.

use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::errors::ApiError;
use crate::models::{CommandMessage, ControlAction, SettingChange};
use crate::services::{JoinOutcome, TournamentSnapshot};
use crate::view::Answer;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ControlRequest {
    pub action: ControlAction,
}

#[derive(Debug, Deserialize)]
pub struct DismissRequest {
    #[serde(default)]
    pub inside_content: bool,
}

#[derive(Debug, Deserialize)]
pub struct JoinRequest {
    /// The user's answer to the join confirmation.
    #[serde(default)]
    pub confirmed: bool,
}

#[derive(Debug, Deserialize)]
pub struct DocumentRequest {
    pub file_name: String,
}

fn command_response(msg: CommandMessage) -> Json<Value> {
    Json(json!({ "success": true, "message": msg.message }))
}

/// POST /api/actions/control: start/stop the bot or trading.
pub async fn control(
    State(state): State<AppState>,
    Json(req): Json<ControlRequest>,
) -> Result<Json<Value>, ApiError> {
    let msg = state.context.control(req.action).await?;
    Ok(command_response(msg))
}

/// POST /api/actions/settings
pub async fn settings(
    State(state): State<AppState>,
    Json(req): Json<SettingChange>,
) -> Result<Json<Value>, ApiError> {
    let msg = state.context.change_setting(req.setting, req.value).await?;
    Ok(command_response(msg))
}

/// GET /api/actions/tournaments: Current modal state.
pub async fn tournaments(State(state): State<AppState>) -> Json<TournamentSnapshot> {
    Json(state.context.tournaments().snapshot().await)
}

/// POST /api/actions/tournaments/open: Open the modal and load the list.
pub async fn open_tournaments(State(state): State<AppState>) -> Json<TournamentSnapshot> {
    state.context.open_tournaments().await;
    Json(state.context.tournaments().snapshot().await)
}

pub async fn close_tournaments(State(state): State<AppState>) -> Json<TournamentSnapshot> {
    state.context.close_tournaments().await;
    Json(state.context.tournaments().snapshot().await)
}

/// POST /api/actions/tournaments/dismiss: A click on the modal overlay.
pub async fn dismiss_tournaments(
    State(state): State<AppState>,
    Json(req): Json<DismissRequest>,
) -> Json<Value> {
    let closed = state.context.dismiss_tournaments(req.inside_content).await;
    Json(json!({ "closed": closed }))
}

/// POST /api/actions/tournaments/:id/join
pub async fn join_tournament(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<JoinRequest>,
) -> Json<JoinOutcome> {
    let outcome = state
        .context
        .join_tournament(&id, &Answer(req.confirmed))
        .await;
    Json(outcome)
}

/// POST /api/actions/document: Select a PDF for the knowledge base.
pub async fn select_document(
    State(state): State<AppState>,
    Json(req): Json<DocumentRequest>,
) -> Result<Json<Value>, ApiError> {
    if req.file_name.trim().is_empty() {
        return Err(ApiError::BadRequest("file_name is required".into()));
    }
    let message = state.context.select_document(&req.file_name)?;
    Ok(Json(json!({ "success": true, "message": message })))
}
