use axum::extract::State;
use axum::Json;

use crate::view::ViewState;
use crate::AppState;

/// GET /api/view: Everything currently displayed.
pub async fn snapshot(State(state): State<AppState>) -> Json<ViewState> {
    Json(state.view.snapshot())
}
