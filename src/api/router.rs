use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::AppState;
use super::auth::require_auth;
use super::handlers;

pub fn create_router(state: AppState) -> Router {
    // Public routes
    let public = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/metrics", get(handlers::metrics::render));

    // Protected routes: Bearer token required when PANEL_API_TOKEN is set
    let protected = Router::new()
        // Displayed state
        .route("/api/view", get(handlers::view::snapshot))
        // Bot control and settings
        .route("/api/actions/control", post(handlers::actions::control))
        .route("/api/actions/settings", post(handlers::actions::settings))
        // Tournament modal
        .route("/api/actions/tournaments", get(handlers::actions::tournaments))
        .route("/api/actions/tournaments/open", post(handlers::actions::open_tournaments))
        .route("/api/actions/tournaments/close", post(handlers::actions::close_tournaments))
        .route("/api/actions/tournaments/dismiss", post(handlers::actions::dismiss_tournaments))
        .route("/api/actions/tournaments/:id/join", post(handlers::actions::join_tournament))
        // Documents
        .route("/api/actions/document", post(handlers::actions::select_document))
        // WebSocket
        .route("/ws", get(handlers::ws::handler))
        .layer(middleware::from_fn_with_state(state.clone(), require_auth));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    public
        .merge(protected)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
