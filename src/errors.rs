use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// Errors surfaced by the backend client and the command flow.
#[derive(Debug, thiserror::Error)]
pub enum PanelError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status and a message.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    #[error("unexpected response: {0}")]
    Decode(String),

    #[error("invalid input: {0}")]
    Invalid(String),
}

impl PanelError {
    /// Text shown to the user after the `Error: ` prefix.
    pub fn user_message(&self) -> String {
        match self {
            PanelError::Rejected { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    /// Alert text for a failed user action.
    pub fn alert_text(&self) -> String {
        format!("Error: {}", self.user_message())
    }
}

/// Errors returned by the panel's own HTTP surface.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error(transparent)]
    Panel(#[from] PanelError),
}

#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::Panel(PanelError::Rejected { status, message }) => (
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY),
                message.clone(),
            ),
            ApiError::Panel(PanelError::Invalid(msg)) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::Panel(e) => {
                tracing::error!("Backend error: {e:?}");
                (StatusCode::BAD_GATEWAY, e.to_string())
            }
        };

        (
            status,
            Json(ErrorBody {
                success: false,
                error: message,
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_alert_uses_server_message() {
        let err = PanelError::Rejected {
            status: 400,
            message: "Tournament full".into(),
        };
        assert_eq!(err.alert_text(), "Error: Tournament full");
    }

    #[test]
    fn test_decode_alert_keeps_context() {
        let err = PanelError::Decode("missing message".into());
        assert_eq!(err.alert_text(), "Error: unexpected response: missing message");
    }
}
