use std::sync::Arc;

use metrics::counter;
use serde_json::{json, Map, Value};

use crate::backend::Backend;
use crate::errors::PanelError;
use crate::models::{CommandMessage, ControlAction, Setting, SettingChange};

/// Sends single control/setting commands. One attempt per call, no retry;
/// failures go back to the caller, which decides how to surface them.
#[derive(Clone)]
pub struct CommandGateway {
    backend: Arc<dyn Backend>,
}

impl CommandGateway {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self { backend }
    }

    /// `POST /api/control` with body `{action, ...payload}`.
    pub async fn send(
        &self,
        action: ControlAction,
        payload: Option<Value>,
    ) -> Result<CommandMessage, PanelError> {
        let body = control_body(action, payload)?;
        counter!("commands_sent_total", "kind" => "control").increment(1);

        match self.backend.control(body).await {
            Ok(msg) => {
                tracing::info!(action = %action, message = %msg.message, "Control command accepted");
                Ok(msg)
            }
            Err(e) => {
                counter!("commands_failed_total", "kind" => "control").increment(1);
                tracing::warn!(action = %action, error = %e, "Control command failed");
                Err(e)
            }
        }
    }

    pub async fn join_tournament(&self, id: &str) -> Result<CommandMessage, PanelError> {
        self.send(ControlAction::JoinTournament, Some(json!({ "id": id })))
            .await
    }

    /// `POST /api/settings` with body `{setting, value}`.
    pub async fn change_setting(
        &self,
        setting: Setting,
        value: Value,
    ) -> Result<CommandMessage, PanelError> {
        counter!("commands_sent_total", "kind" => "settings").increment(1);

        match self
            .backend
            .settings(SettingChange { setting, value })
            .await
        {
            Ok(msg) => {
                tracing::info!(setting = %setting, message = %msg.message, "Setting changed");
                Ok(msg)
            }
            Err(e) => {
                counter!("commands_failed_total", "kind" => "settings").increment(1);
                tracing::warn!(setting = %setting, error = %e, "Setting change failed");
                Err(e)
            }
        }
    }

    pub async fn set_asset(&self, asset: &str) -> Result<CommandMessage, PanelError> {
        self.change_setting(Setting::Asset, json!(non_empty(asset)?))
            .await
    }

    pub async fn set_timeframe(&self, seconds: u64) -> Result<CommandMessage, PanelError> {
        self.change_setting(Setting::Timeframe, json!(positive(seconds)?))
            .await
    }

    /// `confidence` is a fraction in `[0, 1]`.
    pub async fn set_min_confidence(&self, confidence: f64) -> Result<CommandMessage, PanelError> {
        if !(0.0..=1.0).contains(&confidence) {
            return Err(PanelError::Invalid(format!(
                "min_confidence must be between 0 and 1, got {confidence}"
            )));
        }
        self.change_setting(Setting::MinConfidence, json!(confidence))
            .await
    }

    pub async fn set_current_asset(&self, asset: &str) -> Result<CommandMessage, PanelError> {
        self.change_setting(Setting::CurrentAsset, json!(non_empty(asset)?))
            .await
    }

    pub async fn set_current_timeframe(&self, seconds: u64) -> Result<CommandMessage, PanelError> {
        self.change_setting(Setting::CurrentTimeframe, json!(positive(seconds)?))
            .await
    }
}

/// `{action, ...payload}`. The payload must be an object; an `action` key
/// inside it is ignored.
pub fn control_body(action: ControlAction, payload: Option<Value>) -> Result<Value, PanelError> {
    let mut body = Map::new();
    body.insert("action".into(), Value::String(action.as_str().into()));

    match payload {
        None | Some(Value::Null) => {}
        Some(Value::Object(fields)) => {
            for (key, value) in fields {
                if key != "action" {
                    body.insert(key, value);
                }
            }
        }
        Some(other) => {
            return Err(PanelError::Invalid(format!(
                "command payload must be a JSON object, got {other}"
            )));
        }
    }

    Ok(Value::Object(body))
}

fn non_empty(value: &str) -> Result<&str, PanelError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(PanelError::Invalid("asset must not be empty".into()));
    }
    Ok(trimmed)
}

fn positive(seconds: u64) -> Result<u64, PanelError> {
    if seconds == 0 {
        return Err(PanelError::Invalid("timeframe must be positive".into()));
    }
    Ok(seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_without_payload() {
        let body = control_body(ControlAction::Start, None).unwrap();
        assert_eq!(body, json!({"action": "start"}));
    }

    #[test]
    fn test_body_spreads_payload() {
        let body = control_body(ControlAction::JoinTournament, Some(json!({"id": "t-1"}))).unwrap();
        assert_eq!(body, json!({"action": "join_tournament", "id": "t-1"}));
    }

    #[test]
    fn test_payload_cannot_override_action() {
        let body = control_body(
            ControlAction::Stop,
            Some(json!({"action": "start", "reason": "manual"})),
        )
        .unwrap();
        assert_eq!(body, json!({"action": "stop", "reason": "manual"}));
    }

    #[test]
    fn test_non_object_payload_rejected() {
        let err = control_body(ControlAction::Stop, Some(json!([1, 2]))).unwrap_err();
        assert!(matches!(err, PanelError::Invalid(_)));
    }
}
