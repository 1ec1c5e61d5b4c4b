use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::Backend;
use crate::errors::PanelError;
use crate::models::{
    CommandMessage, MarketAnalysis, SettingChange, StatusSnapshot, Tournament, TradeStatsSnapshot,
};

#[derive(Debug, Clone)]
pub struct HttpBackend {
    http: Client,
    base_url: String,
}

#[derive(Deserialize)]
struct MessageBody {
    #[serde(default)]
    message: Option<String>,
    /// Failures from the bot loop bridge use `error` instead.
    #[serde(default)]
    error: Option<String>,
}

impl HttpBackend {
    pub fn new(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Build a client with a per-request timeout.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self, PanelError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self::new(http, base_url))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, PanelError> {
        let url = format!("{}{}", self.base_url, path);
        let resp = self.http.get(&url).send().await?.error_for_status()?;

        let body: T = resp.json().await?;
        Ok(body)
    }

    async fn post_command<B: serde::Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<CommandMessage, PanelError> {
        let url = format!("{}{}", self.base_url, path);
        let resp = self.http.post(&url).json(body).send().await?;
        decode_command_response(resp).await
    }
}

/// Success → `{message}`. Non-success → `Rejected` carrying the server's
/// `message` or `error`, or the status reason when the body has neither.
async fn decode_command_response(resp: Response) -> Result<CommandMessage, PanelError> {
    let status = resp.status();
    let bytes = resp.bytes().await?;
    let body = serde_json::from_slice::<MessageBody>(&bytes).ok();

    if status.is_success() {
        return body
            .and_then(|b| b.message)
            .map(|message| CommandMessage { message })
            .ok_or_else(|| PanelError::Decode(format!("{status}: response has no message")));
    }

    let message = body.and_then(|b| b.message.or(b.error));

    Err(PanelError::Rejected {
        status: status.as_u16(),
        message: message.unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string()
        }),
    })
}

#[async_trait]
impl Backend for HttpBackend {
    async fn status(&self) -> Result<StatusSnapshot, PanelError> {
        self.get_json("/api/status").await
    }

    async fn trade_stats(&self) -> Result<TradeStatsSnapshot, PanelError> {
        self.get_json("/api/trades/history").await
    }

    async fn market_analysis(&self) -> Result<MarketAnalysis, PanelError> {
        self.get_json("/api/market/analysis").await
    }

    async fn free_tournaments(&self) -> Result<Vec<Tournament>, PanelError> {
        self.get_json("/api/tournaments/free").await
    }

    async fn control(&self, body: serde_json::Value) -> Result<CommandMessage, PanelError> {
        self.post_command("/api/control", &body).await
    }

    async fn settings(&self, change: SettingChange) -> Result<CommandMessage, PanelError> {
        self.post_command("/api/settings", &change).await
    }
}
