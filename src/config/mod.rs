use std::env;
use std::time::Duration;

const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:5000";

#[derive(Debug, Clone)]
pub struct PanelConfig {
    pub backend_url: String,
    pub host: String,
    pub port: u16,

    // Polling
    pub poll_interval_secs: u64,
    pub request_timeout_secs: u64,

    // Panel HTTP surface (optional, auth disabled when unset)
    pub api_token: Option<String>,
    pub log_json: bool,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.into(),
            host: "0.0.0.0".into(),
            port: 8090,
            poll_interval_secs: 3,
            request_timeout_secs: 10,
            api_token: None,
            log_json: false,
        }
    }
}

impl PanelConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let api_token = env::var("PANEL_API_TOKEN")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let poll_interval_secs: u64 = env::var("POLL_INTERVAL_SECS")
            .unwrap_or_else(|_| "3".into())
            .parse()?;
        if poll_interval_secs == 0 {
            anyhow::bail!("POLL_INTERVAL_SECS must be greater than zero");
        }

        Ok(Self {
            backend_url: env::var("BACKEND_URL")
                .map(|s| s.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| DEFAULT_BACKEND_URL.into()),
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8090".into())
                .parse()?,
            poll_interval_secs,
            request_timeout_secs: env::var("REQUEST_TIMEOUT_SECS")
                .unwrap_or_else(|_| "10".into())
                .parse()?,
            api_token,
            log_json: env::var("LOG_FORMAT")
                .map(|v| v.eq_ignore_ascii_case("json"))
                .unwrap_or(false),
        })
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
