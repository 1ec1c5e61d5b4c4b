use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Response of `GET /api/trades/history`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TradeStatsSnapshot {
    pub total_trades: u64,
    pub total_wins: u64,
    pub total_losses: u64,
    pub win_rate: f64,
    pub pending_trades: u64,
    /// Rendered in the order delivered.
    pub recent_trades: Vec<Trade>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeOutcome {
    Win,
    Loss,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    /// Sent as epoch seconds (float), epoch milliseconds, or an RFC 3339
    /// string. Anything unreadable decodes to `None`.
    #[serde(default, deserialize_with = "deserialize_trade_time")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub asset: String,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub direction: String,
    #[serde(default)]
    pub outcome: Option<TradeOutcome>,
    #[serde(default)]
    pub profit: Option<f64>,
}

fn deserialize_trade_time<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(parse_trade_timestamp))
}

fn from_epoch(secs: f64) -> Option<DateTime<Utc>> {
    if !secs.is_finite() {
        return None;
    }
    // If >1e12, it's milliseconds
    let millis = if secs > 1e12 { secs } else { secs * 1000.0 };
    DateTime::from_timestamp_millis(millis.round() as i64)
}

fn parse_trade_timestamp(ts: &serde_json::Value) -> Option<DateTime<Utc>> {
    match ts {
        serde_json::Value::Number(n) => from_epoch(n.as_f64()?),
        serde_json::Value::String(s) => {
            if let Ok(secs) = s.parse::<f64>() {
                return from_epoch(secs);
            }
            DateTime::parse_from_rfc3339(s)
                .ok()
                .map(|dt| dt.with_timezone(&Utc))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn trade_at(ts: serde_json::Value) -> Trade {
        serde_json::from_value(json!({"created_at": ts, "asset": "EURUSD"})).unwrap()
    }

    #[test]
    fn test_float_epoch_seconds() {
        let t = trade_at(json!(1_700_000_000.5));
        assert_eq!(t.created_at.unwrap().timestamp_millis(), 1_700_000_000_500);
    }

    #[test]
    fn test_epoch_millis() {
        let t = trade_at(json!(1_700_000_000_000_i64));
        assert_eq!(t.created_at.unwrap().timestamp(), 1_700_000_000);
    }

    #[test]
    fn test_rfc3339_string() {
        let t = trade_at(json!("2024-01-02T03:04:05Z"));
        assert_eq!(t.created_at.unwrap().format("%H:%M:%S").to_string(), "03:04:05");
    }

    #[test]
    fn test_missing_or_unreadable_time_is_none() {
        assert_eq!(trade_at(json!(null)).created_at, None);
        assert_eq!(trade_at(json!("yesterday")).created_at, None);
        let t: Trade = serde_json::from_value(json!({"asset": "EURUSD"})).unwrap();
        assert_eq!(t.created_at, None);
    }

    #[test]
    fn test_unknown_outcome_decodes() {
        let t: Trade = serde_json::from_value(json!({"outcome": "draw"})).unwrap();
        assert_eq!(t.outcome, Some(TradeOutcome::Unknown));
        let t: Trade = serde_json::from_value(json!({"asset": "EURUSD"})).unwrap();
        assert_eq!(t.outcome, None);
    }
}
