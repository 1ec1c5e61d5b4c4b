use serde::{Deserialize, Deserializer, Serialize};

/// One entry of `GET /api/tournaments/free`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tournament {
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub prize_pool: f64,
    #[serde(default)]
    pub participants: u64,
    /// e.g. `active`, `invitation_open`, `in_progress`.
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub entry_fee: f64,
}

// Some backends send numeric ids.
fn id_from_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "tournament id must be a string or number, got {other}"
        ))),
    }
}
