use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, de};

/// Event discriminator accepted by the recording webhook.
pub const RECORDING_STARTED: &str = "recording.started";

pub const SUCCESS_MESSAGE: &str = "Recording start event received successfully.";
pub const FAILURE_MESSAGE: &str = "Failed to process recording start event.";

#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct RecordingStartedEvent {
    #[schema(example = "recording.started")]
    pub event: String,
    pub data: RecordingStartedData,
}

/// Payload of a `recording.started` event.
///
/// Identifier fields are strings on the wire; numbers are accepted too and
/// kept in their textual form until coerced.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct RecordingStartedData {
    #[serde(deserialize_with = "lenient_string")]
    #[schema(example = "r1")]
    pub recording_id: String,
    #[serde(deserialize_with = "lenient_string")]
    #[schema(example = "42")]
    pub conference_id: String,
    #[serde(deserialize_with = "lenient_string")]
    #[schema(example = "7")]
    pub tenant_id: String,
    #[serde(deserialize_with = "lenient_string")]
    #[schema(example = "99")]
    pub session_id: String,
    #[schema(example = "https://store/rec1.mp4")]
    pub recording_url: String,
    #[schema(example = "Standup")]
    pub title: String,
    #[schema(example = "2024-01-01T10:00:00Z")]
    pub start_time: String,
    #[serde(deserialize_with = "lenient_string")]
    #[schema(example = "5")]
    pub host_user_id: String,
    #[schema(example = "Alice")]
    pub host_user_name: String,
    /// Accepted but not persisted.
    #[serde(default)]
    pub tenant_name: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum WebhookStatus {
    Success,
    Failure,
}

/// Envelope returned by the webhook, whatever the outcome.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct WebhookResponse {
    pub status: WebhookStatus,
    #[schema(example = "Recording start event received successfully.")]
    pub message: &'static str,
}

impl WebhookResponse {
    pub fn success() -> Self {
        Self {
            status: WebhookStatus::Success,
            message: SUCCESS_MESSAGE,
        }
    }

    pub fn failure() -> Self {
        Self {
            status: WebhookStatus::Failure,
            message: FAILURE_MESSAGE,
        }
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(de::Error::invalid_type(
            de::Unexpected::Other(&other.to_string()),
            &"a string or a number",
        )),
    }
}

/// Coerce a wire identifier to an integer. Surrounding whitespace is ignored.
pub fn coerce_id(field: &'static str, raw: &str) -> Result<i32, String> {
    raw.trim()
        .parse::<i32>()
        .map_err(|_| format!("{field} is not a valid integer: {raw:?}"))
}

/// Parse an ISO-8601 timestamp. Values without an offset are taken as UTC.
pub fn parse_start_time(raw: &str) -> Result<DateTime<Utc>, String> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|_| format!("start_time is not an ISO-8601 timestamp: {raw:?}"))
}
