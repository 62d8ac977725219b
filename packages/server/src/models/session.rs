use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::ActiveValue::Set;
use serde::{Deserialize, Serialize};

use super::shared::{
    double_option, normalize_file_size, validate_interval, validate_label, validate_non_negative,
};
use crate::entity::session;
use crate::error::AppError;

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateSessionRequest {
    pub conference_id: i32,
    #[schema(example = "Morning block")]
    pub session_name: String,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub recording_url: Option<String>,
    /// Duration in seconds.
    pub duration: i32,
    /// File size in megabytes, two decimals.
    #[schema(value_type = String, example = "512.25")]
    pub file_size: Decimal,
}

#[derive(Deserialize, Default, PartialEq, utoipa::ToSchema)]
pub struct UpdateSessionRequest {
    pub conference_id: Option<i32>,
    pub session_name: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>, format = DateTime)]
    pub end_time: Option<Option<DateTime<Utc>>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub recording_url: Option<Option<String>>,
    pub duration: Option<i32>,
    #[schema(value_type = Option<String>)]
    pub file_size: Option<Decimal>,
}

#[derive(Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SessionListQuery {
    pub conference_id: Option<i32>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct SessionResponse {
    pub id: i32,
    pub conference_id: i32,
    pub session_name: String,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub recording_url: Option<String>,
    pub duration: i32,
    #[schema(value_type = String, example = "512.25")]
    pub file_size: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<session::Model> for SessionResponse {
    fn from(m: session::Model) -> Self {
        Self {
            id: m.id,
            conference_id: m.conference_id,
            session_name: m.session_name,
            start_time: m.start_time,
            end_time: m.end_time,
            recording_url: m.recording_url,
            duration: m.duration,
            file_size: m.file_size,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

pub fn validate_create_session(req: &mut CreateSessionRequest) -> Result<(), AppError> {
    validate_label("session_name", &req.session_name)?;
    validate_interval(req.start_time, req.end_time, "end_time")?;
    validate_non_negative("duration", req.duration)?;
    req.file_size = normalize_file_size(req.file_size)?;
    Ok(())
}

pub fn validate_update_session(
    req: &mut UpdateSessionRequest,
    existing: &session::Model,
) -> Result<(), AppError> {
    if let Some(ref name) = req.session_name {
        validate_label("session_name", name)?;
    }
    let start = req.start_time.unwrap_or(existing.start_time);
    let end = req.end_time.unwrap_or(existing.end_time);
    validate_interval(start, end, "end_time")?;
    if let Some(duration) = req.duration {
        validate_non_negative("duration", duration)?;
    }
    if let Some(size) = req.file_size {
        req.file_size = Some(normalize_file_size(size)?);
    }
    Ok(())
}

impl CreateSessionRequest {
    pub fn into_active_model(self, now: DateTime<Utc>) -> session::ActiveModel {
        session::ActiveModel {
            conference_id: Set(self.conference_id),
            session_name: Set(self.session_name.trim().to_string()),
            start_time: Set(self.start_time),
            end_time: Set(self.end_time),
            recording_url: Set(self.recording_url),
            duration: Set(self.duration),
            file_size: Set(self.file_size),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
    }
}

impl UpdateSessionRequest {
    pub fn apply(self, active: &mut session::ActiveModel) {
        if let Some(conference_id) = self.conference_id {
            active.conference_id = Set(conference_id);
        }
        if let Some(name) = self.session_name {
            active.session_name = Set(name.trim().to_string());
        }
        if let Some(start_time) = self.start_time {
            active.start_time = Set(start_time);
        }
        if let Some(end_time) = self.end_time {
            active.end_time = Set(end_time);
        }
        if let Some(recording_url) = self.recording_url {
            active.recording_url = Set(recording_url);
        }
        if let Some(duration) = self.duration {
            active.duration = Set(duration);
        }
        if let Some(file_size) = self.file_size {
            active.file_size = Set(file_size);
        }
    }
}
