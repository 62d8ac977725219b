use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use serde::{Deserialize, Serialize};

use super::shared::{validate_interval, validate_non_negative};
use crate::entity::participant;
use crate::error::AppError;

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateParticipantRequest {
    pub session_id: i32,
    pub user_id: i32,
    pub join_time: DateTime<Utc>,
    pub leave_time: DateTime<Utc>,
    /// Time spent in the session, in seconds.
    pub duration: i32,
}

#[derive(Deserialize, Default, PartialEq, utoipa::ToSchema)]
pub struct UpdateParticipantRequest {
    pub session_id: Option<i32>,
    pub user_id: Option<i32>,
    pub join_time: Option<DateTime<Utc>>,
    pub leave_time: Option<DateTime<Utc>>,
    pub duration: Option<i32>,
}

#[derive(Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ParticipantListQuery {
    pub session_id: Option<i32>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct ParticipantResponse {
    pub id: i32,
    pub session_id: i32,
    pub user_id: i32,
    pub join_time: DateTime<Utc>,
    pub leave_time: DateTime<Utc>,
    pub duration: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<participant::Model> for ParticipantResponse {
    fn from(m: participant::Model) -> Self {
        Self {
            id: m.id,
            session_id: m.session_id,
            user_id: m.user_id,
            join_time: m.join_time,
            leave_time: m.leave_time,
            duration: m.duration,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

pub fn validate_create_participant(req: &CreateParticipantRequest) -> Result<(), AppError> {
    validate_interval(req.join_time, Some(req.leave_time), "leave_time")?;
    validate_non_negative("duration", req.duration)
}

pub fn validate_update_participant(
    req: &UpdateParticipantRequest,
    existing: &participant::Model,
) -> Result<(), AppError> {
    let join = req.join_time.unwrap_or(existing.join_time);
    let leave = req.leave_time.unwrap_or(existing.leave_time);
    validate_interval(join, Some(leave), "leave_time")?;
    if let Some(duration) = req.duration {
        validate_non_negative("duration", duration)?;
    }
    Ok(())
}

impl CreateParticipantRequest {
    pub fn into_active_model(self, now: DateTime<Utc>) -> participant::ActiveModel {
        participant::ActiveModel {
            session_id: Set(self.session_id),
            user_id: Set(self.user_id),
            join_time: Set(self.join_time),
            leave_time: Set(self.leave_time),
            duration: Set(self.duration),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
    }
}

impl UpdateParticipantRequest {
    pub fn apply(self, active: &mut participant::ActiveModel) {
        if let Some(session_id) = self.session_id {
            active.session_id = Set(session_id);
        }
        if let Some(user_id) = self.user_id {
            active.user_id = Set(user_id);
        }
        if let Some(join_time) = self.join_time {
            active.join_time = Set(join_time);
        }
        if let Some(leave_time) = self.leave_time {
            active.leave_time = Set(leave_time);
        }
        if let Some(duration) = self.duration {
            active.duration = Set(duration);
        }
    }
}
