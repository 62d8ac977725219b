use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use serde::{Deserialize, Serialize};

use super::shared::{double_option, validate_interval, validate_label};
use crate::entity::conference;
use crate::error::AppError;

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateConferenceRequest {
    #[schema(example = "Weekly sync")]
    pub name: String,
    pub host_user_id: i32,
    pub tenant_id: i32,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
}

#[derive(Deserialize, Default, PartialEq, utoipa::ToSchema)]
pub struct UpdateConferenceRequest {
    pub name: Option<String>,
    pub host_user_id: Option<i32>,
    pub tenant_id: Option<i32>,
    pub start_time: Option<DateTime<Utc>>,
    /// `null` clears the end time.
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>, format = DateTime)]
    pub end_time: Option<Option<DateTime<Utc>>>,
}

#[derive(Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ConferenceListQuery {
    /// Only conferences belonging to this tenant.
    pub tenant_id: Option<i32>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct ConferenceResponse {
    pub id: i32,
    pub name: String,
    pub host_user_id: i32,
    pub tenant_id: i32,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<conference::Model> for ConferenceResponse {
    fn from(m: conference::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            host_user_id: m.host_user_id,
            tenant_id: m.tenant_id,
            start_time: m.start_time,
            end_time: m.end_time,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

pub fn validate_create_conference(req: &CreateConferenceRequest) -> Result<(), AppError> {
    validate_label("name", &req.name)?;
    validate_interval(req.start_time, req.end_time, "end_time")
}

/// Validate an update against the row it will be merged into.
pub fn validate_update_conference(
    req: &UpdateConferenceRequest,
    existing: &conference::Model,
) -> Result<(), AppError> {
    if let Some(ref name) = req.name {
        validate_label("name", name)?;
    }
    let start = req.start_time.unwrap_or(existing.start_time);
    let end = req.end_time.unwrap_or(existing.end_time);
    validate_interval(start, end, "end_time")
}

impl CreateConferenceRequest {
    pub fn into_active_model(self, now: DateTime<Utc>) -> conference::ActiveModel {
        conference::ActiveModel {
            name: Set(self.name.trim().to_string()),
            host_user_id: Set(self.host_user_id),
            tenant_id: Set(self.tenant_id),
            start_time: Set(self.start_time),
            end_time: Set(self.end_time),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
    }
}

impl UpdateConferenceRequest {
    pub fn apply(self, active: &mut conference::ActiveModel) {
        if let Some(name) = self.name {
            active.name = Set(name.trim().to_string());
        }
        if let Some(host_user_id) = self.host_user_id {
            active.host_user_id = Set(host_user_id);
        }
        if let Some(tenant_id) = self.tenant_id {
            active.tenant_id = Set(tenant_id);
        }
        if let Some(start_time) = self.start_time {
            active.start_time = Set(start_time);
        }
        if let Some(end_time) = self.end_time {
            active.end_time = Set(end_time);
        }
    }
}
