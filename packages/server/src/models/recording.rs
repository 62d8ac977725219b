use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use serde::{Deserialize, Serialize};

use super::shared::{validate_label, validate_location};
use crate::entity::recording;
use crate::error::AppError;

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateRecordingRequest {
    #[schema(example = "Standup")]
    pub title: String,
    pub conference_id: i32,
    pub tenant_id: i32,
    /// Storage path or URL of the media in object storage.
    #[schema(example = "https://store/rec1.mp4")]
    pub file_path: String,
}

#[derive(Deserialize, Default, PartialEq, utoipa::ToSchema)]
pub struct UpdateRecordingRequest {
    pub title: Option<String>,
    pub conference_id: Option<i32>,
    pub tenant_id: Option<i32>,
    pub file_path: Option<String>,
}

#[derive(Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RecordingListQuery {
    pub tenant_id: Option<i32>,
    pub conference_id: Option<i32>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct RecordingResponse {
    pub id: i32,
    pub title: String,
    pub conference_id: i32,
    pub tenant_id: i32,
    pub file_path: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<recording::Model> for RecordingResponse {
    fn from(m: recording::Model) -> Self {
        Self {
            id: m.id,
            title: m.title,
            conference_id: m.conference_id,
            tenant_id: m.tenant_id,
            file_path: m.file_path,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

pub fn validate_create_recording(req: &CreateRecordingRequest) -> Result<(), AppError> {
    validate_label("title", &req.title)?;
    validate_location("file_path", &req.file_path)
}

pub fn validate_update_recording(req: &UpdateRecordingRequest) -> Result<(), AppError> {
    if let Some(ref title) = req.title {
        validate_label("title", title)?;
    }
    if let Some(ref file_path) = req.file_path {
        validate_location("file_path", file_path)?;
    }
    Ok(())
}

impl CreateRecordingRequest {
    pub fn into_active_model(self, now: DateTime<Utc>) -> recording::ActiveModel {
        recording::ActiveModel {
            title: Set(self.title.trim().to_string()),
            conference_id: Set(self.conference_id),
            tenant_id: Set(self.tenant_id),
            file_path: Set(self.file_path.trim().to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
    }
}

impl UpdateRecordingRequest {
    pub fn apply(self, active: &mut recording::ActiveModel) {
        if let Some(title) = self.title {
            active.title = Set(title.trim().to_string());
        }
        if let Some(conference_id) = self.conference_id {
            active.conference_id = Set(conference_id);
        }
        if let Some(tenant_id) = self.tenant_id {
            active.tenant_id = Set(tenant_id);
        }
        if let Some(file_path) = self.file_path {
            active.file_path = Set(file_path.trim().to_string());
        }
    }
}
