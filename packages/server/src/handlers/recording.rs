use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::*;
use tracing::instrument;

use crate::entity::{conference, recording};
use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::models::recording::*;
use crate::repository::Repository;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/",
    tag = "Recordings",
    operation_id = "createRecording",
    summary = "Create a recording",
    description = "Registers a recording stored in external object storage. The referenced conference must exist.",
    request_body = CreateRecordingRequest,
    responses(
        (status = 201, description = "Recording created", body = RecordingResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Conference not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(conference_id = payload.conference_id))]
pub async fn create_recording(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateRecordingRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_recording(&payload)?;

    let txn = state.db.begin().await?;
    Repository::<conference::Entity, _>::new(&txn)
        .find(payload.conference_id)
        .await?;

    let model = Repository::<recording::Entity, _>::new(&txn)
        .create(payload.into_active_model(chrono::Utc::now()))
        .await?;
    txn.commit().await?;

    Ok((StatusCode::CREATED, Json(RecordingResponse::from(model))))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Recordings",
    operation_id = "listRecordings",
    summary = "List recordings",
    params(RecordingListQuery),
    responses(
        (status = 200, description = "List of recordings", body = Vec<RecordingResponse>),
    ),
)]
#[instrument(skip(state, query))]
pub async fn list_recordings(
    State(state): State<AppState>,
    Query(query): Query<RecordingListQuery>,
) -> Result<Json<Vec<RecordingResponse>>, AppError> {
    let filter = Condition::all()
        .add_option(query.tenant_id.map(|t| recording::Column::TenantId.eq(t)))
        .add_option(
            query
                .conference_id
                .map(|c| recording::Column::ConferenceId.eq(c)),
        );

    let rows = Repository::<recording::Entity, _>::new(&state.db)
        .list(filter)
        .await?;

    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Recordings",
    operation_id = "getRecording",
    summary = "Get a recording by ID",
    params(("id" = i32, Path, description = "Recording ID")),
    responses(
        (status = 200, description = "Recording details", body = RecordingResponse),
        (status = 404, description = "Recording not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_recording(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<RecordingResponse>, AppError> {
    let model = Repository::<recording::Entity, _>::new(&state.db)
        .find(id)
        .await?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Recordings",
    operation_id = "updateRecording",
    summary = "Update a recording",
    params(("id" = i32, Path, description = "Recording ID")),
    request_body = UpdateRecordingRequest,
    responses(
        (status = 200, description = "Recording updated", body = RecordingResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Recording or conference not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(id))]
pub async fn update_recording(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateRecordingRequest>,
) -> Result<Json<RecordingResponse>, AppError> {
    let txn = state.db.begin().await?;
    let recordings = Repository::<recording::Entity, _>::new(&txn);

    let existing = recordings.find(id).await?;
    if payload == UpdateRecordingRequest::default() {
        return Ok(Json(existing.into()));
    }
    validate_update_recording(&payload)?;

    if let Some(conference_id) = payload.conference_id {
        Repository::<conference::Entity, _>::new(&txn)
            .find(conference_id)
            .await?;
    }

    let model = recordings
        .patch(existing, |active| payload.apply(active))
        .await?;
    txn.commit().await?;

    Ok(Json(model.into()))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Recordings",
    operation_id = "deleteRecording",
    summary = "Delete a recording",
    description = "Removes the recording row. The stored media is not touched.",
    params(("id" = i32, Path, description = "Recording ID")),
    responses(
        (status = 204, description = "Recording deleted"),
        (status = 404, description = "Recording not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn delete_recording(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    Repository::<recording::Entity, _>::new(&state.db)
        .delete(id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
