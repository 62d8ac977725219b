use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::*;
use tracing::instrument;

use crate::entity::{conference, recording, session};
use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::models::conference::*;
use crate::repository::Repository;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/",
    tag = "Conferences",
    operation_id = "createConference",
    summary = "Create a conference",
    request_body = CreateConferenceRequest,
    responses(
        (status = 201, description = "Conference created", body = ConferenceResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(tenant_id = payload.tenant_id))]
pub async fn create_conference(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateConferenceRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_conference(&payload)?;

    let model = Repository::<conference::Entity, _>::new(&state.db)
        .create(payload.into_active_model(chrono::Utc::now()))
        .await?;

    Ok((StatusCode::CREATED, Json(ConferenceResponse::from(model))))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Conferences",
    operation_id = "listConferences",
    summary = "List conferences",
    description = "Returns all conferences ordered by id, optionally restricted to one tenant.",
    params(ConferenceListQuery),
    responses(
        (status = 200, description = "List of conferences", body = Vec<ConferenceResponse>),
    ),
)]
#[instrument(skip(state, query))]
pub async fn list_conferences(
    State(state): State<AppState>,
    Query(query): Query<ConferenceListQuery>,
) -> Result<Json<Vec<ConferenceResponse>>, AppError> {
    let mut filter = Condition::all();
    if let Some(tenant_id) = query.tenant_id {
        filter = filter.add(conference::Column::TenantId.eq(tenant_id));
    }

    let rows = Repository::<conference::Entity, _>::new(&state.db)
        .list(filter)
        .await?;

    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Conferences",
    operation_id = "getConference",
    summary = "Get a conference by ID",
    params(("id" = i32, Path, description = "Conference ID")),
    responses(
        (status = 200, description = "Conference details", body = ConferenceResponse),
        (status = 404, description = "Conference not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_conference(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ConferenceResponse>, AppError> {
    let model = Repository::<conference::Entity, _>::new(&state.db)
        .find(id)
        .await?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Conferences",
    operation_id = "updateConference",
    summary = "Update a conference",
    description = "Partially updates a conference using PATCH semantics. Only provided fields are modified; `end_time: null` clears the end time.",
    params(("id" = i32, Path, description = "Conference ID")),
    request_body = UpdateConferenceRequest,
    responses(
        (status = 200, description = "Conference updated", body = ConferenceResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Conference not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(id))]
pub async fn update_conference(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateConferenceRequest>,
) -> Result<Json<ConferenceResponse>, AppError> {
    let txn = state.db.begin().await?;
    let conferences = Repository::<conference::Entity, _>::new(&txn);

    let existing = conferences.find(id).await?;
    if payload == UpdateConferenceRequest::default() {
        return Ok(Json(existing.into()));
    }
    validate_update_conference(&payload, &existing)?;

    let model = conferences
        .patch(existing, |active| payload.apply(active))
        .await?;
    txn.commit().await?;

    Ok(Json(model.into()))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Conferences",
    operation_id = "deleteConference",
    summary = "Delete a conference",
    description = "Permanently deletes a conference. Returns 409 CONFLICT while recordings or sessions still reference it.",
    params(("id" = i32, Path, description = "Conference ID")),
    responses(
        (status = 204, description = "Conference deleted"),
        (status = 404, description = "Conference not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Conference still has recordings or sessions (CONFLICT)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn delete_conference(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let txn = state.db.begin().await?;
    let conferences = Repository::<conference::Entity, _>::new(&txn);
    conferences.find(id).await?;

    let recording_count = recording::Entity::find()
        .filter(recording::Column::ConferenceId.eq(id))
        .count(&txn)
        .await?;
    let session_count = session::Entity::find()
        .filter(session::Column::ConferenceId.eq(id))
        .count(&txn)
        .await?;
    if recording_count > 0 || session_count > 0 {
        return Err(AppError::Conflict(
            "Cannot delete conference with existing recordings or sessions".into(),
        ));
    }

    conferences.delete(id).await?;
    txn.commit().await?;
    Ok(StatusCode::NO_CONTENT)
}
