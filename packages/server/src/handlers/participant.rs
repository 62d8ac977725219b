use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::*;
use tracing::instrument;

use crate::entity::{participant, session};
use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::models::participant::*;
use crate::repository::Repository;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/",
    tag = "Participants",
    operation_id = "createParticipant",
    summary = "Add a participant to a session",
    request_body = CreateParticipantRequest,
    responses(
        (status = 201, description = "Participant created", body = ParticipantResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Session not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(session_id = payload.session_id))]
pub async fn create_participant(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateParticipantRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_participant(&payload)?;

    let txn = state.db.begin().await?;
    Repository::<session::Entity, _>::new(&txn)
        .find(payload.session_id)
        .await?;

    let model = Repository::<participant::Entity, _>::new(&txn)
        .create(payload.into_active_model(chrono::Utc::now()))
        .await?;
    txn.commit().await?;

    Ok((StatusCode::CREATED, Json(ParticipantResponse::from(model))))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Participants",
    operation_id = "listParticipants",
    summary = "List participants",
    params(ParticipantListQuery),
    responses(
        (status = 200, description = "List of participants", body = Vec<ParticipantResponse>),
    ),
)]
#[instrument(skip(state, query))]
pub async fn list_participants(
    State(state): State<AppState>,
    Query(query): Query<ParticipantListQuery>,
) -> Result<Json<Vec<ParticipantResponse>>, AppError> {
    let filter = Condition::all().add_option(
        query
            .session_id
            .map(|s| participant::Column::SessionId.eq(s)),
    );

    let rows = Repository::<participant::Entity, _>::new(&state.db)
        .list(filter)
        .await?;

    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Participants",
    operation_id = "getParticipant",
    summary = "Get a participant by ID",
    params(("id" = i32, Path, description = "Participant ID")),
    responses(
        (status = 200, description = "Participant details", body = ParticipantResponse),
        (status = 404, description = "Participant not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_participant(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ParticipantResponse>, AppError> {
    let model = Repository::<participant::Entity, _>::new(&state.db)
        .find(id)
        .await?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Participants",
    operation_id = "updateParticipant",
    summary = "Update a participant",
    params(("id" = i32, Path, description = "Participant ID")),
    request_body = UpdateParticipantRequest,
    responses(
        (status = 200, description = "Participant updated", body = ParticipantResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Participant or session not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(id))]
pub async fn update_participant(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateParticipantRequest>,
) -> Result<Json<ParticipantResponse>, AppError> {
    let txn = state.db.begin().await?;
    let participants = Repository::<participant::Entity, _>::new(&txn);

    let existing = participants.find(id).await?;
    if payload == UpdateParticipantRequest::default() {
        return Ok(Json(existing.into()));
    }
    validate_update_participant(&payload, &existing)?;

    if let Some(session_id) = payload.session_id {
        Repository::<session::Entity, _>::new(&txn)
            .find(session_id)
            .await?;
    }

    let model = participants
        .patch(existing, |active| payload.apply(active))
        .await?;
    txn.commit().await?;

    Ok(Json(model.into()))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Participants",
    operation_id = "deleteParticipant",
    summary = "Delete a participant",
    params(("id" = i32, Path, description = "Participant ID")),
    responses(
        (status = 204, description = "Participant deleted"),
        (status = 404, description = "Participant not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn delete_participant(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    Repository::<participant::Entity, _>::new(&state.db)
        .delete(id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
