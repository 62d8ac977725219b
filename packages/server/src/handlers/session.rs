use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::*;
use tracing::instrument;

use crate::entity::{conference, participant, session};
use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::models::session::*;
use crate::repository::Repository;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/",
    tag = "Sessions",
    operation_id = "createSession",
    summary = "Create a session",
    description = "Creates a session under an existing conference. `file_size` is rounded to two decimals.",
    request_body = CreateSessionRequest,
    responses(
        (status = 201, description = "Session created", body = SessionResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Conference not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(conference_id = payload.conference_id))]
pub async fn create_session(
    State(state): State<AppState>,
    AppJson(mut payload): AppJson<CreateSessionRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_session(&mut payload)?;

    let txn = state.db.begin().await?;
    Repository::<conference::Entity, _>::new(&txn)
        .find(payload.conference_id)
        .await?;

    let model = Repository::<session::Entity, _>::new(&txn)
        .create(payload.into_active_model(chrono::Utc::now()))
        .await?;
    txn.commit().await?;

    Ok((StatusCode::CREATED, Json(SessionResponse::from(model))))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Sessions",
    operation_id = "listSessions",
    summary = "List sessions",
    params(SessionListQuery),
    responses(
        (status = 200, description = "List of sessions", body = Vec<SessionResponse>),
    ),
)]
#[instrument(skip(state, query))]
pub async fn list_sessions(
    State(state): State<AppState>,
    Query(query): Query<SessionListQuery>,
) -> Result<Json<Vec<SessionResponse>>, AppError> {
    let filter = Condition::all().add_option(
        query
            .conference_id
            .map(|c| session::Column::ConferenceId.eq(c)),
    );

    let rows = Repository::<session::Entity, _>::new(&state.db)
        .list(filter)
        .await?;

    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Sessions",
    operation_id = "getSession",
    summary = "Get a session by ID",
    params(("id" = i32, Path, description = "Session ID")),
    responses(
        (status = 200, description = "Session details", body = SessionResponse),
        (status = 404, description = "Session not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<SessionResponse>, AppError> {
    let model = Repository::<session::Entity, _>::new(&state.db)
        .find(id)
        .await?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Sessions",
    operation_id = "updateSession",
    summary = "Update a session",
    description = "Partially updates a session using PATCH semantics. `end_time` and `recording_url` accept `null` to clear them.",
    params(("id" = i32, Path, description = "Session ID")),
    request_body = UpdateSessionRequest,
    responses(
        (status = 200, description = "Session updated", body = SessionResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Session or conference not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(id))]
pub async fn update_session(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(mut payload): AppJson<UpdateSessionRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    let txn = state.db.begin().await?;
    let sessions = Repository::<session::Entity, _>::new(&txn);

    let existing = sessions.find(id).await?;
    if payload == UpdateSessionRequest::default() {
        return Ok(Json(existing.into()));
    }
    validate_update_session(&mut payload, &existing)?;

    if let Some(conference_id) = payload.conference_id {
        Repository::<conference::Entity, _>::new(&txn)
            .find(conference_id)
            .await?;
    }

    let model = sessions
        .patch(existing, |active| payload.apply(active))
        .await?;
    txn.commit().await?;

    Ok(Json(model.into()))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Sessions",
    operation_id = "deleteSession",
    summary = "Delete a session",
    description = "Permanently deletes a session. Returns 409 CONFLICT while participants still reference it.",
    params(("id" = i32, Path, description = "Session ID")),
    responses(
        (status = 204, description = "Session deleted"),
        (status = 404, description = "Session not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Session still has participants (CONFLICT)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let txn = state.db.begin().await?;
    let sessions = Repository::<session::Entity, _>::new(&txn);
    sessions.find(id).await?;

    let participant_count = participant::Entity::find()
        .filter(participant::Column::SessionId.eq(id))
        .count(&txn)
        .await?;
    if participant_count > 0 {
        return Err(AppError::Conflict(
            "Cannot delete session with existing participants".into(),
        ));
    }

    sessions.delete(id).await?;
    txn.commit().await?;
    Ok(StatusCode::NO_CONTENT)
}
