use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use tracing::{error, instrument, warn};

use crate::ingest::RecordingIngestor;
use crate::models::webhook::{RecordingStartedEvent, WebhookResponse};
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/webhook/recording-started",
    tag = "Webhooks",
    operation_id = "recordingStarted",
    summary = "Ingest a recording.started event",
    description = "Creates a recording for the event (its `created_at` is the event's `start_time`) and sets the referenced session's `recording_url`. \
        Every failure (invalid identifiers, unknown session, datastore errors) returns the same failure envelope with status 404; details are only logged. \
        Deliveries are not deduplicated: replaying an event creates another recording.",
    request_body = RecordingStartedEvent,
    responses(
        (status = 200, description = "Event processed", body = WebhookResponse),
        (status = 404, description = "Event could not be processed", body = WebhookResponse),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn recording_started(
    State(state): State<AppState>,
    payload: Result<Json<RecordingStartedEvent>, JsonRejection>,
) -> (StatusCode, Json<WebhookResponse>) {
    let event = match payload {
        Ok(Json(event)) => event,
        Err(rejection) => {
            warn!(error = %rejection.body_text(), "Rejected malformed recording.started payload");
            return (StatusCode::NOT_FOUND, Json(WebhookResponse::failure()));
        }
    };

    let ingestor = RecordingIngestor::new(
        &state.db,
        state.config.database.call_timeout(),
        state.config.webhook.atomic_writes,
    );

    match ingestor.recording_started(&event).await {
        Ok(_) => (StatusCode::OK, Json(WebhookResponse::success())),
        Err(e) => {
            error!(
                kind = e.kind(),
                error = %e,
                conference_id = %event.data.conference_id,
                session_id = %event.data.session_id,
                "Failed to process recording start event"
            );
            (StatusCode::NOT_FOUND, Json(WebhookResponse::failure()))
        }
    }
}
