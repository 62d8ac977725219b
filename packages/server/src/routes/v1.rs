use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::handlers;
use crate::state::AppState;

pub fn routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .nest("/conferences", conference_routes())
        .nest("/recordings", recording_routes())
        .nest("/sessions", session_routes())
        .nest("/participants", participant_routes())
}

fn conference_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::conference::list_conferences,
            handlers::conference::create_conference
        ))
        .routes(routes!(
            handlers::conference::get_conference,
            handlers::conference::update_conference,
            handlers::conference::delete_conference
        ))
}

fn recording_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::recording::list_recordings,
            handlers::recording::create_recording
        ))
        .routes(routes!(
            handlers::recording::get_recording,
            handlers::recording::update_recording,
            handlers::recording::delete_recording
        ))
        .routes(routes!(handlers::webhook::recording_started))
}

fn session_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::session::list_sessions,
            handlers::session::create_session
        ))
        .routes(routes!(
            handlers::session::get_session,
            handlers::session::update_session,
            handlers::session::delete_session
        ))
}

fn participant_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::participant::list_participants,
            handlers::participant::create_participant
        ))
        .routes(routes!(
            handlers::participant::get_participant,
            handlers::participant::update_participant,
            handlers::participant::delete_participant
        ))
}
