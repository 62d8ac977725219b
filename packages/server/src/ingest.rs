//! Reconciliation of `recording.started` webhook events into persisted rows.
//!
//! Each event creates a recording and patches the referenced session's
//! recording URL. Deliveries are not deduplicated: replaying an event creates
//! another recording.

use std::future::Future;
use std::time::Duration;

use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr, TransactionTrait};
use tracing::info;

use crate::entity::{recording, session};
use crate::error::AppError;
use crate::models::shared::{validate_label, validate_location};
use crate::models::webhook::{
    RECORDING_STARTED, RecordingStartedData, RecordingStartedEvent, coerce_id, parse_start_time,
};
use crate::repository::{Repository, Resource};

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("invalid event: {0}")]
    Validation(String),
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i32 },
    #[error("datastore unavailable: {0}")]
    PersistenceUnavailable(String),
}

impl From<DbErr> for IngestError {
    fn from(err: DbErr) -> Self {
        IngestError::PersistenceUnavailable(err.to_string())
    }
}

impl From<AppError> for IngestError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::Validation(msg) => IngestError::Validation(msg),
            AppError::NotFound(msg) | AppError::Conflict(msg) | AppError::Internal(msg) => {
                IngestError::PersistenceUnavailable(msg)
            }
        }
    }
}

impl IngestError {
    /// Short machine-readable kind, used as a log field.
    pub fn kind(&self) -> &'static str {
        match self {
            IngestError::Validation(_) => "validation",
            IngestError::NotFound { .. } => "not_found",
            IngestError::PersistenceUnavailable(_) => "persistence_unavailable",
        }
    }
}

pub struct RecordingIngestor<'a> {
    db: &'a DatabaseConnection,
    call_timeout: Duration,
    atomic: bool,
}

impl<'a> RecordingIngestor<'a> {
    pub fn new(db: &'a DatabaseConnection, call_timeout: Duration, atomic: bool) -> Self {
        Self {
            db,
            call_timeout,
            atomic,
        }
    }

    /// Record a `recording.started` event, returning the created recording.
    ///
    /// In atomic mode both writes share one transaction and a failed session
    /// patch rolls the recording back. Otherwise the writes are sequential and
    /// a failure after the insert leaves the recording in place.
    pub async fn recording_started(
        &self,
        event: &RecordingStartedEvent,
    ) -> Result<recording::Model, IngestError> {
        if event.event != RECORDING_STARTED {
            return Err(IngestError::Validation(format!(
                "unexpected event type {:?}",
                event.event
            )));
        }

        if !self.atomic {
            return self.apply(self.db, &event.data).await;
        }

        let txn = self.bounded(self.db.begin()).await?;
        // Dropping the transaction on error rolls back the recording insert.
        let recording = self.apply(&txn, &event.data).await?;
        self.bounded(txn.commit()).await?;
        Ok(recording)
    }

    async fn apply<C: ConnectionTrait>(
        &self,
        conn: &C,
        data: &RecordingStartedData,
    ) -> Result<recording::Model, IngestError> {
        let tenant_id = coerce_id("tenant_id", &data.tenant_id).map_err(IngestError::Validation)?;
        let conference_id =
            coerce_id("conference_id", &data.conference_id).map_err(IngestError::Validation)?;
        let started_at = parse_start_time(&data.start_time).map_err(IngestError::Validation)?;
        // Same rules as `POST /recordings`.
        validate_label("title", &data.title)?;
        validate_location("recording_url", &data.recording_url)?;

        let recordings = Repository::<recording::Entity, C>::new(conn);
        let recording = self
            .bounded(recordings.create(recording::ActiveModel {
                title: Set(data.title.trim().to_string()),
                conference_id: Set(conference_id),
                tenant_id: Set(tenant_id),
                file_path: Set(data.recording_url.trim().to_string()),
                created_at: Set(started_at),
                updated_at: Set(Utc::now()),
                ..Default::default()
            }))
            .await?;

        let session_id =
            coerce_id("session_id", &data.session_id).map_err(IngestError::Validation)?;
        let sessions = Repository::<session::Entity, C>::new(conn);
        let existing = self
            .bounded(sessions.find_optional(session_id))
            .await?
            .ok_or(IngestError::NotFound {
                entity: session::Entity::NAME,
                id: session_id,
            })?;

        let url = data.recording_url.trim().to_string();
        self.bounded(sessions.patch(existing, move |active| {
            active.recording_url = Set(Some(url));
        }))
        .await?;

        info!(
            recording_id = recording.id,
            session_id,
            conference_id,
            tenant_id,
            "Recorded recording.started event"
        );

        Ok(recording)
    }

    /// Run a datastore call under the configured timeout.
    async fn bounded<T, F>(&self, call: F) -> Result<T, IngestError>
    where
        F: Future<Output = Result<T, DbErr>>,
    {
        match tokio::time::timeout(self.call_timeout, call).await {
            Ok(result) => Ok(result?),
            Err(_) => Err(IngestError::PersistenceUnavailable(format!(
                "datastore call exceeded {} ms",
                self.call_timeout.as_millis()
            ))),
        }
    }
}
