//! Uniform data access for every persisted resource.
//!
//! Handlers and the webhook ingestion path both go through [`Repository`], so
//! there is exactly one way rows are created, looked up, patched and removed.

use std::marker::PhantomData;

use chrono::{DateTime, Duration, SubsecRound, Utc};
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, Condition, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, PrimaryKeyTrait, QueryFilter, QueryOrder,
};

use crate::error::AppError;

/// An entity with an `i32` primary key and audit timestamps.
pub trait Resource: EntityTrait {
    type Active: ActiveModelTrait<Entity = Self> + ActiveModelBehavior + Send + 'static;

    /// Display name used in not-found messages.
    const NAME: &'static str;

    fn id_column() -> Self::Column;

    fn updated_at(model: &Self::Model) -> DateTime<Utc>;

    fn touch(active: &mut Self::Active, at: DateTime<Utc>);
}

/// Next `updated_at` for a row last stamped at `previous`.
///
/// Wall-clock time truncated to the column's microsecond resolution, unless
/// the clock has not moved past `previous`, in which case the stamp is bumped
/// by one microsecond.
pub fn advance_timestamp(previous: DateTime<Utc>, now: DateTime<Utc>) -> DateTime<Utc> {
    let now = now.trunc_subsecs(6);
    if now > previous {
        now
    } else {
        previous + Duration::microseconds(1)
    }
}

pub struct Repository<'a, E, C> {
    conn: &'a C,
    entity: PhantomData<E>,
}

impl<'a, E, C> Repository<'a, E, C>
where
    E: Resource,
    E::Model: IntoActiveModel<E::Active>,
    <E::PrimaryKey as PrimaryKeyTrait>::ValueType: From<i32>,
    C: ConnectionTrait,
{
    pub fn new(conn: &'a C) -> Self {
        Self {
            conn,
            entity: PhantomData,
        }
    }

    pub async fn create(&self, active: E::Active) -> Result<E::Model, DbErr> {
        active.insert(self.conn).await
    }

    /// All rows matching `filter`, ordered by id.
    pub async fn list(&self, filter: Condition) -> Result<Vec<E::Model>, DbErr> {
        E::find()
            .filter(filter)
            .order_by_asc(E::id_column())
            .all(self.conn)
            .await
    }

    pub async fn find_optional(&self, id: i32) -> Result<Option<E::Model>, DbErr> {
        E::find_by_id(id).one(self.conn).await
    }

    /// Look up a row by id, returning 404 if it does not exist.
    pub async fn find(&self, id: i32) -> Result<E::Model, AppError> {
        self.find_optional(id)
            .await?
            .ok_or_else(|| AppError::not_found(E::NAME, id))
    }

    /// Apply `patch` to an already loaded row and persist it with an advanced
    /// `updated_at`.
    pub async fn patch<F>(&self, existing: E::Model, patch: F) -> Result<E::Model, DbErr>
    where
        F: FnOnce(&mut E::Active),
    {
        let stamp = advance_timestamp(E::updated_at(&existing), Utc::now());
        let mut active = existing.into_active_model();
        patch(&mut active);
        E::touch(&mut active, stamp);
        active.update(self.conn).await
    }

    /// Delete a row by id, returning 404 if it does not exist.
    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        self.find(id).await?;
        E::delete_by_id(id).exec(self.conn).await?;
        Ok(())
    }
}
