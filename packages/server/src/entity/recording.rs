use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::repository::Resource;

/// A recording of a conference. The media itself lives in external object
/// storage; only its location is kept here.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "recording")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub title: String,

    #[sea_orm(indexed)]
    pub conference_id: i32,
    #[sea_orm(belongs_to, from = "conference_id", to = "id", on_delete = "Restrict")]
    pub conference: HasOne<super::conference::Entity>,

    #[sea_orm(indexed)]
    pub tenant_id: i32,

    /// Storage path or URL of the recorded media.
    #[sea_orm(column_type = "Text")]
    pub file_path: String,

    /// Backfilled with the recording's start time when created by the webhook.
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}

impl Resource for Entity {
    type Active = ActiveModel;

    const NAME: &'static str = "Recording";

    fn id_column() -> Column {
        Column::Id
    }

    fn updated_at(model: &Model) -> DateTimeUtc {
        model.updated_at
    }

    fn touch(active: &mut ActiveModel, at: DateTimeUtc) {
        active.updated_at = Set(at);
    }
}
