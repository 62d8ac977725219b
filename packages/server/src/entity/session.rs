use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::repository::Resource;

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "session")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(indexed)]
    pub conference_id: i32,
    #[sea_orm(belongs_to, from = "conference_id", to = "id", on_delete = "Restrict")]
    pub conference: HasOne<super::conference::Entity>,

    pub session_name: String,
    pub start_time: DateTimeUtc,
    pub end_time: Option<DateTimeUtc>,

    /// Patched by the `recording.started` webhook.
    #[sea_orm(column_type = "Text", nullable)]
    pub recording_url: Option<String>,

    pub duration: i32, // in seconds
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub file_size: Decimal, // in megabytes

    #[sea_orm(has_many)]
    pub participants: HasMany<super::participant::Entity>,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}

impl Resource for Entity {
    type Active = ActiveModel;

    const NAME: &'static str = "Session";

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
