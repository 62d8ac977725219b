use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::repository::Resource;

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "participant")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(indexed)]
    pub session_id: i32,
    #[sea_orm(belongs_to, from = "session_id", to = "id", on_delete = "Restrict")]
    pub session: HasOne<super::session::Entity>,

    pub user_id: i32,
    pub join_time: DateTimeUtc,
    pub leave_time: DateTimeUtc,
    pub duration: i32, // in seconds

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}

impl Resource for Entity {
    type Active = ActiveModel;

    const NAME: &'static str = "Participant";

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
