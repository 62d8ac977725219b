use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::repository::Resource;

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "conference")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub name: String,
    pub host_user_id: i32,
    #[sea_orm(indexed)]
    pub tenant_id: i32,
    pub start_time: DateTimeUtc,
    pub end_time: Option<DateTimeUtc>,

    #[sea_orm(has_many)]
    pub recordings: HasMany<super::recording::Entity>,

    #[sea_orm(has_many)]
    pub sessions: HasMany<super::session::Entity>,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}

impl Resource for Entity {
    type Active = ActiveModel;

    const NAME: &'static str = "Conference";

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
