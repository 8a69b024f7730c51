use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One launch event reported by a device.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "app_opens")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(indexed)]
    pub app_key: String,

    pub device_id: String,

    pub opened_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
