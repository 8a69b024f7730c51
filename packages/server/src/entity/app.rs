use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A registered application tracked by its opaque `app_key`.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "apps")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Opaque tracking key of the form `apk_<ms-epoch>_<random>`.
    #[sea_orm(unique)]
    pub app_key: String,

    pub app_name: String,
    pub package_name: String,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
