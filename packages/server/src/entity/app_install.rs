use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One install event reported by a device.
///
/// Rows are written by the tracking SDK embedded in installed apps, keyed by
/// the app's `app_key` string rather than its numeric id. `package_name` is a
/// denormalized copy taken at install time.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "app_installs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(indexed)]
    pub app_key: String,

    pub device_id: String,
    pub package_name: String,

    pub installed_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
