use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::entity::{app_install, app_open};

#[derive(Serialize, utoipa::ToSchema)]
pub struct InstallResponse {
    pub id: i32,
    pub app_key: String,
    pub device_id: String,
    pub package_name: String,
    pub installed_at: DateTime<Utc>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct OpenResponse {
    pub id: i32,
    pub app_key: String,
    pub device_id: String,
    pub opened_at: DateTime<Utc>,
}

impl From<app_install::Model> for InstallResponse {
    fn from(m: app_install::Model) -> Self {
        Self {
            id: m.id,
            app_key: m.app_key,
            device_id: m.device_id,
            package_name: m.package_name,
            installed_at: m.installed_at,
        }
    }
}

impl From<app_open::Model> for OpenResponse {
    fn from(m: app_open::Model) -> Self {
        Self {
            id: m.id,
            app_key: m.app_key,
            device_id: m.device_id,
            opened_at: m.opened_at,
        }
    }
}
