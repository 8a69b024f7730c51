//! Data access gateway over the three tracking collections.
//!
//! The gateway borrows an explicitly constructed connection instead of going
//! through a process-wide client, so tests can hand it a mock connection and
//! callers decide where the connection lives.

use chrono::Utc;
use common::generate_app_key;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

use crate::entity::{app, app_install, app_open};
use crate::error::AppError;

/// Rows removed by a cascade delete, children only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CascadeDelete {
    pub installs: u64,
    pub opens: u64,
}

pub struct Gateway<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> Gateway<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// All registered apps, newest first.
    pub async fn list_apps(&self) -> Result<Vec<app::Model>, AppError> {
        Ok(app::Entity::find()
            .order_by_desc(app::Column::CreatedAt)
            .all(self.db)
            .await?)
    }

    /// All install events, newest first.
    pub async fn list_installs(&self) -> Result<Vec<app_install::Model>, AppError> {
        Ok(app_install::Entity::find()
            .order_by_desc(app_install::Column::InstalledAt)
            .all(self.db)
            .await?)
    }

    /// All open events, newest first.
    pub async fn list_opens(&self) -> Result<Vec<app_open::Model>, AppError> {
        Ok(app_open::Entity::find()
            .order_by_desc(app_open::Column::OpenedAt)
            .all(self.db)
            .await?)
    }

    pub async fn count_installs(&self, app_key: &str) -> Result<u64, AppError> {
        Ok(app_install::Entity::find()
            .filter(app_install::Column::AppKey.eq(app_key))
            .count(self.db)
            .await?)
    }

    pub async fn count_opens(&self, app_key: &str) -> Result<u64, AppError> {
        Ok(app_open::Entity::find()
            .filter(app_open::Column::AppKey.eq(app_key))
            .count(self.db)
            .await?)
    }

    /// Insert one app row with a freshly generated tracking key.
    ///
    /// No uniqueness probe is made before the insert; the key format makes a
    /// collision practically impossible and the unique column constraint
    /// rejects the pathological case.
    pub async fn insert_app(&self, app_name: &str, package_name: &str) -> Result<app::Model, AppError> {
        let new_app = app::ActiveModel {
            app_key: Set(generate_app_key()),
            app_name: Set(app_name.to_string()),
            package_name: Set(package_name.to_string()),
            created_at: Set(Utc::now()),
            ..Default::default()
        };
        Ok(new_app.insert(self.db).await?)
    }

    /// Update the mutable fields of one app. The tracking key and creation
    /// time never change.
    pub async fn update_app(
        &self,
        id: i32,
        app_name: Option<&str>,
        package_name: Option<&str>,
    ) -> Result<app::Model, AppError> {
        let existing = self.find_app(id).await?;
        let mut active: app::ActiveModel = existing.into();

        if let Some(name) = app_name {
            active.app_name = Set(name.to_string());
        }
        if let Some(package) = package_name {
            active.package_name = Set(package.to_string());
        }

        Ok(active.update(self.db).await?)
    }

    /// Delete one app and every install/open row sharing its key.
    ///
    /// Children are removed before the parent, all inside one transaction,
    /// so a failure partway through leaves no orphaned event rows.
    pub async fn delete_app(&self, id: i32) -> Result<CascadeDelete, AppError> {
        let txn = self.db.begin().await?;

        let existing = app::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::NotFound("App not found".into()))?;

        let installs = app_install::Entity::delete_many()
            .filter(app_install::Column::AppKey.eq(existing.app_key.clone()))
            .exec(&txn)
            .await?
            .rows_affected;
        let opens = app_open::Entity::delete_many()
            .filter(app_open::Column::AppKey.eq(existing.app_key.clone()))
            .exec(&txn)
            .await?
            .rows_affected;
        app::Entity::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;
        Ok(CascadeDelete { installs, opens })
    }

    pub async fn find_app(&self, id: i32) -> Result<app::Model, AppError> {
        app::Entity::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or_else(|| AppError::NotFound("App not found".into()))
    }
}
