use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::aggregator::{AppStats, DashboardTotals};
use crate::entity::app;
use crate::error::AppError;

#[derive(Deserialize, utoipa::ToSchema)]
pub struct RegisterAppRequest {
    /// Display name shown on the dashboard.
    pub app_name: String,
    /// Android package identifier, e.g. `com.demo.app`.
    pub package_name: String,
}

#[derive(Deserialize, Default, PartialEq, utoipa::ToSchema)]
pub struct UpdateAppRequest {
    pub app_name: Option<String>,
    pub package_name: Option<String>,
}

// ---------------------------------------------------------------------------
// Response DTOs
// ---------------------------------------------------------------------------

#[derive(Serialize, utoipa::ToSchema)]
pub struct AppResponse {
    pub id: i32,
    /// Tracking key, shown once at registration for the caller to copy.
    pub app_key: String,
    pub app_name: String,
    pub package_name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct AppWithStats {
    pub id: i32,
    pub app_key: String,
    pub app_name: String,
    pub package_name: String,
    pub created_at: DateTime<Utc>,
    /// Number of install events referencing this app's key.
    pub installs: u64,
    /// Number of open events referencing this app's key.
    pub opens: u64,
}

/// Headline counters across every registered app.
#[derive(Serialize, utoipa::ToSchema)]
pub struct TotalsBody {
    pub apps: u64,
    pub installs: u64,
    pub opens: u64,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct AppListResponse {
    pub data: Vec<AppWithStats>,
    pub totals: TotalsBody,
}

impl From<app::Model> for AppResponse {
    fn from(m: app::Model) -> Self {
        Self {
            id: m.id,
            app_key: m.app_key,
            app_name: m.app_name,
            package_name: m.package_name,
            created_at: m.created_at,
        }
    }
}

impl AppWithStats {
    pub fn new(m: app::Model, stats: AppStats) -> Self {
        Self {
            id: m.id,
            app_key: m.app_key,
            app_name: m.app_name,
            package_name: m.package_name,
            created_at: m.created_at,
            installs: stats.installs,
            opens: stats.opens,
        }
    }
}

impl From<DashboardTotals> for TotalsBody {
    fn from(t: DashboardTotals) -> Self {
        Self {
            apps: t.apps,
            installs: t.installs,
            opens: t.opens,
        }
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a required name-like field: 1-256 characters after trimming.
fn validate_field(value: &str, name: &str) -> Result<(), AppError> {
    let value = value.trim();
    if value.is_empty() || value.chars().count() > 256 {
        return Err(AppError::Validation(format!(
            "{name} must be 1-256 characters"
        )));
    }
    Ok(())
}

/// Validate a registration payload, returning the trimmed field values.
pub fn validate_register(payload: &RegisterAppRequest) -> Result<(String, String), AppError> {
    validate_field(&payload.app_name, "app_name")?;
    validate_field(&payload.package_name, "package_name")?;
    Ok((
        payload.app_name.trim().to_string(),
        payload.package_name.trim().to_string(),
    ))
}

/// Validate an update payload. Fields that are present must be non-empty.
pub fn validate_update(payload: &UpdateAppRequest) -> Result<(), AppError> {
    if let Some(ref name) = payload.app_name {
        validate_field(name, "app_name")?;
    }
    if let Some(ref package) = payload.package_name {
        validate_field(package, "package_name")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_payload_is_trimmed() {
        let payload = RegisterAppRequest {
            app_name: "  Demo  ".into(),
            package_name: " com.demo.app ".into(),
        };
        let (name, package) = validate_register(&payload).unwrap();
        assert_eq!(name, "Demo");
        assert_eq!(package, "com.demo.app");
    }

    #[test]
    fn register_rejects_blank_fields() {
        let payload = RegisterAppRequest {
            app_name: "   ".into(),
            package_name: "com.demo.app".into(),
        };
        assert!(validate_register(&payload).is_err());

        let payload = RegisterAppRequest {
            app_name: "Demo".into(),
            package_name: String::new(),
        };
        assert!(validate_register(&payload).is_err());
    }

    #[test]
    fn register_rejects_oversized_fields() {
        let payload = RegisterAppRequest {
            app_name: "x".repeat(257),
            package_name: "com.demo.app".into(),
        };
        assert!(validate_register(&payload).is_err());
    }

    #[test]
    fn update_allows_absent_fields_but_not_blank_ones() {
        assert!(validate_update(&UpdateAppRequest::default()).is_ok());
        assert!(
            validate_update(&UpdateAppRequest {
                app_name: Some("Renamed".into()),
                package_name: None,
            })
            .is_ok()
        );
        assert!(
            validate_update(&UpdateAppRequest {
                app_name: Some("  ".into()),
                package_name: None,
            })
            .is_err()
        );
    }
}
