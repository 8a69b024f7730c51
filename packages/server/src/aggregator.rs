//! Per-app install/open aggregation.
//!
//! Two strategies produce identical counts: per-app count queries against
//! the backend (canonical, used by the dashboard handler) and a client-side
//! filter over bulk-fetched rows. The latter is O(apps × events) and only
//! acceptable at dashboard scale, but it is pure and cheap to test against.

use crate::entity::{app, app_install, app_open};
use crate::error::AppError;
use crate::gateway::Gateway;

/// Install/open counts for a single app.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AppStats {
    pub installs: u64,
    pub opens: u64,
}

/// Headline numbers for the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardTotals {
    pub apps: u64,
    pub installs: u64,
    pub opens: u64,
}

/// Count installs/opens for each app with one filtered count query per
/// collection per app.
pub async fn stats_by_count(
    gateway: &Gateway<'_>,
    apps: &[app::Model],
) -> Result<Vec<AppStats>, AppError> {
    let mut stats = Vec::with_capacity(apps.len());
    for app in apps {
        stats.push(AppStats {
            installs: gateway.count_installs(&app.app_key).await?,
            opens: gateway.count_opens(&app.app_key).await?,
        });
    }
    Ok(stats)
}

/// Count installs/opens for each app by filtering bulk-fetched event rows.
pub fn stats_from_rows(
    apps: &[app::Model],
    installs: &[app_install::Model],
    opens: &[app_open::Model],
) -> Vec<AppStats> {
    apps.iter()
        .map(|app| AppStats {
            installs: installs.iter().filter(|i| i.app_key == app.app_key).count() as u64,
            opens: opens.iter().filter(|o| o.app_key == app.app_key).count() as u64,
        })
        .collect()
}

/// Sum per-app stats into dashboard totals.
pub fn totals(stats: &[AppStats]) -> DashboardTotals {
    DashboardTotals {
        apps: stats.len() as u64,
        installs: stats.iter().map(|s| s.installs).sum(),
        opens: stats.iter().map(|s| s.opens).sum(),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use chrono::{TimeZone, Utc};
    use sea_orm::{DatabaseBackend, MockDatabase, Value};

    use super::*;

    fn app(id: i32, key: &str) -> app::Model {
        app::Model {
            id,
            app_key: key.to_string(),
            app_name: format!("App {id}"),
            package_name: format!("com.example.app{id}"),
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    fn install(id: i32, key: &str) -> app_install::Model {
        app_install::Model {
            id,
            app_key: key.to_string(),
            device_id: format!("device-{id}"),
            package_name: "com.example.app".to_string(),
            installed_at: Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap(),
        }
    }

    fn open(id: i32, key: &str) -> app_open::Model {
        app_open::Model {
            id,
            app_key: key.to_string(),
            device_id: format!("device-{id}"),
            opened_at: Utc.with_ymd_and_hms(2024, 1, 3, 0, 0, 0).unwrap(),
        }
    }

    fn count_row(n: i64) -> BTreeMap<&'static str, Value> {
        BTreeMap::from([("num_items", Value::BigInt(Some(n)))])
    }

    #[test]
    fn row_filtering_counts_only_matching_keys() {
        let apps = [app(1, "apk_1_aaa"), app(2, "apk_2_bbb")];
        let installs = [
            install(1, "apk_1_aaa"),
            install(2, "apk_1_aaa"),
            install(3, "apk_2_bbb"),
            install(4, "apk_9_zzz"), // orphan, counted for no app
        ];
        let opens = [open(1, "apk_2_bbb"), open(2, "apk_2_bbb")];

        let stats = stats_from_rows(&apps, &installs, &opens);
        assert_eq!(
            stats,
            vec![
                AppStats {
                    installs: 2,
                    opens: 0
                },
                AppStats {
                    installs: 1,
                    opens: 2
                },
            ]
        );
    }

    #[test]
    fn totals_sum_across_apps() {
        let stats = [
            AppStats {
                installs: 2,
                opens: 0,
            },
            AppStats {
                installs: 1,
                opens: 2,
            },
        ];
        assert_eq!(
            totals(&stats),
            DashboardTotals {
                apps: 2,
                installs: 3,
                opens: 2
            }
        );
    }

    #[test]
    fn no_apps_means_zero_totals() {
        assert_eq!(totals(&[]), DashboardTotals::default());
        assert!(stats_from_rows(&[], &[], &[]).is_empty());
    }

    #[tokio::test]
    async fn both_strategies_agree_on_the_same_data() {
        let apps = [app(1, "apk_1_aaa"), app(2, "apk_2_bbb")];
        let installs = [
            install(1, "apk_1_aaa"),
            install(2, "apk_1_aaa"),
            install(3, "apk_2_bbb"),
        ];
        let opens = [open(1, "apk_2_bbb"), open(2, "apk_2_bbb")];

        let from_rows = stats_from_rows(&apps, &installs, &opens);

        // Count queries answered with the same underlying data, in the order
        // the count strategy issues them: installs then opens, per app.
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([
                vec![count_row(2)],
                vec![count_row(0)],
                vec![count_row(1)],
                vec![count_row(2)],
            ])
            .into_connection();
        let gateway = Gateway::new(&db);
        let by_count = stats_by_count(&gateway, &apps).await.unwrap();

        assert_eq!(from_rows, by_count);
    }
}
