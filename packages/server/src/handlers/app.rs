use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::instrument;

use crate::aggregator;
use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::gateway::Gateway;
use crate::models::app::*;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/",
    tag = "Apps",
    operation_id = "listApps",
    summary = "List registered apps with install/open counts",
    description = "Returns every registered app ordered by creation time descending, each with its install and open counts, plus dashboard totals. Counts come from per-app filtered count queries against the event collections.",
    responses(
        (status = 200, description = "Apps with stats and totals", body = AppListResponse),
    ),
)]
#[instrument(skip(state))]
pub async fn list_apps(State(state): State<AppState>) -> Result<Json<AppListResponse>, AppError> {
    let gateway = Gateway::new(&state.db);

    let apps = gateway.list_apps().await?;
    let stats = aggregator::stats_by_count(&gateway, &apps).await?;
    let totals = aggregator::totals(&stats);

    let data = apps
        .into_iter()
        .zip(stats)
        .map(|(app, stats)| AppWithStats::new(app, stats))
        .collect();

    Ok(Json(AppListResponse {
        data,
        totals: totals.into(),
    }))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Apps",
    operation_id = "registerApp",
    summary = "Register a new app",
    description = "Registers an app under a freshly generated tracking key of the form `apk_<ms-epoch>_<random>`. The key is returned once in the response for the caller to copy into their SDK configuration. No uniqueness probe is made before the insert; the unique column constraint rejects the practically-impossible collision.",
    request_body = RegisterAppRequest,
    responses(
        (status = 201, description = "App registered", body = AppResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(app_name = %payload.app_name))]
pub async fn register_app(
    State(state): State<AppState>,
    AppJson(payload): AppJson<RegisterAppRequest>,
) -> Result<impl IntoResponse, AppError> {
    let (app_name, package_name) = validate_register(&payload)?;

    let gateway = Gateway::new(&state.db);
    let model = gateway.insert_app(&app_name, &package_name).await?;

    tracing::info!(id = model.id, app_key = %model.app_key, "registered app");
    Ok((StatusCode::CREATED, Json(AppResponse::from(model))))
}

#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Apps",
    operation_id = "updateApp",
    summary = "Update an app's name or package",
    description = "Partially updates an app using PATCH semantics. The tracking key and creation time never change, so existing install/open events keep referencing the app. An empty payload returns the current resource unchanged.",
    params(("id" = i32, Path, description = "App ID")),
    request_body = UpdateAppRequest,
    responses(
        (status = 200, description = "App updated", body = AppResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "App not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(id))]
pub async fn update_app(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateAppRequest>,
) -> Result<Json<AppResponse>, AppError> {
    validate_update(&payload)?;

    let gateway = Gateway::new(&state.db);

    if payload == UpdateAppRequest::default() {
        let existing = gateway.find_app(id).await?;
        return Ok(Json(existing.into()));
    }

    let model = gateway
        .update_app(
            id,
            payload.app_name.as_deref().map(str::trim),
            payload.package_name.as_deref().map(str::trim),
        )
        .await?;

    Ok(Json(model.into()))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Apps",
    operation_id = "deleteApp",
    summary = "Delete an app and its tracked events",
    description = "Permanently deletes an app together with every install and open event referencing its key. Children are removed before the parent inside one transaction, so no orphaned event rows survive a failure.",
    params(("id" = i32, Path, description = "App ID")),
    responses(
        (status = 204, description = "App deleted"),
        (status = 404, description = "App not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn delete_app(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let gateway = Gateway::new(&state.db);
    let deleted = gateway.delete_app(id).await?;

    tracing::info!(
        id,
        installs = deleted.installs,
        opens = deleted.opens,
        "deleted app and its events"
    );
    Ok(StatusCode::NO_CONTENT)
}
