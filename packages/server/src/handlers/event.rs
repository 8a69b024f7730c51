use axum::Json;
use axum::extract::State;
use tracing::instrument;

use crate::error::AppError;
use crate::gateway::Gateway;
use crate::models::event::{InstallResponse, OpenResponse};
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/installs",
    tag = "Events",
    operation_id = "listInstalls",
    summary = "List install events",
    description = "Returns every recorded install event, newest first. Events are written by the tracking SDK embedded in installed apps; this API only reads them.",
    responses(
        (status = 200, description = "Install events", body = [InstallResponse]),
    ),
)]
#[instrument(skip(state))]
pub async fn list_installs(
    State(state): State<AppState>,
) -> Result<Json<Vec<InstallResponse>>, AppError> {
    let rows = Gateway::new(&state.db).list_installs().await?;
    Ok(Json(rows.into_iter().map(InstallResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/opens",
    tag = "Events",
    operation_id = "listOpens",
    summary = "List open events",
    description = "Returns every recorded open event, newest first.",
    responses(
        (status = 200, description = "Open events", body = [OpenResponse]),
    ),
)]
#[instrument(skip(state))]
pub async fn list_opens(State(state): State<AppState>) -> Result<Json<Vec<OpenResponse>>, AppError> {
    let rows = Gateway::new(&state.db).list_opens().await?;
    Ok(Json(rows.into_iter().map(OpenResponse::from).collect()))
}
