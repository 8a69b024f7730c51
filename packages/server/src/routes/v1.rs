use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::handlers;
use crate::state::AppState;

pub fn routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .nest("/apps", app_routes())
        .routes(routes!(handlers::event::list_installs))
        .routes(routes!(handlers::event::list_opens))
}

fn app_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::app::list_apps,
            handlers::app::register_app
        ))
        .routes(routes!(handlers::app::update_app, handlers::app::delete_app))
}
