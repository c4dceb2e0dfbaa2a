use crate::state::AppState;
use axum::Router;
use axum::routing::get;

use crate::web_assets::handler::{WEB_ASSETS_MOUNT_PATH, static_handler};

pub fn create_router() -> Router<AppState> {
    Router::new().route(
        format!("{WEB_ASSETS_MOUNT_PATH}{{*path}}").as_str(),
        get(static_handler),
    )
}
