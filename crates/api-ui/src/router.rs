use crate::calculator::handlers::{calculate, index};
use crate::layers::add_request_metadata;
use crate::state::AppState;
use crate::web_assets::router::create_router as create_web_assets_router;
use axum::Router;
use axum::routing::{get, post};
use tower_http::sensitive_headers::SetSensitiveHeadersLayer;

pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/calcular", post(calculate))
        .merge(create_web_assets_router())
        .layer(SetSensitiveHeadersLayer::new([
            axum::http::header::AUTHORIZATION,
            axum::http::header::COOKIE,
        ]))
        .layer(axum::middleware::from_fn(add_request_metadata))
}
