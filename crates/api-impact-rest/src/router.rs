use crate::handlers::{calculate, catalog, chart_data, openapi_spec};
use crate::state::State;
use axum::Router;
use axum::routing::{get, post};

pub fn create_router() -> Router<State> {
    Router::new()
        .route("/calcular", post(calculate))
        .route("/catalogo", get(catalog))
        .route("/estadisticas", get(chart_data))
        .route("/openapi.json", get(openapi_spec))
}
