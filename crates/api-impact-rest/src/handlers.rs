use crate::error::{ErrorResponse, ImpactAPIResult};
use crate::models::CalculatePayload;
use crate::state::State as AppState;
use axum::{Json, extract::State};
use core_impact::stats::{ChartData, ImpactStats};
use core_impact::{Catalog, Equivalences, ImpactEstimate};
use serde_json::json;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "EcoAI Impact API",
        description = "Estimates water, energy and carbon impact of AI model usage.",
        version = "0.1.0",
        license(
            name = "Apache 2.0",
            url = "https://www.apache.org/licenses/LICENSE-2.0.html"
        ),
    ),
    paths(calculate, catalog, chart_data),
    components(
        schemas(
            CalculatePayload,
            ImpactEstimate,
            Equivalences,
            Catalog,
            ChartData,
            ImpactStats,
            ErrorResponse,
        )
    ),
    tags(
        (name = "impact", description = "Impact estimation endpoints")
    )
)]
pub struct ApiDoc;

#[utoipa::path(
    post,
    operation_id = "calculateImpact",
    tags = ["impact"],
    path = "/api/calcular",
    request_body(
        content(
            (
                CalculatePayload = "application/json",
                examples(
                    ("text responses" = (
                        value = json!(CalculatePayload {
                            modelo: "GPT-4 Turbo".to_string(),
                            tipo_consulta: "texto".to_string(),
                            cantidad: Some(json!(5)),
                        })
                    )),
                )
            ),
        )
    ),
    responses(
        (status = 200, description = "Successful Response", body = ImpactEstimate),
        (status = 400, description = "Quantity is not a positive number", body = ErrorResponse),
        (status = 404, description = "Unknown model and query type combination", body = ErrorResponse),
    )
)]
#[tracing::instrument(level = "debug", skip(state), err, ret(level = tracing::Level::TRACE))]
pub async fn calculate(
    State(state): State<AppState>,
    Json(payload): Json<CalculatePayload>,
) -> ImpactAPIResult<Json<ImpactEstimate>> {
    let quantity = payload.quantity()?;
    let estimate =
        state
            .calculator
            .calculate(&payload.modelo, &payload.tipo_consulta, quantity)?;
    Ok(Json(estimate))
}

#[utoipa::path(
    get,
    operation_id = "getCatalog",
    tags = ["impact"],
    path = "/api/catalogo",
    responses(
        (status = 200, description = "Models and query types present in the dataset", body = Catalog),
    )
)]
#[tracing::instrument(level = "debug", skip(state), ret(level = tracing::Level::TRACE))]
pub async fn catalog(State(state): State<AppState>) -> Json<Catalog> {
    Json(state.calculator.table().catalog())
}

#[utoipa::path(
    get,
    operation_id = "getChartData",
    tags = ["impact"],
    path = "/api/estadisticas",
    responses(
        (status = 200, description = "Average impact per model and per query type", body = ChartData),
    )
)]
#[tracing::instrument(level = "debug", skip(state), ret(level = tracing::Level::TRACE))]
pub async fn chart_data(State(state): State<AppState>) -> Json<ChartData> {
    Json(state.calculator.table().chart_data())
}

pub async fn openapi_spec() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
