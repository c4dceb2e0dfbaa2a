use crate::calculator::models::CalculateForm;
use crate::layers::RequestMetadata;
use crate::render;
use crate::state::AppState;
use axum::extract::State;
use axum::response::Html;
use axum::{Extension, Form};

#[tracing::instrument(level = "debug", skip(state), ret(level = tracing::Level::TRACE))]
pub async fn index(State(state): State<AppState>) -> Html<String> {
    Html(render::index_page(&state.calculator.table().catalog()))
}

/// Renders the outcome of a form submission. Calculator errors are shown on
/// the page, so the response is always 200.
#[tracing::instrument(level = "debug", skip(state, metadata), ret(level = tracing::Level::TRACE))]
pub async fn calculate(
    State(state): State<AppState>,
    Extension(metadata): Extension<RequestMetadata>,
    Form(form): Form<CalculateForm>,
) -> Html<String> {
    let outcome = form.quantity().and_then(|quantity| {
        state
            .calculator
            .calculate(&form.modelo, &form.tipo_consulta, quantity)
    });
    if let Err(err) = &outcome {
        tracing::info!(request_id = %metadata.request_id, "Calculation rejected: {err}");
    }
    Html(render::results_page(&form, &outcome))
}
