use axum::{Json, response::IntoResponse};
use core_impact::error::CalculatorError;
use http::StatusCode;
use serde::{Deserialize, Serialize};
use snafu::prelude::*;

#[derive(Snafu, Debug)]
#[snafu(visibility(pub(crate)))]
pub enum ImpactAPIError {
    #[snafu(transparent)]
    Calculator { source: CalculatorError },
}
pub type ImpactAPIResult<T> = Result<T, ImpactAPIError>;

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub message: String,
    pub status_code: u16,
}

pub trait IntoStatusCode {
    fn status_code(&self) -> StatusCode;
}

impl IntoStatusCode for ImpactAPIError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Calculator { source } => match source {
                CalculatorError::InvalidQuantity => StatusCode::BAD_REQUEST,
                CalculatorError::CombinationNotFound { .. } => StatusCode::NOT_FOUND,
            },
        }
    }
}

impl IntoResponse for ImpactAPIError {
    fn into_response(self) -> axum::response::Response {
        let code = self.status_code();
        let error = ErrorResponse {
            message: self.to_string(),
            status_code: code.as_u16(),
        };
        (code, Json(error)).into_response()
    }
}
