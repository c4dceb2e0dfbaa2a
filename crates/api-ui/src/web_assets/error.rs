use crate::error::{ErrorResponse, IntoStatusCode};
use axum::Json;
use axum::response::IntoResponse;
use http::Error;
use http::StatusCode;
use snafu::Snafu;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum WebAssetsError {
    #[snafu(display("File not found: {path}"))]
    NotFound { path: String },

    #[snafu(display("Response body error: {source}"))]
    ResponseBody { source: Error },
}

pub type WebAssetsResult<T> = std::result::Result<T, WebAssetsError>;

impl IntoStatusCode for WebAssetsError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::ResponseBody { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for WebAssetsError {
    fn into_response(self) -> axum::response::Response {
        let code = self.status_code();
        let error = ErrorResponse {
            message: self.to_string(),
            status_code: code.as_u16(),
        };
        (code, Json(error)).into_response()
    }
}
