use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use synth::SynthError;
use thiserror::Error;

/// Request failures, rendered as `{"detail": ...}` with a matching status.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Synth(#[from] SynthError),
}

#[derive(Serialize)]
struct ErrorBody {
    detail: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Synth(SynthError::Upstream(_)) => StatusCode::BAD_GATEWAY,
            ApiError::Synth(SynthError::MalformedOutput(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = self.to_string();

        tracing::warn!(status = status.as_u16(), error = %detail, "Request failed");

        (status, Json(ErrorBody { detail })).into_response()
    }
}
