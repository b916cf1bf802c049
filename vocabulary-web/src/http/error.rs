use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::http::types::MessageResponse;

const STORAGE_FAILURE: &str = "서버 오류가 발생했습니다.";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(&'static str),
    #[error("{0}")]
    BadRequest(&'static str),
    #[error("storage failure: {0}")]
    Storage(#[from] sqlx::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, *message),
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, *message),
            ApiError::Storage(error) => {
                tracing::error!(%error, "request failed on storage");
                (StatusCode::INTERNAL_SERVER_ERROR, STORAGE_FAILURE)
            }
        };
        (status, Json(MessageResponse::new(message))).into_response()
    }
}
