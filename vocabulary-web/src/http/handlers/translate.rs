use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::http::types::{AppState, ErrorResponse, TranslateRequest, TranslateResponse};

const TRANSLATION_FAILED: &str = "번역에 실패했습니다.";

pub async fn translate_handler(
    State(state): State<AppState>,
    payload: Result<Json<TranslateRequest>, JsonRejection>,
) -> Response {
    let text = match payload {
        Ok(Json(TranslateRequest { text: Some(text) })) => text,
        Ok(_) => return failed(),
        Err(rejection) => {
            tracing::debug!(%rejection, "unreadable translation request");
            return failed();
        }
    };

    let direction = &state.translation;
    match state
        .translator
        .translate(&text, &direction.from, &direction.to)
        .await
    {
        Ok(translated) => Json(TranslateResponse { translated }).into_response(),
        Err(error) => {
            tracing::warn!(%error, "translation failed");
            failed()
        }
    }
}

fn failed() -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: TRANSLATION_FAILED.to_owned(),
        }),
    )
        .into_response()
}
