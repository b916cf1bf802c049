use axum::extract::{Query, State};
use axum::response::Html;

use crate::http::error::ApiError;
use crate::http::types::{AppState, SearchParams};
use crate::{lookup, pages};

pub async fn search_handler(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Html<String>, ApiError> {
    let words = lookup::search(
        &state.storage,
        state.dictionary.as_ref(),
        &state.audio,
        &params.q,
    )
    .await?;
    Ok(Html(pages::search_results(&params.q, &words)))
}
