use axum::routing::{get, post};
use axum::Router;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::http::handlers::{health, home, search, translate, vocabulary};
use crate::http::types::AppState;

pub fn create_router(app_state: AppState) -> Router {
    let audio_files = ServeDir::new(app_state.audio.directory());
    let audio_prefix = app_state.audio.url_prefix().to_owned();

    Router::new()
        .route("/", get(home::home_handler))
        .route("/health", get(health::healthcheck_handler))
        .route("/search", get(search::search_handler))
        .route("/translate", post(translate::translate_handler))
        .route("/vocabulary", get(vocabulary::list_handler))
        .route("/vocabulary/add/:word_id", post(vocabulary::add_handler))
        .route("/vocabulary/remove/:vocab_id", post(vocabulary::remove_handler))
        .route("/vocabulary/edit/:vocab_id", post(vocabulary::edit_note_handler))
        .nest_service(&audio_prefix, audio_files)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
