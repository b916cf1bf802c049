use axum::extract::rejection::{FormRejection, JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::response::Html;
use axum::{Form, Json};

use crate::http::error::ApiError;
use crate::http::types::{AddVocabularyForm, AppState, EditNoteRequest, MessageResponse};
use crate::pages;
use crate::storage::VocabularyAdd;

const ADDED: &str = "단어장에 추가되었습니다.";
const ALREADY_PRESENT: &str = "이미 단어장에 있는 단어입니다.";
const REMOVED: &str = "단어장에서 제거되었습니다.";
const NOTE_UPDATED: &str = "노트가 수정되었습니다.";
const NOTE_MISSING: &str = "노트 수정에 실패했습니다.";
const WORD_NOT_FOUND: &str = "단어를 찾을 수 없습니다.";
const ENTRY_NOT_FOUND: &str = "단어장에서 항목을 찾을 수 없습니다.";

pub async fn list_handler(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let items = state.storage.list_vocabulary().await?;
    Ok(Html(pages::vocabulary(&items)))
}

/// Ids are integers; anything else names no row.
fn row_id(path: Result<Path<i64>, PathRejection>, missing: &'static str) -> Result<i64, ApiError> {
    path.map(|Path(id)| id).map_err(|_| ApiError::NotFound(missing))
}

pub async fn add_handler(
    path: Result<Path<i64>, PathRejection>,
    State(state): State<AppState>,
    form: Result<Form<AddVocabularyForm>, FormRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let word_id = row_id(path, WORD_NOT_FOUND)?;
    // The note is optional, so an absent or unreadable form just means no note.
    let note = form
        .ok()
        .and_then(|Form(form)| form.note)
        .unwrap_or_default();

    if state.storage.get_word(word_id).await?.is_none() {
        return Err(ApiError::NotFound(WORD_NOT_FOUND));
    }

    match state.storage.add_vocabulary(word_id, &note).await? {
        VocabularyAdd::Added(entry) => {
            tracing::info!(word_id, vocab_id = entry.id, "added word to vocabulary");
            Ok(Json(MessageResponse::new(ADDED)))
        }
        VocabularyAdd::AlreadyPresent => Ok(Json(MessageResponse::new(ALREADY_PRESENT))),
    }
}

pub async fn remove_handler(
    path: Result<Path<i64>, PathRejection>,
    State(state): State<AppState>,
) -> Result<Json<MessageResponse>, ApiError> {
    let vocab_id = row_id(path, ENTRY_NOT_FOUND)?;
    if !state.storage.remove_vocabulary(vocab_id).await? {
        return Err(ApiError::NotFound(ENTRY_NOT_FOUND));
    }
    tracing::info!(vocab_id, "removed word from vocabulary");
    Ok(Json(MessageResponse::new(REMOVED)))
}

pub async fn edit_note_handler(
    path: Result<Path<i64>, PathRejection>,
    State(state): State<AppState>,
    payload: Result<Json<EditNoteRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let vocab_id = row_id(path, ENTRY_NOT_FOUND)?;
    if state.storage.get_vocabulary(vocab_id).await?.is_none() {
        return Err(ApiError::NotFound(ENTRY_NOT_FOUND));
    }

    let Ok(Json(EditNoteRequest { note: Some(note) })) = payload else {
        return Err(ApiError::BadRequest(NOTE_MISSING));
    };

    // The entry may have been removed since the check above.
    if !state.storage.update_vocabulary_note(vocab_id, &note).await? {
        return Err(ApiError::NotFound(ENTRY_NOT_FOUND));
    }
    Ok(Json(MessageResponse::new(NOTE_UPDATED)))
}
