use std::sync::Arc;

use dictionary::DictionarySource;
use serde::{Deserialize, Serialize};
use translator::{LanguageCode, Translator};

use crate::audio::AudioCache;
use crate::storage::Storage;

/// Everything a handler needs, built once at start-up.
#[derive(Clone)]
pub struct AppState {
    pub storage: Storage,
    pub dictionary: Arc<dyn DictionarySource>,
    pub translator: Arc<dyn Translator>,
    pub audio: Arc<AudioCache>,
    pub translation: TranslationDirection,
}

#[derive(Debug, Clone)]
pub struct TranslationDirection {
    pub from: LanguageCode,
    pub to: LanguageCode,
}

impl Default for TranslationDirection {
    fn default() -> Self {
        Self {
            from: "en".to_owned(),
            to: "ko".to_owned(),
        }
    }
}

#[derive(Deserialize, Debug)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

#[derive(Deserialize, Debug)]
pub struct TranslateRequest {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Serialize, Debug)]
pub struct TranslateResponse {
    pub translated: String,
}

#[derive(Serialize, Debug)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Deserialize, Debug)]
pub struct AddVocabularyForm {
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct EditNoteRequest {
    /// `null` counts as missing.
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Serialize, Debug)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
