use std::fmt;

use async_trait::async_trait;
use dictionary_api::get_definition;
use reqwest::{StatusCode, Url};
use serde::Deserialize;

mod dictionary;
mod dictionary_api;

pub use dictionary::{PartOfSpeech, Phonetic, Word, WordDefinition, WordMeaning};

#[derive(Debug, thiserror::Error)]
pub enum DictionaryError {
    #[error("failed to reach the dictionary API: {0}")]
    Fetch(#[source] reqwest::Error),
    #[error("unexpected dictionary API response: {0}")]
    Deserialize(#[source] serde_json::Error),
    #[error("dictionary API responded with {0}")]
    Status(StatusCode),
    #[error("{0}")]
    NotFound(NotFoundError),
    #[error("dictionary API base URL {0} cannot take path segments")]
    InvalidBaseUrl(String),
}

/// The body the dictionary API sends along with a 404.
#[derive(Debug, Default, Deserialize)]
pub struct NotFoundError {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub resolution: String,
}

impl fmt::Display for NotFoundError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.message.is_empty() {
            f.write_str("no definitions found")
        } else {
            f.write_str(&self.message)
        }
    }
}

/// A successful lookup: the typed first entry plus its untouched JSON.
#[derive(Debug, Clone)]
pub struct Entry {
    pub word: Word,
    pub raw: serde_json::Value,
}

#[async_trait]
pub trait DictionarySource: Send + Sync {
    async fn get_definition(&self, word: &str) -> Result<Entry, DictionaryError>;
}

pub struct Dictionary {
    client: reqwest::Client,
    base_url: Url,
}

impl Dictionary {
    pub fn with_base_url(client: reqwest::Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    pub async fn get_definition(&self, word: &str) -> Result<Entry, DictionaryError> {
        get_definition(&self.client, &self.base_url, word).await
    }
}

#[async_trait]
impl DictionarySource for Dictionary {
    async fn get_definition(&self, word: &str) -> Result<Entry, DictionaryError> {
        Dictionary::get_definition(self, word).await
    }
}
