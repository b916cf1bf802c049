// https://dictionaryapi.dev/ - free, no key, one entry per etymology

use reqwest::{StatusCode, Url};
use serde_json::Value;

use crate::{DictionaryError, Entry, NotFoundError, Word};

pub(crate) async fn get_definition(
    client: &reqwest::Client,
    base_url: &Url,
    word: &str,
) -> Result<Entry, DictionaryError> {
    let url = entry_url(base_url, word)?;
    let res = client.get(url).send().await.map_err(DictionaryError::Fetch)?;
    let status = res.status();
    let body = res.bytes().await.map_err(DictionaryError::Fetch)?;

    if status == StatusCode::NOT_FOUND {
        let not_found = serde_json::from_slice::<NotFoundError>(&body).unwrap_or_default();
        return Err(DictionaryError::NotFound(not_found));
    }
    if !status.is_success() {
        return Err(DictionaryError::Status(status));
    }

    let entries: Vec<Value> = serde_json::from_slice(&body).map_err(DictionaryError::Deserialize)?;
    first_entry(entries, word)
}

fn entry_url(base_url: &Url, word: &str) -> Result<Url, DictionaryError> {
    let mut url = base_url.clone();
    url.path_segments_mut()
        .map_err(|_| DictionaryError::InvalidBaseUrl(base_url.to_string()))?
        .pop_if_empty()
        .push(word);
    Ok(url)
}

/// Only the first result is used, the rest are alternative etymologies. An entry
/// without a headword is filed under the word that was looked up.
pub(crate) fn first_entry(entries: Vec<Value>, looked_up: &str) -> Result<Entry, DictionaryError> {
    let raw = entries
        .into_iter()
        .next()
        .ok_or_else(|| DictionaryError::NotFound(NotFoundError::default()))?;
    let mut word =
        serde_json::from_value::<Word>(raw.clone()).map_err(DictionaryError::Deserialize)?;
    if word.word.trim().is_empty() {
        word.word = looked_up.to_owned();
    }
    Ok(Entry { word, raw })
}
