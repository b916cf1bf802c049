use dictionary::{DictionaryError, DictionarySource};

use crate::audio::AudioCache;
use crate::storage::{NewWord, Storage, WordEntry};

/// What the dictionary had to say about a word that is not cached yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedWord {
    pub word: String,
    pub phonetic: Option<String>,
    pub audio_url: Option<String>,
    pub raw_data: String,
}

impl FetchedWord {
    fn as_new_word(&self) -> NewWord<'_> {
        NewWord {
            word: &self.word,
            phonetic: self.phonetic.as_deref(),
            audio_url: self.audio_url.as_deref(),
            raw_data: Some(&self.raw_data),
        }
    }
}

/// Looks `word` up in the dictionary, generating pronunciation audio when the
/// dictionary has none. Every failure is a soft miss.
pub async fn fetch_word_info(
    dictionary: &dyn DictionarySource,
    audio: &AudioCache,
    word: &str,
) -> Option<FetchedWord> {
    let entry = match dictionary.get_definition(word).await {
        Ok(entry) => entry,
        Err(DictionaryError::NotFound(not_found)) => {
            tracing::debug!(word, %not_found, "dictionary has no entry");
            return None;
        }
        Err(error) => {
            tracing::warn!(word, %error, "dictionary lookup failed");
            return None;
        }
    };

    let audio_url = match entry.word.audio_url() {
        Some(url) => Some(url.to_owned()),
        None => audio.audio_for(word).await,
    };

    Some(FetchedWord {
        word: entry.word.word.clone(),
        phonetic: entry.word.phonetic_text().map(str::to_owned),
        audio_url,
        raw_data: entry.raw.to_string(),
    })
}

/// Read-through search: cached words containing `query`, or on a miss a single
/// freshly fetched and stored word.
pub async fn search(
    storage: &Storage,
    dictionary: &dyn DictionarySource,
    audio: &AudioCache,
    query: &str,
) -> sqlx::Result<Vec<WordEntry>> {
    let words = storage.find_words_containing(query).await?;
    if !words.is_empty() || query.trim().is_empty() {
        return Ok(words);
    }

    // Fetched words are stored under their canonical spelling, so a query that
    // differs only in case or padding may already be cached under that.
    let lookup = query.trim().to_lowercase();
    if lookup != query {
        let words = storage.find_words_containing(&lookup).await?;
        if !words.is_empty() {
            return Ok(words);
        }
    }

    let Some(fetched) = fetch_word_info(dictionary, audio, &lookup).await else {
        return Ok(Vec::new());
    };

    match storage.insert_word(&fetched.as_new_word()).await {
        Ok(entry) => {
            tracing::info!(query, word = %entry.word, id = entry.id, "cached new dictionary entry");
            Ok(vec![entry])
        }
        Err(error) => {
            tracing::error!(query, %error, "failed to store dictionary entry");
            Ok(Vec::new())
        }
    }
}
