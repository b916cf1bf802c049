pub mod audio;
pub mod config;
pub mod http;
pub mod lookup;
pub mod pages;
pub mod storage;

use std::sync::Arc;

use anyhow::Context;
use dictionary::Dictionary;
use translator::GoogleTranslator;

use crate::audio::{AudioCache, GoogleSpeech};
use crate::config::Config;
use crate::http::{AppState, TranslationDirection};
use crate::storage::Storage;

/// Wires the real upstream clients and the database described by `config`.
pub async fn build_state(config: &Config) -> anyhow::Result<AppState> {
    let mut client = reqwest::Client::builder();
    if let Some(timeout) = config.http_timeout {
        client = client.timeout(timeout);
    }
    let client = client.build().context("failed to build the HTTP client")?;

    let storage = Storage::initialize(&config.database_url)
        .await
        .with_context(|| format!("failed to open database {}", config.database_url))?;

    tokio::fs::create_dir_all(&config.audio_directory)
        .await
        .with_context(|| {
            format!(
                "failed to create audio directory {}",
                config.audio_directory.display()
            )
        })?;
    let speech = GoogleSpeech::with_api_url(
        client.clone(),
        config.speech_api_url.clone(),
        config.speech_language.clone(),
    );

    Ok(AppState {
        storage,
        dictionary: Arc::new(Dictionary::with_base_url(
            client.clone(),
            config.dictionary_api_url.clone(),
        )),
        translator: Arc::new(GoogleTranslator::with_api_url(
            client,
            config.translate_api_url.clone(),
        )),
        audio: Arc::new(AudioCache::new(
            &config.audio_directory,
            &config.audio_url_prefix,
            Arc::new(speech),
        )),
        translation: TranslationDirection {
            from: config.translate_from.clone(),
            to: config.translate_to.clone(),
        },
    })
}
