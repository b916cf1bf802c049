use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use sha2::{Digest, Sha256};

const AUDIO_EXTENSION: &str = "mp3";

#[derive(Debug, thiserror::Error)]
pub enum SpeechError {
    #[error("failed to reach the speech service: {0}")]
    Network(#[from] reqwest::Error),
    #[error("speech service responded with {0}")]
    Status(StatusCode),
    #[error("speech service returned no audio")]
    EmptyAudio,
    #[error("failed to store synthesized audio: {0}")]
    Io(#[from] std::io::Error),
}

/// Turns text into encoded (MP3) speech.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, SpeechError>;
}

/// Google Translate's text-to-speech endpoint (`translate_tts`, `client=tw-ob`).
pub struct GoogleSpeech {
    client: reqwest::Client,
    api_url: Url,
    language: String,
}

impl GoogleSpeech {
    pub fn with_api_url(client: reqwest::Client, api_url: Url, language: impl Into<String>) -> Self {
        Self {
            client,
            api_url,
            language: language.into(),
        }
    }
}

#[async_trait]
impl SpeechSynthesizer for GoogleSpeech {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, SpeechError> {
        let res = self
            .client
            .get(self.api_url.clone())
            .query(&[
                ("ie", "UTF-8"),
                ("client", "tw-ob"),
                ("tl", self.language.as_str()),
                ("q", text),
            ])
            .send()
            .await?;
        if !res.status().is_success() {
            return Err(SpeechError::Status(res.status()));
        }
        let audio = res.bytes().await?;
        if audio.is_empty() {
            return Err(SpeechError::EmptyAudio);
        }
        Ok(audio.to_vec())
    }
}

/// On-disk cache of synthesized pronunciations, one file per word named by the
/// SHA-256 of the word text.
pub struct AudioCache {
    directory: PathBuf,
    url_prefix: String,
    synthesizer: Arc<dyn SpeechSynthesizer>,
}

impl AudioCache {
    pub fn new(
        directory: impl Into<PathBuf>,
        url_prefix: impl Into<String>,
        synthesizer: Arc<dyn SpeechSynthesizer>,
    ) -> Self {
        Self {
            directory: directory.into(),
            url_prefix: url_prefix.into().trim_end_matches('/').to_owned(),
            synthesizer,
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn url_prefix(&self) -> &str {
        &self.url_prefix
    }

    pub fn file_name_for(word: &str) -> String {
        let digest = Sha256::digest(word.as_bytes());
        format!("{}.{AUDIO_EXTENSION}", hex::encode(digest))
    }

    /// The server-relative URL of the pronunciation for `word`, synthesizing it on
    /// first use. Synthesis failures are logged and yield `None`.
    pub async fn audio_for(&self, word: &str) -> Option<String> {
        let file_name = Self::file_name_for(word);
        match self.ensure_file(word, &file_name).await {
            Ok(()) => Some(format!("{}/{file_name}", self.url_prefix)),
            Err(error) => {
                tracing::warn!(word, %error, "could not generate pronunciation audio");
                None
            }
        }
    }

    async fn ensure_file(&self, word: &str, file_name: &str) -> Result<(), SpeechError> {
        let path = self.directory.join(file_name);
        if tokio::fs::try_exists(&path).await? {
            tracing::debug!(word, path = %path.display(), "pronunciation audio already cached");
            return Ok(());
        }

        let audio = self.synthesizer.synthesize(word).await?;
        tokio::fs::create_dir_all(&self.directory).await?;
        // Readers only ever see complete files. Concurrent writers of the same word
        // each get their own partial file and the last rename wins.
        let partial = self
            .directory
            .join(format!("{file_name}.{}.part", uuid::Uuid::new_v4().simple()));
        tokio::fs::write(&partial, &audio).await?;
        tokio::fs::rename(&partial, &path).await?;
        tracing::info!(word, path = %path.display(), bytes = audio.len(), "cached synthesized pronunciation");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    struct CountingSpeech {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl SpeechSynthesizer for CountingSpeech {
        async fn synthesize(&self, text: &str) -> Result<Vec<u8>, SpeechError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(format!("audio of {text}").into_bytes())
        }
    }

    struct BrokenSpeech;

    #[async_trait]
    impl SpeechSynthesizer for BrokenSpeech {
        async fn synthesize(&self, _text: &str) -> Result<Vec<u8>, SpeechError> {
            Err(SpeechError::Status(StatusCode::SERVICE_UNAVAILABLE))
        }
    }

    fn scratch_directory() -> PathBuf {
        std::env::temp_dir()
            .join(format!("vocabulary-web-audio-{}", uuid::Uuid::new_v4()))
            .join("audio")
    }

    #[test]
    fn file_names_are_content_hashes() {
        assert_eq!(
            AudioCache::file_name_for("hello"),
            "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824.mp3"
        );
        assert_eq!(AudioCache::file_name_for("hello"), AudioCache::file_name_for("hello"));
        assert_ne!(AudioCache::file_name_for("hello"), AudioCache::file_name_for("Hello"));
    }

    #[tokio::test]
    async fn repeated_requests_synthesize_once() {
        let directory = scratch_directory();
        let speech = Arc::new(CountingSpeech {
            calls: AtomicUsize::new(0),
        });
        let cache = AudioCache::new(&directory, "/static/audio/", speech.clone());

        let first = cache.audio_for("serendipity").await.unwrap();
        let second = cache.audio_for("serendipity").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(
            first,
            format!("/static/audio/{}", AudioCache::file_name_for("serendipity"))
        );
        assert_eq!(speech.calls.load(Ordering::SeqCst), 1);

        let files = std::fs::read_dir(&directory).unwrap().count();
        assert_eq!(files, 1);
        let stored = std::fs::read(directory.join(AudioCache::file_name_for("serendipity"))).unwrap();
        assert_eq!(stored, b"audio of serendipity");

        std::fs::remove_dir_all(directory.parent().unwrap()).unwrap();
    }

    struct SlowSpeech;

    #[async_trait]
    impl SpeechSynthesizer for SlowSpeech {
        async fn synthesize(&self, text: &str) -> Result<Vec<u8>, SpeechError> {
            tokio::time::sleep(std::time::Duration::from_millis(20)).await;
            Ok(format!("audio of {text}").into_bytes())
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_requests_for_one_word_all_get_audio() {
        let directory = scratch_directory();
        let cache = Arc::new(AudioCache::new(&directory, "/static/audio", Arc::new(SlowSpeech)));
        let expected = format!("/static/audio/{}", AudioCache::file_name_for("petrichor"));

        for round in 0..10 {
            let requests = (0..4)
                .map(|_| {
                    let cache = cache.clone();
                    tokio::spawn(async move { cache.audio_for("petrichor").await })
                })
                .collect::<Vec<_>>();
            for request in requests {
                assert_eq!(request.await.unwrap().as_deref(), Some(&expected[..]), "round {round}");
            }
            std::fs::remove_file(directory.join(AudioCache::file_name_for("petrichor"))).unwrap();
        }

        // no partial files are left behind
        assert_eq!(std::fs::read_dir(&directory).unwrap().count(), 0);
        std::fs::remove_dir_all(directory.parent().unwrap()).unwrap();
    }

    #[tokio::test]
    async fn synthesis_failure_means_no_audio() {
        let directory = scratch_directory();
        let cache = AudioCache::new(&directory, "/static/audio", Arc::new(BrokenSpeech));

        assert_eq!(cache.audio_for("hello").await, None);
        assert!(!directory.join(AudioCache::file_name_for("hello")).exists());
    }
}
