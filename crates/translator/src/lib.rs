use async_trait::async_trait;
use reqwest::StatusCode;

mod google;

pub use google::GoogleTranslator;

pub type LanguageCode = String;

/// Translation provider interface
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate text from source to target language
    async fn translate(
        &self,
        text: &str,
        from: &LanguageCode,
        to: &LanguageCode,
    ) -> Result<String, TranslateError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    #[error("Nothing to translate")]
    EmptyInput,

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Translation API responded with {0}")]
    Status(StatusCode),

    #[error("Malformed translation response: {0}")]
    MalformedResponse(String),

    #[error("Translation response contained no sentences")]
    NoSentences,
}
