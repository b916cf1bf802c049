use async_trait::async_trait;
use reqwest::Url;
use serde_json::Value;

use crate::{LanguageCode, TranslateError, Translator};

/// Keyless Google endpoint used by the browser extension (`client=gtx`).
pub struct GoogleTranslator {
    client: reqwest::Client,
    api_url: Url,
}

impl GoogleTranslator {
    pub fn with_api_url(client: reqwest::Client, api_url: Url) -> Self {
        Self { client, api_url }
    }
}

#[async_trait]
impl Translator for GoogleTranslator {
    async fn translate(
        &self,
        text: &str,
        from: &LanguageCode,
        to: &LanguageCode,
    ) -> Result<String, TranslateError> {
        if text.is_empty() {
            return Err(TranslateError::EmptyInput);
        }

        let res = self
            .client
            .get(self.api_url.clone())
            .query(&[
                ("client", "gtx"),
                ("sl", from.as_str()),
                ("tl", to.as_str()),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await?;
        if !res.status().is_success() {
            return Err(TranslateError::Status(res.status()));
        }

        let body = res.bytes().await?;
        let body: Value = serde_json::from_slice(&body)
            .map_err(|error| TranslateError::MalformedResponse(error.to_string()))?;
        join_sentences(&body)
    }
}

/// The response is a positional array; `[0]` holds one `[translated, original, ...]`
/// fragment per sentence.
pub(crate) fn join_sentences(body: &Value) -> Result<String, TranslateError> {
    let sentences = body
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| TranslateError::MalformedResponse(truncate(body.to_string())))?;

    let translated: String = sentences
        .iter()
        .filter_map(|sentence| sentence.get(0).and_then(Value::as_str))
        .collect();

    if translated.is_empty() {
        Err(TranslateError::NoSentences)
    } else {
        Ok(translated)
    }
}

fn truncate(mut text: String) -> String {
    const MAX: usize = 200;
    if text.len() > MAX {
        let mut end = MAX;
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        text.truncate(end);
    }
    text
}
