//! Runtime configuration, read from environment variables with defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use reqwest::Url;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {name}: {reason}")]
    InvalidValue {
        name: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_address: SocketAddr,
    /// SQLite connection URL; the file is created when missing.
    pub database_url: String,
    pub audio_directory: PathBuf,
    /// Path prefix under which files in `audio_directory` are served.
    pub audio_url_prefix: String,
    pub dictionary_api_url: Url,
    pub translate_api_url: Url,
    pub speech_api_url: Url,
    pub translate_from: String,
    pub translate_to: String,
    pub speech_language: String,
    /// Upstream requests wait indefinitely unless this is set.
    pub http_timeout: Option<Duration>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            bind_address: parsed("BIND_ADDRESS", "127.0.0.1:5000")?,
            database_url: string("DATABASE_URL", "sqlite://vocabulary.db"),
            audio_directory: PathBuf::from(string("AUDIO_DIRECTORY", "static/audio")),
            audio_url_prefix: url_prefix(string("AUDIO_URL_PREFIX", "/static/audio"))?,
            dictionary_api_url: parsed(
                "DICTIONARY_API_URL",
                "https://api.dictionaryapi.dev/api/v2/entries/en",
            )?,
            translate_api_url: parsed(
                "TRANSLATE_API_URL",
                "https://translate.googleapis.com/translate_a/single",
            )?,
            speech_api_url: parsed("SPEECH_API_URL", "https://translate.google.com/translate_tts")?,
            translate_from: string("TRANSLATE_FROM", "en"),
            translate_to: string("TRANSLATE_TO", "ko"),
            speech_language: string("SPEECH_LANGUAGE", "en"),
            http_timeout: env::var("HTTP_TIMEOUT_SECS")
                .ok()
                .map(|value| {
                    value
                        .parse::<u64>()
                        .map(Duration::from_secs)
                        .map_err(|error| ConfigError::InvalidValue {
                            name: "HTTP_TIMEOUT_SECS",
                            value,
                            reason: error.to_string(),
                        })
                })
                .transpose()?,
        })
    }
}

fn string(name: &'static str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_owned())
}

fn parsed<T>(name: &'static str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: ToString,
{
    let value = string(name, default);
    value.parse().map_err(|error: T::Err| ConfigError::InvalidValue {
        name,
        reason: error.to_string(),
        value,
    })
}

fn url_prefix(value: String) -> Result<String, ConfigError> {
    if !value.starts_with('/') || value.trim_end_matches('/').is_empty() {
        return Err(ConfigError::InvalidValue {
            name: "AUDIO_URL_PREFIX",
            value,
            reason: "must be an absolute path below the site root".to_owned(),
        });
    }
    Ok(value.trim_end_matches('/').to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_prefix_is_normalised() {
        assert_eq!(url_prefix("/static/audio/".to_owned()).unwrap(), "/static/audio");
        assert!(url_prefix("static/audio".to_owned()).is_err());
        assert!(url_prefix("/".to_owned()).is_err());
    }

    #[test]
    fn malformed_values_name_the_variable() {
        env::set_var("VOCABULARY_WEB_TEST_ADDRESS", "not-an-address");
        let error = parsed::<SocketAddr>("VOCABULARY_WEB_TEST_ADDRESS", "127.0.0.1:1").unwrap_err();
        assert!(error.to_string().contains("VOCABULARY_WEB_TEST_ADDRESS"));

        let address = parsed::<SocketAddr>("VOCABULARY_WEB_TEST_UNSET", "127.0.0.1:1").unwrap();
        assert_eq!(address.port(), 1);
    }
}
