//! Runs the client against a local stand-in for the translate endpoint.

use std::collections::HashMap;

use axum::extract::Query;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use reqwest::Url;
use translator::{GoogleTranslator, TranslateError, Translator};

async fn single(Query(params): Query<HashMap<String, String>>) -> Response {
    let param = |name: &str| params.get(name).map(String::as_str);
    if param("client") != Some("gtx") || param("dt") != Some("t") {
        return StatusCode::BAD_REQUEST.into_response();
    }
    if (param("sl"), param("tl")) != (Some("en"), Some("ko")) {
        return StatusCode::BAD_REQUEST.into_response();
    }

    match param("q") {
        Some("Hello. How are you?") => (
            StatusCode::OK,
            r#"[[["안녕하세요. ","Hello. ",null,null,10],["잘 지내세요?","How are you?",null,null,10]],null,"en"]"#,
        )
            .into_response(),
        Some("silence") => (StatusCode::OK, r#"[[],null,"en"]"#).into_response(),
        Some("garbled") => (StatusCode::OK, "<html>captcha</html>").into_response(),
        Some("quota") => StatusCode::TOO_MANY_REQUESTS.into_response(),
        _ => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}

async fn start_api() -> Url {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    let router = Router::new().route("/translate_a/single", get(single));
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    Url::parse(&format!("http://{address}/translate_a/single")).unwrap()
}

async fn translate(translator: &GoogleTranslator, text: &str) -> Result<String, TranslateError> {
    translator
        .translate(text, &"en".to_owned(), &"ko".to_owned())
        .await
}

#[tokio::test]
async fn sentences_are_joined() {
    let translator = GoogleTranslator::with_api_url(reqwest::Client::new(), start_api().await);
    assert_eq!(
        translate(&translator, "Hello. How are you?").await.unwrap(),
        "안녕하세요. 잘 지내세요?"
    );
}

#[tokio::test]
async fn upstream_failures_are_reported_by_kind() {
    let translator = GoogleTranslator::with_api_url(reqwest::Client::new(), start_api().await);

    assert!(matches!(
        translate(&translator, "quota").await,
        Err(TranslateError::Status(StatusCode::TOO_MANY_REQUESTS))
    ));
    assert!(matches!(
        translate(&translator, "anything else").await,
        Err(TranslateError::Status(StatusCode::INTERNAL_SERVER_ERROR))
    ));
    assert!(matches!(
        translate(&translator, "garbled").await,
        Err(TranslateError::MalformedResponse(_))
    ));
    assert!(matches!(
        translate(&translator, "silence").await,
        Err(TranslateError::NoSentences)
    ));
}

#[tokio::test]
async fn unreachable_api_is_a_network_error() {
    // bind and release a port so nothing is listening on it
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    drop(listener);

    let api_url = Url::parse(&format!("http://{address}/translate_a/single")).unwrap();
    let translator = GoogleTranslator::with_api_url(reqwest::Client::new(), api_url);
    assert!(matches!(
        translate(&translator, "Hello").await,
        Err(TranslateError::NetworkError(_))
    ));
}
