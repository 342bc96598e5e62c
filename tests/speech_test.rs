//! 音声認識クライアントのテスト
//!
//! 実APIへの接続は GOOGLE_CLOUD_API_KEY がある場合のみ

mod support;

use sentiment_ai_rust::config::{Config, SpeechAuth};
use sentiment_ai_rust::error::SentimentAiError;
use sentiment_ai_rust::speech::{parse_recognize_response, AudioEncoding, SpeechClient};
use support::serve_once;
use std::path::Path;
use std::time::Duration;

fn client(url: &str) -> SpeechClient {
    SpeechClient::new(
        url,
        "dummy".to_string(),
        SpeechAuth::Query,
        Duration::from_secs(2),
        Duration::from_secs(2),
    )
    .expect("client build failed")
}

#[tokio::test]
async fn test_missing_audio_file() {
    let err = client("http://127.0.0.1:9/")
        .transcribe_file(Path::new("/nonexistent/clip.webm"), "English")
        .await
        .unwrap_err();
    assert!(matches!(err, SentimentAiError::FileNotFound(_)));
}

#[tokio::test]
async fn test_unsupported_extension() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("clip.mp3");
    std::fs::write(&path, b"ID3").unwrap();

    let err = client("http://127.0.0.1:9/").transcribe_file(&path, "Hindi").await.unwrap_err();
    assert!(matches!(err, SentimentAiError::Config(_)));
}

/// 接続できない宛先は Network error
#[tokio::test]
async fn test_connection_error_message() {
    let err = client("http://127.0.0.1:9/").probe().await.unwrap_err();
    assert!(err.is_network());
    assert!(err.to_string().starts_with("Network error: ") || err.to_string().starts_with("Request timeout"));
}

/// 疎通確認は200と400を到達可能とみなす
#[tokio::test]
async fn test_reachability_accepts_200_and_400() {
    for status in [200, 400] {
        let (url, server) = serve_once(status, r#"{"error":{"message":"Invalid audio"}}"#).await;
        client(&url).probe().await.unwrap_or_else(|e| panic!("status {} rejected: {}", status, e));

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /?key=dummy "), "{}", request);
    }
}

/// それ以外のステータスは HttpStatus
#[tokio::test]
async fn test_reachability_rejects_forbidden() {
    let (url, _server) = serve_once(403, r#"{"error":{"message":"API key not valid"}}"#).await;
    let err = client(&url).probe().await.unwrap_err();
    assert!(matches!(err, SentimentAiError::HttpStatus { status: 403, .. }));
    assert_eq!(err.to_string(), "API request failed: 403 - API key not valid");
}

/// 非200の文字起こしは error.message を載せる
#[tokio::test]
async fn test_transcribe_forbidden_uses_error_message() {
    let (url, _server) = serve_once(403, r#"{"error":{"code":403,"message":"API key not valid"}}"#).await;
    let err = client(&url)
        .transcribe(b"abc", AudioEncoding::Linear16, "en-US")
        .await
        .unwrap_err();
    assert!(err.is_network());
    assert_eq!(err.to_string(), "API request failed: 403 - API key not valid");
}

/// error.message が無ければ本文そのまま
#[tokio::test]
async fn test_transcribe_server_error_plain_body() {
    let (url, _server) = serve_once(500, "Internal Error").await;
    let err = client(&url)
        .transcribe(b"abc", AudioEncoding::Flac, "hi-IN")
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "API request failed: 500 - Internal Error");
}

#[tokio::test]
async fn test_transcribe_success() {
    let body = r#"{"results":[{"alternatives":[{"transcript":" hello world ","confidence":0.93}],"languageCode":"en-us"}]}"#;
    let (url, server) = serve_once(200, body).await;
    let t = client(&url)
        .transcribe(b"abc", AudioEncoding::Linear16, "en-US")
        .await
        .expect("transcribe failed");
    assert_eq!(t.text, "hello world");
    assert_eq!(t.confidence, 0.93);
    assert_eq!(t.language_code, "en-us");

    let request = server.await.unwrap();
    assert!(request.contains("\"encoding\":\"LINEAR16\""));
    assert!(request.contains("\"content\":\"YWJj\""));
}

/// Bearer 認証ではクエリに鍵を載せない
#[tokio::test]
async fn test_bearer_auth_header() {
    let (url, server) = serve_once(400, "{}").await;
    let client = SpeechClient::new(
        &url,
        "token-123".to_string(),
        SpeechAuth::Bearer,
        Duration::from_secs(2),
        Duration::from_secs(2),
    )
    .expect("client build failed");
    client.probe().await.expect("400 should count as reachable");

    let request = server.await.unwrap();
    assert!(request.starts_with("POST / "), "{}", request);
    assert!(request.to_lowercase().contains("authorization: bearer token-123"));
}

#[test]
fn test_parse_first_alternative_only() {
    let body = r#"{"results":[
        {"alternatives":[{"transcript":"first","confidence":0.8},{"transcript":"second","confidence":0.1}]},
        {"alternatives":[{"transcript":"later","confidence":0.9}]}
    ]}"#;
    let t = parse_recognize_response(body, "te-IN").unwrap();
    assert_eq!(t.text, "first");
    assert_eq!(t.language_code, "te-IN");
}

#[tokio::test]
async fn speech_reachability_integration() {
    match std::env::var("GOOGLE_CLOUD_API_KEY") {
        Ok(key) if !key.trim().is_empty() => {}
        _ => {
            eprintln!("GOOGLE_CLOUD_API_KEY not set; skipping integration test");
            return;
        }
    }

    let client = SpeechClient::from_config(&Config::default()).expect("client build failed");
    client.probe().await.expect("speech api not reachable");
}
