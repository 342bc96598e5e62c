//! 推論APIバックエンドのHTTP応答処理テスト

mod support;

use sentiment_ai_common::RawLabel;
use sentiment_ai_rust::analyzer::{InferenceBackend, SentimentBackend};
use sentiment_ai_rust::error::SentimentAiError;
use std::time::Duration;
use support::serve_once;

fn backend(url: &str, token: Option<&str>) -> InferenceBackend {
    InferenceBackend::new(url, "org/model", token.map(String::from), Duration::from_secs(2))
        .expect("backend build failed")
}

/// 2xx以外は HttpStatus（本文の error を message に）
#[tokio::test]
async fn test_classify_unavailable() {
    let (url, _server) = serve_once(503, r#"{"error":"Model is loading","estimated_time":20.0}"#).await;
    let err = backend(&url, None).classify("hello").await.unwrap_err();
    match &err {
        SentimentAiError::HttpStatus { status, message } => {
            assert_eq!(*status, 503);
            assert_eq!(message, "Model is loading");
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert!(err.is_network());
}

#[tokio::test]
async fn test_classify_unauthorized_plain_body() {
    let (url, _server) = serve_once(401, "Unauthorized").await;
    let err = backend(&url, None).classify("hello").await.unwrap_err();
    assert_eq!(err.to_string(), "API request failed: 401 - Unauthorized");
}

/// 成功時は入れ子のラベル列を平らにし、トークンを Bearer で送る
#[tokio::test]
async fn test_classify_success() {
    let body = r#"[[{"label":"positive","score":0.9},{"label":"negative","score":0.1}]]"#;
    let (url, server) = serve_once(200, body).await;
    let labels = backend(&url, Some("hf_token")).classify("great").await.expect("classify failed");
    assert_eq!(labels, vec![RawLabel::new("positive", 0.9), RawLabel::new("negative", 0.1)]);

    let request = server.await.unwrap();
    assert!(request.starts_with("POST /org/model "), "{}", request);
    assert!(request.to_lowercase().contains("authorization: bearer hf_token"));
    assert!(request.contains("\"inputs\":\"great\""));
}
