//! テキスト分類推論API（Hugging Face Inference API 互換）
//!
//! `POST {base_url}/{model}` に `{"inputs": text}` を送り、
//! `[[{label, score}, ...]]` または `[{label, score}, ...]` を受け取る。

use super::backend::SentimentBackend;
use crate::error::{Result, SentimentAiError};
use async_trait::async_trait;
use sentiment_ai_common::RawLabel;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

pub struct InferenceBackend {
    client: reqwest::Client,
    base_url: String,
    model: String,
    token: Option<String>,
}

impl InferenceBackend {
    pub fn new(base_url: &str, model: &str, token: Option<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SentimentAiError::Config(format!("HTTPクライアント作成エラー: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            token,
        })
    }

    pub fn endpoint(&self) -> String {
        format!("{}/{}", self.base_url, self.model)
    }
}

#[async_trait]
impl SentimentBackend for InferenceBackend {
    fn model_name(&self) -> &str {
        &self.model
    }

    fn device(&self) -> String {
        format!("remote ({})", self.base_url)
    }

    async fn classify(&self, text: &str) -> Result<Vec<RawLabel>> {
        let body = json!({
            "inputs": text,
            "options": { "wait_for_model": true }
        });

        let mut request = self.client.post(self.endpoint()).json(&body);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        tracing::debug!(model = %self.model, chars = text.chars().count(), "inference request");
        let response = request
            .send()
            .await
            .map_err(|e| SentimentAiError::from_request(e, "Request timeout - inference endpoint did not respond"))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| SentimentAiError::from_request(e, "Request timeout - inference endpoint did not respond"))?;

        if !status.is_success() {
            return Err(SentimentAiError::HttpStatus {
                status: status.as_u16(),
                message: error_message(&text),
            });
        }

        parse_inference_response(&text)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum InferenceResponse {
    Nested(Vec<Vec<RawLabel>>),
    Flat(Vec<RawLabel>),
    Error { error: String },
}

/// 推論APIのレスポンス本文を生ラベル列へ
pub fn parse_inference_response(body: &str) -> Result<Vec<RawLabel>> {
    let parsed: InferenceResponse = serde_json::from_str(body)
        .map_err(|e| SentimentAiError::ApiParse(format!("{}: {}", e, truncate_for_log(body))))?;

    match parsed {
        InferenceResponse::Nested(mut batches) => {
            if batches.is_empty() {
                return Ok(Vec::new());
            }
            Ok(batches.swap_remove(0))
        }
        InferenceResponse::Flat(labels) => Ok(labels),
        InferenceResponse::Error { error } => Err(SentimentAiError::ApiParse(error)),
    }
}

/// エラーレスポンスの `error` フィールド（なければ本文）
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| match &v["error"] {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Object(o) => o.get("message").and_then(|m| m.as_str()).map(String::from),
            _ => None,
        })
        .unwrap_or_else(|| body.to_string())
}

fn truncate_for_log(body: &str) -> String {
    body.chars().take(200).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nested() {
        let body = r#"[[{"label":"positive","score":0.9},{"label":"neutral","score":0.07},{"label":"negative","score":0.03}]]"#;
        let labels = parse_inference_response(body).unwrap();
        assert_eq!(labels.len(), 3);
        assert_eq!(labels[0], RawLabel::new("positive", 0.9));
    }

    #[test]
    fn test_parse_flat() {
        let body = r#"[{"label":"5 stars","score":0.6},{"label":"1 star","score":0.4}]"#;
        let labels = parse_inference_response(body).unwrap();
        assert_eq!(labels[1].label, "1 star");
    }

    #[test]
    fn test_parse_empty() {
        assert!(parse_inference_response("[]").unwrap().is_empty());
    }

    #[test]
    fn test_parse_error_payload() {
        let err = parse_inference_response(r#"{"error":"Model is currently loading"}"#).unwrap_err();
        assert!(err.to_string().contains("currently loading"));
    }

    #[test]
    fn test_parse_garbage() {
        assert!(matches!(
            parse_inference_response("<html>"),
            Err(SentimentAiError::ApiParse(_))
        ));
    }

    #[test]
    fn test_error_message() {
        assert_eq!(error_message(r#"{"error":"Unauthorized"}"#), "Unauthorized");
        assert_eq!(error_message(r#"{"error":{"message":"quota"}}"#), "quota");
        assert_eq!(error_message("Bad Gateway"), "Bad Gateway");
    }

    #[test]
    fn test_endpoint() {
        let backend = InferenceBackend::new("https://example.test/models/", "org/model", None, Duration::from_secs(1)).unwrap();
        assert_eq!(backend.endpoint(), "https://example.test/models/org/model");
    }
}
