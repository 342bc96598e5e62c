//! 音声認識（Google Cloud Speech-to-Text v1 `speech:recognize`）
//!
//! 同期認識APIに base64 化した音声を送り、最初の候補の文字起こしを返す。
//! 英語・ヒンディー語・テルグ語を候補言語として常に指定する。

use crate::config::{Config, SpeechAuth};
use crate::error::{Result, SentimentAiError};
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::path::Path;
use std::time::Duration;

const ALTERNATIVE_LANGUAGE_CODES: [&str; 3] = ["en-US", "hi-IN", "te-IN"];
const TIMEOUT_MESSAGE: &str = "Request timeout - audio file may be too large";

/// 音声エンコーディング
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioEncoding {
    WebmOpus,
    Linear16,
    Flac,
    OggOpus,
}

impl AudioEncoding {
    /// 拡張子から判定
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "webm" => Some(AudioEncoding::WebmOpus),
            "wav" => Some(AudioEncoding::Linear16),
            "flac" => Some(AudioEncoding::Flac),
            "ogg" | "opus" => Some(AudioEncoding::OggOpus),
            _ => None,
        }
    }

    pub fn api_name(&self) -> &'static str {
        match self {
            AudioEncoding::WebmOpus => "WEBM_OPUS",
            AudioEncoding::Linear16 => "LINEAR16",
            AudioEncoding::Flac => "FLAC",
            AudioEncoding::OggOpus => "OGG_OPUS",
        }
    }

    /// Opus系は48kHz固定、それ以外はヘッダーから自動判定させる
    pub fn sample_rate_hertz(&self) -> Option<u32> {
        match self {
            AudioEncoding::WebmOpus | AudioEncoding::OggOpus => Some(48_000),
            AudioEncoding::Linear16 | AudioEncoding::Flac => None,
        }
    }
}

/// 文字起こし結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transcription {
    pub text: String,
    /// 0.0〜1.0（APIが返さない場合は0）
    pub confidence: f64,
    pub language_code: String,
}

impl Transcription {
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecognizeResponse {
    #[serde(default)]
    results: Vec<RecognitionResult>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecognitionResult {
    #[serde(default)]
    alternatives: Vec<Alternative>,
    language_code: Option<String>,
}

#[derive(Deserialize)]
struct Alternative {
    #[serde(default)]
    transcript: String,
    confidence: Option<f64>,
}

pub struct SpeechClient {
    client: reqwest::Client,
    url: String,
    api_key: String,
    auth: SpeechAuth,
    timeout: Duration,
    probe_timeout: Duration,
}

impl SpeechClient {
    pub fn from_config(config: &Config) -> Result<Self> {
        let api_key = config.get_speech_api_key()?;
        Self::new(
            &config.speech_url,
            api_key,
            config.speech_auth,
            Duration::from_secs(config.speech_timeout_seconds),
            Duration::from_secs(config.probe_timeout_seconds),
        )
    }

    pub fn new(
        url: &str,
        api_key: String,
        auth: SpeechAuth,
        timeout: Duration,
        probe_timeout: Duration,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| SentimentAiError::Config(format!("HTTPクライアント作成エラー: {}", e)))?;
        Ok(Self {
            client,
            url: url.to_string(),
            api_key,
            auth,
            timeout,
            probe_timeout,
        })
    }

    fn request(&self, body: &serde_json::Value, timeout: Duration) -> reqwest::RequestBuilder {
        let request = match self.auth {
            SpeechAuth::Query => self.client.post(&self.url).query(&[("key", self.api_key.as_str())]),
            SpeechAuth::Bearer => self.client.post(&self.url).bearer_auth(&self.api_key),
        };
        request.timeout(timeout).json(body)
    }

    /// 音声ファイルを文字起こし
    ///
    /// `language` は表示名（"Hindi"）またはコード（"hi-IN"）。
    pub async fn transcribe_file(&self, path: &Path, language: &str) -> Result<Transcription> {
        if !path.exists() {
            return Err(SentimentAiError::FileNotFound(path.display().to_string()));
        }
        let encoding = AudioEncoding::from_path(path).ok_or_else(|| {
            SentimentAiError::Config(format!(
                "対応していない音声形式です: {}（webm / wav / flac / ogg / opus）",
                path.display()
            ))
        })?;
        let audio = std::fs::read(path)?;
        let language_code = sentiment_ai_common::speech_language_code(language);
        self.transcribe(&audio, encoding, language_code).await
    }

    pub async fn transcribe(
        &self,
        audio: &[u8],
        encoding: AudioEncoding,
        language_code: &str,
    ) -> Result<Transcription> {
        let body = build_recognize_request(audio, encoding, language_code);
        tracing::info!(bytes = audio.len(), encoding = encoding.api_name(), language_code, "speech request");

        let response = self
            .request(&body, self.timeout)
            .send()
            .await
            .map_err(|e| SentimentAiError::from_request(e, TIMEOUT_MESSAGE))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| SentimentAiError::from_request(e, TIMEOUT_MESSAGE))?;

        if status.as_u16() != 200 {
            return Err(SentimentAiError::HttpStatus {
                status: status.as_u16(),
                message: google_error_message(&text),
            });
        }

        parse_recognize_response(&text, language_code)
    }

    /// 疎通確認（空の音声を送り、200か400なら到達可能とみなす）
    pub async fn probe(&self) -> Result<()> {
        let body = json!({
            "config": {
                "encoding": "LINEAR16",
                "sampleRateHertz": 16000,
                "languageCode": "en-US"
            },
            "audio": { "content": "" }
        });

        let response = self
            .request(&body, self.probe_timeout)
            .send()
            .await
            .map_err(|e| SentimentAiError::from_request(e, "Request timeout - speech API did not respond"))?;

        let status = response.status().as_u16();
        tracing::debug!(status, "speech probe");
        if status == 200 || status == 400 {
            return Ok(());
        }

        let text = response.text().await.unwrap_or_default();
        Err(SentimentAiError::HttpStatus {
            status,
            message: google_error_message(&text),
        })
    }
}

/// recognize リクエスト本文を組み立てる
pub fn build_recognize_request(audio: &[u8], encoding: AudioEncoding, language_code: &str) -> serde_json::Value {
    let mut config = json!({
        "encoding": encoding.api_name(),
        "languageCode": language_code,
        "alternativeLanguageCodes": ALTERNATIVE_LANGUAGE_CODES,
        "enableAutomaticPunctuation": true,
        "enableWordTimeOffsets": false
    });
    if let Some(rate) = encoding.sample_rate_hertz() {
        config["sampleRateHertz"] = json!(rate);
    }

    json!({
        "config": config,
        "audio": { "content": base64::engine::general_purpose::STANDARD.encode(audio) }
    })
}

/// recognize レスポンスから最初の候補を取り出す
pub fn parse_recognize_response(body: &str, requested_language: &str) -> Result<Transcription> {
    let response: RecognizeResponse =
        serde_json::from_str(body).map_err(|e| SentimentAiError::ApiParse(e.to_string()))?;

    let first = response
        .results
        .into_iter()
        .next()
        .ok_or_else(|| SentimentAiError::NoTranscription("No transcription results found".into()))?;

    let language_code = first
        .language_code
        .unwrap_or_else(|| requested_language.to_string());
    let alternative = first
        .alternatives
        .into_iter()
        .next()
        .ok_or_else(|| SentimentAiError::NoTranscription("No speech detected in audio".into()))?;

    Ok(Transcription {
        text: alternative.transcript.trim().to_string(),
        confidence: alternative.confidence.unwrap_or(0.0),
        language_code,
    })
}

/// `error.message` があればそれ、なければ本文
fn google_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(String::from))
        .unwrap_or_else(|| body.to_string())
}
