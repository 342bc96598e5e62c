use crate::error::{Result, SentimentAiError};
use serde::{Deserialize, Serialize};
use sentiment_ai_common::MatchMode;
use std::path::PathBuf;

pub const DEFAULT_PRIMARY_MODEL: &str = "cardiffnlp/twitter-xlm-roberta-base-sentiment";
pub const DEFAULT_FALLBACK_MODEL: &str = "nlptown/bert-base-multilingual-uncased-sentiment";
pub const DEFAULT_INFERENCE_URL: &str = "https://api-inference.huggingface.co/models";
pub const DEFAULT_SPEECH_URL: &str = "https://speech.googleapis.com/v1/speech:recognize";

/// 音声認識APIキーの渡し方
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeechAuth {
    /// `?key=` クエリ
    #[default]
    Query,
    /// Authorization: Bearer
    Bearer,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub hf_token: Option<String>,
    pub speech_api_key: Option<String>,
    pub speech_auth: SpeechAuth,
    pub primary_model: String,
    pub fallback_model: String,
    pub inference_url: String,
    pub speech_url: String,
    pub max_text_chars: usize,
    pub inference_timeout_seconds: u64,
    pub speech_timeout_seconds: u64,
    pub probe_timeout_seconds: u64,
    /// キーワードリストJSON（ルールモード用）
    pub keywords_file: Option<PathBuf>,
    /// 追加のラベル同義語JSON
    pub label_aliases_file: Option<PathBuf>,
    pub match_mode: MatchMode,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        Self::load_from(&config_path)
    }

    /// 指定パスから読み込み（存在しなければ既定値）
    pub fn load_from(config_path: &std::path::Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default_config())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;
        self.save_to(&config_path)
    }

    pub fn save_to(&self, config_path: &std::path::Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| SentimentAiError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("sentiment-ai").join("config.json"))
    }

    fn default_config() -> Self {
        Self {
            hf_token: None,
            speech_api_key: None,
            speech_auth: SpeechAuth::Query,
            primary_model: DEFAULT_PRIMARY_MODEL.into(),
            fallback_model: DEFAULT_FALLBACK_MODEL.into(),
            inference_url: DEFAULT_INFERENCE_URL.into(),
            speech_url: DEFAULT_SPEECH_URL.into(),
            max_text_chars: 512,
            inference_timeout_seconds: 60,
            speech_timeout_seconds: 30,
            probe_timeout_seconds: 10,
            keywords_file: None,
            label_aliases_file: None,
            match_mode: MatchMode::Substring,
            log_level: "info".into(),
        }
    }

    /// 推論APIトークン（未設定でも匿名で呼べるため Option）
    pub fn hf_token(&self) -> Option<String> {
        // 環境変数を優先
        match std::env::var("HF_API_TOKEN") {
            Ok(token) if !token.trim().is_empty() => Some(token),
            _ => self.hf_token.clone(),
        }
    }

    pub fn get_speech_api_key(&self) -> Result<String> {
        match std::env::var("GOOGLE_CLOUD_API_KEY") {
            Ok(key) if !key.trim().is_empty() => Ok(key),
            _ => self.speech_api_key.clone().ok_or(SentimentAiError::MissingApiKey),
        }
    }

    pub fn set_hf_token(&mut self, token: String) -> Result<()> {
        self.hf_token = Some(token);
        self.save()
    }

    pub fn set_speech_api_key(&mut self, key: String) -> Result<()> {
        self.speech_api_key = Some(key);
        self.save()
    }
}
