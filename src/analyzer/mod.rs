//! 感情解析サービス
//!
//! 起動時に一度だけ `SentimentAnalyzer::load` で構築し、以後は参照で使い回す。
//! モデルモードでは推論APIの生ラベルを3分類へ正規化し、
//! ルールモードではキーワード分類器で判定する。

mod backend;
mod inference;

pub use backend::SentimentBackend;
pub use inference::{parse_inference_response, InferenceBackend};

use crate::config::Config;
use crate::error::{Result, SentimentAiError};
use clap::ValueEnum;
use sentiment_ai_common::{
    Analysis, Failure, FailureKind, KeywordClassifier, KeywordSet, LabelAliases, SentimentResult,
};
use serde::Serialize;
use std::time::Duration;

/// 判定エンジン
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum EngineKind {
    /// 推論APIの多言語モデル
    #[default]
    Model,
    /// キーワードと文字種によるルール判定
    Rules,
}

enum Engine {
    Model(Box<dyn SentimentBackend>),
    Rules(KeywordClassifier),
}

/// モデル情報
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelInfo {
    pub model_name: String,
    pub device: String,
    pub loaded: bool,
    pub supported_languages: Vec<String>,
}

pub struct SentimentAnalyzer {
    engine: Engine,
    aliases: LabelAliases,
    max_chars: usize,
}

impl SentimentAnalyzer {
    /// 設定に従って構築
    pub async fn from_config(config: &Config, engine: EngineKind) -> Result<Self> {
        match engine {
            EngineKind::Model => Self::load(config).await,
            EngineKind::Rules => {
                let keywords = match &config.keywords_file {
                    Some(path) => KeywordSet::from_file(path)?,
                    None => KeywordSet::builtin(),
                };
                let classifier = KeywordClassifier::new(keywords, config.match_mode)?;
                tracing::info!(mode = %config.match_mode, "rule-based classifier ready");
                Ok(Self::rules(classifier, config.max_text_chars))
            }
        }
    }

    /// 推論APIのモデルを読み込む（主モデル → 予備モデルの順に試す）
    pub async fn load(config: &Config) -> Result<Self> {
        let timeout = Duration::from_secs(config.inference_timeout_seconds);
        let token = config.hf_token();
        let primary = InferenceBackend::new(&config.inference_url, &config.primary_model, token.clone(), timeout)?;
        let fallback = InferenceBackend::new(&config.inference_url, &config.fallback_model, token, timeout)?;

        let aliases = match &config.label_aliases_file {
            Some(path) => LabelAliases::with_extra(&LabelAliases::from_file(path)?),
            None => LabelAliases::builtin(),
        };

        Self::load_with(Box::new(primary), Box::new(fallback), aliases, config.max_text_chars).await
    }

    /// 任意のバックエンドで読み込む
    pub async fn load_with(
        primary: Box<dyn SentimentBackend>,
        fallback: Box<dyn SentimentBackend>,
        aliases: LabelAliases,
        max_chars: usize,
    ) -> Result<Self> {
        let primary_probe = primary.probe().await;
        match primary_probe {
            Ok(()) => {
                tracing::info!(model = primary.model_name(), "sentiment model loaded");
                return Ok(Self::with_backend(primary, aliases, max_chars));
            }
            Err(e) => {
                tracing::warn!(model = primary.model_name(), error = %e, "primary model unavailable, trying fallback");
            }
        }

        let fallback_probe = fallback.probe().await;
        match fallback_probe {
            Ok(()) => {
                tracing::info!(model = fallback.model_name(), "fallback sentiment model loaded");
                Ok(Self::with_backend(fallback, aliases, max_chars))
            }
            Err(e) => {
                tracing::error!(model = fallback.model_name(), error = %e, "fallback model unavailable");
                Err(SentimentAiError::ModelLoad {
                    primary: primary.model_name().to_string(),
                    fallback: fallback.model_name().to_string(),
                })
            }
        }
    }

    /// 疎通確認なしで構築
    pub fn with_backend(backend: Box<dyn SentimentBackend>, aliases: LabelAliases, max_chars: usize) -> Self {
        Self {
            engine: Engine::Model(backend),
            aliases,
            max_chars,
        }
    }

    pub fn rules(classifier: KeywordClassifier, max_chars: usize) -> Self {
        Self {
            engine: Engine::Rules(classifier),
            aliases: LabelAliases::builtin(),
            max_chars,
        }
    }

    pub fn engine_kind(&self) -> EngineKind {
        match self.engine {
            Engine::Model(_) => EngineKind::Model,
            Engine::Rules(_) => EngineKind::Rules,
        }
    }

    /// テキスト1件を解析
    ///
    /// 空入力とモデル呼び出しの失敗は `Analysis::Failure` で返し、エラーにはしない。
    pub async fn analyze_text(&self, text: &str) -> Analysis<SentimentResult> {
        let Some(prepared) = prepare_text(text, self.max_chars) else {
            return Analysis::Failure(Failure::empty_input());
        };

        match &self.engine {
            Engine::Rules(classifier) => Analysis::Success(classifier.classify(&prepared).to_result()),
            Engine::Model(backend) => match backend.classify(&prepared).await {
                Ok(labels) if labels.is_empty() => {
                    tracing::warn!(model = backend.model_name(), "model returned no labels");
                    Analysis::failed(FailureKind::Model, "Model returned no labels")
                }
                Ok(labels) => {
                    let scores = self.aliases.normalize(&labels);
                    Analysis::Success(SentimentResult::from_scores(scores))
                }
                Err(e) => {
                    tracing::warn!(model = backend.model_name(), error = %e, "sentiment analysis failed");
                    Analysis::failed(FailureKind::Model, e.to_string())
                }
            },
        }
    }

    pub fn model_info(&self) -> ModelInfo {
        let (model_name, device) = match &self.engine {
            Engine::Model(backend) => (backend.model_name().to_string(), backend.device()),
            Engine::Rules(classifier) => (format!("keyword rules ({})", classifier.mode()), "local".to_string()),
        };
        ModelInfo {
            model_name,
            device,
            loaded: true,
            supported_languages: sentiment_ai_common::SUPPORTED_LANGUAGES
                .iter()
                .map(|(_, name)| name.to_string())
                .collect(),
        }
    }
}

/// 前後の空白を除き、最大文字数で切り詰める（空なら None）
pub fn prepare_text(text: &str, max_chars: usize) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.chars().take(max_chars).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prepare_text() {
        assert_eq!(prepare_text("   ", 512), None);
        assert_eq!(prepare_text("  hi  ", 512).as_deref(), Some("hi"));
        // 文字数（バイトではない）で切る
        let long: String = "అ".repeat(600);
        assert_eq!(prepare_text(&long, 512).unwrap().chars().count(), 512);
    }
}
