//! 解析結果の型定義
//!
//! CLIと対話モードで共有される型:
//! - Sentiment / SentimentScores: 正規化済みの3分類ラベルとスコア
//! - SentimentResult / LanguageResult: 1テキスト分の解析結果
//! - Analysis<T>: 成功時は結果、失敗時は理由を持つタグ付き結果

use serde::{Deserialize, Serialize};
use std::fmt;

/// 正規化済み感情ラベル
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    /// 正規の走査順（同点時はこの順で先のものを採用）
    pub const ALL: [Sentiment; 3] = [Sentiment::Positive, Sentiment::Negative, Sentiment::Neutral];

    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "POSITIVE",
            Sentiment::Negative => "NEGATIVE",
            Sentiment::Neutral => "NEUTRAL",
        }
    }

    /// 数値化（POSITIVE=1, NEUTRAL=0, NEGATIVE=-1）
    pub fn polarity(&self) -> f64 {
        match self {
            Sentiment::Positive => 1.0,
            Sentiment::Negative => -1.0,
            Sentiment::Neutral => 0.0,
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Sentiment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "POSITIVE" => Ok(Sentiment::Positive),
            "NEGATIVE" => Ok(Sentiment::Negative),
            "NEUTRAL" => Ok(Sentiment::Neutral),
            _ => Err(format!("Unknown sentiment: {}. Use positive, negative, or neutral", s)),
        }
    }
}

/// 3分類それぞれの累積スコア（0.0〜1.0）
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct SentimentScores {
    pub positive: f64,
    pub negative: f64,
    pub neutral: f64,
}

impl SentimentScores {
    /// 失敗時・空入力時の分布 {POS:0, NEG:0, NEU:1}
    pub fn neutral_only() -> Self {
        Self {
            positive: 0.0,
            negative: 0.0,
            neutral: 1.0,
        }
    }

    pub fn get(&self, sentiment: Sentiment) -> f64 {
        match sentiment {
            Sentiment::Positive => self.positive,
            Sentiment::Negative => self.negative,
            Sentiment::Neutral => self.neutral,
        }
    }

    pub fn add(&mut self, sentiment: Sentiment, score: f64) {
        match sentiment {
            Sentiment::Positive => self.positive += score,
            Sentiment::Negative => self.negative += score,
            Sentiment::Neutral => self.neutral += score,
        }
    }

    pub fn total(&self) -> f64 {
        self.positive + self.negative + self.neutral
    }

    /// 正規順 (POSITIVE, NEGATIVE, NEUTRAL) で走査
    pub fn iter(&self) -> impl Iterator<Item = (Sentiment, f64)> + '_ {
        Sentiment::ALL.iter().map(move |s| (*s, self.get(*s)))
    }

    /// ルールベース結果からの分布
    ///
    /// 判定ラベルに confidence/100、残りを他の2ラベルで等分する。
    pub fn from_heuristic(winner: Sentiment, confidence: f64) -> Self {
        let share = (confidence / 100.0).clamp(0.0, 1.0);
        let rest = (1.0 - share) / 2.0;
        let mut scores = Self::default();
        for sentiment in Sentiment::ALL {
            scores.add(sentiment, if sentiment == winner { share } else { rest });
        }
        scores
    }
}

/// 分類器が返す生ラベル（モデル依存の語彙）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawLabel {
    pub label: String,
    pub score: f64,
}

impl RawLabel {
    pub fn new(label: impl Into<String>, score: f64) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }
}

/// 感情解析結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentimentResult {
    pub sentiment: Sentiment,
    /// 確信度（0〜100%）
    pub confidence: f64,
    pub all_scores: SentimentScores,
}

impl SentimentResult {
    /// 正規化済みスコアから最大ラベルを選んで結果を作る
    pub fn from_scores(all_scores: SentimentScores) -> Self {
        let (sentiment, score) = crate::labels::select_prediction(&all_scores);
        Self {
            sentiment,
            confidence: score * 100.0,
            all_scores,
        }
    }

    /// 失敗時に表示する形 {NEUTRAL, 0, {0,0,1}}
    pub fn degraded() -> Self {
        Self {
            sentiment: Sentiment::Neutral,
            confidence: 0.0,
            all_scores: SentimentScores::neutral_only(),
        }
    }
}

/// 言語判定結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageResult {
    /// 表示名（例: "Hindi"）
    pub language: String,
    /// 短縮コード（例: "hi"）、不明時は "unknown"
    pub language_code: String,
    /// 確率（0.0〜1.0）
    pub confidence: f64,
    /// 感情解析の対応言語か
    pub is_supported: bool,
    /// 判定器が信頼できると報告したか
    #[serde(default)]
    pub reliable: bool,
}

impl LanguageResult {
    pub fn unknown() -> Self {
        Self {
            language: "Unknown".into(),
            language_code: "unknown".into(),
            confidence: 0.0,
            is_supported: false,
            reliable: false,
        }
    }
}

/// 失敗の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FailureKind {
    /// 入力が空
    EmptyInput,
    /// 感情モデルの呼び出し失敗
    Model,
    /// 言語判定の失敗
    Detection,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::EmptyInput => write!(f, "empty input"),
            FailureKind::Model => write!(f, "model error"),
            FailureKind::Detection => write!(f, "detection error"),
        }
    }
}

/// 解析失敗の詳細
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Failure {
    pub kind: FailureKind,
    pub message: String,
}

impl Failure {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn empty_input() -> Self {
        Self::new(FailureKind::EmptyInput, "Empty text provided")
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// タグ付き解析結果
///
/// 失敗時に既定値のフィールドを誤って読まないよう、成功と失敗を型で分ける。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "data", rename_all = "lowercase")]
pub enum Analysis<T> {
    Success(T),
    Failure(Failure),
}

impl<T> Analysis<T> {
    pub fn failed(kind: FailureKind, message: impl Into<String>) -> Self {
        Analysis::Failure(Failure::new(kind, message))
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Analysis::Success(_))
    }

    pub fn success(&self) -> Option<&T> {
        match self {
            Analysis::Success(value) => Some(value),
            Analysis::Failure(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&Failure> {
        match self {
            Analysis::Success(_) => None,
            Analysis::Failure(failure) => Some(failure),
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        self.failure().map(|f| f.message.as_str())
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Analysis<U> {
        match self {
            Analysis::Success(value) => Analysis::Success(f(value)),
            Analysis::Failure(failure) => Analysis::Failure(failure),
        }
    }
}

impl Analysis<SentimentResult> {
    /// 表示用の結果（失敗時は NEUTRAL / 0%）
    pub fn view(&self) -> SentimentResult {
        match self {
            Analysis::Success(result) => result.clone(),
            Analysis::Failure(_) => SentimentResult::degraded(),
        }
    }
}

impl Analysis<LanguageResult> {
    /// 表示用の結果（失敗時は Unknown）
    pub fn view(&self) -> LanguageResult {
        match self {
            Analysis::Success(result) => result.clone(),
            Analysis::Failure(_) => LanguageResult::unknown(),
        }
    }
}

/// 結果CSVの列（この順で出力）
pub const RESULT_COLUMNS: [&str; 9] = [
    "Original_Text",
    "Detected_Language",
    "Language_Confidence",
    "Sentiment",
    "Sentiment_Confidence",
    "Positive_Score",
    "Neutral_Score",
    "Negative_Score",
    "Error",
];

/// 感情解析に失敗した行の Sentiment 列
pub const ERROR_LABEL: &str = "ERROR";

/// 結果表の1行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    #[serde(rename = "Original_Text")]
    pub original_text: String,
    #[serde(rename = "Detected_Language")]
    pub detected_language: String,
    #[serde(rename = "Language_Confidence")]
    pub language_confidence: f64,
    #[serde(rename = "Sentiment")]
    pub sentiment: String,
    #[serde(rename = "Sentiment_Confidence")]
    pub sentiment_confidence: f64,
    #[serde(rename = "Positive_Score")]
    pub positive_score: f64,
    #[serde(rename = "Neutral_Score")]
    pub neutral_score: f64,
    #[serde(rename = "Negative_Score")]
    pub negative_score: f64,
    #[serde(rename = "Error")]
    pub error: Option<String>,
}

impl ResultRecord {
    /// 解析結果から1行を組み立てる
    ///
    /// 感情解析に失敗した行は Sentiment=ERROR、スコア0、Error列にメッセージ。
    /// 言語判定だけ失敗した行は Error 列を空のままにする。
    pub fn from_analyses(
        text: &str,
        language: &Analysis<LanguageResult>,
        sentiment: &Analysis<SentimentResult>,
    ) -> Self {
        let lang = language.view();
        let (label, confidence, scores) = match sentiment {
            Analysis::Success(result) => (
                result.sentiment.as_str().to_string(),
                result.confidence,
                result.all_scores,
            ),
            Analysis::Failure(_) => (ERROR_LABEL.to_string(), 0.0, SentimentScores::default()),
        };
        // Error 列は感情解析の失敗のみ（言語判定の失敗は Detected_Language=Unknown で表れる）
        let error = sentiment.error_message().map(|m| m.to_string());

        Self {
            original_text: text.to_string(),
            detected_language: lang.language,
            language_confidence: lang.confidence,
            sentiment: label,
            sentiment_confidence: confidence,
            positive_score: scores.positive,
            neutral_score: scores.neutral,
            negative_score: scores.negative,
            error,
        }
    }

    pub fn is_error(&self) -> bool {
        self.sentiment == ERROR_LABEL
    }
}
