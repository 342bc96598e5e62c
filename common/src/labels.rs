//! ラベル正規化モジュール
//!
//! モデルごとに異なるラベル語彙（LABEL_0/1/2, "1 STAR"〜"5 STARS", POS/NEG/NEU）を
//! POSITIVE / NEGATIVE / NEUTRAL の3分類に揃える。
//!
//! ## 判定順
//! 1. 同義語テーブルとの完全一致（大文字小文字を区別しない）
//! 2. 部分一致: "pos" を含めば POSITIVE、"neg" を含めば NEGATIVE、それ以外は NEUTRAL
//!
//! スコアは加算のみで再正規化しない。

use crate::error::Result;
use crate::types::{RawLabel, Sentiment, SentimentScores};
use serde::{Deserialize, Serialize};

const POSITIVE_SYNONYMS: &[&str] = &["POSITIVE", "POS", "LABEL_2", "4 STARS", "5 STARS"];
const NEGATIVE_SYNONYMS: &[&str] = &["NEGATIVE", "NEG", "LABEL_0", "1 STAR", "2 STARS"];
const NEUTRAL_SYNONYMS: &[&str] = &["NEUTRAL", "NEU", "LABEL_1", "3 STARS"];

lazy_static::lazy_static! {
    static ref BUILTIN: LabelAliases = LabelAliases::builtin();
}

/// ラベル同義語テーブル
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LabelAliases {
    #[serde(default)]
    pub positive: Vec<String>,
    #[serde(default)]
    pub negative: Vec<String>,
    #[serde(default)]
    pub neutral: Vec<String>,
}

impl LabelAliases {
    /// 組み込みテーブル
    pub fn builtin() -> Self {
        let owned = |list: &[&str]| list.iter().map(|s| s.to_string()).collect();
        Self {
            positive: owned(POSITIVE_SYNONYMS),
            negative: owned(NEGATIVE_SYNONYMS),
            neutral: owned(NEUTRAL_SYNONYMS),
        }
    }

    /// JSONファイルから読み込み
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// JSON文字列から読み込み
    pub fn from_json(json: &str) -> Result<Self> {
        let aliases: Self = serde_json::from_str(json)?;
        Ok(aliases)
    }

    /// 組み込みテーブルに追加の同義語を足したもの
    pub fn with_extra(extra: &LabelAliases) -> Self {
        let mut aliases = Self::builtin();
        aliases.merge(extra);
        aliases
    }

    /// 同義語を追加（重複は無視）
    pub fn merge(&mut self, other: &LabelAliases) {
        fn extend(target: &mut Vec<String>, source: &[String]) {
            for label in source {
                if !target.iter().any(|t| t.eq_ignore_ascii_case(label)) {
                    target.push(label.clone());
                }
            }
        }
        extend(&mut self.positive, &other.positive);
        extend(&mut self.negative, &other.negative);
        extend(&mut self.neutral, &other.neutral);
    }

    /// 完全一致のみで引く
    pub fn lookup(&self, label: &str) -> Option<Sentiment> {
        let upper = label.to_uppercase();
        let hit = |list: &[String]| list.iter().any(|s| s.to_uppercase() == upper);

        if hit(&self.positive) {
            Some(Sentiment::Positive)
        } else if hit(&self.negative) {
            Some(Sentiment::Negative)
        } else if hit(&self.neutral) {
            Some(Sentiment::Neutral)
        } else {
            None
        }
    }

    /// 完全一致 → 部分一致の順でラベルを分類
    pub fn classify(&self, label: &str) -> Sentiment {
        if let Some(sentiment) = self.lookup(label) {
            return sentiment;
        }

        let lower = label.to_lowercase();
        if lower.contains("pos") {
            Sentiment::Positive
        } else if lower.contains("neg") {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        }
    }

    /// 生ラベル列を3分類の累積スコアへ
    pub fn normalize(&self, labels: &[RawLabel]) -> SentimentScores {
        let mut scores = SentimentScores::default();
        for raw in labels {
            scores.add(self.classify(&raw.label), raw.score);
        }
        scores
    }
}

/// 組み込みテーブルでラベルを分類
pub fn classify_label(label: &str) -> Sentiment {
    BUILTIN.classify(label)
}

/// 組み込みテーブルで正規化
pub fn normalize_labels(labels: &[RawLabel]) -> SentimentScores {
    BUILTIN.normalize(labels)
}

/// 最大スコアのラベルを選ぶ
///
/// 同点の場合は POSITIVE, NEGATIVE, NEUTRAL の順で先に現れたものを採用する。
pub fn select_prediction(scores: &SentimentScores) -> (Sentiment, f64) {
    let mut best = (Sentiment::Positive, scores.positive);
    for (sentiment, score) in scores.iter().skip(1) {
        if score > best.1 {
            best = (sentiment, score);
        }
    }
    best
}
