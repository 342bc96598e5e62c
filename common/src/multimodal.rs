//! 動画解析（表情 + 音声）の判定
//!
//! 表情は利用者が観察結果を選択し、音声は書き起こしテキストを感情解析する。
//! 両者を 音声0.6 / 表情0.4 で重み付けして総合判定する。

use crate::types::Sentiment;
use serde::{Deserialize, Serialize};

const AUDIO_WEIGHT: f64 = 0.6;
const VISUAL_WEIGHT: f64 = 0.4;
const COMBINED_THRESHOLD: f64 = 0.3;

/// 観察された表情
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Expression {
    HappySmiling,
    SadFrowning,
    Neutral,
    Surprised,
    Angry,
    Fearful,
    Disgusted,
}

impl Expression {
    pub const ALL: [Expression; 7] = [
        Expression::HappySmiling,
        Expression::SadFrowning,
        Expression::Neutral,
        Expression::Surprised,
        Expression::Angry,
        Expression::Fearful,
        Expression::Disgusted,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Expression::HappySmiling => "Happy/Smiling",
            Expression::SadFrowning => "Sad/Frowning",
            Expression::Neutral => "Neutral",
            Expression::Surprised => "Surprised",
            Expression::Angry => "Angry",
            Expression::Fearful => "Fearful",
            Expression::Disgusted => "Disgusted",
        }
    }

    fn polarity(&self) -> Option<Sentiment> {
        match self {
            Expression::HappySmiling | Expression::Surprised => Some(Sentiment::Positive),
            Expression::SadFrowning | Expression::Angry | Expression::Fearful | Expression::Disgusted => {
                Some(Sentiment::Negative)
            }
            Expression::Neutral => None,
        }
    }
}

impl std::fmt::Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for Expression {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "happy" | "smiling" | "happy/smiling" => Ok(Expression::HappySmiling),
            "sad" | "frowning" | "sad/frowning" => Ok(Expression::SadFrowning),
            "neutral" => Ok(Expression::Neutral),
            "surprised" => Ok(Expression::Surprised),
            "angry" => Ok(Expression::Angry),
            "fearful" => Ok(Expression::Fearful),
            "disgusted" => Ok(Expression::Disgusted),
            _ => Err(format!(
                "Unknown expression: {}. Use happy, sad, neutral, surprised, angry, fearful, or disgusted",
                s
            )),
        }
    }
}

/// 表情リストから感情を判定（確信度は0〜100のヒューリスティック値）
pub fn expression_sentiment(expressions: &[Expression]) -> (Sentiment, f64) {
    let positive = expressions
        .iter()
        .filter(|e| e.polarity() == Some(Sentiment::Positive))
        .count();
    let negative = expressions
        .iter()
        .filter(|e| e.polarity() == Some(Sentiment::Negative))
        .count();

    if positive > negative {
        (Sentiment::Positive, (60.0 + positive as f64 * 15.0).min(85.0))
    } else if negative > positive {
        (Sentiment::Negative, (60.0 + negative as f64 * 15.0).min(85.0))
    } else {
        (Sentiment::Neutral, 70.0)
    }
}

/// 音声と表情の総合判定
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedVerdict {
    pub sentiment: Sentiment,
    pub confidence: f64,
    /// -1.0〜1.0
    pub score: f64,
    pub audio_weight: f64,
    pub visual_weight: f64,
}

pub fn combine_sentiments(audio: Sentiment, visual: Sentiment) -> CombinedVerdict {
    let score = audio.polarity() * AUDIO_WEIGHT + visual.polarity() * VISUAL_WEIGHT;

    let (sentiment, confidence) = if score > COMBINED_THRESHOLD {
        (Sentiment::Positive, (70.0 + score.abs() * 20.0).min(90.0))
    } else if score < -COMBINED_THRESHOLD {
        (Sentiment::Negative, (70.0 + score.abs() * 20.0).min(90.0))
    } else {
        (Sentiment::Neutral, 65.0)
    };

    CombinedVerdict {
        sentiment,
        confidence,
        score,
        audio_weight: AUDIO_WEIGHT,
        visual_weight: VISUAL_WEIGHT,
    }
}
