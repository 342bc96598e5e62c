//! バッチ結果の集計

use crate::types::{ResultRecord, Sentiment};
use serde::{Deserialize, Serialize};

/// 言語ごとの件数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageShare {
    pub language: String,
    pub count: usize,
    /// 全体に対する割合（0〜100%）
    pub percentage: f64,
}

/// 感情ラベルと言語の分布
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    pub total: usize,
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
    pub errors: usize,
    /// 件数の多い順（同数は名前順）
    pub languages: Vec<LanguageShare>,
}

impl BatchSummary {
    pub fn from_records(records: &[ResultRecord]) -> Self {
        let mut summary = Self {
            total: records.len(),
            ..Default::default()
        };

        for record in records {
            match record.sentiment.parse::<Sentiment>() {
                Ok(Sentiment::Positive) => summary.positive += 1,
                Ok(Sentiment::Neutral) => summary.neutral += 1,
                Ok(Sentiment::Negative) => summary.negative += 1,
                Err(_) => summary.errors += 1,
            }
        }

        summary.languages = language_distribution(records.iter().map(|r| r.detected_language.as_str()));
        summary
    }

    pub fn count(&self, sentiment: Sentiment) -> usize {
        match sentiment {
            Sentiment::Positive => self.positive,
            Sentiment::Negative => self.negative,
            Sentiment::Neutral => self.neutral,
        }
    }

    pub fn unique_languages(&self) -> usize {
        self.languages.len()
    }
}

/// 言語名の列から分布を作る
pub fn language_distribution<'a, I>(languages: I) -> Vec<LanguageShare>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts: std::collections::BTreeMap<&str, usize> = std::collections::BTreeMap::new();
    let mut total = 0usize;
    for language in languages {
        *counts.entry(language).or_insert(0) += 1;
        total += 1;
    }

    let mut shares: Vec<LanguageShare> = counts
        .into_iter()
        .map(|(language, count)| LanguageShare {
            language: language.to_string(),
            count,
            percentage: count as f64 / total as f64 * 100.0,
        })
        .collect();
    // BTreeMap順（名前順）を保ったまま件数で安定ソート
    shares.sort_by(|a, b| b.count.cmp(&a.count));
    shares
}
