//! ルールベース判定（モデルなしモード）
//!
//! - 感情: 肯定/否定キーワードの出現数で判定
//! - 言語: 文字種（ASCII英字・デーヴァナーガリー・テルグ文字）の数で判定
//!
//! キーワードは既定で部分一致（単語境界を見ない）。"unlikely" は "like" に、
//! "dislike" は "like" と "dislike" の両方にヒットする。

use crate::error::{Error, Result};
use crate::types::{Sentiment, SentimentResult, SentimentScores};
use regex::Regex;
use serde::{Deserialize, Serialize};

const POSITIVE_WORDS: &[&str] = &[
    "good", "great", "excellent", "amazing", "wonderful", "fantastic", "awesome", "love", "like",
    "happy", "best", "perfect", "brilliant", "outstanding", "superb", "marvelous", "terrific",
    "fabulous",
    // ヒンディー語（ローマ字表記）
    "accha", "achha", "bahut", "sundar", "khushi", "prasanna", "uttam", "shandar",
    // テルグ語（ローマ字表記）
    "bagundi", "manchidi", "santosham", "bavundi", "chala", "bagunna",
];

const NEGATIVE_WORDS: &[&str] = &[
    "bad", "terrible", "awful", "horrible", "hate", "dislike", "sad", "angry", "worst", "poor",
    "disappointing", "disgusting", "pathetic", "useless", "annoying", "frustrating",
    // ヒンディー語（ローマ字表記）
    "bura", "kharab", "ganda", "dukh", "pareshani", "galat", "bekaar",
    // テルグ語（ローマ字表記）
    "chedu", "daridram", "kastam", "badha", "kopam", "vishaadam",
];

/// 確信度の上限
const MAX_RULE_CONFIDENCE: f64 = 90.0;
const BASE_RULE_CONFIDENCE: f64 = 60.0;
const STEP_RULE_CONFIDENCE: f64 = 10.0;
const NEUTRAL_RULE_CONFIDENCE: f64 = 50.0;

/// キーワードリスト
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordSet {
    pub positive: Vec<String>,
    pub negative: Vec<String>,
}

impl Default for KeywordSet {
    fn default() -> Self {
        Self::builtin()
    }
}

impl KeywordSet {
    /// 英語・ヒンディー語・テルグ語の組み込みリスト
    pub fn builtin() -> Self {
        Self {
            positive: POSITIVE_WORDS.iter().map(|s| s.to_string()).collect(),
            negative: NEGATIVE_WORDS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// JSONファイルから読み込み
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// JSON文字列から読み込み
    pub fn from_json(json: &str) -> Result<Self> {
        let mut set: Self = serde_json::from_str(json)?;
        set.positive = lowercase_all(&set.positive);
        set.negative = lowercase_all(&set.negative);

        if set.positive.is_empty() && set.negative.is_empty() {
            return Err(Error::Config("キーワードリストが空です".into()));
        }
        Ok(set)
    }
}

fn lowercase_all(words: &[String]) -> Vec<String> {
    words
        .iter()
        .map(|w| w.trim().to_lowercase())
        .filter(|w| !w.is_empty())
        .collect()
}

/// キーワードの照合方法
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// 部分一致（従来動作）
    #[default]
    Substring,
    /// 単語境界で一致
    Word,
}

impl std::str::FromStr for MatchMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "substring" | "sub" => Ok(MatchMode::Substring),
            "word" | "token" => Ok(MatchMode::Word),
            _ => Err(format!("Unknown match mode: {}. Use substring or word", s)),
        }
    }
}

impl std::fmt::Display for MatchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchMode::Substring => write!(f, "substring"),
            MatchMode::Word => write!(f, "word"),
        }
    }
}

/// キーワードのヒット数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct KeywordHits {
    pub positive: usize,
    pub negative: usize,
}

/// ルールベースの感情判定結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleSentiment {
    pub sentiment: Sentiment,
    /// ヒューリスティックな確信度（0〜100、確率ではない）
    pub confidence: f64,
    pub hits: KeywordHits,
}

impl RuleSentiment {
    pub fn to_result(&self) -> SentimentResult {
        SentimentResult {
            sentiment: self.sentiment,
            confidence: self.confidence,
            all_scores: SentimentScores::from_heuristic(self.sentiment, self.confidence),
        }
    }
}

/// キーワード分類器
#[derive(Debug, Clone)]
pub struct KeywordClassifier {
    keywords: KeywordSet,
    mode: MatchMode,
    // Word モード時のみ（positive, negative）
    patterns: Option<(Vec<Regex>, Vec<Regex>)>,
}

impl Default for KeywordClassifier {
    fn default() -> Self {
        Self {
            keywords: KeywordSet::builtin(),
            mode: MatchMode::Substring,
            patterns: None,
        }
    }
}

impl KeywordClassifier {
    pub fn new(keywords: KeywordSet, mode: MatchMode) -> Result<Self> {
        let patterns = match mode {
            MatchMode::Substring => None,
            MatchMode::Word => Some((
                compile_word_patterns(&keywords.positive)?,
                compile_word_patterns(&keywords.negative)?,
            )),
        };
        Ok(Self {
            keywords,
            mode,
            patterns,
        })
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    /// 肯定/否定キーワードのヒット数（各キーワードは1回まで）
    pub fn count_hits(&self, text: &str) -> KeywordHits {
        let lowered = text.to_lowercase();
        match &self.patterns {
            None => KeywordHits {
                positive: self.keywords.positive.iter().filter(|w| lowered.contains(w.as_str())).count(),
                negative: self.keywords.negative.iter().filter(|w| lowered.contains(w.as_str())).count(),
            },
            Some((positive, negative)) => KeywordHits {
                positive: positive.iter().filter(|re| re.is_match(&lowered)).count(),
                negative: negative.iter().filter(|re| re.is_match(&lowered)).count(),
            },
        }
    }

    /// 感情を判定
    pub fn classify(&self, text: &str) -> RuleSentiment {
        if text.trim().is_empty() {
            return RuleSentiment {
                sentiment: Sentiment::Neutral,
                confidence: 0.0,
                hits: KeywordHits::default(),
            };
        }

        let hits = self.count_hits(text);
        let (sentiment, confidence) = if hits.positive > hits.negative {
            (Sentiment::Positive, scaled_confidence(hits.positive - hits.negative))
        } else if hits.negative > hits.positive {
            (Sentiment::Negative, scaled_confidence(hits.negative - hits.positive))
        } else {
            (Sentiment::Neutral, NEUTRAL_RULE_CONFIDENCE)
        };

        RuleSentiment {
            sentiment,
            confidence,
            hits,
        }
    }
}

fn scaled_confidence(margin: usize) -> f64 {
    (BASE_RULE_CONFIDENCE + STEP_RULE_CONFIDENCE * margin as f64).min(MAX_RULE_CONFIDENCE)
}

fn compile_word_patterns(words: &[String]) -> Result<Vec<Regex>> {
    words
        .iter()
        .map(|w| Regex::new(&format!(r"\b{}\b", regex::escape(&w.to_lowercase()))).map_err(Error::from))
        .collect()
}

/// 文字種から推定する言語
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScriptLanguage {
    English,
    Hindi,
    Telugu,
    Unknown,
}

impl ScriptLanguage {
    pub fn name(&self) -> &'static str {
        match self {
            ScriptLanguage::English => "English",
            ScriptLanguage::Hindi => "Hindi",
            ScriptLanguage::Telugu => "Telugu",
            ScriptLanguage::Unknown => "Unknown",
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ScriptLanguage::English => "en",
            ScriptLanguage::Hindi => "hi",
            ScriptLanguage::Telugu => "te",
            ScriptLanguage::Unknown => "unknown",
        }
    }
}

/// 文字種ごとの文字数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScriptCounts {
    /// ASCII英字
    pub english: usize,
    /// U+0900..=U+097F
    pub hindi: usize,
    /// U+0C00..=U+0C7F
    pub telugu: usize,
}

impl ScriptCounts {
    pub fn count(text: &str) -> Self {
        let mut counts = Self::default();
        for c in text.chars() {
            if c.is_ascii_alphabetic() {
                counts.english += 1;
            } else if ('\u{0900}'..='\u{097F}').contains(&c) {
                counts.hindi += 1;
            } else if ('\u{0C00}'..='\u{0C7F}').contains(&c) {
                counts.telugu += 1;
            }
        }
        counts
    }

    pub fn total(&self) -> usize {
        self.english + self.hindi + self.telugu
    }
}

/// 文字種による言語推定結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptGuess {
    pub language: ScriptLanguage,
    /// 該当文字の割合（0〜100%）
    pub confidence: f64,
    pub counts: ScriptCounts,
}

/// 文字種の多数決で言語を推定
///
/// 同数の場合は English > Hindi > Telugu の優先順で決める。
pub fn detect_script(text: &str) -> ScriptGuess {
    let counts = ScriptCounts::count(text);
    let total = counts.total();

    if total == 0 {
        return ScriptGuess {
            language: ScriptLanguage::Unknown,
            confidence: 0.0,
            counts,
        };
    }

    let mut best = (ScriptLanguage::English, counts.english);
    for candidate in [(ScriptLanguage::Hindi, counts.hindi), (ScriptLanguage::Telugu, counts.telugu)] {
        if candidate.1 > best.1 {
            best = candidate;
        }
    }

    ScriptGuess {
        language: best.0,
        confidence: best.1 as f64 / total as f64 * 100.0,
        counts,
    }
}
