//! Sentiment AI Common Library
//!
//! CLIと対話モードで共有される型と分類ロジック

pub mod types;
pub mod error;
pub mod labels;
pub mod rules;
pub mod languages;
pub mod multimodal;
pub mod summary;

#[cfg(feature = "excel")]
pub mod export;

pub use types::{
    Analysis, Failure, FailureKind, LanguageResult, RawLabel, ResultRecord, Sentiment,
    SentimentResult, SentimentScores, ERROR_LABEL, RESULT_COLUMNS,
};
pub use error::{Error, Result};
pub use labels::{classify_label, normalize_labels, select_prediction, LabelAliases};
pub use rules::{
    detect_script, KeywordClassifier, KeywordHits, KeywordSet, MatchMode, RuleSentiment,
    ScriptCounts, ScriptGuess, ScriptLanguage,
};
pub use languages::{language_name, speech_language_code, SUPPORTED_LANGUAGES};
pub use multimodal::{combine_sentiments, expression_sentiment, CombinedVerdict, Expression};
pub use summary::{language_distribution, BatchSummary, LanguageShare};
