//! 音声・動画の解析
//!
//! 音声は文字起こし（APIまたは手入力）を感情解析する。
//! 動画は観察した表情と音声の書き起こしを組み合わせて総合判定する。

use crate::analyzer::SentimentAnalyzer;
use crate::language::LanguageDetector;
use sentiment_ai_common::{
    combine_sentiments, expression_sentiment, Analysis, CombinedVerdict, Expression, LanguageResult, Sentiment,
    SentimentResult,
};

/// 書き起こしテキストの解析結果
#[derive(Debug, Clone)]
pub struct TranscriptAnalysis {
    pub transcript: String,
    pub word_count: usize,
    pub language: Analysis<LanguageResult>,
    pub sentiment: Analysis<SentimentResult>,
}

pub async fn analyze_transcript(
    analyzer: &SentimentAnalyzer,
    detector: &LanguageDetector,
    transcript: &str,
) -> TranscriptAnalysis {
    TranscriptAnalysis {
        transcript: transcript.trim().to_string(),
        word_count: transcript.split_whitespace().count(),
        language: detector.detect(transcript),
        sentiment: analyzer.analyze_text(transcript).await,
    }
}

/// 動画（表情 + 音声）の解析結果
#[derive(Debug, Clone)]
pub struct VideoAnalysis {
    pub expressions: Vec<Expression>,
    pub visual_sentiment: Sentiment,
    pub visual_confidence: f64,
    /// 書き起こしがない場合は None
    pub audio: Option<TranscriptAnalysis>,
    pub combined: CombinedVerdict,
}

/// 表情と書き起こしから総合判定
///
/// 書き起こしがない、または音声の解析に失敗した場合は音声側を NEUTRAL とみなす。
pub async fn analyze_video(
    analyzer: &SentimentAnalyzer,
    detector: &LanguageDetector,
    expressions: &[Expression],
    transcript: Option<&str>,
) -> VideoAnalysis {
    let (visual_sentiment, visual_confidence) = expression_sentiment(expressions);

    let audio = match transcript.map(str::trim).filter(|t| !t.is_empty()) {
        Some(text) => Some(analyze_transcript(analyzer, detector, text).await),
        None => None,
    };
    let audio_sentiment = audio
        .as_ref()
        .map(|a| a.sentiment.view().sentiment)
        .unwrap_or(Sentiment::Neutral);

    VideoAnalysis {
        expressions: expressions.to_vec(),
        visual_sentiment,
        visual_confidence,
        combined: combine_sentiments(audio_sentiment, visual_sentiment),
        audio,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::DetectorKind;
    use sentiment_ai_common::KeywordClassifier;

    fn rules() -> (SentimentAnalyzer, LanguageDetector) {
        (
            SentimentAnalyzer::rules(KeywordClassifier::default(), 512),
            LanguageDetector::new(DetectorKind::Script),
        )
    }

    #[tokio::test]
    async fn test_transcript_word_count() {
        let (analyzer, detector) = rules();
        let result = analyze_transcript(&analyzer, &detector, "  this is really good  ").await;
        assert_eq!(result.word_count, 4);
        assert_eq!(result.transcript, "this is really good");
        assert_eq!(result.sentiment.view().sentiment, Sentiment::Positive);
    }

    #[tokio::test]
    async fn test_video_without_transcript_uses_visual_only() {
        let (analyzer, detector) = rules();
        let result = analyze_video(&analyzer, &detector, &[Expression::HappySmiling], None).await;
        assert!(result.audio.is_none());
        assert_eq!(result.visual_sentiment, Sentiment::Positive);
        assert_eq!(result.visual_confidence, 75.0);
        assert_eq!(result.combined.sentiment, Sentiment::Positive);
    }

    #[tokio::test]
    async fn test_video_audio_and_visual_agree() {
        let (analyzer, detector) = rules();
        let result = analyze_video(
            &analyzer,
            &detector,
            &[Expression::Angry, Expression::SadFrowning],
            Some("this was terrible and awful"),
        )
        .await;
        assert_eq!(result.combined.sentiment, Sentiment::Negative);
        assert_eq!(result.combined.confidence, 90.0);
    }
}
