//! 端末表示（結果・スコアの棒グラフ・集計）

use crate::analyzer::ModelInfo;
use crate::speech::Transcription;
use sentiment_ai_common::{
    Analysis, BatchSummary, CombinedVerdict, LanguageResult, ResultRecord, Sentiment, SentimentResult,
};

const BAR_WIDTH: usize = 30;

fn sentiment_icon(sentiment: Sentiment) -> &'static str {
    match sentiment {
        Sentiment::Positive => "😊",
        Sentiment::Negative => "😞",
        Sentiment::Neutral => "😐",
    }
}

/// 0.0〜1.0 を幅 `width` の棒にする
pub fn score_bar(value: f64, width: usize) -> String {
    let filled = ((value.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

pub fn print_language(language: &Analysis<LanguageResult>) {
    match language {
        Analysis::Success(lang) => {
            let support = if lang.is_supported { "" } else { "（感情解析の対象外）" };
            println!(
                "🌐 言語: {} [{}] {:.1}%{}",
                lang.language,
                lang.language_code,
                lang.confidence * 100.0,
                support
            );
        }
        Analysis::Failure(failure) => println!("🌐 言語: Unknown ({})", failure.message),
    }
}

pub fn print_sentiment(sentiment: &Analysis<SentimentResult>) {
    if let Some(failure) = sentiment.failure() {
        println!("⚠ 感情解析エラー: {}", failure.message);
    }

    let view = sentiment.view();
    println!(
        "{} 感情: {} ({:.1}% confidence)",
        sentiment_icon(view.sentiment),
        view.sentiment,
        view.confidence
    );
    for (label, score) in view.all_scores.iter() {
        println!("  {:<9} {} {:>5.1}%", label.as_str(), score_bar(score, BAR_WIDTH), score * 100.0);
    }
}

pub fn print_transcription(transcription: &Transcription) {
    println!("🎤 文字起こし ({}): {}", transcription.language_code, transcription.text);
    println!(
        "  確信度: {:.1}% / {}語",
        transcription.confidence * 100.0,
        transcription.word_count()
    );
}

pub fn print_combined(verdict: &CombinedVerdict) {
    println!(
        "🎬 総合判定: {} {} ({:.1}% confidence, score {:+.2})",
        sentiment_icon(verdict.sentiment),
        verdict.sentiment,
        verdict.confidence,
        verdict.score
    );
    println!(
        "  重み: 音声 {:.0}% / 表情 {:.0}%",
        verdict.audio_weight * 100.0,
        verdict.visual_weight * 100.0
    );
}

pub fn print_model_info(info: &ModelInfo) {
    println!("モデル情報:");
    println!("  モデル: {}", info.model_name);
    println!("  実行先: {}", info.device);
    println!("  状態: {}", if info.loaded { "読み込み済み" } else { "未読み込み" });
    println!("  対応言語: {}", info.supported_languages.join(", "));
}

pub fn print_summary(summary: &BatchSummary) {
    println!("集計 ({}件):", summary.total);
    let total = summary.total.max(1) as f64;
    for sentiment in [Sentiment::Positive, Sentiment::Neutral, Sentiment::Negative] {
        let count = summary.count(sentiment);
        println!(
            "  {:<9} {} {:>4}",
            sentiment.as_str(),
            score_bar(count as f64 / total, BAR_WIDTH),
            count
        );
    }
    if summary.errors > 0 {
        println!("  {:<9} {} {:>4}", "ERROR", score_bar(summary.errors as f64 / total, BAR_WIDTH), summary.errors);
    }

    if !summary.languages.is_empty() {
        println!("言語分布 ({}言語):", summary.unique_languages());
        for share in &summary.languages {
            println!("  {:<24} {:>4} ({:.1}%)", share.language, share.count, share.percentage);
        }
    }
}

/// 先頭 `limit` 行を表示
pub fn print_preview(records: &[ResultRecord], limit: usize) {
    for record in records.iter().take(limit) {
        let text: String = record.original_text.chars().take(40).collect();
        let suffix = if record.original_text.chars().count() > 40 { "…" } else { "" };
        println!(
            "  {:<8} {:>5.1}%  {:<12} {}{}",
            record.sentiment, record.sentiment_confidence, record.detected_language, text, suffix
        );
    }
    if records.len() > limit {
        println!("  ... 他 {} 行", records.len() - limit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_bar() {
        assert_eq!(score_bar(0.0, 4), "░░░░");
        assert_eq!(score_bar(1.0, 4), "████");
        assert_eq!(score_bar(0.5, 4), "██░░");
        assert_eq!(score_bar(1.7, 4), "████");
        assert_eq!(score_bar(-0.2, 4), "░░░░");
    }
}
