//! 対話モード
//!
//! テキスト入力・例文・音声（ファイルまたは手入力の書き起こし）・動画（表情選択）を
//! メニューから繰り返し解析する。

use crate::analyzer::SentimentAnalyzer;
use crate::display;
use crate::error::{Result, SentimentAiError};
use crate::export::sample::EXAMPLE_TEXTS;
use crate::language::LanguageDetector;
use crate::media;
use crate::speech::SpeechClient;
use dialoguer::{Input, MultiSelect, Select};
use sentiment_ai_common::Expression;
use std::path::PathBuf;

/// メニュー項目
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    AnalyzeText,
    Example,
    Voice,
    Video,
    ModelInfo,
    Quit,
}

impl MenuAction {
    pub const ALL: [MenuAction; 6] = [
        MenuAction::AnalyzeText,
        MenuAction::Example,
        MenuAction::Voice,
        MenuAction::Video,
        MenuAction::ModelInfo,
        MenuAction::Quit,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MenuAction::AnalyzeText => "テキストを解析",
            MenuAction::Example => "例文を解析",
            MenuAction::Voice => "音声を解析",
            MenuAction::Video => "動画を解析（表情 + 音声）",
            MenuAction::ModelInfo => "モデル情報",
            MenuAction::Quit => "終了",
        }
    }
}

/// 音声入力の書き起こし元
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscriptSource {
    /// 音声ファイルをAPIで文字起こし
    AudioFile(PathBuf),
    /// 手入力
    Manual(String),
}

/// 空入力なら手入力扱いにせず None
pub fn parse_transcript_source(input: &str) -> Option<TranscriptSource> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Some(path) = trimmed.strip_prefix('@') {
        return Some(TranscriptSource::AudioFile(PathBuf::from(path.trim())));
    }
    Some(TranscriptSource::Manual(trimmed.to_string()))
}

fn prompt_err(e: dialoguer::Error) -> SentimentAiError {
    SentimentAiError::Prompt(e.to_string())
}

pub async fn run_interactive(
    analyzer: &SentimentAnalyzer,
    detector: &LanguageDetector,
    speech: Option<&SpeechClient>,
) -> Result<()> {
    println!("🌏 Multi-Language Sentiment Analysis (English / Hindi / Telugu)\n");

    loop {
        let labels: Vec<&str> = MenuAction::ALL.iter().map(|a| a.label()).collect();
        let selection = Select::new()
            .with_prompt("操作を選択")
            .items(&labels)
            .default(0)
            .interact()
            .map_err(prompt_err)?;

        match MenuAction::ALL[selection] {
            MenuAction::AnalyzeText => {
                let text: String = Input::new()
                    .with_prompt("テキスト")
                    .allow_empty(true)
                    .interact_text()
                    .map_err(prompt_err)?;
                analyze_and_print(analyzer, detector, &text).await;
            }
            MenuAction::Example => {
                let names: Vec<&str> = EXAMPLE_TEXTS.iter().map(|(lang, _)| *lang).collect();
                let index = Select::new()
                    .with_prompt("例文の言語")
                    .items(&names)
                    .default(0)
                    .interact()
                    .map_err(prompt_err)?;
                let (_, text) = EXAMPLE_TEXTS[index];
                println!("例文: {}", text);
                analyze_and_print(analyzer, detector, text).await;
            }
            MenuAction::Voice => voice(analyzer, detector, speech).await?,
            MenuAction::Video => video(analyzer, detector).await?,
            MenuAction::ModelInfo => display::print_model_info(&analyzer.model_info()),
            MenuAction::Quit => break,
        }
        println!();
    }

    Ok(())
}

async fn analyze_and_print(analyzer: &SentimentAnalyzer, detector: &LanguageDetector, text: &str) {
    let language = detector.detect(text);
    let sentiment = analyzer.analyze_text(text).await;
    display::print_language(&language);
    display::print_sentiment(&sentiment);
}

async fn voice(
    analyzer: &SentimentAnalyzer,
    detector: &LanguageDetector,
    speech: Option<&SpeechClient>,
) -> Result<()> {
    let input: String = Input::new()
        .with_prompt("書き起こしを入力（音声ファイルは @path）")
        .allow_empty(true)
        .interact_text()
        .map_err(prompt_err)?;

    let transcript = match parse_transcript_source(&input) {
        None => {
            println!("入力がありません");
            return Ok(());
        }
        Some(TranscriptSource::Manual(text)) => text,
        Some(TranscriptSource::AudioFile(path)) => {
            let Some(client) = speech else {
                println!("⚠ 音声認識APIキーが未設定です（GOOGLE_CLOUD_API_KEY）");
                return Ok(());
            };
            let languages = ["English", "Hindi", "Telugu"];
            let index = Select::new()
                .with_prompt("音声の言語")
                .items(&languages)
                .default(0)
                .interact()
                .map_err(prompt_err)?;

            match client.transcribe_file(&path, languages[index]).await {
                Ok(transcription) => {
                    display::print_transcription(&transcription);
                    transcription.text
                }
                Err(e) => {
                    println!("⚠ 文字起こし失敗: {}", e);
                    return Ok(());
                }
            }
        }
    };

    let result = media::analyze_transcript(analyzer, detector, &transcript).await;
    display::print_language(&result.language);
    display::print_sentiment(&result.sentiment);
    println!("  {}語を解析", result.word_count);
    Ok(())
}

async fn video(analyzer: &SentimentAnalyzer, detector: &LanguageDetector) -> Result<()> {
    let labels: Vec<&str> = Expression::ALL.iter().map(|e| e.label()).collect();
    let chosen = MultiSelect::new()
        .with_prompt("観察された表情（スペースで選択）")
        .items(&labels)
        .interact()
        .map_err(prompt_err)?;
    let expressions: Vec<Expression> = chosen.into_iter().map(|i| Expression::ALL[i]).collect();

    let transcript: String = Input::new()
        .with_prompt("音声の書き起こし（省略可）")
        .allow_empty(true)
        .interact_text()
        .map_err(prompt_err)?;

    let result = media::analyze_video(analyzer, detector, &expressions, Some(&transcript)).await;
    println!(
        "🙂 表情: {} ({:.0}%)",
        result.visual_sentiment, result.visual_confidence
    );
    if let Some(audio) = &result.audio {
        display::print_sentiment(&audio.sentiment);
    }
    display::print_combined(&result.combined);
    Ok(())
}
