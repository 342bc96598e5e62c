use anyhow::Context;
use clap::Parser;
use sentiment_ai_rust::{analyzer, batch, cli, config, display, export, interactive, language, media, speech};
use analyzer::SentimentAnalyzer;
use cli::{Cli, Commands};
use config::Config;
use language::LanguageDetector;
use std::io::Read;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: bool, config: &Config) -> anyhow::Result<()> {
    let env_filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&config.log_level))
            .unwrap_or_else(|_| EnvFilter::new("info"))
    };

    let subscriber = tracing_subscriber::Registry::default().with(env_filter).with(
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(false),
    );

    tracing::subscriber::set_global_default(subscriber).context("failed to set tracing subscriber")?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::load().context("設定ファイルの読み込みに失敗")?;
    init_tracing(cli.verbose, &config)?;

    let detector = LanguageDetector::new(cli.engine.into());

    match cli.command {
        Commands::Analyze { text, file, json } => {
            let text = match (text, file) {
                (Some(text), _) => text,
                (None, Some(path)) => std::fs::read_to_string(&path)
                    .with_context(|| format!("ファイルを読めません: {}", path.display()))?,
                (None, None) => {
                    let mut buffer = String::new();
                    std::io::stdin().read_to_string(&mut buffer).context("標準入力の読み込みに失敗")?;
                    buffer
                }
            };

            let analyzer = SentimentAnalyzer::from_config(&config, cli.engine).await?;
            let language = detector.detect(&text);
            let sentiment = analyzer.analyze_text(&text).await;

            if json {
                let payload = serde_json::json!({
                    "language": language,
                    "sentiment": sentiment,
                });
                println!("{}", serde_json::to_string_pretty(&payload)?);
            } else {
                display::print_language(&language);
                display::print_sentiment(&sentiment);
            }
        }

        Commands::Batch { input, output, format, no_progress, preview } => {
            println!("📊 sentiment-ai - 一括解析\n");

            // 1. 読み込み
            println!("[1/3] 入力を読み込み中...");
            let table = batch::read_table(&input)
                .with_context(|| format!("入力を読めません: {}", input.display()))?;
            if table.text_column().is_none() {
                return Err(sentiment_ai_rust::error::SentimentAiError::MissingTextColumn {
                    columns: table.headers.clone(),
                }
                .into());
            }
            println!("✔ {}行を検出\n", table.rows.len());

            // 2. 解析
            println!("[2/3] 解析中...");
            let analyzer = SentimentAnalyzer::from_config(&config, cli.engine).await?;
            let rows = batch::run_batch(&table, &analyzer, &detector, !no_progress).await?;
            let records = batch::to_records(&rows);
            println!("✔ 解析完了\n");

            display::print_preview(&records, preview);
            println!();
            display::print_summary(&batch::summarize(&rows));
            println!();

            // 3. 出力
            println!("[3/3] 結果を保存中...");
            export::export_results(&records, format, &output, &analyzer.model_info())?;

            println!("\n✅ 完了");
        }

        Commands::Transcribe { audio, language, transcript_only } => {
            let client = speech::SpeechClient::from_config(&config)?;
            let transcription = client.transcribe_file(&audio, &language).await?;
            display::print_transcription(&transcription);

            if !transcript_only {
                let analyzer = SentimentAnalyzer::from_config(&config, cli.engine).await?;
                let result = media::analyze_transcript(&analyzer, &detector, &transcription.text).await;
                display::print_language(&result.language);
                display::print_sentiment(&result.sentiment);
            }
        }

        Commands::Probe => {
            let client = speech::SpeechClient::from_config(&config)?;
            match client.probe().await {
                Ok(()) => println!("✔ 音声認識APIに接続できます"),
                Err(e) => println!("✗ 音声認識APIに接続できません: {}", e),
            }
        }

        Commands::Video { expressions, transcript } => {
            let analyzer = SentimentAnalyzer::from_config(&config, cli.engine).await?;
            let result = media::analyze_video(&analyzer, &detector, &expressions, transcript.as_deref()).await;

            let observed: Vec<&str> = result.expressions.iter().map(|e| e.label()).collect();
            println!(
                "🙂 表情: {} → {} ({:.0}%)",
                if observed.is_empty() { "-".to_string() } else { observed.join(", ") },
                result.visual_sentiment,
                result.visual_confidence
            );
            if let Some(audio) = &result.audio {
                display::print_sentiment(&audio.sentiment);
            }
            display::print_combined(&result.combined);
        }

        Commands::Interactive => {
            let analyzer = SentimentAnalyzer::from_config(&config, cli.engine).await?;
            let speech = match speech::SpeechClient::from_config(&config) {
                Ok(client) => Some(client),
                Err(e) => {
                    tracing::info!(error = %e, "speech recognition disabled");
                    None
                }
            };
            interactive::run_interactive(&analyzer, &detector, speech.as_ref()).await?;
        }

        Commands::Sample { output } => {
            export::sample::write_sample_csv(&output)?;
            println!("✔ サンプルCSVを出力: {}", output.display());
        }

        Commands::Info => {
            let analyzer = SentimentAnalyzer::from_config(&config, cli.engine).await?;
            display::print_model_info(&analyzer.model_info());
        }

        Commands::Config { set_hf_token, set_speech_key, show } => {
            let mut config = config;

            if let Some(token) = set_hf_token {
                config.set_hf_token(token)?;
                println!("✔ 推論APIトークンを設定しました");
            }

            if let Some(key) = set_speech_key {
                config.set_speech_api_key(key)?;
                println!("✔ 音声認識APIキーを設定しました");
            }

            if show {
                println!("設定:");
                println!("  主モデル: {}", config.primary_model);
                println!("  予備モデル: {}", config.fallback_model);
                println!("  推論API: {}", config.inference_url);
                println!("  最大文字数: {}", config.max_text_chars);
                println!("  キーワード照合: {}", config.match_mode);
                println!("  推論APIトークン: {}", if config.hf_token().is_some() { "設定済み" } else { "未設定" });
                println!(
                    "  音声認識APIキー: {}",
                    if config.get_speech_api_key().is_ok() { "設定済み" } else { "未設定" }
                );
            }
        }
    }

    Ok(())
}
