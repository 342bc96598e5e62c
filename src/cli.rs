use crate::analyzer::EngineKind;
use crate::export::ExportFormat;
use clap::{Parser, Subcommand};
use sentiment_ai_common::Expression;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sentiment-ai")]
#[command(about = "多言語（英語・ヒンディー語・テルグ語）感情解析・言語判定ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// 判定エンジン (model/rules)
    #[arg(long, value_enum, default_value = "model", global = true)]
    pub engine: EngineKind,
}

#[derive(Subcommand)]
pub enum Commands {
    /// テキストの感情と言語を判定
    Analyze {
        /// 解析するテキスト（省略時は --file か標準入力）
        text: Option<String>,

        /// テキストファイルから読む
        #[arg(short, long, conflicts_with = "text")]
        file: Option<PathBuf>,

        /// 結果をJSONで出力
        #[arg(long)]
        json: bool,
    },

    /// CSV/Excelの "text" 列を一括解析
    Batch {
        /// 入力ファイル (csv/xlsx/xls/ods)
        #[arg(required = true)]
        input: PathBuf,

        /// 出力ファイル/ディレクトリ
        #[arg(short, long, default_value = "sentiment_analysis_results.csv")]
        output: PathBuf,

        /// 出力形式 (csv/excel/json/all)
        #[arg(short, long, default_value = "csv")]
        format: ExportFormat,

        /// 進捗バーを表示しない
        #[arg(long)]
        no_progress: bool,

        /// 画面に表示する先頭行数
        #[arg(long, default_value = "10")]
        preview: usize,
    },

    /// 音声ファイルを文字起こしして解析
    Transcribe {
        /// 音声ファイル (webm/wav/flac/ogg/opus)
        #[arg(required = true)]
        audio: PathBuf,

        /// 音声の言語 (English/Hindi/Telugu)
        #[arg(short, long, default_value = "English")]
        language: String,

        /// 文字起こしのみ（感情解析しない）
        #[arg(long)]
        transcript_only: bool,
    },

    /// 音声認識APIの疎通確認
    Probe,

    /// 表情と書き起こしから動画の感情を判定
    Video {
        /// 観察された表情 (happy/sad/neutral/surprised/angry/fearful/disgusted)
        #[arg(short, long, value_delimiter = ',')]
        expressions: Vec<Expression>,

        /// 音声の書き起こし
        #[arg(short, long)]
        transcript: Option<String>,
    },

    /// 対話モード
    Interactive,

    /// サンプルCSVを出力
    Sample {
        /// 出力先
        #[arg(short, long, default_value = "sample_sentiment_analysis.csv")]
        output: PathBuf,
    },

    /// モデル情報を表示
    Info,

    /// 設定を表示/編集
    Config {
        /// 推論APIトークンを設定
        #[arg(long)]
        set_hf_token: Option<String>,

        /// 音声認識APIキーを設定
        #[arg(long)]
        set_speech_key: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
