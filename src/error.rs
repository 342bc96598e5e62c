use thiserror::Error;

#[derive(Error, Debug)]
pub enum SentimentAiError {
    #[error("感情モデルを読み込めません（primary: {primary}, fallback: {fallback}）")]
    ModelLoad { primary: String, fallback: String },

    #[error("{0}")]
    Timeout(String),

    #[error("Network error: {0}")]
    Connection(String),

    #[error("API request failed: {status} - {message}")]
    HttpStatus { status: u16, message: String },

    /// 音声認識は成功したが文字起こしが得られない
    #[error("{0}")]
    NoTranscription(String),

    #[error("CSVに 'text' を含む列がありません。列: {}", .columns.join(", "))]
    MissingTextColumn { columns: Vec<String> },

    #[error("設定エラー: {0}")]
    Config(String),

    #[error("APIキーが設定されていません。`sentiment-ai config --set-speech-key YOUR_KEY` で設定してください")]
    MissingApiKey,

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("APIレスポンスのパースに失敗: {0}")]
    ApiParse(String),

    #[error("CSVエラー: {0}")]
    Csv(#[from] csv::Error),

    #[error("表計算ファイル読み込みエラー: {0}")]
    SpreadsheetRead(String),

    #[error("Excel生成エラー: {0}")]
    ExcelGeneration(String),

    #[error("JSON解析エラー: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("入力エラー: {0}")]
    Prompt(String),

    #[error(transparent)]
    Common(#[from] sentiment_ai_common::Error),
}

impl SentimentAiError {
    /// ネットワーク系の失敗か（タイムアウト・接続・HTTPステータス）
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            SentimentAiError::Timeout(_)
                | SentimentAiError::Connection(_)
                | SentimentAiError::HttpStatus { .. }
        )
    }
}

impl SentimentAiError {
    /// reqwest の送信エラーを分類（タイムアウトは呼び出し側の文言を使う）
    pub fn from_request(err: reqwest::Error, timeout_message: &str) -> Self {
        if err.is_timeout() {
            SentimentAiError::Timeout(timeout_message.to_string())
        } else {
            SentimentAiError::Connection(err.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, SentimentAiError>;
