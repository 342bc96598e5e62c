use crate::error::Result;
use async_trait::async_trait;
use sentiment_ai_common::RawLabel;

/// 感情分類器の呼び出し口
///
/// 生ラベル（モデル固有の語彙）を返すだけで、正規化は呼び出し側で行う。
#[async_trait]
pub trait SentimentBackend: Send + Sync {
    fn model_name(&self) -> &str;

    /// 推論先の説明（表示用）
    fn device(&self) -> String;

    async fn classify(&self, text: &str) -> Result<Vec<RawLabel>>;

    /// 利用可能か確認（既定は短い文を1回分類する）
    async fn probe(&self) -> Result<()> {
        self.classify("Hello").await.map(|_| ())
    }
}
