//! Excel生成（CLI版）
//!
//! 共通ライブラリの excel_core でバッファを作り、ファイルに書く。

use crate::error::{Result, SentimentAiError};
use sentiment_ai_common::export::excel_core::generate_results_buffer;
use sentiment_ai_common::ResultRecord;
use std::path::Path;

pub fn generate_excel(records: &[ResultRecord], output_path: &Path) -> Result<()> {
    let buffer = generate_results_buffer(records).map_err(SentimentAiError::ExcelGeneration)?;
    std::fs::write(output_path, buffer)?;
    Ok(())
}
