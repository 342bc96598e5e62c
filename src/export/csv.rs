//! 結果CSVの書き出し

use crate::error::Result;
use sentiment_ai_common::{ResultRecord, RESULT_COLUMNS};
use std::path::Path;

/// 結果表をCSVへ（行が0件でもヘッダーは書く）
pub fn write_results_csv(records: &[ResultRecord], output_path: &Path) -> Result<()> {
    let file = std::fs::File::create(output_path)?;
    write_results(records, file)
}

pub fn write_results<W: std::io::Write>(records: &[ResultRecord], writer: W) -> Result<()> {
    let mut writer = ::csv::WriterBuilder::new().has_headers(false).from_writer(writer);
    writer.write_record(RESULT_COLUMNS)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}
