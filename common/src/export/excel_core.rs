//! Excel生成（共通ライブラリ）
//!
//! 1枚目「Results」に結果表、2枚目「Summary」に件数と言語分布を書く。

use crate::summary::BatchSummary;
use crate::types::{ResultRecord, RESULT_COLUMNS};
use rust_xlsxwriter::*;

/// 列幅（px）: 本文列だけ広く取る
const TEXT_COL_WIDTH_PX: u32 = 420;
const LABEL_COL_WIDTH_PX: u32 = 130;
const NUMBER_COL_WIDTH_PX: u32 = 110;
const ERROR_COL_WIDTH_PX: u32 = 260;

/// 感情ラベルごとの背景色
fn sentiment_color(sentiment: &str) -> Color {
    match sentiment {
        "POSITIVE" => Color::RGB(0xE3F4E1),
        "NEGATIVE" => Color::RGB(0xFBE3E4),
        "NEUTRAL" => Color::RGB(0xF0F0F0),
        _ => Color::RGB(0xFFF2CC),
    }
}

/// 結果表をExcelバッファに生成
pub fn generate_results_buffer(records: &[ResultRecord]) -> Result<Vec<u8>, String> {
    let mut workbook = Workbook::new();

    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::White)
        .set_background_color(Color::RGB(0x4472C4))
        .set_align(FormatAlign::Center)
        .set_border(FormatBorder::Thin);

    let text_format = Format::new()
        .set_text_wrap()
        .set_align(FormatAlign::Top)
        .set_border(FormatBorder::Hair)
        .set_border_color(Color::RGB(0xCCCCCC));

    let number_format = Format::new()
        .set_num_format("0.0000")
        .set_align(FormatAlign::Top)
        .set_border(FormatBorder::Hair)
        .set_border_color(Color::RGB(0xCCCCCC));

    let percent_format = Format::new()
        .set_num_format("0.00")
        .set_align(FormatAlign::Top)
        .set_border(FormatBorder::Hair)
        .set_border_color(Color::RGB(0xCCCCCC));

    {
        let worksheet = workbook.add_worksheet();
        worksheet
            .set_name("Results")
            .map_err(|e| format!("シート名設定エラー: {}", e))?;

        for (col, name) in RESULT_COLUMNS.iter().enumerate() {
            let col = col as u16;
            worksheet
                .write_string_with_format(0, col, *name, &header_format)
                .map_err(|e| format!("ヘッダー書き込みエラー: {}", e))?;
            let width = match col {
                0 => TEXT_COL_WIDTH_PX,
                1 | 3 => LABEL_COL_WIDTH_PX,
                8 => ERROR_COL_WIDTH_PX,
                _ => NUMBER_COL_WIDTH_PX,
            };
            worksheet
                .set_column_width_pixels(col, width)
                .map_err(|e| format!("列幅設定エラー: {}", e))?;
        }

        for (i, record) in records.iter().enumerate() {
            let row = i as u32 + 1;
            let label_format = Format::new()
                .set_bold()
                .set_align(FormatAlign::Center)
                .set_align(FormatAlign::Top)
                .set_background_color(sentiment_color(&record.sentiment))
                .set_border(FormatBorder::Hair)
                .set_border_color(Color::RGB(0xCCCCCC));

            let write_err = |e: XlsxError| format!("セル書き込みエラー (行{}): {}", row, e);

            worksheet
                .write_string_with_format(row, 0, &record.original_text, &text_format)
                .map_err(write_err)?;
            worksheet
                .write_string_with_format(row, 1, &record.detected_language, &text_format)
                .map_err(write_err)?;
            worksheet
                .write_number_with_format(row, 2, record.language_confidence, &number_format)
                .map_err(write_err)?;
            worksheet
                .write_string_with_format(row, 3, &record.sentiment, &label_format)
                .map_err(write_err)?;
            worksheet
                .write_number_with_format(row, 4, record.sentiment_confidence, &percent_format)
                .map_err(write_err)?;
            worksheet
                .write_number_with_format(row, 5, record.positive_score, &number_format)
                .map_err(write_err)?;
            worksheet
                .write_number_with_format(row, 6, record.neutral_score, &number_format)
                .map_err(write_err)?;
            worksheet
                .write_number_with_format(row, 7, record.negative_score, &number_format)
                .map_err(write_err)?;
            worksheet
                .write_string_with_format(row, 8, record.error.as_deref().unwrap_or(""), &text_format)
                .map_err(write_err)?;
        }

        worksheet
            .set_freeze_panes(1, 0)
            .map_err(|e| format!("ウィンドウ枠固定エラー: {}", e))?;
        if !records.is_empty() {
            worksheet
                .autofilter(0, 0, records.len() as u32, (RESULT_COLUMNS.len() - 1) as u16)
                .map_err(|e| format!("フィルター設定エラー: {}", e))?;
        }
    }

    write_summary_sheet(&mut workbook, &BatchSummary::from_records(records), &header_format)?;

    workbook
        .save_to_buffer()
        .map_err(|e| format!("Excel保存エラー: {}", e))
}

fn write_summary_sheet(
    workbook: &mut Workbook,
    summary: &BatchSummary,
    header_format: &Format,
) -> Result<(), String> {
    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name("Summary")
        .map_err(|e| format!("シート名設定エラー: {}", e))?;
    worksheet
        .set_column_width_pixels(0, 180)
        .map_err(|e| format!("列幅設定エラー: {}", e))?;
    worksheet
        .set_column_width_pixels(1, 90)
        .map_err(|e| format!("列幅設定エラー: {}", e))?;
    worksheet
        .set_column_width_pixels(2, 90)
        .map_err(|e| format!("列幅設定エラー: {}", e))?;

    let err = |e: XlsxError| format!("集計シート書き込みエラー: {}", e);

    worksheet.write_string_with_format(0, 0, "Sentiment", header_format).map_err(err)?;
    worksheet.write_string_with_format(0, 1, "Count", header_format).map_err(err)?;

    let rows = [
        ("POSITIVE", summary.positive),
        ("NEUTRAL", summary.neutral),
        ("NEGATIVE", summary.negative),
        ("ERROR", summary.errors),
        ("Total", summary.total),
    ];
    for (i, (label, count)) in rows.iter().enumerate() {
        let row = i as u32 + 1;
        worksheet.write_string(row, 0, *label).map_err(err)?;
        worksheet.write_number(row, 1, *count as f64).map_err(err)?;
    }

    let start = rows.len() as u32 + 2;
    worksheet.write_string_with_format(start, 0, "Language", header_format).map_err(err)?;
    worksheet.write_string_with_format(start, 1, "Count", header_format).map_err(err)?;
    worksheet.write_string_with_format(start, 2, "Percent", header_format).map_err(err)?;
    for (i, share) in summary.languages.iter().enumerate() {
        let row = start + 1 + i as u32;
        worksheet.write_string(row, 0, &share.language).map_err(err)?;
        worksheet.write_number(row, 1, share.count as f64).map_err(err)?;
        worksheet
            .write_number(row, 2, (share.percentage * 10.0).round() / 10.0)
            .map_err(err)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<ResultRecord> {
        vec![ResultRecord {
            original_text: "This is good".into(),
            detected_language: "English".into(),
            language_confidence: 0.98,
            sentiment: "POSITIVE".into(),
            sentiment_confidence: 88.0,
            positive_score: 0.88,
            neutral_score: 0.1,
            negative_score: 0.02,
            error: None,
        }]
    }

    #[test]
    fn test_generate_results_buffer_is_zip() {
        let buffer = generate_results_buffer(&sample()).unwrap();
        // xlsx は zip コンテナ
        assert_eq!(&buffer[..2], b"PK");
    }

    #[test]
    fn test_generate_empty_workbook() {
        let buffer = generate_results_buffer(&[]).unwrap();
        assert!(!buffer.is_empty());
    }
}
