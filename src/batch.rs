//! 一括解析
//!
//! 表（CSV / Excel / ODS）を読み込み、名前に "text" を含む最初の列の各行について
//! 言語判定 → 感情解析 を順に実行する。並列化はしない。

use crate::analyzer::SentimentAnalyzer;
use crate::error::{Result, SentimentAiError};
use crate::language::LanguageDetector;
use calamine::{open_workbook_auto, Data, Reader};
use indicatif::{ProgressBar, ProgressStyle};
use sentiment_ai_common::{Analysis, BatchSummary, LanguageResult, ResultRecord, SentimentResult};
use std::path::Path;

/// 読み込んだ表
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// 名前に "text" を含む最初の列（大文字小文字を区別しない）
    pub fn text_column(&self) -> Option<usize> {
        find_text_column(&self.headers)
    }
}

/// 1行分の解析結果
#[derive(Debug, Clone, PartialEq)]
pub struct BatchRow {
    /// 1始まりのデータ行番号
    pub row_number: usize,
    pub text: String,
    pub language: Analysis<LanguageResult>,
    pub sentiment: Analysis<SentimentResult>,
}

impl BatchRow {
    pub fn to_record(&self) -> ResultRecord {
        ResultRecord::from_analyses(&self.text, &self.language, &self.sentiment)
    }
}

pub fn find_text_column(headers: &[String]) -> Option<usize> {
    headers.iter().position(|h| h.to_lowercase().contains("text"))
}

/// 拡張子で CSV と表計算ファイルを振り分けて読む
pub fn read_table(path: &Path) -> Result<Table> {
    if !path.exists() {
        return Err(SentimentAiError::FileNotFound(path.display().to_string()));
    }

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "xlsx" | "xlsm" | "xls" | "ods" => read_spreadsheet(path),
        _ => read_csv(path),
    }
}

fn read_csv(path: &Path) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;

    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.trim().to_string()).collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(|v| v.to_string()).collect());
    }

    Ok(Table { headers, rows })
}

fn read_spreadsheet(path: &Path) -> Result<Table> {
    let mut workbook = open_workbook_auto(path)
        .map_err(|e| SentimentAiError::SpreadsheetRead(format!("{}: {}", path.display(), e)))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| SentimentAiError::SpreadsheetRead("ワークシートがありません".into()))?
        .map_err(|e| SentimentAiError::SpreadsheetRead(e.to_string()))?;

    let mut rows_iter = range.rows();
    let headers: Vec<String> = match rows_iter.next() {
        Some(row) => row.iter().map(|c| cell_to_string(c).trim().to_string()).collect(),
        None => Vec::new(),
    };

    let rows = rows_iter
        .map(|row| row.iter().map(cell_to_string).collect::<Vec<String>>())
        .filter(|row| row.iter().any(|v| !v.trim().is_empty()))
        .collect();

    Ok(Table { headers, rows })
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        _ => cell.to_string(),
    }
}

/// 表の全行を解析
///
/// テキスト列がなければ1行も処理せずに `MissingTextColumn` を返す。
/// 各行の解析失敗は行に記録して続行する。
pub async fn run_batch(
    table: &Table,
    analyzer: &SentimentAnalyzer,
    detector: &LanguageDetector,
    show_progress: bool,
) -> Result<Vec<BatchRow>> {
    let column = table.text_column().ok_or_else(|| SentimentAiError::MissingTextColumn {
        columns: table.headers.clone(),
    })?;
    tracing::info!(column = %table.headers[column], rows = table.rows.len(), "batch start");

    let progress = if show_progress {
        let pb = ProgressBar::new(table.rows.len() as u64);
        pb.set_style(
            ProgressStyle::with_template("{spinner} [{bar:40}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=> "),
        );
        pb
    } else {
        ProgressBar::hidden()
    };

    let mut results = Vec::with_capacity(table.rows.len());
    for (i, row) in table.rows.iter().enumerate() {
        let text = row.get(column).cloned().unwrap_or_default();
        progress.set_message(format!("Processing row {}/{}", i + 1, table.rows.len()));

        let language = detector.detect(&text);
        let sentiment = analyzer.analyze_text(&text).await;
        if let Some(message) = sentiment.error_message() {
            tracing::warn!(row = i + 1, error = message, "row failed");
        }

        results.push(BatchRow {
            row_number: i + 1,
            text,
            language,
            sentiment,
        });
        progress.inc(1);
    }
    progress.finish_and_clear();

    Ok(results)
}

/// ファイルを読み込んで一括解析
pub async fn analyze_file(
    path: &Path,
    analyzer: &SentimentAnalyzer,
    detector: &LanguageDetector,
    show_progress: bool,
) -> Result<Vec<BatchRow>> {
    let table = read_table(path)?;
    run_batch(&table, analyzer, detector, show_progress).await
}

pub fn to_records(rows: &[BatchRow]) -> Vec<ResultRecord> {
    rows.iter().map(BatchRow::to_record).collect()
}

pub fn summarize(rows: &[BatchRow]) -> BatchSummary {
    BatchSummary::from_records(&to_records(rows))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_find_text_column_first_match() {
        assert_eq!(find_text_column(&headers(&["id", "Review_Text", "text"])), Some(1));
        assert_eq!(find_text_column(&headers(&["TEXT"])), Some(0));
        assert_eq!(find_text_column(&headers(&["context"])), Some(0));
        assert_eq!(find_text_column(&headers(&["id", "comment"])), None);
        assert_eq!(find_text_column(&[]), None);
    }

    #[test]
    fn test_read_csv_keeps_blank_cells() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("in.csv");
        std::fs::write(&path, "id,text\n1,hello\n2,\n").unwrap();

        let table = read_table(&path).unwrap();
        assert_eq!(table.headers, headers(&["id", "text"]));
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[1][1], "");
    }

    #[test]
    fn test_read_missing_file() {
        let err = read_table(Path::new("/nonexistent/input.csv")).unwrap_err();
        assert!(matches!(err, SentimentAiError::FileNotFound(_)));
    }
}
