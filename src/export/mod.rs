pub mod csv;
pub mod excel;
pub mod json;
pub mod sample;

use crate::analyzer::ModelInfo;
use crate::error::Result;
use sentiment_ai_common::ResultRecord;
use std::path::{Path, PathBuf};

pub const DEFAULT_OUTPUT_FILE: &str = "sentiment_analysis_results.csv";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Csv,
    Excel,
    Json,
    All,
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "excel" | "xlsx" => Ok(ExportFormat::Excel),
            "json" => Ok(ExportFormat::Json),
            "all" => Ok(ExportFormat::All),
            _ => Err(format!("Unknown format: {}. Use csv, excel, json, or all", s)),
        }
    }
}

/// 出力先が拡張子なし（またはディレクトリ）なら既定名を付ける
fn output_path_for_format(output: &Path, extension: &str) -> PathBuf {
    let stem = Path::new(DEFAULT_OUTPUT_FILE)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("sentiment_analysis_results");

    if output.is_dir() || output.extension().is_none() {
        output.join(format!("{}.{}", stem, extension))
    } else if output.extension().and_then(|e| e.to_str()) == Some(extension) {
        output.to_path_buf()
    } else {
        output.with_extension(extension)
    }
}

/// 指定形式で書き出し、書いたファイルのパスを返す
pub fn export_results(
    records: &[ResultRecord],
    format: ExportFormat,
    output: &Path,
    model: &ModelInfo,
) -> Result<Vec<PathBuf>> {
    let formats: &[ExportFormat] = match format {
        ExportFormat::All => &[ExportFormat::Csv, ExportFormat::Excel, ExportFormat::Json],
        ExportFormat::Csv => &[ExportFormat::Csv],
        ExportFormat::Excel => &[ExportFormat::Excel],
        ExportFormat::Json => &[ExportFormat::Json],
    };

    // 拡張子なしの出力先はディレクトリとして扱い、無ければ作る
    if output.extension().is_none() && !output.exists() {
        std::fs::create_dir_all(output)?;
    }

    let mut written = Vec::new();
    for format in formats {
        let path = match format {
            ExportFormat::Csv => {
                let path = output_path_for_format(output, "csv");
                println!("- CSVを生成中...");
                csv::write_results_csv(records, &path)?;
                path
            }
            ExportFormat::Excel => {
                let path = output_path_for_format(output, "xlsx");
                println!("- Excelを生成中...");
                excel::generate_excel(records, &path)?;
                path
            }
            ExportFormat::Json => {
                let path = output_path_for_format(output, "json");
                println!("- JSONレポートを生成中...");
                json::write_report(records, model, &path)?;
                path
            }
            ExportFormat::All => continue,
        };
        println!("✔ 出力: {}", path.display());
        written.push(path);
    }

    Ok(written)
}
