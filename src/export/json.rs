//! JSONレポート（モデル情報・集計・全行）

use crate::analyzer::ModelInfo;
use crate::error::Result;
use sentiment_ai_common::{BatchSummary, ResultRecord};
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonReport<'a> {
    pub generated_at: String,
    pub model: &'a ModelInfo,
    pub summary: BatchSummary,
    pub results: &'a [ResultRecord],
}

impl<'a> JsonReport<'a> {
    pub fn new(records: &'a [ResultRecord], model: &'a ModelInfo) -> Self {
        Self {
            generated_at: chrono::Local::now().to_rfc3339(),
            model,
            summary: BatchSummary::from_records(records),
            results: records,
        }
    }
}

pub fn write_report(records: &[ResultRecord], model: &ModelInfo, output_path: &Path) -> Result<()> {
    let report = JsonReport::new(records, model);
    let json = serde_json::to_string_pretty(&report)?;
    std::fs::write(output_path, json)?;
    Ok(())
}
