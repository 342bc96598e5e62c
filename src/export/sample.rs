//! サンプル入力

use crate::error::Result;
use std::path::Path;

pub const SAMPLE_FILE_NAME: &str = "sample_sentiment_analysis.csv";

/// サンプルCSVの本文（言語ごとに1行）
pub const SAMPLE_TEXTS: [&str; 3] = ["I love this product!", "यह बहुत अच्छा है", "ఇది చాలా బాగుంది"];

/// 対話モードの例文（言語名, 本文）
pub const EXAMPLE_TEXTS: [(&str, &str); 3] = [
    (
        "English",
        "I love this new technology! It's absolutely amazing and works perfectly.",
    ),
    ("Hindi", "यह बहुत अच्छा है! मुझे यह बहुत पसंद आया।"),
    ("Telugu", "ఇది చాలా బాగుంది! నాకు చాలా నచ్చింది."),
];

pub fn write_sample_csv(output_path: &Path) -> Result<()> {
    let mut writer = ::csv::Writer::from_path(output_path)?;
    writer.write_record(["text"])?;
    for text in SAMPLE_TEXTS {
        writer.write_record([text])?;
    }
    writer.flush()?;
    Ok(())
}
