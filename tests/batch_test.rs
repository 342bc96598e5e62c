//! 一括解析の統合テスト

mod support;

use sentiment_ai_common::{LabelAliases, Sentiment, RESULT_COLUMNS};
use sentiment_ai_rust::analyzer::SentimentAnalyzer;
use sentiment_ai_rust::batch;
use sentiment_ai_rust::error::SentimentAiError;
use sentiment_ai_rust::export::csv::write_results_csv;
use sentiment_ai_rust::language::{DetectorKind, LanguageDetector};
use support::MockBackend;
use tempfile::tempdir;

fn script_detector() -> LanguageDetector {
    LanguageDetector::new(DetectorKind::Script)
}

/// 3行のCSV → 3行の結果とすべての出力列
#[tokio::test]
async fn test_three_row_csv() {
    let dir = tempdir().expect("Failed to create temp dir");
    let input = dir.path().join("input.csv");
    std::fs::write(
        &input,
        "id,text\n1,I love this product!\n2,यह बहुत अच्छा है\n3,ఇది చాలా బాగుంది\n",
    )
    .unwrap();

    let backend = MockBackend::ok("m", &[("positive", 0.8), ("neutral", 0.15), ("negative", 0.05)]);
    let analyzer = SentimentAnalyzer::with_backend(Box::new(backend.clone()), LabelAliases::builtin(), 512);

    let rows = batch::analyze_file(&input, &analyzer, &script_detector(), false)
        .await
        .expect("batch failed");
    assert_eq!(rows.len(), 3);
    assert_eq!(backend.call_count(), 3);
    assert_eq!(rows[0].row_number, 1);

    let languages: Vec<String> = rows.iter().map(|r| r.language.view().language).collect();
    assert_eq!(languages, vec!["English", "Hindi", "Telugu"]);

    let records = batch::to_records(&rows);
    let output = dir.path().join("sentiment_analysis_results.csv");
    write_results_csv(&records, &output).expect("csv write failed");

    let mut reader = csv::Reader::from_path(&output).unwrap();
    let headers: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
    assert_eq!(headers, RESULT_COLUMNS.to_vec());

    let written: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(written.len(), 3);
    assert_eq!(&written[1][0], "यह बहुत अच्छा है");
    assert_eq!(&written[0][3], "POSITIVE");
    assert_eq!(&written[0][8], "");
}

/// "text" を含む列がなければ1行も処理せず出力もしない
#[tokio::test]
async fn test_missing_text_column() {
    let dir = tempdir().expect("Failed to create temp dir");
    let input = dir.path().join("input.csv");
    std::fs::write(&input, "id,comment\n1,good\n2,bad\n").unwrap();

    let backend = MockBackend::ok("m", &[("positive", 1.0)]);
    let analyzer = SentimentAnalyzer::with_backend(Box::new(backend.clone()), LabelAliases::builtin(), 512);

    let err = batch::analyze_file(&input, &analyzer, &script_detector(), false)
        .await
        .unwrap_err();
    match &err {
        SentimentAiError::MissingTextColumn { columns } => {
            assert_eq!(columns, &vec!["id".to_string(), "comment".to_string()]);
        }
        other => panic!("unexpected error: {}", other),
    }
    assert!(err.to_string().contains("id, comment"));
    assert_eq!(backend.call_count(), 0);
    assert!(!dir.path().join("sentiment_analysis_results.csv").exists());
}

/// 空セルとモデル失敗は行ごとに記録して続行
#[tokio::test]
async fn test_row_failures_are_captured() {
    let dir = tempdir().expect("Failed to create temp dir");
    let input = dir.path().join("input.csv");
    std::fs::write(&input, "Review Text\nfine\n\"\"\nok\n").unwrap();

    let analyzer =
        SentimentAnalyzer::with_backend(Box::new(MockBackend::failing("m")), LabelAliases::builtin(), 512);
    let rows = batch::analyze_file(&input, &analyzer, &script_detector(), false)
        .await
        .expect("batch should not abort");
    assert_eq!(rows.len(), 3);

    let records = batch::to_records(&rows);
    assert!(records.iter().all(|r| r.is_error()));
    assert_eq!(records[1].error.as_deref(), Some("Empty text provided"));
    assert!(records[0].error.as_deref().unwrap().contains("connection refused"));

    let summary = batch::summarize(&rows);
    assert_eq!(summary.errors, 3);
    assert_eq!(summary.count(Sentiment::Positive), 0);
}

/// ルールモードでの一括解析と集計
#[tokio::test]
async fn test_rules_batch_summary() {
    let dir = tempdir().expect("Failed to create temp dir");
    let input = dir.path().join("input.csv");
    std::fs::write(&input, "text\nThis is good and great\nbad and terrible\nthe sky\nnice and good\n").unwrap();

    let analyzer = SentimentAnalyzer::rules(sentiment_ai_common::KeywordClassifier::default(), 512);
    let rows = batch::analyze_file(&input, &analyzer, &script_detector(), false)
        .await
        .unwrap();

    let summary = batch::summarize(&rows);
    assert_eq!(summary.total, 4);
    assert_eq!(summary.positive, 2);
    assert_eq!(summary.negative, 1);
    assert_eq!(summary.neutral, 1);
    assert_eq!(summary.languages.len(), 1);
    assert_eq!(summary.languages[0].language, "English");
    assert_eq!(summary.languages[0].percentage, 100.0);
}

/// Excel入力（結果ブックを入力として再利用: Original_Text 列が対象）
#[tokio::test]
async fn test_xlsx_input() {
    let dir = tempdir().expect("Failed to create temp dir");
    let analyzer = SentimentAnalyzer::rules(sentiment_ai_common::KeywordClassifier::default(), 512);

    let csv_input = dir.path().join("input.csv");
    std::fs::write(&csv_input, "text\nI love it\nawful day\n").unwrap();
    let rows = batch::analyze_file(&csv_input, &analyzer, &script_detector(), false)
        .await
        .unwrap();

    let xlsx = dir.path().join("results.xlsx");
    sentiment_ai_rust::export::excel::generate_excel(&batch::to_records(&rows), &xlsx).unwrap();

    let table = batch::read_table(&xlsx).expect("xlsx read failed");
    assert_eq!(table.text_column(), Some(0));
    assert_eq!(table.rows.len(), 2);
    assert_eq!(table.rows[0][0], "I love it");

    let again = batch::run_batch(&table, &analyzer, &script_detector(), false).await.unwrap();
    assert_eq!(again[1].sentiment.view().sentiment, Sentiment::Negative);
}

/// 言語判定だけが失敗した行は Error 列を空にする
#[tokio::test]
async fn test_language_failure_leaves_error_column_empty() {
    let dir = tempdir().expect("Failed to create temp dir");
    let input = dir.path().join("input.csv");
    std::fs::write(&input, "text\n12345 !!!\n").unwrap();

    let backend = MockBackend::ok("m", &[("positive", 0.9), ("neutral", 0.06), ("negative", 0.04)]);
    let analyzer = SentimentAnalyzer::with_backend(Box::new(backend), LabelAliases::builtin(), 512);
    let detector = LanguageDetector::new(DetectorKind::Statistical);

    let rows = batch::analyze_file(&input, &analyzer, &detector, false)
        .await
        .expect("batch failed");
    assert_eq!(rows.len(), 1);
    assert!(!rows[0].language.is_success());

    let records = batch::to_records(&rows);
    assert_eq!(records[0].sentiment, "POSITIVE");
    assert_eq!(records[0].detected_language, "Unknown");
    assert!(records[0].error.is_none());
}
