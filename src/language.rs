//! 言語判定
//!
//! - 統計的判定: whatlang（三文字組の頻度モデル）
//! - 文字種判定: ASCII英字・デーヴァナーガリー・テルグ文字の多数決（ルールモード）

use crate::analyzer::EngineKind;
use sentiment_ai_common::languages::{is_supported, language_name, short_code};
use sentiment_ai_common::{detect_script, Analysis, Failure, FailureKind, LanguageResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectorKind {
    Statistical,
    Script,
}

impl From<EngineKind> for DetectorKind {
    fn from(engine: EngineKind) -> Self {
        match engine {
            EngineKind::Model => DetectorKind::Statistical,
            EngineKind::Rules => DetectorKind::Script,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct LanguageDetector {
    kind: DetectorKind,
}

impl LanguageDetector {
    pub fn new(kind: DetectorKind) -> Self {
        Self { kind }
    }

    pub fn detect(&self, text: &str) -> Analysis<LanguageResult> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Analysis::Failure(Failure::empty_input());
        }

        match self.kind {
            DetectorKind::Statistical => detect_statistical(trimmed),
            DetectorKind::Script => Analysis::Success(detect_by_script(trimmed)),
        }
    }
}

/// whatlang による判定
///
/// whatlang は最有力の1言語しか返さないため、候補の上位リストは持たない。
/// 代わりに `reliable` に判定器の信頼度フラグを載せる。
fn detect_statistical(text: &str) -> Analysis<LanguageResult> {
    match whatlang::detect(text) {
        Some(info) => {
            let code = short_code(info.lang().code());
            tracing::debug!(lang = %code, confidence = info.confidence(), "language detected");
            Analysis::Success(LanguageResult {
                language: language_name(&code),
                is_supported: is_supported(&code),
                language_code: code,
                confidence: info.confidence(),
                reliable: info.is_reliable(),
            })
        }
        None => Analysis::failed(FailureKind::Detection, "Could not detect language"),
    }
}

fn detect_by_script(text: &str) -> LanguageResult {
    let guess = detect_script(text);
    let code = guess.language.code();
    LanguageResult {
        language: guess.language.name().to_string(),
        language_code: code.to_string(),
        confidence: guess.confidence / 100.0,
        is_supported: is_supported(code),
        // 文字種は判定根拠が明確
        reliable: guess.counts.total() > 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn script() -> LanguageDetector {
        LanguageDetector::new(DetectorKind::Script)
    }

    #[test]
    fn test_script_english() {
        let result = script().detect("Hello world");
        let lang = result.success().unwrap();
        assert_eq!(lang.language, "English");
        assert_eq!(lang.language_code, "en");
        assert!((lang.confidence - 1.0).abs() < 1e-9);
        assert!(lang.is_supported);
    }

    #[test]
    fn test_script_hindi() {
        let lang = script().detect("यह बहुत अच्छा है").view();
        assert_eq!(lang.language, "Hindi");
        assert!((lang.confidence - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_script_digits_only_is_unknown() {
        let lang = script().detect("12345 !!").view();
        assert_eq!(lang.language, "Unknown");
        assert_eq!(lang.confidence, 0.0);
        assert!(!lang.is_supported);
    }

    #[test]
    fn test_empty_is_failure() {
        for detector in [script(), LanguageDetector::new(DetectorKind::Statistical)] {
            let result = detector.detect("   ");
            assert!(!result.is_success());
            assert_eq!(result.view().language, "Unknown");
        }
    }

    #[test]
    fn test_statistical_english() {
        let detector = LanguageDetector::new(DetectorKind::Statistical);
        let lang = detector
            .detect("This product is absolutely wonderful and I would recommend it to everyone")
            .view();
        assert_eq!(lang.language_code, "en");
        assert_eq!(lang.language, "English");
        assert!(lang.is_supported);
    }

    #[test]
    fn test_statistical_telugu() {
        let detector = LanguageDetector::new(DetectorKind::Statistical);
        let lang = detector.detect("ఈ సినిమా చాలా బాగుంది, నాకు చాలా నచ్చింది").view();
        assert_eq!(lang.language_code, "te");
        assert_eq!(lang.language, "Telugu");
    }
}
