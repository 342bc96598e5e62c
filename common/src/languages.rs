//! 言語コードと表示名

use std::collections::HashMap;

/// 感情解析の対応言語（コード, 表示名）
pub const SUPPORTED_LANGUAGES: &[(&str, &str)] = &[("en", "English"), ("hi", "Hindi"), ("te", "Telugu")];

/// 音声認識の既定ロケール
pub const DEFAULT_SPEECH_LOCALE: &str = "en-US";

/// (ISO 639-1, ISO 639-3, 表示名)
const LANGUAGE_TABLE: &[(&str, &str, &str)] = &[
    ("en", "eng", "English"),
    ("hi", "hin", "Hindi"),
    ("te", "tel", "Telugu"),
    ("ta", "tam", "Tamil"),
    ("kn", "kan", "Kannada"),
    ("ml", "mal", "Malayalam"),
    ("bn", "ben", "Bengali"),
    ("gu", "guj", "Gujarati"),
    ("mr", "mar", "Marathi"),
    ("pa", "pan", "Punjabi"),
    ("or", "ori", "Odia"),
    ("as", "asm", "Assamese"),
    ("ur", "urd", "Urdu"),
    ("ne", "nep", "Nepali"),
    ("si", "sin", "Sinhala"),
    ("my", "mya", "Myanmar"),
    ("th", "tha", "Thai"),
    ("vi", "vie", "Vietnamese"),
    ("id", "ind", "Indonesian"),
    ("ms", "zsm", "Malay"),
    ("tl", "tgl", "Filipino"),
    ("zh-cn", "cmn", "Chinese (Simplified)"),
    ("zh-tw", "cmn-tw", "Chinese (Traditional)"),
    ("ja", "jpn", "Japanese"),
    ("ko", "kor", "Korean"),
    ("ar", "arb", "Arabic"),
    ("fa", "pes", "Persian"),
    ("he", "heb", "Hebrew"),
    ("tr", "tur", "Turkish"),
    ("ru", "rus", "Russian"),
    ("uk", "ukr", "Ukrainian"),
    ("bg", "bul", "Bulgarian"),
    ("hr", "hrv", "Croatian"),
    ("cs", "ces", "Czech"),
    ("da", "dan", "Danish"),
    ("nl", "nld", "Dutch"),
    ("et", "est", "Estonian"),
    ("fi", "fin", "Finnish"),
    ("fr", "fra", "French"),
    ("de", "deu", "German"),
    ("el", "ell", "Greek"),
    ("hu", "hun", "Hungarian"),
    ("is", "isl", "Icelandic"),
    ("ga", "gle", "Irish"),
    ("it", "ita", "Italian"),
    ("lv", "lav", "Latvian"),
    ("lt", "lit", "Lithuanian"),
    ("mk", "mkd", "Macedonian"),
    ("mt", "mlt", "Maltese"),
    ("no", "nob", "Norwegian"),
    ("pl", "pol", "Polish"),
    ("pt", "por", "Portuguese"),
    ("ro", "ron", "Romanian"),
    ("sk", "slk", "Slovak"),
    ("sl", "slv", "Slovenian"),
    ("es", "spa", "Spanish"),
    ("sv", "swe", "Swedish"),
    ("cy", "cym", "Welsh"),
];

lazy_static::lazy_static! {
    static ref NAMES: HashMap<&'static str, &'static str> =
        LANGUAGE_TABLE.iter().map(|(code, _, name)| (*code, *name)).collect();
    static ref ISO3_TO_ISO1: HashMap<&'static str, &'static str> =
        LANGUAGE_TABLE.iter().map(|(code, iso3, _)| (*iso3, *code)).collect();
}

/// 短縮コードから表示名（未登録は "Unknown (code)"）
pub fn language_name(code: &str) -> String {
    match NAMES.get(code) {
        Some(name) => name.to_string(),
        None => format!("Unknown ({})", code),
    }
}

/// ISO 639-3 を表内の短縮コードへ（未登録はそのまま返す）
pub fn short_code(iso639_3: &str) -> String {
    ISO3_TO_ISO1
        .get(iso639_3)
        .map(|c| c.to_string())
        .unwrap_or_else(|| iso639_3.to_string())
}

/// 感情解析の対応言語か
pub fn is_supported(code: &str) -> bool {
    SUPPORTED_LANGUAGES.iter().any(|(c, _)| *c == code)
}

/// 言語名（またはコード）から音声認識ロケールへ
pub fn speech_language_code(language: &str) -> &'static str {
    match language.trim().to_lowercase().as_str() {
        "english" | "en" | "en-us" => "en-US",
        "hindi" | "hi" | "hi-in" => "hi-IN",
        "telugu" | "te" | "te-in" => "te-IN",
        _ => DEFAULT_SPEECH_LOCALE,
    }
}
