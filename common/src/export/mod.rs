//! 結果表のエクスポート（CLIと対話モードで共有）

pub mod excel_core;
