pub mod analyzer;
pub mod batch;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod interactive;
pub mod language;
pub mod media;
pub mod speech;
