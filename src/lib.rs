//! gtrans-batch - batch translation of tabular text through the Google gtx endpoint
//!
//! This library lists the supported language catalog, detects languages and
//! translates ordered sequences of texts one row at a time, plus a JSON/YAML
//! dataset processor and a small HTTP API on top.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cli;
pub mod core;
pub mod processors;
pub mod server;

// Re-export key types for convenience
pub use self::core::{
    batch::BatchTranslator,
    client::{GoogleTranslator, TranslationService},
    config::TranslatorConfig,
    errors::TranslationError,
    languages::LanguageCatalog,
    models::{Detection, TextTable, Translation, TranslationRequest},
};

pub use self::processors::dataset::{ColumnJob, DatasetProcessor};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
