//! Tabular dataset processor
//!
//! Loads a JSON or YAML table, translates one column row by row and writes
//! the augmented table back out.

use indicatif::ProgressBar;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::core::batch::BatchTranslator;
use crate::core::errors::{Result, TranslationError};
use crate::core::models::TextTable;

/// Default name of the derived column
pub const TRANSLATED_COLUMN: &str = "TranslatedText";

/// Serialization format of a dataset file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetFormat {
    Json,
    Yaml,
}

impl DatasetFormat {
    /// Pick the format from a file extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "json" => Ok(DatasetFormat::Json),
            "yaml" | "yml" => Ok(DatasetFormat::Yaml),
            _ => Err(TranslationError::InvalidDataset {
                message: format!("Unsupported dataset format: {}", path.display()),
            }),
        }
    }
}

/// Options for translating one column of a table
#[derive(Debug, Clone)]
pub struct ColumnJob {
    pub source_column: String,
    pub target_column: String,
    pub source_lang: String,
    pub target_lang: String,
}

impl ColumnJob {
    pub fn new(source_column: impl Into<String>, target_lang: impl Into<String>) -> Self {
        Self {
            source_column: source_column.into(),
            target_column: TRANSLATED_COLUMN.to_string(),
            source_lang: crate::core::languages::AUTO.to_string(),
            target_lang: target_lang.into(),
        }
    }

    pub fn with_source_lang(mut self, source_lang: impl Into<String>) -> Self {
        self.source_lang = source_lang.into();
        self
    }

    pub fn with_target_column(mut self, target_column: impl Into<String>) -> Self {
        self.target_column = target_column.into();
        self
    }
}

/// Dataset processor applying a batch translation to one column
#[derive(Clone)]
pub struct DatasetProcessor {
    translator: BatchTranslator,
}

impl DatasetProcessor {
    /// Create a new dataset processor
    pub fn new(translator: BatchTranslator) -> Self {
        Self { translator }
    }

    /// Create from environment configuration
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(BatchTranslator::from_env()?))
    }

    /// Read a table from disk
    pub fn load_table(&self, path: &Path) -> Result<TextTable> {
        let format = DatasetFormat::from_path(path)?;
        let content = std::fs::read_to_string(path)?;

        let table: TextTable = match format {
            DatasetFormat::Json => serde_json::from_str(&content)?,
            DatasetFormat::Yaml => serde_yaml::from_str(&content)?,
        };

        debug!(
            "Loaded {} rows with columns [{}] from {}",
            table.len(),
            table.columns().join(", "),
            path.display()
        );
        Ok(table)
    }

    /// Write a table to disk in record form
    pub fn save_table(&self, table: &TextTable, path: &Path) -> Result<()> {
        let content = match DatasetFormat::from_path(path)? {
            DatasetFormat::Json => serde_json::to_string_pretty(table)?,
            DatasetFormat::Yaml => serde_yaml::to_string(table)?,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        std::fs::write(path, content)?;
        info!("Saved {} rows to {}", table.len(), path.display());
        Ok(())
    }

    /// Translate one column into a new derived column
    pub async fn translate_table(
        &self,
        table: TextTable,
        job: &ColumnJob,
        progress: &ProgressBar,
    ) -> Result<TextTable> {
        let texts = table.column(&job.source_column)?;

        let translations = self
            .translator
            .translate_all_with_progress(&texts, &job.source_lang, &job.target_lang, progress)
            .await?;

        table.with_column(job.target_column.clone(), translations)
    }

    /// Load, translate and optionally save a dataset file
    pub async fn translate_file(
        &self,
        input: &Path,
        output: Option<&Path>,
        job: &ColumnJob,
        progress: &ProgressBar,
    ) -> Result<TextTable> {
        let table = self.load_table(input)?;
        progress.set_length(table.len() as u64);

        let translated = self.translate_table(table, job, progress).await?;

        if let Some(output) = output {
            self.save_table(&translated, output)?;
        }

        Ok(translated)
    }

    /// Default output path next to the input file
    pub fn default_output_path(input: &Path) -> PathBuf {
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "dataset".to_string());
        let ext = input
            .extension()
            .map(|e| e.to_string_lossy().to_string())
            .unwrap_or_else(|| "json".to_string());

        input.with_file_name(format!("{}_translated.{}", stem, ext))
    }
}
