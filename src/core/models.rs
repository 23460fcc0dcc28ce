//! Core data models for translation

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::errors::{Result, TranslationError};

/// Translation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationRequest {
    pub text: String,
    pub source_lang: String,
    pub target_lang: String,
}

impl TranslationRequest {
    pub fn new(text: impl Into<String>, target_lang: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source_lang: crate::core::languages::AUTO.to_string(),
            target_lang: target_lang.into(),
        }
    }

    pub fn with_source_lang(mut self, source_lang: impl Into<String>) -> Self {
        self.source_lang = source_lang.into();
        self
    }
}

/// Translation result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Translation {
    pub text: String,
    pub origin: String,
    /// Source language reported by the service
    pub src: String,
    pub dest: String,
    pub pronunciation: Option<String>,
}

/// Language detection result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub lang: String,
    pub confidence: f32,
}

/// Body of a `translate_a/single` response with `dj=1`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GtxResponse {
    #[serde(default)]
    pub sentences: Vec<GtxSentence>,
    #[serde(default)]
    pub src: Option<String>,
    #[serde(default)]
    pub confidence: Option<f32>,
    #[serde(default)]
    pub ld_result: Option<GtxLanguageDetection>,
}

/// One sentence entry; romanization entries only carry `translit`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GtxSentence {
    pub trans: Option<String>,
    pub orig: Option<String>,
    pub translit: Option<String>,
    pub src_translit: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GtxLanguageDetection {
    #[serde(default)]
    pub srclangs: Vec<String>,
    #[serde(default)]
    pub srclangs_confidences: Vec<f32>,
}

impl GtxResponse {
    /// Concatenated translated text of every sentence
    pub fn translated_text(&self) -> String {
        self.sentences
            .iter()
            .filter_map(|s| s.trans.as_deref())
            .collect()
    }

    /// Concatenated original text as segmented by the service
    pub fn original_text(&self) -> String {
        self.sentences
            .iter()
            .filter_map(|s| s.orig.as_deref())
            .collect()
    }

    /// Romanized translation, if the service returned one
    pub fn pronunciation(&self) -> Option<String> {
        self.sentences
            .iter()
            .find_map(|s| s.translit.clone())
    }

    /// Detected source language, lowercased to match catalog keys
    pub fn detected_lang(&self) -> Option<String> {
        self.src
            .clone()
            .or_else(|| self.ld_result.as_ref()?.srclangs.first().cloned())
            .map(|lang| lang.to_lowercase())
    }

    /// Detection confidence, falling back to the language detector block
    pub fn detection_confidence(&self) -> f32 {
        self.confidence
            .or_else(|| self.ld_result.as_ref()?.srclangs_confidences.first().copied())
            .unwrap_or(0.0)
    }
}

/// On-disk shapes accepted for a dataset
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TableRepr {
    Columns(IndexMap<String, Vec<Value>>),
    Records(Vec<IndexMap<String, Value>>),
}

/// Ordered rows of named columns; only translated columns must hold text
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextTable {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl TextTable {
    /// Build a single-column table
    pub fn from_column(name: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            columns: vec![name.into()],
            rows: values.into_iter().map(|v| vec![Value::String(v)]).collect(),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn column_index(&self, name: &str) -> Result<usize> {
        self.columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| TranslationError::InvalidDataset {
                message: format!("Column '{}' not found (available: {})", name, self.columns.join(", ")),
            })
    }

    /// Text values of a column in row order; every cell must be a string
    pub fn column(&self, name: &str) -> Result<Vec<String>> {
        let index = self.column_index(name)?;

        self.rows
            .iter()
            .enumerate()
            .map(|(i, row)| match &row[index] {
                Value::String(text) => Ok(text.clone()),
                other => Err(TranslationError::InvalidDataset {
                    message: format!("Row {} of column '{}' is not text: {}", i, name, other),
                }),
            })
            .collect()
    }

    /// Append a derived text column, or overwrite an existing one
    pub fn with_column(self, name: impl Into<String>, values: Vec<String>) -> Result<Self> {
        self.with_values(name.into(), values.into_iter().map(Value::String).collect())
    }

    fn with_values(mut self, name: String, values: Vec<Value>) -> Result<Self> {
        if self.columns.is_empty() {
            self.columns.push(name);
            self.rows = values.into_iter().map(|v| vec![v]).collect();
            return Ok(self);
        }

        if values.len() != self.rows.len() {
            return Err(TranslationError::InvalidDataset {
                message: format!(
                    "Column '{}' has {} values but table has {} rows",
                    name,
                    values.len(),
                    self.rows.len()
                ),
            });
        }

        match self.columns.iter().position(|c| *c == name) {
            Some(index) => {
                for (row, value) in self.rows.iter_mut().zip(values) {
                    row[index] = value;
                }
            }
            None => {
                self.columns.push(name);
                for (row, value) in self.rows.iter_mut().zip(values) {
                    row.push(value);
                }
            }
        }

        Ok(self)
    }

    /// Rows rendered as plain strings for terminal display
    pub fn display_rows(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| match cell {
                        Value::String(text) => text.clone(),
                        Value::Null => String::new(),
                        other => other.to_string(),
                    })
                    .collect()
            })
            .collect()
    }

    /// Rows as column-name keyed records
    pub fn to_records(&self) -> Vec<IndexMap<String, Value>> {
        self.rows
            .iter()
            .map(|row| self.columns.iter().cloned().zip(row.iter().cloned()).collect())
            .collect()
    }

    fn from_repr(repr: TableRepr) -> Result<Self> {
        match repr {
            TableRepr::Columns(map) => {
                let mut table = TextTable::default();
                for (name, values) in map {
                    table = table.with_values(name, values)?;
                }
                Ok(table)
            }
            TableRepr::Records(records) => {
                // Union of keys in first-seen order
                let mut columns: Vec<String> = Vec::new();
                for record in &records {
                    for key in record.keys() {
                        if !columns.contains(key) {
                            columns.push(key.clone());
                        }
                    }
                }

                let rows = records
                    .into_iter()
                    .map(|mut record| {
                        columns
                            .iter()
                            .map(|c| record.swap_remove(c).unwrap_or(Value::Null))
                            .collect()
                    })
                    .collect();

                Ok(TextTable { columns, rows })
            }
        }
    }
}

impl<'de> Deserialize<'de> for TextTable {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let repr = TableRepr::deserialize(deserializer)?;
        TextTable::from_repr(repr).map_err(serde::de::Error::custom)
    }
}

impl Serialize for TextTable {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_records().serialize(serializer)
    }
}
