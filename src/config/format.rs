//! Format configuration shared by readers and writers.

use std::str::FromStr;

use serde::Deserialize;

use crate::error::{CsvError, Result};

/// Default column separator.
pub const DEFAULT_COLUMN_SEPARATOR: char = ';';
/// Default row separator.
pub const DEFAULT_ROW_SEPARATOR: &str = "\r\n";
/// Default field delimiter.
pub const DEFAULT_FIELD_DELIMITER: Option<char> = Some('"');

/// Largest chunk size accepted, in characters.
pub const MAX_CHUNK_SIZE: usize = 1 << 26;

/// Clamp a requested chunk size up to `minimum`.
///
/// Readers pass the row separator length (the lookahead window must fit in one
/// chunk), writers pass 1.
pub fn effective_chunk_size(requested: usize, minimum: usize) -> usize {
    requested.max(minimum)
}

/// Reject chunk sizes whose buffer could not be allocated.
pub(crate) fn check_chunk_size(chunk_size: usize) -> Result<()> {
    if chunk_size > MAX_CHUNK_SIZE {
        return Err(CsvError::config(format!(
            "chunk size {chunk_size} exceeds the maximum of {MAX_CHUNK_SIZE}"
        )));
    }
    Ok(())
}

/// Separators and quoting character of a CSV dialect.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FormatConfig {
    /// Character separating fields within a row
    pub column_separator: char,
    /// One or more characters terminating a row
    pub row_separator: String,
    /// Quoting character; `None` disables quoting entirely
    pub field_delimiter: Option<char>,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            column_separator: DEFAULT_COLUMN_SEPARATOR,
            row_separator: DEFAULT_ROW_SEPARATOR.to_string(),
            field_delimiter: DEFAULT_FIELD_DELIMITER,
        }
    }
}

impl FormatConfig {
    /// Create a format with the default separators.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the column separator.
    pub fn with_column_separator(mut self, separator: char) -> Self {
        self.column_separator = separator;
        self
    }

    /// Set the row separator.
    pub fn with_row_separator(mut self, separator: impl Into<String>) -> Self {
        self.row_separator = separator.into();
        self
    }

    /// Set or clear the field delimiter.
    pub fn with_field_delimiter(mut self, delimiter: Option<char>) -> Self {
        self.field_delimiter = delimiter;
        self
    }

    /// Length of the row separator in characters.
    pub fn row_separator_len(&self) -> usize {
        self.row_separator.chars().count()
    }

    /// Check the format for contradictions.
    pub fn validate(&self) -> Result<()> {
        if self.row_separator.is_empty() {
            return Err(CsvError::config("row separator must not be empty"));
        }

        if let Some(delimiter) = self.field_delimiter {
            if delimiter == self.column_separator {
                return Err(CsvError::config(format!(
                    "field delimiter {delimiter:?} must differ from the column separator"
                )));
            }
            if self.row_separator.contains(delimiter) {
                return Err(CsvError::config(format!(
                    "field delimiter {delimiter:?} must not occur in the row separator"
                )));
            }
        }

        Ok(())
    }
}

/// Policy controlling when the writer wraps a field in the field delimiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuotingBehavior {
    /// Quote only fields containing a separator or the delimiter
    #[default]
    Minimal,
    /// Quote every field
    All,
}

impl FromStr for QuotingBehavior {
    type Err = CsvError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "minimal" => Ok(QuotingBehavior::Minimal),
            "all" => Ok(QuotingBehavior::All),
            other => Err(CsvError::config(format!(
                "unknown quoting behavior '{other}'"
            ))),
        }
    }
}
