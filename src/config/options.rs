//! Reader and writer options.

use encoding_rs::Encoding;
use serde::Deserialize;

use super::format::{FormatConfig, QuotingBehavior, check_chunk_size, effective_chunk_size};
use crate::error::{CsvError, Result};

/// Default read chunk size of a reader, in characters.
pub const DEFAULT_READ_CHUNK_SIZE: usize = 16384;
/// Default output buffer size of a writer, in characters.
pub const DEFAULT_WRITE_CHUNK_SIZE: usize = 1;

/// Resolve an `encoding_rs` label such as `"utf-8"` or `"windows-1252"`.
pub fn encoding_for_label(label: &str) -> Result<&'static Encoding> {
    Encoding::for_label(label.trim().as_bytes())
        .ok_or_else(|| CsvError::config(format!("unknown encoding label '{label}'")))
}

mod encoding_label {
    use encoding_rs::Encoding;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer};

    pub(super) fn deserialize<'de, D>(de: D) -> Result<Option<&'static Encoding>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let label: Option<String> = Option::deserialize(de)?;
        label
            .map(|l| {
                Encoding::for_label(l.trim().as_bytes())
                    .ok_or_else(|| D::Error::custom(format!("unknown encoding label '{l}'")))
            })
            .transpose()
    }
}

/// Options for a [`CsvReader`](crate::CsvReader).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ReaderOptions {
    #[serde(flatten)]
    pub format: FormatConfig,
    /// Number of characters requested from the source per refill
    pub chunk_size: usize,
    /// Encoding of byte sources; `None` means UTF-8
    #[serde(deserialize_with = "encoding_label::deserialize")]
    pub encoding: Option<&'static Encoding>,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            format: FormatConfig::default(),
            chunk_size: DEFAULT_READ_CHUNK_SIZE,
            encoding: None,
        }
    }
}

impl ReaderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_format(mut self, format: FormatConfig) -> Self {
        self.format = format;
        self
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    pub fn with_encoding(mut self, encoding: &'static Encoding) -> Self {
        self.encoding = Some(encoding);
        self
    }

    /// The chunk size actually used, never smaller than the row separator.
    pub fn effective_chunk_size(&self) -> usize {
        effective_chunk_size(self.chunk_size, self.format.row_separator_len())
    }

    pub fn validate(&self) -> Result<()> {
        self.format.validate()?;
        check_chunk_size(self.effective_chunk_size())
    }

    /// Parse and validate reader options from a JSON document.
    #[cfg(feature = "json")]
    pub fn from_json_str(json: &str) -> Result<Self> {
        let options: Self =
            serde_json::from_str(json).map_err(|e| CsvError::config(e.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    /// Parse and validate reader options from a YAML document.
    #[cfg(feature = "yaml")]
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let options: Self =
            serde_yaml::from_str(yaml).map_err(|e| CsvError::config(e.to_string()))?;
        options.validate()?;
        Ok(options)
    }
}

/// Options for a [`CsvWriter`](crate::CsvWriter).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WriterOptions {
    #[serde(flatten)]
    pub format: FormatConfig,
    /// Capacity of the output buffer in characters
    pub chunk_size: usize,
    pub quoting: QuotingBehavior,
    /// Encoding of byte sinks; `None` means UTF-8
    #[serde(deserialize_with = "encoding_label::deserialize")]
    pub encoding: Option<&'static Encoding>,
    /// Append to an existing file instead of truncating it
    pub append: bool,
}

impl Default for WriterOptions {
    fn default() -> Self {
        Self {
            format: FormatConfig::default(),
            chunk_size: DEFAULT_WRITE_CHUNK_SIZE,
            quoting: QuotingBehavior::default(),
            encoding: None,
            append: false,
        }
    }
}

impl WriterOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_format(mut self, format: FormatConfig) -> Self {
        self.format = format;
        self
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    pub fn with_quoting(mut self, quoting: QuotingBehavior) -> Self {
        self.quoting = quoting;
        self
    }

    pub fn with_encoding(mut self, encoding: &'static Encoding) -> Self {
        self.encoding = Some(encoding);
        self
    }

    pub fn with_append(mut self, append: bool) -> Self {
        self.append = append;
        self
    }

    /// The buffer capacity actually used, at least one character.
    pub fn effective_chunk_size(&self) -> usize {
        effective_chunk_size(self.chunk_size, 1)
    }

    pub fn validate(&self) -> Result<()> {
        self.format.validate()?;
        check_chunk_size(self.effective_chunk_size())
    }

    /// Parse and validate writer options from a JSON document.
    #[cfg(feature = "json")]
    pub fn from_json_str(json: &str) -> Result<Self> {
        let options: Self =
            serde_json::from_str(json).map_err(|e| CsvError::config(e.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    /// Parse and validate writer options from a YAML document.
    #[cfg(feature = "yaml")]
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let options: Self =
            serde_yaml::from_str(yaml).map_err(|e| CsvError::config(e.to_string()))?;
        options.validate()?;
        Ok(options)
    }
}
