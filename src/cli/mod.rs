//! CLI integration helpers for csvstream.
//!
//! Separators are hard to type on a command line, so the helpers here accept
//! the escapes `\t`, `\n`, `\r` and `\\`. [`ConvertArgs`] collects the options of
//! a "read under one format, write under another" tool and turns them into
//! reader and writer builders.
//!
//! # Example
//!
//! ```
//! use csvstream::cli::ConvertArgs;
//!
//! let args = ConvertArgs::new("in.csv", "-")
//!     .with_input_format(",", "\\n", "\"")
//!     .with_output_format("\\t", "\\n", "");
//!
//! let reader_options = args.reader_options()?;
//! assert_eq!(reader_options.format.column_separator, ',');
//!
//! let writer_options = args.writer_options()?;
//! assert_eq!(writer_options.format.column_separator, '\t');
//! assert_eq!(writer_options.format.field_delimiter, None);
//! # Ok::<(), csvstream::CsvError>(())
//! ```

#[cfg(feature = "sarge")]
mod sarge;

#[cfg(feature = "sarge")]
pub use self::sarge::Separator;

use std::sync::Arc;

use crate::builder::{CsvReaderBuilder, CsvWriterBuilder};
use crate::config::{FormatConfig, QuotingBehavior, ReaderOptions, WriterOptions};
use crate::error::{CsvError, Result};
use crate::io::{StdinInput, StdoutOutput};

/// Resolve `\t`, `\n`, `\r` and `\\` in a separator given on the command line.
pub fn unescape_separator(raw: &str) -> Result<String> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                return Err(CsvError::config(format!(
                    "unknown escape '\\{other}' in separator {raw:?}"
                )));
            }
            None => {
                return Err(CsvError::config(format!(
                    "separator {raw:?} ends with a lone backslash"
                )));
            }
        }
    }
    Ok(out)
}

/// Parse a column separator, which must be exactly one character.
pub fn parse_column_separator(raw: &str) -> Result<char> {
    let unescaped = unescape_separator(raw)?;
    let mut chars = unescaped.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(CsvError::config(format!(
            "column separator must be a single character, got {raw:?}"
        ))),
    }
}

/// Parse a field delimiter; an empty value disables quoting.
pub fn parse_field_delimiter(raw: &str) -> Result<Option<char>> {
    if raw.is_empty() {
        return Ok(None);
    }
    parse_column_separator(raw).map(Some).map_err(|_| {
        CsvError::config(format!(
            "field delimiter must be a single character, got {raw:?}"
        ))
    })
}

/// A format given as three raw command-line values. `None` keeps the default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormatArgs {
    pub column_separator: Option<String>,
    pub row_separator: Option<String>,
    pub field_delimiter: Option<String>,
}

impl FormatArgs {
    pub fn new(
        column_separator: impl Into<String>,
        row_separator: impl Into<String>,
        field_delimiter: impl Into<String>,
    ) -> Self {
        Self {
            column_separator: Some(column_separator.into()),
            row_separator: Some(row_separator.into()),
            field_delimiter: Some(field_delimiter.into()),
        }
    }

    /// Resolve the raw values into a validated [`FormatConfig`].
    pub fn to_format(&self) -> Result<FormatConfig> {
        let mut format = FormatConfig::default();
        if let Some(raw) = &self.column_separator {
            format.column_separator = parse_column_separator(raw)?;
        }
        if let Some(raw) = &self.row_separator {
            format.row_separator = unescape_separator(raw)?;
        }
        if let Some(raw) = &self.field_delimiter {
            format.field_delimiter = parse_field_delimiter(raw)?;
        }
        format.validate()?;
        Ok(format)
    }
}

/// Arguments of a CSV conversion: where to read, where to write, and the
/// format on either side.
///
/// `"-"` stands for stdin as input and stdout as output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertArgs {
    pub input: String,
    pub output: String,
    pub input_format: FormatArgs,
    pub output_format: FormatArgs,
    pub quote_all: bool,
    pub append: bool,
}

impl ConvertArgs {
    pub fn new(input: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            input_format: FormatArgs::default(),
            output_format: FormatArgs::default(),
            quote_all: false,
            append: false,
        }
    }

    pub fn with_input_format(
        mut self,
        column_separator: impl Into<String>,
        row_separator: impl Into<String>,
        field_delimiter: impl Into<String>,
    ) -> Self {
        self.input_format = FormatArgs::new(column_separator, row_separator, field_delimiter);
        self
    }

    pub fn with_output_format(
        mut self,
        column_separator: impl Into<String>,
        row_separator: impl Into<String>,
        field_delimiter: impl Into<String>,
    ) -> Self {
        self.output_format = FormatArgs::new(column_separator, row_separator, field_delimiter);
        self
    }

    pub fn with_quote_all(mut self) -> Self {
        self.quote_all = true;
        self
    }

    pub fn with_append(mut self) -> Self {
        self.append = true;
        self
    }

    /// Check if reading from stdin.
    pub fn is_stdin(&self) -> bool {
        self.input == "-"
    }

    /// Check if writing to stdout.
    pub fn is_stdout(&self) -> bool {
        self.output == "-"
    }

    pub fn reader_options(&self) -> Result<ReaderOptions> {
        Ok(ReaderOptions::new().with_format(self.input_format.to_format()?))
    }

    pub fn writer_options(&self) -> Result<WriterOptions> {
        let quoting = if self.quote_all {
            QuotingBehavior::All
        } else {
            QuotingBehavior::Minimal
        };
        Ok(WriterOptions::new()
            .with_format(self.output_format.to_format()?)
            .with_quoting(quoting)
            .with_append(self.append))
    }

    /// A reader builder bound to the input, with the input format applied.
    pub fn reader_builder(&self) -> Result<CsvReaderBuilder<'static>> {
        let builder = CsvReaderBuilder::new().with_options(self.reader_options()?);
        Ok(if self.is_stdin() {
            builder.input(Arc::new(StdinInput::new()))
        } else {
            builder.path(&self.input)
        })
    }

    /// A writer builder bound to the output, with the output format applied.
    pub fn writer_builder(&self) -> Result<CsvWriterBuilder<'static>> {
        let builder = CsvWriterBuilder::new().with_options(self.writer_options()?);
        Ok(if self.is_stdout() {
            builder.target(Arc::new(StdoutOutput::new()))
        } else {
            builder.path(&self.output)
        })
    }
}
