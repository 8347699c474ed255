//! Tokenizing CSV reader.
//!
//! The reader pulls characters from a [`CharSource`] into a fixed-size buffer
//! and splits them into rows and fields under the configured quoting rules.
//!
//! # Buffering
//!
//! The buffer holds `chunk_size + row_separator.len()` characters. Besides the
//! character under the cursor (`current`), the reader needs to look up to
//! `row_separator.len() - 1` characters ahead to recognize a row separator, and
//! one character ahead to recognize a doubled field delimiter. Whenever an
//! advance leaves fewer unparsed characters than the row separator is long,
//! `current` and the unread tail move to the front of the buffer and a fresh
//! chunk is read behind them. Parsing results therefore do not depend on the
//! chunk size.
//!
//! # End of input
//!
//! [`CsvReader::read_row`] returns `None` only when no field was read and no
//! row separator was consumed. A row separator without content in front of it
//! is a blank row (`[""]`); a row separator at the very end of the input does
//! not start another row.

use std::fmt;
use std::io;
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

use encoding_rs::UTF_8;
use log::{debug, trace};

use crate::config::{FormatConfig, ReaderOptions};
use crate::error::{CsvError, Result};
use crate::io::{CharSource, DecodingSource, FileInput, InputProvider};

/// One row of fields, in column order.
pub type Row = Vec<String>;

/// Streaming CSV reader.
///
/// All read operations lock the reader's state for their whole duration, so a
/// reader can be shared between threads and used serially.
pub struct CsvReader<'a> {
    format: FormatConfig,
    chunk_size: usize,
    state: Mutex<Tokenizer<'a>>,
}

impl<'a> CsvReader<'a> {
    /// Create a reader over a text source.
    ///
    /// The source's encoding is already fixed, so setting
    /// [`ReaderOptions::encoding`] is a configuration error.
    pub fn new(source: impl CharSource + 'a, options: &ReaderOptions) -> Result<Self> {
        if options.encoding.is_some() {
            return Err(CsvError::config(
                "an encoding has no effect on a text source, its encoding is already fixed",
            ));
        }
        Self::with_source(Box::new(source), options)
    }

    /// Create a reader over a byte stream, decoded with the configured encoding
    /// (UTF-8 by default).
    pub fn from_reader<R>(reader: R, options: &ReaderOptions) -> Result<Self>
    where
        R: io::Read + Send + 'a,
    {
        let encoding = options.encoding.unwrap_or(UTF_8);
        Self::with_source(Box::new(DecodingSource::new(reader, encoding)), options)
    }

    /// Open a byte input and read from it. The reader owns the opened stream.
    pub fn from_provider(provider: &dyn InputProvider, options: &ReaderOptions) -> Result<Self> {
        let stream = provider.open().map_err(|source| CsvError::Open {
            target: provider.id().to_string(),
            source,
        })?;
        Self::from_reader(stream, options)
    }

    /// Open a file and read from it.
    pub fn from_path(path: impl AsRef<Path>, options: &ReaderOptions) -> Result<Self> {
        Self::from_provider(&FileInput::new(path.as_ref()), options)
    }

    fn with_source(source: Box<dyn CharSource + 'a>, options: &ReaderOptions) -> Result<Self> {
        options.validate()?;
        let format = options.format.clone();
        let chunk_size = options.effective_chunk_size();

        debug!(
            "csv reader: column separator {:?}, row separator {:?}, field delimiter {:?}, chunk size {}",
            format.column_separator, format.row_separator, format.field_delimiter, chunk_size
        );

        let row_separator: Vec<char> = format.row_separator.chars().collect();
        let tokenizer = Tokenizer {
            source,
            column_separator: format.column_separator,
            field_delimiter: format.field_delimiter,
            buffer: vec!['\0'; chunk_size + row_separator.len()],
            row_separator,
            chunk_size,
            cursor: 0,
            unparsed: 0,
            current: None,
        };

        Ok(Self {
            format,
            chunk_size,
            state: Mutex::new(tokenizer),
        })
    }

    fn lock(&self) -> MutexGuard<'_, Tokenizer<'a>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Read the next row.
    ///
    /// Returns `None` once the source is exhausted.
    pub fn read_row(&self) -> Result<Option<Row>> {
        Ok(self.lock().read_row()?)
    }

    /// Read all remaining rows.
    ///
    /// Returns `None` instead of an empty vector when no row was left.
    pub fn read_all_rows(&self) -> Result<Option<Vec<Row>>> {
        let mut tokenizer = self.lock();
        let mut rows = Vec::new();
        while let Some(row) = tokenizer.read_row()? {
            rows.push(row);
        }

        if rows.is_empty() {
            return Ok(None);
        }
        Ok(Some(rows))
    }

    /// Iterate over the remaining rows.
    ///
    /// The iterator stops after the first error.
    pub fn rows(&self) -> Rows<'_, 'a> {
        Rows {
            reader: self,
            done: false,
        }
    }

    pub fn column_separator(&self) -> char {
        self.format.column_separator
    }

    pub fn row_separator(&self) -> &str {
        &self.format.row_separator
    }

    pub fn field_delimiter(&self) -> Option<char> {
        self.format.field_delimiter
    }

    /// The effective read chunk size, after clamping.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }
}

impl fmt::Debug for CsvReader<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CsvReader")
            .field("format", &self.format)
            .field("chunk_size", &self.chunk_size)
            .finish_non_exhaustive()
    }
}

/// Iterator over the rows of a [`CsvReader`].
#[derive(Debug)]
pub struct Rows<'r, 'a> {
    reader: &'r CsvReader<'a>,
    done: bool,
}

impl Iterator for Rows<'_, '_> {
    type Item = Result<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match self.reader.read_row() {
            Ok(Some(row)) => Some(Ok(row)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

struct Tokenizer<'a> {
    source: Box<dyn CharSource + 'a>,
    column_separator: char,
    row_separator: Vec<char>,
    field_delimiter: Option<char>,
    chunk_size: usize,
    buffer: Vec<char>,
    /// Index of the first unread character in `buffer`
    cursor: usize,
    /// Number of unread characters starting at `cursor`
    unparsed: usize,
    /// The character under the cursor, `None` at end of input
    current: Option<char>,
}

impl Tokenizer<'_> {
    /// Read up to one chunk from the source into `buffer[start..]`.
    fn read_chunk(&mut self, start: usize) -> io::Result<()> {
        let end = start + self.chunk_size;
        let read = self.source.read_block(&mut self.buffer[start..end])?;
        trace!("csv reader: read {read} chars at buffer offset {start}");
        self.unparsed += read;
        Ok(())
    }

    fn next_char(&mut self) -> io::Result<Option<char>> {
        if self.unparsed == 0 {
            self.cursor = 0;
            self.read_chunk(0)?;
            if self.unparsed == 0 {
                return Ok(None);
            }
        }

        let c = self.buffer[self.cursor];
        self.cursor += 1;
        self.unparsed -= 1;
        Ok(Some(c))
    }

    /// Move to the next character, topping up the lookahead window if needed.
    fn advance(&mut self) -> io::Result<()> {
        self.current = self.next_char()?;

        if self.current.is_some() && self.unparsed < self.row_separator.len() {
            let start = self.cursor - 1;
            let keep = self.unparsed + 1;
            self.buffer.copy_within(start..start + keep, 0);
            self.cursor = 1;
            self.read_chunk(keep)?;
        }
        Ok(())
    }

    /// The `n`-th character after `current`, if buffered.
    fn peek(&self, n: usize) -> Option<char> {
        if n <= self.unparsed {
            Some(self.buffer[self.cursor + n - 1])
        } else {
            None
        }
    }

    fn at_row_separator(&self) -> bool {
        match self.current {
            Some(c) if c == self.row_separator[0] => (1..self.row_separator.len())
                .all(|i| self.peek(i) == Some(self.row_separator[i])),
            _ => false,
        }
    }

    fn skip_row_separator(&mut self) -> io::Result<()> {
        for _ in 0..self.row_separator.len() {
            self.advance()?;
        }
        Ok(())
    }

    /// Read one field, stopping in front of the separator that ends it.
    fn read_field(&mut self) -> io::Result<String> {
        let mut content = String::new();
        let mut escaped = false;

        while let Some(c) = self.current {
            if Some(c) == self.field_delimiter {
                if escaped && self.peek(1) == self.field_delimiter {
                    // doubled delimiter, keep one
                    self.advance()?;
                    content.push(c);
                    self.advance()?;
                } else {
                    escaped = !escaped;
                    self.advance()?;
                }
                continue;
            }

            if !escaped && (c == self.column_separator || self.at_row_separator()) {
                break;
            }

            content.push(c);
            self.advance()?;
        }

        Ok(content)
    }

    fn read_row(&mut self) -> io::Result<Option<Row>> {
        let mut fields = Vec::new();
        if self.current.is_none() {
            self.advance()?;
        }

        while self.current.is_some() && !self.at_row_separator() {
            fields.push(self.read_field()?);

            if self.current == Some(self.column_separator) {
                self.advance()?;
                if self.current.is_none() || self.at_row_separator() {
                    fields.push(String::new());
                }
            }
        }

        let terminated = self.at_row_separator();
        if terminated {
            self.skip_row_separator()?;
        }

        if fields.is_empty() {
            if !terminated {
                return Ok(None);
            }
            fields.push(String::new());
        }

        Ok(Some(fields))
    }
}
