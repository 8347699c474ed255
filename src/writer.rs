//! Encoding CSV writer.
//!
//! Fields go through a bounded character buffer that is drained into the
//! [`CharSink`] exactly when it fills, on [`CsvWriter::flush`] and when the
//! writer is closed or dropped.

use std::borrow::Cow;
use std::fmt;
use std::io;
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

use encoding_rs::UTF_8;
use log::{debug, trace, warn};

use crate::config::{FormatConfig, QuotingBehavior, WriterOptions};
use crate::error::{CsvError, Result};
use crate::io::{CharSink, EncodingSink, FileOutput, OutputTarget};

/// A value that can be written as a field.
///
/// `None` is written as the empty string.
pub trait AsField {
    fn as_field(&self) -> &str;
}

impl AsField for str {
    fn as_field(&self) -> &str {
        self
    }
}

impl AsField for String {
    fn as_field(&self) -> &str {
        self
    }
}

impl AsField for Cow<'_, str> {
    fn as_field(&self) -> &str {
        self
    }
}

impl<T: AsField + ?Sized> AsField for &T {
    fn as_field(&self) -> &str {
        (**self).as_field()
    }
}

impl<T: AsField> AsField for Option<T> {
    fn as_field(&self) -> &str {
        match self {
            Some(value) => value.as_field(),
            None => "",
        }
    }
}

/// Streaming CSV writer.
///
/// Every operation returns the writer again so calls chain with `?`:
///
/// ```
/// use csvstream::{CsvWriter, WriterOptions};
///
/// let mut out = String::new();
/// {
///     let writer = CsvWriter::new(&mut out, &WriterOptions::default())?;
///     writer.write("a")?.write("b;c")?.end_row()?.write_row(["d", "e"])?;
/// }
/// assert_eq!(out, "a;\"b;c\"\r\nd;e");
/// # Ok::<(), csvstream::CsvError>(())
/// ```
///
/// All operations lock the writer's state for their whole duration, so a writer
/// can be shared between threads and used serially.
pub struct CsvWriter<'a> {
    format: FormatConfig,
    quoting: QuotingBehavior,
    chunk_size: usize,
    state: Mutex<FieldEncoder<'a>>,
}

impl<'a> CsvWriter<'a> {
    /// Create a writer over a text sink such as `&mut String`.
    ///
    /// The sink's encoding is already fixed and it cannot be opened for
    /// appending, so setting [`WriterOptions::encoding`] or
    /// [`WriterOptions::append`] is a configuration error.
    pub fn new(sink: impl CharSink + 'a, options: &WriterOptions) -> Result<Self> {
        if options.encoding.is_some() {
            return Err(CsvError::config(
                "an encoding has no effect on a text sink, its encoding is already fixed",
            ));
        }
        Self::reject_append(options)?;
        Self::with_sink(Box::new(sink), options)
    }

    /// Create a writer over a byte stream, encoded with the configured encoding
    /// (UTF-8 by default).
    pub fn from_writer<W>(writer: W, options: &WriterOptions) -> Result<Self>
    where
        W: io::Write + Send + 'a,
    {
        Self::reject_append(options)?;
        let encoding = options.encoding.unwrap_or(UTF_8);
        Self::with_sink(Box::new(EncodingSink::new(writer, encoding)), options)
    }

    /// Open a byte output and write to it, appending when
    /// [`WriterOptions::append`] is set. The writer owns the opened stream.
    pub fn from_target(target: &dyn OutputTarget, options: &WriterOptions) -> Result<Self> {
        let opened = if options.append {
            target.open_append()
        } else {
            target.open_overwrite()
        };
        let stream = opened.map_err(|source| CsvError::Open {
            target: target.id().to_string(),
            source,
        })?;

        let encoding = options.encoding.unwrap_or(UTF_8);
        Self::with_sink(Box::new(EncodingSink::new(stream, encoding)), options)
    }

    /// Create or open a file and write to it.
    pub fn from_path(path: impl AsRef<Path>, options: &WriterOptions) -> Result<Self> {
        Self::from_target(&FileOutput::new(path.as_ref()), options)
    }

    fn reject_append(options: &WriterOptions) -> Result<()> {
        if options.append {
            return Err(CsvError::config(
                "append mode only applies to files and output targets",
            ));
        }
        Ok(())
    }

    fn with_sink(sink: Box<dyn CharSink + 'a>, options: &WriterOptions) -> Result<Self> {
        options.validate()?;
        let format = options.format.clone();
        let chunk_size = options.effective_chunk_size();

        debug!(
            "csv writer: column separator {:?}, row separator {:?}, field delimiter {:?}, quoting {:?}, buffer {}",
            format.column_separator,
            format.row_separator,
            format.field_delimiter,
            options.quoting,
            chunk_size
        );

        let encoder = FieldEncoder {
            out: OutputBuffer {
                sink,
                text: String::new(),
                len: 0,
                capacity: chunk_size,
            },
            column_separator: format.column_separator,
            row_separator: format.row_separator.clone(),
            field_delimiter: format.field_delimiter,
            quoting: options.quoting,
            first_in_row: true,
            closed: false,
        };

        Ok(Self {
            format,
            quoting: options.quoting,
            chunk_size,
            state: Mutex::new(encoder),
        })
    }

    fn lock(&self) -> MutexGuard<'_, FieldEncoder<'a>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Write one field, preceded by a column separator unless it starts a row.
    pub fn write<F: AsField>(&self, field: F) -> Result<&Self> {
        self.lock().write_field(field.as_field())?;
        Ok(self)
    }

    /// Write an empty field.
    pub fn write_empty(&self) -> Result<&Self> {
        self.write("")
    }

    /// Write one field and terminate the row.
    pub fn write_line<F: AsField>(&self, field: F) -> Result<&Self> {
        let mut encoder = self.lock();
        encoder.write_field(field.as_field())?;
        encoder.end_row()?;
        Ok(self)
    }

    /// Terminate the current row.
    pub fn end_row(&self) -> Result<&Self> {
        self.lock().end_row()?;
        Ok(self)
    }

    /// Write the fields of a row without terminating it. An empty row writes
    /// nothing.
    pub fn write_row<I>(&self, row: I) -> Result<&Self>
    where
        I: IntoIterator,
        I::Item: AsField,
    {
        self.lock().write_row(row)?;
        Ok(self)
    }

    /// Write the fields of a row and terminate it.
    pub fn write_row_line<I>(&self, row: I) -> Result<&Self>
    where
        I: IntoIterator,
        I::Item: AsField,
    {
        let mut encoder = self.lock();
        encoder.write_row(row)?;
        encoder.end_row()?;
        Ok(self)
    }

    /// Write rows with a row separator between them but not after the last one.
    pub fn write_rows<R>(&self, rows: R) -> Result<&Self>
    where
        R: IntoIterator,
        R::Item: IntoIterator,
        <R::Item as IntoIterator>::Item: AsField,
    {
        let mut encoder = self.lock();
        let mut rows = rows.into_iter().peekable();
        while let Some(row) = rows.next() {
            encoder.write_row(row)?;
            if rows.peek().is_some() {
                encoder.end_row()?;
            }
        }
        Ok(self)
    }

    /// Drain the buffer into the sink and flush the sink.
    pub fn flush(&self) -> Result<&Self> {
        let mut encoder = self.lock();
        encoder.out.drain()?;
        encoder.out.sink.flush()?;
        Ok(self)
    }

    /// Drain the buffer and finish the sink, reporting any error.
    ///
    /// Dropping the writer does the same but can only log failures.
    pub fn close(self) -> Result<()> {
        let closed = self.lock().close();
        Ok(closed?)
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

    pub fn quoting(&self) -> QuotingBehavior {
        self.quoting
    }

    /// The effective buffer capacity, after clamping.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }
}

impl Drop for CsvWriter<'_> {
    fn drop(&mut self) {
        let encoder = self
            .state
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner);
        if let Err(e) = encoder.close() {
            warn!("csv writer: failed to flush on drop: {e}");
        }
    }
}

impl fmt::Debug for CsvWriter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CsvWriter")
            .field("format", &self.format)
            .field("quoting", &self.quoting)
            .field("chunk_size", &self.chunk_size)
            .finish_non_exhaustive()
    }
}

/// Fixed-capacity character buffer in front of the sink.
struct OutputBuffer<'a> {
    sink: Box<dyn CharSink + 'a>,
    text: String,
    /// Number of characters in `text`, never above `capacity`
    len: usize,
    capacity: usize,
}

impl OutputBuffer<'_> {
    fn push(&mut self, c: char) -> io::Result<()> {
        self.text.push(c);
        self.len += 1;
        if self.len == self.capacity {
            self.drain()?;
        }
        Ok(())
    }

    fn push_str(&mut self, text: &str) -> io::Result<()> {
        for c in text.chars() {
            self.push(c)?;
        }
        Ok(())
    }

    fn drain(&mut self) -> io::Result<()> {
        if self.len == 0 {
            return Ok(());
        }
        self.sink.write_str(&self.text)?;
        trace!("csv writer: drained {} chars", self.len);
        self.text.clear();
        self.len = 0;
        Ok(())
    }
}

struct FieldEncoder<'a> {
    out: OutputBuffer<'a>,
    column_separator: char,
    row_separator: String,
    field_delimiter: Option<char>,
    quoting: QuotingBehavior,
    first_in_row: bool,
    closed: bool,
}

impl FieldEncoder<'_> {
    /// The delimiter to wrap `field` in, if it needs quoting.
    fn quote_with(&self, field: &str) -> Option<char> {
        let delimiter = self.field_delimiter?;
        let needed = self.quoting == QuotingBehavior::All
            || field.contains(delimiter)
            || field.contains(self.column_separator)
            || self.separator_overlaps(field);
        needed.then_some(delimiter)
    }

    /// Whether a row separator match would start inside `field` once the row
    /// separator follows it. Covers fields containing the separator as well as
    /// tails like `a` before `aa`.
    fn separator_overlaps(&self, field: &str) -> bool {
        let separator = self.row_separator.as_str();
        if field.contains(separator) {
            return true;
        }
        let mut joined = String::with_capacity(field.len() + separator.len());
        joined.push_str(field);
        joined.push_str(separator);
        joined
            .find(separator)
            .is_some_and(|start| start < field.len())
    }

    fn write_field(&mut self, field: &str) -> io::Result<()> {
        if self.first_in_row {
            self.first_in_row = false;
        } else {
            self.out.push(self.column_separator)?;
        }

        match self.quote_with(field) {
            Some(delimiter) => {
                self.out.push(delimiter)?;
                for c in field.chars() {
                    if c == delimiter {
                        self.out.push(delimiter)?;
                    }
                    self.out.push(c)?;
                }
                self.out.push(delimiter)
            }
            None => self.out.push_str(field),
        }
    }

    fn write_row<I>(&mut self, row: I) -> io::Result<()>
    where
        I: IntoIterator,
        I::Item: AsField,
    {
        for field in row {
            self.write_field(field.as_field())?;
        }
        Ok(())
    }

    fn end_row(&mut self) -> io::Result<()> {
        self.out.push_str(&self.row_separator)?;
        self.first_in_row = true;
        Ok(())
    }

    fn close(&mut self) -> io::Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        self.out.drain()?;
        self.out.sink.finish()
    }
}
