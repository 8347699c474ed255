//! Builders for creating readers and writers.
//!
//! A builder collects one source (or sink) and the options, and checks all of
//! them together in `build()`. Construction errors never surface later while
//! reading or writing.

use std::io::{Read, Write};
use std::path::PathBuf;
use std::sync::Arc;

use encoding_rs::Encoding;

use crate::config::{QuotingBehavior, ReaderOptions, WriterOptions};
use crate::error::{CsvError, Endpoint, Result};
use crate::io::{
    CharSink, CharSource, FileInput, FileOutput, InputProvider, OutputTarget, StrSource,
};
use crate::reader::CsvReader;
use crate::writer::CsvWriter;

enum ReaderSource<'a> {
    Text(Box<dyn CharSource + 'a>),
    Bytes(Box<dyn Read + Send + 'a>),
    Provider(Arc<dyn InputProvider>),
}

pub struct CsvReaderBuilder<'a> {
    source: Option<ReaderSource<'a>>,
    options: ReaderOptions,
}

impl<'a> CsvReaderBuilder<'a> {
    pub fn new() -> Self {
        Self {
            source: None,
            options: ReaderOptions::default(),
        }
    }

    /// Read from an in-memory string.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.source = Some(ReaderSource::Text(Box::new(StrSource::new(text))));
        self
    }

    /// Read from a text source with a fixed encoding.
    pub fn char_source(mut self, source: impl CharSource + 'a) -> Self {
        self.source = Some(ReaderSource::Text(Box::new(source)));
        self
    }

    /// Read from a byte stream, decoded with the configured encoding.
    pub fn reader(mut self, reader: impl Read + Send + 'a) -> Self {
        self.source = Some(ReaderSource::Bytes(Box::new(reader)));
        self
    }

    /// Read from an input the reader opens itself.
    pub fn input(mut self, provider: Arc<dyn InputProvider>) -> Self {
        self.source = Some(ReaderSource::Provider(provider));
        self
    }

    /// Read from a file.
    pub fn path(self, path: impl Into<PathBuf>) -> Self {
        self.input(Arc::new(FileInput::new(path.into())))
    }

    pub fn with_options(mut self, options: ReaderOptions) -> Self {
        self.options = options;
        self
    }

    pub fn column_separator(mut self, separator: char) -> Self {
        self.options.format.column_separator = separator;
        self
    }

    pub fn row_separator(mut self, separator: impl Into<String>) -> Self {
        self.options.format.row_separator = separator.into();
        self
    }

    pub fn field_delimiter(mut self, delimiter: Option<char>) -> Self {
        self.options.format.field_delimiter = delimiter;
        self
    }

    /// Set the read chunk size; values below the row separator length are
    /// raised to it.
    pub fn chunk_size(mut self, chunk_size: usize) -> Self {
        self.options.chunk_size = chunk_size;
        self
    }

    pub fn encoding(mut self, encoding: &'static Encoding) -> Self {
        self.options.encoding = Some(encoding);
        self
    }

    pub fn build(self) -> Result<CsvReader<'a>> {
        let source = self
            .source
            .ok_or(CsvError::MissingSource(Endpoint::Source))?;

        match source {
            ReaderSource::Text(text) => CsvReader::new(text, &self.options),
            ReaderSource::Bytes(bytes) => CsvReader::from_reader(bytes, &self.options),
            ReaderSource::Provider(provider) => {
                CsvReader::from_provider(provider.as_ref(), &self.options)
            }
        }
    }
}

impl Default for CsvReaderBuilder<'_> {
    fn default() -> Self {
        Self::new()
    }
}

enum WriterSink<'a> {
    Text(Box<dyn CharSink + 'a>),
    Bytes(Box<dyn Write + Send + 'a>),
    Target(Arc<dyn OutputTarget>),
}

pub struct CsvWriterBuilder<'a> {
    sink: Option<WriterSink<'a>>,
    options: WriterOptions,
}

impl<'a> CsvWriterBuilder<'a> {
    pub fn new() -> Self {
        Self {
            sink: None,
            options: WriterOptions::default(),
        }
    }

    /// Append output to a string.
    pub fn text(mut self, out: &'a mut String) -> Self {
        self.sink = Some(WriterSink::Text(Box::new(out)));
        self
    }

    /// Write to a text sink with a fixed encoding.
    pub fn char_sink(mut self, sink: impl CharSink + 'a) -> Self {
        self.sink = Some(WriterSink::Text(Box::new(sink)));
        self
    }

    /// Write to a byte stream, encoded with the configured encoding.
    pub fn writer(mut self, writer: impl Write + Send + 'a) -> Self {
        self.sink = Some(WriterSink::Bytes(Box::new(writer)));
        self
    }

    /// Write to an output the writer opens itself.
    pub fn target(mut self, target: Arc<dyn OutputTarget>) -> Self {
        self.sink = Some(WriterSink::Target(target));
        self
    }

    /// Write to a file.
    pub fn path(self, path: impl Into<PathBuf>) -> Self {
        self.target(Arc::new(FileOutput::new(path.into())))
    }

    pub fn with_options(mut self, options: WriterOptions) -> Self {
        self.options = options;
        self
    }

    pub fn column_separator(mut self, separator: char) -> Self {
        self.options.format.column_separator = separator;
        self
    }

    pub fn row_separator(mut self, separator: impl Into<String>) -> Self {
        self.options.format.row_separator = separator.into();
        self
    }

    pub fn field_delimiter(mut self, delimiter: Option<char>) -> Self {
        self.options.format.field_delimiter = delimiter;
        self
    }

    /// Set the output buffer capacity; 0 is raised to 1.
    pub fn chunk_size(mut self, chunk_size: usize) -> Self {
        self.options.chunk_size = chunk_size;
        self
    }

    pub fn quoting(mut self, quoting: QuotingBehavior) -> Self {
        self.options.quoting = quoting;
        self
    }

    pub fn encoding(mut self, encoding: &'static Encoding) -> Self {
        self.options.encoding = Some(encoding);
        self
    }

    /// Append to an existing file instead of truncating it.
    pub fn append(mut self) -> Self {
        self.options.append = true;
        self
    }

    pub fn build(self) -> Result<CsvWriter<'a>> {
        let sink = self.sink.ok_or(CsvError::MissingSource(Endpoint::Sink))?;

        match sink {
            WriterSink::Text(text) => CsvWriter::new(text, &self.options),
            WriterSink::Bytes(bytes) => CsvWriter::from_writer(bytes, &self.options),
            WriterSink::Target(target) => CsvWriter::from_target(target.as_ref(), &self.options),
        }
    }
}

impl Default for CsvWriterBuilder<'_> {
    fn default() -> Self {
        Self::new()
    }
}
