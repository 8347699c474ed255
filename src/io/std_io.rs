//! Buffered file endpoints and the process's standard streams.
//!
//! Files are wrapped in `BufReader` / `BufWriter`, so a writer with a small
//! character buffer still hands the OS large writes. The buffer is flushed by
//! [`CharSink::finish`](super::CharSink::finish) when the CSV writer closes.

use std::fs::{File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use super::{InputProvider, OutputTarget};

/// Id of stdin and stdout.
const STD_STREAM_ID: &str = "-";

/// Default byte capacity of file buffers.
pub const DEFAULT_FILE_BUFFER: usize = 64 * 1024;

/// Reads bytes from the process's stdin.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdinInput;

impl StdinInput {
    pub const fn new() -> Self {
        Self
    }
}

impl InputProvider for StdinInput {
    fn id(&self) -> &str {
        STD_STREAM_ID
    }

    // Stdin buffers internally
    fn open(&self) -> io::Result<Box<dyn Read + Send>> {
        Ok(Box::new(io::stdin()))
    }
}

/// Writes bytes to the process's stdout.
///
/// Stdout cannot be truncated, so overwrite and append open the same stream.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutOutput;

impl StdoutOutput {
    pub const fn new() -> Self {
        Self
    }

    fn open_stream(&self) -> io::Result<Box<dyn Write + Send>> {
        Ok(Box::new(BufWriter::new(io::stdout())))
    }
}

impl OutputTarget for StdoutOutput {
    fn id(&self) -> &str {
        STD_STREAM_ID
    }

    fn open_overwrite(&self) -> io::Result<Box<dyn Write + Send>> {
        self.open_stream()
    }

    fn open_append(&self) -> io::Result<Box<dyn Write + Send>> {
        self.open_stream()
    }
}

/// A CSV file opened for reading through a `BufReader`.
#[derive(Debug, Clone)]
pub struct FileInput {
    path: PathBuf,
    id: String,
    buffer_capacity: usize,
}

impl FileInput {
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        Self {
            id: path.display().to_string(),
            path,
            buffer_capacity: DEFAULT_FILE_BUFFER,
        }
    }

    /// Set the byte capacity of the read buffer (at least 1).
    pub fn with_buffer_capacity(mut self, capacity: usize) -> Self {
        self.buffer_capacity = capacity.max(1);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn buffer_capacity(&self) -> usize {
        self.buffer_capacity
    }
}

impl InputProvider for FileInput {
    fn id(&self) -> &str {
        &self.id
    }

    fn open(&self) -> io::Result<Box<dyn Read + Send>> {
        let file = File::open(&self.path)?;
        Ok(Box::new(BufReader::with_capacity(self.buffer_capacity, file)))
    }
}

/// A CSV file written through a `BufWriter`, created when missing.
#[derive(Debug, Clone)]
pub struct FileOutput {
    path: PathBuf,
    id: String,
    buffer_capacity: usize,
}

impl FileOutput {
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        Self {
            id: path.display().to_string(),
            path,
            buffer_capacity: DEFAULT_FILE_BUFFER,
        }
    }

    /// Set the byte capacity of the write buffer (at least 1).
    pub fn with_buffer_capacity(mut self, capacity: usize) -> Self {
        self.buffer_capacity = capacity.max(1);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn buffer_capacity(&self) -> usize {
        self.buffer_capacity
    }

    fn open_with(&self, options: &OpenOptions) -> io::Result<Box<dyn Write + Send>> {
        let file = options.open(&self.path)?;
        Ok(Box::new(BufWriter::with_capacity(self.buffer_capacity, file)))
    }
}

impl OutputTarget for FileOutput {
    fn id(&self) -> &str {
        &self.id
    }

    fn open_overwrite(&self) -> io::Result<Box<dyn Write + Send>> {
        self.open_with(OpenOptions::new().create(true).write(true).truncate(true))
    }

    fn open_append(&self) -> io::Result<Box<dyn Write + Send>> {
        self.open_with(OpenOptions::new().create(true).append(true))
    }
}
