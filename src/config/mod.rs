//! Configuration types for readers and writers.
//!
//! This module provides:
//! - `FormatConfig`: Column separator, row separator and field delimiter
//! - `QuotingBehavior`: When the writer quotes a field
//! - `ReaderOptions` / `WriterOptions`: Per-component options, loadable via serde
//! - `effective_chunk_size` / `MAX_CHUNK_SIZE`: Chunk-size clamping and its ceiling

mod format;
mod options;

pub use format::{
    DEFAULT_COLUMN_SEPARATOR, DEFAULT_FIELD_DELIMITER, DEFAULT_ROW_SEPARATOR, FormatConfig,
    MAX_CHUNK_SIZE, QuotingBehavior, effective_chunk_size,
};
pub use options::{
    DEFAULT_READ_CHUNK_SIZE, DEFAULT_WRITE_CHUNK_SIZE, ReaderOptions, WriterOptions,
    encoding_for_label,
};
