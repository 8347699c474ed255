//! # csvstream
//!
//! A streaming CSV reader and writer with configurable separators.
//!
//! ## Overview
//!
//! csvstream provides:
//! - **Tokenizing reader**: Splits a character stream into rows of fields through
//!   a bounded lookahead buffer, so memory use does not depend on row length
//! - **Encoding writer**: Quotes and escapes fields as needed and drains a bounded
//!   output buffer into the sink
//! - **Configurable dialect**: Any column separator, a row separator of one or
//!   more characters, and an optional field delimiter for quoting
//! - **Text and byte endpoints**: In-memory strings, any `Read`/`Write`, files and
//!   stdin/stdout, in any encoding `encoding_rs` supports
//! - **Builders**: Collect a source or sink and options, validated in one step
//!
//! ## Quick Start
//!
//! ```rust
//! use csvstream::{CsvReaderBuilder, CsvWriterBuilder};
//!
//! fn main() -> Result<(), csvstream::CsvError> {
//!     let reader = CsvReaderBuilder::new()
//!         .text("name,note\nGreat,\"Gr,eat\"\n")
//!         .column_separator(',')
//!         .row_separator("\n")
//!         .build()?;
//!
//!     let rows = reader.read_all_rows()?.unwrap_or_default();
//!     assert_eq!(rows[1], ["Great", "Gr,eat"]);
//!
//!     let mut out = String::new();
//!     CsvWriterBuilder::new()
//!         .text(&mut out)
//!         .build()?
//!         .write_rows(&rows)?;
//!     assert_eq!(out, "name;note\r\nGreat;Gr,eat");
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - `json` - Load options from JSON documents
//! - `yaml` - Load options from YAML documents
//! - `miette` - Pretty error reporting with miette
//! - `sarge` - Command-line argument types and the `csvstream_convert` tool
//!
//! ## Reading semantics
//!
//! - A field delimiter switches quoted mode on and off; inside quoted mode a
//!   doubled delimiter is one literal delimiter, and separators are content.
//! - A row separator with nothing in front of it is a blank row `[""]`.
//! - A row separator at the very end of the input does not start another row.
//! - `read_row` returns `None` once the input is exhausted.
//! - The writer also quotes a field whose tail begins a row separator, e.g. `a`
//!   under the separator `aa`. Without a field delimiter such fields are written
//!   verbatim and may not read back unchanged.
//!
//! ## Logging
//!
//! The crate logs through the `log` facade: construction parameters at `debug`,
//! buffer refills and drains at `trace`, and flush failures while dropping a
//! writer at `warn`. Install any `log` backend to see them.

pub mod builder;
pub mod cli;
pub mod config;
pub mod error;
pub mod io;
pub mod reader;
pub mod writer;

pub use builder::{CsvReaderBuilder, CsvWriterBuilder};
pub use config::{
    FormatConfig, MAX_CHUNK_SIZE, QuotingBehavior, ReaderOptions, WriterOptions,
    effective_chunk_size, encoding_for_label,
};
pub use error::{CsvError, Endpoint, Result};
pub use io::{
    CharSink, CharSource, DecodingSource, EncodingSink, FileInput, FileOutput, InMemorySink,
    InMemorySource, InputProvider, OutputTarget, StdinInput, StdoutOutput, StrSource,
};
pub use reader::{CsvReader, Row, Rows};
pub use writer::{AsField, CsvWriter};

// Miette re-exports
#[cfg(feature = "miette")]
pub use error::CsvDiagnostic;
