//! Sources and sinks readers and writers are bound to.
//!
//! This module provides:
//! - `CharSource` / `CharSink`: Character-level endpoints
//! - `StrSource` (and `String` as a sink): In-memory text with a fixed encoding
//! - `DecodingSource` / `EncodingSink`: Byte stream adapters driven by `encoding_rs`
//! - `InputProvider` / `OutputTarget`: Byte endpoints a reader or writer opens itself
//! - Standard and in-memory implementations of those

mod codec;
mod input;
mod memory;
mod output;
mod std_io;
mod text;

pub use codec::{DecodingSource, EncodingSink};
pub use input::InputProvider;
pub use memory::{InMemorySink, InMemorySource};
pub use output::OutputTarget;
pub use std_io::{DEFAULT_FILE_BUFFER, FileInput, FileOutput, StdinInput, StdoutOutput};
pub use text::{CharSink, CharSource, StrSource};
