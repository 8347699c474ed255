//! Output target trait definition.

use std::fmt::Debug;
use std::io::Write;

/// Trait for byte-level outputs a writer opens itself.
///
/// A writer built from an output target owns the opened stream, encodes into it
/// with the configured encoding and releases it when closed or dropped.
pub trait OutputTarget: Send + Sync + Debug {
    /// Returns an identifier for this output, used in error messages.
    ///
    /// Convention: "-" for stdout, file path for files.
    fn id(&self) -> &str;

    /// Open the target for writing, truncating any existing content.
    fn open_overwrite(&self) -> std::io::Result<Box<dyn Write + Send>>;

    /// Open the target for appending to existing content.
    fn open_append(&self) -> std::io::Result<Box<dyn Write + Send>>;
}
