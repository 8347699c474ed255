//! Input provider trait definition.

use std::fmt::Debug;
use std::io::Read;

/// Trait for byte-level inputs a reader opens itself.
///
/// A reader built from an input provider owns the opened stream and decodes it
/// with the configured encoding. Sources that are already text implement
/// [`CharSource`](super::CharSource) instead.
pub trait InputProvider: Send + Sync + Debug {
    /// Returns an identifier for this input, used in error messages.
    ///
    /// Convention: "-" for stdin, file path for files.
    fn id(&self) -> &str;

    /// Open a fresh byte stream positioned at the beginning.
    fn open(&self) -> std::io::Result<Box<dyn Read + Send>>;
}
