//! Error types for csvstream operations.
//!
//! This module provides:
//! - `Endpoint`: Which side of the component an error refers to
//! - `CsvError`: The single error type returned by readers, writers and builders
//! - `Result`: Convenience alias

use std::fmt;
use std::io;

use thiserror::Error;

/// The side of a reader/writer an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// The character source a reader pulls from
    Source,
    /// The character sink a writer pushes to
    Sink,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Source => write!(f, "source"),
            Endpoint::Sink => write!(f, "sink"),
        }
    }
}

#[derive(Debug, Error)]
pub enum CsvError {
    /// Invalid or contradictory construction options.
    ///
    /// Raised while building a reader or writer, never while reading or writing.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// No usable source or sink was supplied.
    #[error("no {0} was supplied")]
    MissingSource(Endpoint),

    /// Opening an endpoint the component opens itself (a file path, an
    /// input provider or an output target) failed.
    #[error("failed to open '{target}': {source}")]
    Open {
        /// Identifier of the endpoint (file path, "-" for stdin/stdout, ...)
        target: String,
        #[source]
        source: io::Error,
    },

    /// The underlying source or sink failed while filling or draining a chunk.
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl CsvError {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        CsvError::Config(message.into())
    }

    /// Check if this error was raised at construction time.
    pub fn is_config(&self) -> bool {
        matches!(self, CsvError::Config(_) | CsvError::MissingSource(_))
    }
}

/// Result alias used throughout the crate.
pub type Result<T, E = CsvError> = std::result::Result<T, E>;

#[cfg(feature = "miette")]
mod miette_impl;

#[cfg(feature = "miette")]
pub use miette_impl::*;
