//! Miette integration for pretty error reporting.

use miette::{Diagnostic, Severity};
use thiserror::Error;

use super::CsvError;

/// A diagnostic wrapper for csvstream errors compatible with miette.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
pub struct CsvDiagnostic {
    /// The error message
    pub message: String,

    #[source]
    /// The underlying error
    pub source: Option<CsvError>,

    #[help]
    /// Help text for the user
    pub help: Option<String>,

    #[diagnostic(severity)]
    /// Severity level
    pub severity: Severity,
}

impl From<CsvError> for CsvDiagnostic {
    fn from(e: CsvError) -> Self {
        let (message, help) = match &e {
            CsvError::Config(_) => (
                "CSV options rejected".to_string(),
                "Check the separators, the field delimiter and whether an encoding or append mode fits the chosen source/sink",
            ),
            CsvError::MissingSource(endpoint) => (
                format!("CSV {endpoint} missing"),
                "Pass a text source, a byte stream, a path or a provider to the builder",
            ),
            CsvError::Open { target, .. } => (
                format!("cannot open '{target}'"),
                "Check that the path exists and is accessible",
            ),
            CsvError::Io(_) => (
                "CSV stream failed".to_string(),
                "The underlying reader or writer reported an error",
            ),
        };

        CsvDiagnostic {
            message,
            source: Some(e),
            help: Some(help.into()),
            severity: Severity::Error,
        }
    }
}

impl From<CsvError> for miette::Report {
    fn from(e: CsvError) -> Self {
        miette::Report::new(CsvDiagnostic::from(e))
    }
}
