use sarge::ArgumentType;

use crate::cli::unescape_separator;
use crate::error::CsvError;

/// A separator or delimiter value as typed on the command line.
///
/// Parsing checks the escapes, but the raw text is kept so [`FormatArgs`]
/// resolves it exactly once.
///
/// [`FormatArgs`]: crate::cli::FormatArgs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Separator(pub String);

impl Separator {
    pub fn into_raw(self) -> String {
        self.0
    }
}

impl ArgumentType for Separator {
    type Error = CsvError;

    fn from_value(val: Option<&str>) -> sarge::ArgResult<Self> {
        // a flag given without a value means an empty delimiter
        let raw = val.unwrap_or_default();
        Some(unescape_separator(raw).map(|_| Separator(raw.to_string())))
    }
}
