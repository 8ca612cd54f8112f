//! CLI error types for file I/O, CSV parsing, argument and operator errors.
//!
//! [`CliError`] wraps every failure the command-line front end can hit.
//! Messages say what went wrong and, where possible, how to fix it.

use std::fmt;
use std::io;

/// CLI error type encompassing all possible error conditions.
#[derive(Debug)]
pub enum CliError {
    /// An I/O error occurred while reading or writing files.
    IoError {
        /// The underlying I/O error.
        source: io::Error,
        /// Path that caused the error, if known.
        path: Option<String>,
    },
    /// The input CSV could not be parsed into a series.
    CsvParseError {
        /// Description of the parse error.
        message: String,
        /// Line number where the error occurred, if known.
        line: Option<usize>,
    },
    /// The library rejected the operator call.
    OperatorError {
        /// The underlying irregular-ts error.
        source: irregular_ts::Error,
    },
    /// An invalid argument was provided.
    InvalidArgument {
        /// Name of the invalid argument.
        argument: String,
        /// Description of why it's invalid.
        reason: String,
        /// Suggestion for valid values.
        suggestion: Option<String>,
    },
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IoError { source, path } => {
                if let Some(p) = path {
                    write!(f, "I/O error with file '{p}': {source}. ")?;
                    write!(f, "Check that the path exists and is accessible.")
                } else {
                    write!(f, "I/O error: {source}")
                }
            }
            Self::CsvParseError { message, line } => {
                if let Some(l) = line {
                    write!(f, "CSV parse error on line {l}: {message}. ")?;
                } else {
                    write!(f, "CSV parse error: {message}. ")?;
                }
                write!(
                    f,
                    "Expected a header row with numeric time and value columns."
                )
            }
            Self::OperatorError { source } => write!(f, "Operator error: {source}"),
            Self::InvalidArgument {
                argument,
                reason,
                suggestion,
            } => {
                write!(f, "Invalid argument '{argument}': {reason}")?;
                if let Some(s) = suggestion {
                    write!(f, ". {s}")?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::IoError { source, .. } => Some(source),
            Self::OperatorError { source } => Some(source),
            Self::CsvParseError { .. } | Self::InvalidArgument { .. } => None,
        }
    }
}

impl From<io::Error> for CliError {
    fn from(err: io::Error) -> Self {
        Self::IoError {
            source: err,
            path: None,
        }
    }
}

impl From<irregular_ts::Error> for CliError {
    fn from(err: irregular_ts::Error) -> Self {
        Self::OperatorError { source: err }
    }
}

impl From<csv::Error> for CliError {
    fn from(err: csv::Error) -> Self {
        let line = err
            .position()
            .and_then(|p| usize::try_from(p.line()).ok());
        Self::CsvParseError {
            message: err.to_string(),
            line,
        }
    }
}

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;
