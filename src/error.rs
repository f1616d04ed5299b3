//! Centralized error handling for the bikeshare explorer.
//!
//! Two tiers of failure exist in this program:
//!
//! - Operator input errors (a bad city code, a month that is not a number)
//!   never reach this type. They are reported by the validation predicates in
//!   [`crate::explorer::validation`] and recovered by re-prompting.
//! - Data errors (missing CSV, missing `Start Time`, unparseable timestamps)
//!   are [`BikeshareError`] values and propagate to the binary, which reports
//!   them and exits.
//!
//! ## Context Extension Trait
//!
//! The `ResultExt` trait adds `.context()` to any `Result` whose error can be
//! converted into a [`BikeshareError`]:
//!
//! ```no_run
//! use bikeshare::error::ResultExt as _;
//! use std::fs;
//!
//! fn load_settings() -> bikeshare::error::Result<String> {
//!     let content = fs::read_to_string("config.json")
//!         .context("Failed to read settings")?;
//!     Ok(content)
//! }
//! ```

use std::fmt;

/// Main error type for bikeshare operations.
#[derive(Debug)]
pub enum BikeshareError {
    /// I/O errors (file operations, console, etc.)
    Io(std::io::Error),

    /// Data processing errors (Polars, parsing, etc.)
    DataProcessing(String),

    /// A required column is absent from a city dataset
    MissingColumn(String),

    /// Configuration errors
    Config(String),

    /// File not found or invalid path
    InvalidPath(String),

    /// Input ended while the operator was being prompted
    Aborted,

    /// Generic error with context
    Other(String),
}

impl fmt::Display for BikeshareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::DataProcessing(msg) => write!(f, "Data processing error: {msg}"),
            Self::MissingColumn(name) => write!(f, "Missing required column: '{name}'"),
            Self::Config(msg) => write!(f, "Configuration error: {msg}"),
            Self::InvalidPath(msg) => write!(f, "Invalid path: {msg}"),
            Self::Aborted => write!(f, "Input ended before the session was finished"),
            Self::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for BikeshareError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for BikeshareError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for BikeshareError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(format!("JSON error: {err}"))
    }
}

impl From<polars::error::PolarsError> for BikeshareError {
    fn from(err: polars::error::PolarsError) -> Self {
        Self::DataProcessing(err.to_string())
    }
}

impl BikeshareError {
    /// Whether this error means the operator closed the input stream.
    pub fn is_aborted(&self) -> bool {
        matches!(self, Self::Aborted)
    }
}

/// Result type alias for bikeshare operations.
pub type Result<T> = std::result::Result<T, BikeshareError>;

/// Extension trait to add context to results.
pub trait ResultExt<T> {
    /// Add context to an error.
    fn context(self, msg: impl Into<String>) -> Result<T>;

    /// Add context using a closure (lazy evaluation).
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<BikeshareError>,
{
    fn context(self, msg: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let err: BikeshareError = e.into();
            BikeshareError::Other(format!("{}: {}", msg.into(), err))
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let err: BikeshareError = e.into();
            BikeshareError::Other(format!("{}: {}", f(), err))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BikeshareError::MissingColumn("Start Time".to_owned());
        assert_eq!(err.to_string(), "Missing required column: 'Start Time'");
    }

    #[test]
    fn test_aborted_is_recognised() {
        assert!(BikeshareError::Aborted.is_aborted());
        assert!(!BikeshareError::Other("x".to_owned()).is_aborted());
    }

    #[test]
    fn test_result_context() {
        let result: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "chicago.csv",
        ));

        let result: Result<()> = result.context("Failed to read dataset");
        let msg = result.expect_err("should fail").to_string();
        assert!(msg.contains("Failed to read dataset"));
        assert!(msg.contains("chicago.csv"));
    }

    #[test]
    fn test_polars_error_conversion() {
        let err: BikeshareError =
            polars::error::PolarsError::ColumnNotFound("Gender".into()).into();
        assert!(matches!(err, BikeshareError::DataProcessing(_)));
    }
}
