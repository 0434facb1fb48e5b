//! Error types for the perflens-predict crate.

use std::backtrace::Backtrace;
use std::fmt;

/// Error type for the predictive-analysis pipeline.
///
/// Row-level problems (missing columns, unparseable cells, degenerate
/// arithmetic) never reach this type — they surface as sentinel cells in
/// the output. This error only covers structural failures: a table that
/// cannot be read as CSV at all, or output that cannot be written.
///
/// Uses the canonical struct pattern with backtrace capture and `is_xxx()`
/// helper methods.
#[derive(Debug)]
pub struct PredictError {
    kind: PredictErrorKind,
    backtrace: Backtrace,
}

/// Internal error variants. Not exposed publicly; use `is_xxx()` methods.
#[derive(Debug)]
pub(crate) enum PredictErrorKind {
    /// The input table is not structurally valid CSV.
    Csv(csv::Error),
    /// I/O error when writing the output table.
    Io(std::io::Error),
}

impl PredictError {
    /// Returns true if this error is due to a malformed input table.
    pub fn is_csv(&self) -> bool {
        matches!(self.kind, PredictErrorKind::Csv(_))
    }

    /// Returns true if this error is due to I/O failure.
    pub fn is_io(&self) -> bool {
        matches!(self.kind, PredictErrorKind::Io(_))
    }

    /// Returns the backtrace captured when this error was created.
    pub fn backtrace(&self) -> &Backtrace {
        &self.backtrace
    }
}

impl fmt::Display for PredictErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PredictErrorKind::Csv(err) => {
                write!(f, "malformed benchmark log: {err}")
            }
            PredictErrorKind::Io(err) => {
                write!(f, "I/O error: {err}")
            }
        }
    }
}

impl fmt::Display for PredictError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Summary of what happened.
        writeln!(f, "{}", self.kind)?;
        // Backtrace (will be empty unless RUST_BACKTRACE is set).
        write!(f, "{}", self.backtrace)
    }
}

impl std::error::Error for PredictError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            PredictErrorKind::Csv(err) => Some(err),
            PredictErrorKind::Io(err) => Some(err),
        }
    }
}

impl From<csv::Error> for PredictError {
    fn from(err: csv::Error) -> Self {
        Self {
            kind: PredictErrorKind::Csv(err),
            backtrace: Backtrace::capture(),
        }
    }
}

impl From<std::io::Error> for PredictError {
    fn from(err: std::io::Error) -> Self {
        Self {
            kind: PredictErrorKind::Io(err),
            backtrace: Backtrace::capture(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::*;

    /// Asserts that CSV structure failures are classified and formatted.
    #[test]
    fn test_csv_error() {
        // A record with the wrong field count produces a csv::Error.
        let mut reader = csv::Reader::from_reader("a,b\n1,2,3\n".as_bytes());
        let csv_err = reader
            .records()
            .next()
            .expect("one record")
            .expect_err("record should be ragged");
        let err = PredictError::from(csv_err);

        assert!(err.is_csv());
        assert!(!err.is_io());
        assert!(err.to_string().contains("malformed benchmark log"));
        assert!(err.source().is_some());
    }

    /// Ensures I/O errors are wrapped with backtrace and classification.
    #[test]
    fn test_io_from() {
        let io_err =
            std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = PredictError::from(io_err);

        assert!(err.is_io());
        assert!(!err.is_csv());
        assert!(err.to_string().contains("I/O error"));
        assert!(err.source().is_some());
    }
}
