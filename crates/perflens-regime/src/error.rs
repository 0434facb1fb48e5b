//! Error types for the perflens-regime crate.

use std::backtrace::Backtrace;
use std::fmt;

/// Error type for the regime-mapping pipeline.
///
/// Classification itself never fails — an unreadable row gets the
/// `UNKNOWN` label. This error only covers the surrounding table I/O:
/// input that is not structurally valid CSV, or output that cannot be
/// written.
#[derive(Debug)]
pub struct RegimeError {
    kind: RegimeErrorKind,
    backtrace: Backtrace,
}

/// Internal error variants. Not exposed publicly; use `is_xxx()` methods.
#[derive(Debug)]
pub(crate) enum RegimeErrorKind {
    /// The input table is not structurally valid CSV.
    Csv(csv::Error),
    /// I/O error when writing the output table.
    Io(std::io::Error),
}

impl RegimeError {
    /// Returns true if this error is due to a malformed input table.
    pub fn is_csv(&self) -> bool {
        matches!(self.kind, RegimeErrorKind::Csv(_))
    }

    /// Returns true if this error is due to I/O failure.
    pub fn is_io(&self) -> bool {
        matches!(self.kind, RegimeErrorKind::Io(_))
    }

    /// Returns the backtrace captured when this error was created.
    pub fn backtrace(&self) -> &Backtrace {
        &self.backtrace
    }
}

impl fmt::Display for RegimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            RegimeErrorKind::Csv(err) => {
                writeln!(f, "malformed benchmark log: {err}")?;
            }
            RegimeErrorKind::Io(err) => {
                writeln!(f, "I/O error: {err}")?;
            }
        }
        // Backtrace (will be empty unless RUST_BACKTRACE is set).
        write!(f, "{}", self.backtrace)
    }
}

impl std::error::Error for RegimeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            RegimeErrorKind::Csv(err) => Some(err),
            RegimeErrorKind::Io(err) => Some(err),
        }
    }
}

impl From<csv::Error> for RegimeError {
    fn from(err: csv::Error) -> Self {
        Self {
            kind: RegimeErrorKind::Csv(err),
            backtrace: Backtrace::capture(),
        }
    }
}

impl From<std::io::Error> for RegimeError {
    fn from(err: std::io::Error) -> Self {
        Self {
            kind: RegimeErrorKind::Io(err),
            backtrace: Backtrace::capture(),
        }
    }
}
