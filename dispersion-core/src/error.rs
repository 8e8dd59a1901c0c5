use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors raised while estimating the index of dispersion.
///
/// Non-convergence is not an error: it is reported through
/// [`crate::estimate::Outcome::Insufficient`].
#[derive(Debug, Error)]
pub enum DispersionError {
    // Source acquisition
    #[error("no log source provided: supply a log file path or an input stream")]
    MissingSource,

    #[error("both a log file path ({path}) and an input stream were supplied; pass exactly one")]
    ConflictingSources { path: PathBuf },

    #[error("failed to open log file {path}: {source}")]
    OpenLog {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read line {line_number}: {source}")]
    ReadLine {
        line_number: usize,
        #[source]
        source: std::io::Error,
    },

    // Extraction
    #[error("line {line_number} is not valid UTF-8: {source}")]
    Decode {
        line_number: usize,
        #[source]
        source: std::str::Utf8Error,
    },

    #[error("line {line_number} has no `YYYY-MM-DD HH:MM:SS.mmm` timestamp: {line:?}")]
    MalformedLogLine { line_number: usize, line: String },

    #[error("line {line_number} has an invalid timestamp {token:?}: {source}")]
    InvalidTimestamp {
        line_number: usize,
        token: String,
        #[source]
        source: chrono::ParseError,
    },

    // Statistics
    #[error("window of {window_ms}ms has zero mean count but variance {variance}")]
    DegenerateStatistic { window_ms: u64, variance: f64 },

    // Parameters
    #[error("invalid parameter: {0}")]
    InvalidParameter(&'static str),
}

impl DispersionError {
    pub fn open_log(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::OpenLog {
            path: path.into(),
            source,
        }
    }

    pub fn malformed(line_number: usize, line: impl Into<String>) -> Self {
        Self::MalformedLogLine {
            line_number,
            line: line.into(),
        }
    }

    /// True for the errors caused by the content of a log line.
    pub fn is_malformed_input(&self) -> bool {
        matches!(
            self,
            Self::MalformedLogLine { .. } | Self::InvalidTimestamp { .. } | Self::Decode { .. }
        )
    }
}
