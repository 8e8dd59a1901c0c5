use crate::error::DispersionError;
use crate::input::{TimeSeries, read_timestamps};
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Where request timestamps are read from.
pub enum LogSource<'a> {
    /// A log file, opened and closed by [`LogSource::read_series`].
    Path(PathBuf),
    /// A stream already opened by the caller. It is read until exhausted.
    Stream(Box<dyn BufRead + 'a>),
}

impl<'a> LogSource<'a> {
    pub fn path(path: impl Into<PathBuf>) -> Self {
        Self::Path(path.into())
    }

    pub fn stream(reader: impl BufRead + 'a) -> Self {
        Self::Stream(Box::new(reader))
    }

    pub fn stdin() -> Self {
        Self::stream(io::stdin().lock())
    }

    /// Builds a source from the two optional inputs of the entry point.
    ///
    /// Exactly one of `path` and `stream` must be given.
    pub fn from_parts(
        path: Option<PathBuf>,
        stream: Option<Box<dyn BufRead + 'a>>,
    ) -> Result<Self, DispersionError> {
        match (path, stream) {
            (Some(path), None) => Ok(Self::Path(path)),
            (None, Some(stream)) => Ok(Self::Stream(stream)),
            (None, None) => Err(DispersionError::MissingSource),
            (Some(path), Some(_)) => Err(DispersionError::ConflictingSources { path }),
        }
    }

    /// Reads every line and returns the sorted timestamps.
    pub fn read_series(self) -> Result<TimeSeries, DispersionError> {
        let points = match self {
            Self::Path(path) => {
                debug!(path = %path.display(), "reading request log");
                read_timestamps(open(&path)?)?
            }
            Self::Stream(reader) => {
                debug!("reading request log from stream");
                read_timestamps(reader)?
            }
        };

        Ok(TimeSeries::from_unsorted(points))
    }
}

fn open(path: &Path) -> Result<BufReader<File>, DispersionError> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|e| DispersionError::open_log(path, e))
}

impl fmt::Debug for LogSource<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(path) => f.debug_tuple("Path").field(path).finish(),
            Self::Stream(_) => f.write_str("Stream(..)"),
        }
    }
}
