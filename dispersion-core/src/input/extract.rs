use crate::error::DispersionError;
use crate::input::TimePoint;
use chrono::NaiveDateTime;
use once_cell::sync::Lazy;
use regex::Regex;
use std::io::BufRead;
use tracing::debug;

const TIMESTAMP_PATTERN: &str = concat!(
    r"[0-9]{4}-(?:0[1-9]|1[0-2])-(?:0[1-9]|[12][0-9]|3[01]) ",
    r"(?:2[0-3]|[01][0-9]):[0-5][0-9]:[0-5][0-9]\.[0-9]{3}",
);

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

static TIMESTAMP_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(TIMESTAMP_PATTERN).expect("timestamp pattern must compile"));

/// Finds the first `YYYY-MM-DD HH:MM:SS.mmm` token in `line` and parses it.
///
/// `line_number` is 1-based and only used for error reporting.
pub fn parse_timestamp(line: &str, line_number: usize) -> Result<TimePoint, DispersionError> {
    let token = TIMESTAMP_RE
        .find(line)
        .ok_or_else(|| DispersionError::malformed(line_number, line))?
        .as_str();

    NaiveDateTime::parse_from_str(token, TIMESTAMP_FORMAT).map_err(|source| {
        DispersionError::InvalidTimestamp {
            line_number,
            token: token.to_string(),
            source,
        }
    })
}

/// Extracts one timestamp per line, in line order.
///
/// Lines may be strings or raw bytes; bytes are decoded as UTF-8. The first
/// bad line aborts extraction.
pub fn extract_timestamps<I, L>(lines: I) -> Result<Vec<TimePoint>, DispersionError>
where
    I: IntoIterator<Item = L>,
    L: AsRef<[u8]>,
{
    lines
        .into_iter()
        .enumerate()
        .map(|(i, line)| decode_and_parse(line.as_ref(), i + 1))
        .collect()
}

/// Reads `reader` to the end and extracts a timestamp from every line.
pub fn read_timestamps<R: BufRead>(reader: R) -> Result<Vec<TimePoint>, DispersionError> {
    let mut points = Vec::new();

    for (i, chunk) in reader.split(b'\n').enumerate() {
        let line_number = i + 1;
        let chunk = chunk.map_err(|source| DispersionError::ReadLine {
            line_number,
            source,
        })?;
        points.push(decode_and_parse(&chunk, line_number)?);
    }

    debug!(lines = points.len(), "extracted request timestamps");
    Ok(points)
}

fn decode_and_parse(bytes: &[u8], line_number: usize) -> Result<TimePoint, DispersionError> {
    let line = std::str::from_utf8(bytes).map_err(|source| DispersionError::Decode {
        line_number,
        source,
    })?;

    parse_timestamp(line.strip_suffix('\r').unwrap_or(line), line_number)
}
