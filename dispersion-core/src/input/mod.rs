mod extract;
mod series;
mod source;


pub use extract::{extract_timestamps, parse_timestamp, read_timestamps};
pub use series::{TimePoint, TimeSeries};
pub use source::LogSource;
