pub mod loadgen;
pub mod tracing;

pub use self::loadgen::{LoadgenLog, exponential_arrivals, uniform_arrivals};
pub use self::tracing::{CapturedEvent, init_test_tracing};
