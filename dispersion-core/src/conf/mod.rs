mod error;
mod loader;
mod types;
mod validate;

#[cfg(test)]
mod tests;

pub use error::ConfigError;
pub use loader::{load_config, parse_config, write_config};
pub use types::{DEFAULT_LOG_FILE_PATH, DispersionConfig};
pub use validate::validate;
