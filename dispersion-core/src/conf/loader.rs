use crate::conf::error::ConfigError;
use crate::conf::types::DispersionConfig;
use crate::conf::validate::validate;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Reads, parses and validates a config file.
pub fn load_config(path: &Path) -> Result<DispersionConfig, ConfigError> {
    let s = fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
    let cfg = parse_config(&s, path)?;
    validate(&cfg)?;

    debug!(path = %path.display(), "loaded config");
    Ok(cfg)
}

/// Parses TOML without validating it. `path` is only used in errors.
pub fn parse_config(s: &str, path: &Path) -> Result<DispersionConfig, ConfigError> {
    toml::from_str(s).map_err(|e| ConfigError::parse(path, e))
}

/// Writes `cfg` as TOML to `path`.
pub fn write_config(cfg: &DispersionConfig, path: &Path) -> Result<(), ConfigError> {
    let s = toml::to_string_pretty(cfg)?;
    fs::write(path, s).map_err(|e| ConfigError::write_file(path, e))
}
