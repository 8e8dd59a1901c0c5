use crate::estimate::{
    DEFAULT_CONVERGENCE_TOLERANCE, DEFAULT_SAMPLING_RESOLUTION_MS, EstimatorParams,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_LOG_FILE_PATH: &str = "./loadgen.log";

/// Settings of one estimation run, as read from a TOML file.
///
/// Every field is optional in the file:
///
/// ```toml
/// sampling_resolution_ms = 60
/// convergence_tolerance = 0.2
/// log_file_path = "./loadgen.log"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DispersionConfig {
    pub sampling_resolution_ms: u64,
    pub convergence_tolerance: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file_path: Option<PathBuf>,
}

impl Default for DispersionConfig {
    fn default() -> Self {
        Self {
            sampling_resolution_ms: DEFAULT_SAMPLING_RESOLUTION_MS,
            convergence_tolerance: DEFAULT_CONVERGENCE_TOLERANCE,
            log_file_path: None,
        }
    }
}

impl DispersionConfig {
    /// The file written by `dispersion config init`.
    pub fn template() -> Self {
        Self {
            log_file_path: Some(PathBuf::from(DEFAULT_LOG_FILE_PATH)),
            ..Self::default()
        }
    }

    pub fn params(&self) -> Result<EstimatorParams, crate::error::DispersionError> {
        EstimatorParams::new(self.sampling_resolution_ms, self.convergence_tolerance)
    }
}
