use crate::conf::error::ConfigError;
use crate::conf::types::DispersionConfig;

pub fn validate(cfg: &DispersionConfig) -> Result<(), ConfigError> {
    if cfg.sampling_resolution_ms == 0 {
        return Err(ConfigError::InvalidResolution);
    }

    let tol = cfg.convergence_tolerance;
    if !tol.is_finite() || tol <= 0.0 {
        return Err(ConfigError::InvalidTolerance { value: tol });
    }

    if cfg
        .log_file_path
        .as_ref()
        .is_some_and(|p| p.as_os_str().is_empty())
    {
        return Err(ConfigError::EmptyLogPath);
    }

    Ok(())
}
