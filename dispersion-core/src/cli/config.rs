use crate::conf::{ConfigError, DispersionConfig, load_config, write_config};
use anyhow::{Result, bail};
use clap::Subcommand;
use std::path::{Path, PathBuf};

#[derive(Subcommand, Debug)]
pub enum ConfigCmd {
    /// Validate a configuration file and exit
    Check {
        /// Path to the config file
        #[arg(default_value = "dispersion.toml")]
        path: PathBuf,
    },

    /// Write a configuration file with the default settings
    Init {
        /// Path to the config file
        #[arg(default_value = "dispersion.toml")]
        path: PathBuf,
    },
}

pub fn run(cmd: ConfigCmd) -> Result<()> {
    match cmd {
        ConfigCmd::Check { path } => check(&path),
        ConfigCmd::Init { path } => init(&path),
    }
}

pub fn check(path: &Path) -> Result<()> {
    match load_config(path) {
        Ok(cfg) => {
            println!("✔ Config loaded successfully");
            println!("✔ sampling resolution: {}ms", cfg.sampling_resolution_ms);
            println!("✔ convergence tolerance: {}", cfg.convergence_tolerance);
            match &cfg.log_file_path {
                Some(log) => println!("✔ log file: {}", log.display()),
                None => println!("• no log file set, pass --log-file-path"),
            }
            Ok(())
        }
        Err(err) => {
            if let Some(hint) = config_error_hint(&err) {
                eprintln!("{hint}");
                eprintln!();
            }
            Err(err.into())
        }
    }
}

pub fn init(path: &Path) -> Result<()> {
    // Refuse to overwrite an existing file
    if path.exists() {
        bail!("{} already exists", path.display());
    }

    write_config(&DispersionConfig::template(), path)?;
    println!("✔ Wrote {}", path.display());
    Ok(())
}

pub fn config_error_hint(err: &ConfigError) -> Option<&'static str> {
    match err {
        ConfigError::InvalidResolution => Some(
            "The sampling resolution is the width increment of the counting window.\n\
             \n\
             Example:\n\
             \n\
             sampling_resolution_ms = 60",
        ),

        ConfigError::InvalidTolerance { .. } => Some(
            "The tolerance bounds the change between two successive indices.\n\
             \n\
             Example:\n\
             \n\
             convergence_tolerance = 0.2",
        ),

        ConfigError::Parse { .. } => Some(
            "Recognized keys are sampling_resolution_ms, convergence_tolerance and log_file_path.",
        ),

        _ => None,
    }
}
