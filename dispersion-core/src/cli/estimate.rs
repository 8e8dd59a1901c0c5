use crate::cancel::CancelFlag;
use crate::cli::render::{render_json, render_report};
use crate::conf::{DispersionConfig, load_config, validate};
use crate::error::DispersionError;
use crate::estimate::{Estimate, estimate};
use crate::input::LogSource;
use anyhow::{Context, Result};
use clap::Args;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};

/// Exit status when the run ended without converging.
pub const EXIT_NOT_CONVERGED: u8 = 2;

#[derive(Args, Debug, Clone, Default)]
pub struct EstimateArgs {
    /// Sampling resolution in milliseconds: the window width increment [default: 60]
    #[arg(long = "sampling-res", value_name = "MS")]
    pub sampling_res: Option<u64>,

    /// Maximum change between successive indices to declare convergence [default: 0.2]
    #[arg(long = "convergence-tol", value_name = "TOL")]
    pub convergence_tol: Option<f64>,

    /// Request log to read, or `-` for stdin
    #[arg(long = "log-file-path", value_name = "PATH")]
    pub log_file_path: Option<PathBuf>,

    /// TOML config file; flags override its values
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print the outcome as JSON
    #[arg(long)]
    pub json: bool,

    /// Only log warnings and errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl EstimateArgs {
    /// Config file values (or defaults) overlaid with the explicit flags.
    pub fn resolve_config(&self) -> Result<DispersionConfig> {
        let mut cfg = match &self.config {
            Some(path) => load_config(path)?,
            None => DispersionConfig::default(),
        };

        if let Some(ms) = self.sampling_res {
            cfg.sampling_resolution_ms = ms;
        }
        if let Some(tol) = self.convergence_tol {
            cfg.convergence_tolerance = tol;
        }
        if let Some(path) = &self.log_file_path {
            cfg.log_file_path = Some(path.clone());
        }

        validate(&cfg).context("invalid estimation settings")?;
        Ok(cfg)
    }
}

/// Maps the configured log path to a source; `-` is stdin.
pub fn source_for(path: Option<&Path>) -> Result<LogSource<'static>, DispersionError> {
    match path {
        Some(p) if p == Path::new("-") => Ok(LogSource::stdin()),
        Some(p) => Ok(LogSource::path(p)),
        None => Err(DispersionError::MissingSource),
    }
}

/// Runs an estimation and prints the report. Returns the process exit status.
pub fn run(args: EstimateArgs) -> Result<u8> {
    let cancel = CancelFlag::new();
    let handler_flag = cancel.clone();
    ctrlc::set_handler(move || handler_flag.cancel())
        .context("failed to install Ctrl-C handler")?;

    run_with_cancel(&args, &cancel)
}

/// [`run`] without installing a signal handler; `cancel` is checked between
/// window widths.
pub fn run_with_cancel(args: &EstimateArgs, cancel: &CancelFlag) -> Result<u8> {
    let cfg = args.resolve_config()?;
    let params = cfg.params()?;
    let source = source_for(cfg.log_file_path.as_deref())?;

    let estimate = estimate(params, source, Some(cancel)).map_err(|err| {
        if err.is_malformed_input() {
            anyhow::Error::new(err).context("log is not a loadgen request log")
        } else {
            err.into()
        }
    })?;

    if args.json {
        println!("{}", render_json(&estimate)?);
    } else {
        print!("{}", render_report(&estimate, io::stdout().is_terminal()));
    }

    Ok(exit_status(&estimate))
}

pub fn exit_status(estimate: &Estimate) -> u8 {
    if estimate.outcome.is_converged() {
        0
    } else {
        EXIT_NOT_CONVERGED
    }
}
