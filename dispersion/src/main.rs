use clap::{Parser, Subcommand};
use dispersion_core::cli;
use dispersion_core::cli::config::ConfigCmd;
use dispersion_core::cli::estimate::EstimateArgs;
use dispersion_core::logging::{default_log_format, init_logging};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(
    name = "dispersion",
    version,
    about = "Dispersion: Index of Dispersion estimator for load-generator request logs",
    args_conflicts_with_subcommands = true
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    estimate: EstimateArgs,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Estimate the index of dispersion of a request log (default)
    Estimate(EstimateArgs),

    /// Configuration tooling
    Config {
        #[command(subcommand)]
        cmd: ConfigCmd,
    },
}

fn main() -> ExitCode {
    let Cli { command, estimate } = Cli::parse();

    match command.unwrap_or(Command::Estimate(estimate)) {
        Command::Estimate(args) => {
            init_logging(default_log_format(), args.quiet);

            match cli::estimate::run(args) {
                Ok(status) => ExitCode::from(status),
                Err(e) => {
                    eprintln!("error: {e:#}");
                    ExitCode::FAILURE
                }
            }
        }

        Command::Config { cmd } => {
            init_logging(default_log_format(), true);

            if let Err(e) = cli::config::run(cmd) {
                eprintln!("config error: {e:#}");
                return ExitCode::FAILURE;
            }
            ExitCode::SUCCESS
        }
    }
}
