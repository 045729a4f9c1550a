//! dq-pack CLI.

use clap::{ColorChoice, Parser};
use dq_cli::logging::{LogConfig, LogFormat, init_logging};
use dq_cli::pipeline::{EXIT_FATAL, EXIT_SUCCESS, run_pipeline};
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;
mod summary;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{run_datasets, run_options};
use crate::summary::print_summary;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let exit_code = match &cli.command {
        Command::Run(args) => {
            let options = run_options(args, cli.log_file.clone());
            let log_config = log_config_from_cli(&cli, Some(options.paths().log));
            if let Err(error) = init_logging(&log_config) {
                eprintln!("error: failed to initialize logging: {error}");
                std::process::exit(EXIT_FATAL);
            }
            match run_pipeline(&options) {
                Ok(outcome) => {
                    print_summary(&outcome);
                    outcome.exit_code(args.fail_on_error)
                }
                Err(error) => {
                    eprintln!("error: {error:#}");
                    EXIT_FATAL
                }
            }
        }
        Command::Datasets => {
            let log_config = log_config_from_cli(&cli, cli.log_file.clone());
            if let Err(error) = init_logging(&log_config) {
                eprintln!("error: failed to initialize logging: {error}");
                std::process::exit(EXIT_FATAL);
            }
            match run_datasets() {
                Ok(()) => EXIT_SUCCESS,
                Err(error) => {
                    eprintln!("error: {error:#}");
                    EXIT_FATAL
                }
            }
        }
    };
    std::process::exit(exit_code);
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli, log_file: Option<PathBuf>) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    let format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    let ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => io::stderr().is_terminal(),
    };
    config
        .with_format(format)
        .with_ansi(ansi)
        .with_log_file(log_file)
}
