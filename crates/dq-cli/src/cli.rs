//! CLI argument definitions for dq-pack.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use dq_model::DatasetKind;

#[derive(Parser)]
#[command(
    name = "dq-pack",
    version,
    about = "Clean, validate and profile a tabular dataset",
    long_about = "Clean a raw CSV dataset, run its built-in validation rules and write\n\
                  a clean CSV plus Markdown, HTML and JSON quality reports."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write the run log to this file instead of <OUTDIR>/logs/run_<RUN_ID>.log.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Clean and validate one dataset, then write the clean CSV and reports.
    Run(RunArgs),

    /// List the supported dataset types with their columns and rules.
    Datasets,
}

#[derive(Parser)]
pub struct RunArgs {
    /// Path to the raw CSV file.
    #[arg(long = "input", value_name = "CSV")]
    pub input: PathBuf,

    /// Dataset type, which selects the schema and rule set.
    #[arg(long = "dataset", value_enum)]
    pub dataset: DatasetArg,

    /// Root directory for clean data, reports and logs.
    #[arg(long = "outdir", value_name = "DIR", default_value = "outputs")]
    pub outdir: PathBuf,

    /// Exit with status 2 when any error-severity rule fails.
    #[arg(long = "fail-on-error")]
    pub fail_on_error: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum DatasetArg {
    Sales,
    Leads,
}

impl From<DatasetArg> for DatasetKind {
    fn from(value: DatasetArg) -> Self {
        match value {
            DatasetArg::Sales => DatasetKind::Sales,
            DatasetArg::Leads => DatasetKind::Leads,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
