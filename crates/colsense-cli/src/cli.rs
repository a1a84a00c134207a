//! CLI argument definitions for colsense.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "colsense",
    version,
    about = "Infer data types and physical units of table columns",
    long_about = "Infer the data type and physical unit of every column in a table.\n\n\
                  Reads CSV files and JSON documents (object of columns, array of \
                  records or array of rows). Column names and values are scored by \
                  a prioritized set of classifiers; JSON or TOML configuration files \
                  add unit spellings, context keywords and custom classifiers."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
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

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Classify every column of a CSV or JSON file.
    Analyze(AnalyzeArgs),

    /// Write the built-in configuration to a JSON or TOML file.
    ExportConfig(ExportArgs),
}

#[derive(Parser)]
pub struct AnalyzeArgs {
    /// Input file (.csv or .json).
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Configuration file (.json or .toml) applied before analysis.
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Use only the configuration file, dropping the built-in classifiers
    /// and unit mappings.
    #[arg(long = "config-only", requires = "config")]
    pub config_only: bool,

    /// Treat the first row of a JSON array of rows as column names.
    #[arg(long = "contains-headers")]
    pub contains_headers: bool,

    /// Column names for a JSON array of rows.
    #[arg(long = "header", value_name = "NAME", value_delimiter = ',', conflicts_with = "contains_headers")]
    pub headers: Vec<String>,

    /// Restrict analysis to the named classifiers (repeatable).
    #[arg(long = "classifier", value_name = "NAME")]
    pub classifiers: Vec<String>,

    /// Minimum confidence a classifier result needs to be accepted.
    #[arg(long = "min-confidence", value_name = "SCORE", default_value_t = 0.6)]
    pub min_confidence: f64,

    /// Share of non-null values that must parse as numbers for a numeric type.
    #[arg(long = "numeric-threshold", value_name = "SHARE", default_value_t = 0.9)]
    pub numeric_threshold: f64,

    /// Result format.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormatArg,

    /// Write results to a file instead of stdout.
    #[arg(long = "output", short = 'o', value_name = "FILE")]
    pub output: Option<PathBuf>,
}

#[derive(Parser)]
pub struct ExportArgs {
    /// Destination file; the extension (.json or .toml) selects the format.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

/// CLI result format choices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormatArg {
    Table,
    Json,
    Csv,
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
