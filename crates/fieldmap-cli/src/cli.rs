//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use fieldmap_cli::logging::LogFormat;
use tracing::level_filters::LevelFilter;

#[derive(Parser)]
#[command(
    name = "fieldmap",
    version,
    about = "Translate between external field names and internal property names",
    long_about = "Load field mappings from a JSON array, inspect them per object type,\n\
                  and export snapshots or partition/row keyed rows for persistence."
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

    /// Log output format.
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

    /// Reject mappings with empty names or names containing `::`.
    #[arg(long = "strict", global = true)]
    pub strict: bool,

    /// Skip tracking of dotted path names.
    #[arg(long = "no-paths", global = true)]
    pub no_paths: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the current state of every mapping as JSON.
    Snapshot(InputArgs),

    /// Print partition/row keyed rows as JSON.
    Rows(RowsArgs),

    /// Print the dotted path names recorded for an object type.
    Paths(PathsArgs),

    /// Print record, activation and path counts per object type.
    Summary(SummaryArgs),
}

#[derive(Args)]
pub struct InputArgs {
    /// JSON file holding an array of mappings (`-` for stdin).
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,
}

#[derive(Args)]
pub struct RowsArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Emit every mapping, not only modified ones.
    #[arg(long = "all")]
    pub all: bool,

    /// Activate the mapping registered under NAME before exporting.
    #[arg(long = "touch", value_name = "NAME")]
    pub touch: Vec<String>,
}

#[derive(Args)]
pub struct PathsArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Object type to report.
    #[arg(long = "object", value_name = "NAME")]
    pub object: String,
}

#[derive(Args)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Activate the mapping registered under NAME before summarizing.
    #[arg(long = "touch", value_name = "NAME")]
    pub touch: Vec<String>,
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

impl From<LogLevelArg> for LevelFilter {
    fn from(level: LogLevelArg) -> Self {
        match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        }
    }
}

impl From<LogFormatArg> for LogFormat {
    fn from(format: LogFormatArg) -> Self {
        match format {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}
