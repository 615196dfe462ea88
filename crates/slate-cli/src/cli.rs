//! Command-line arguments for `slate`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use slate_cli::assign::ColumnAssignment;

#[derive(Parser)]
#[command(
    name = "slate",
    version,
    about = "Map spreadsheet exports onto production catalog entities",
    long_about = "Map the columns of a spreadsheet export onto the fields of a production\n\
                  catalog entity (cast, crew, shots, budget lines, ...), review the\n\
                  proposed mapping, and convert the rows into typed JSON records."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Extra TOML schema files that add or replace entity definitions.
    #[arg(long = "schemas", value_name = "PATH", global = true)]
    pub schemas: Vec<PathBuf>,

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

    /// Allow cell values in log output.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// List the known entities.
    Entities,

    /// Show the fields of one entity.
    Fields {
        /// Entity key, e.g. castMember.
        #[arg(value_name = "ENTITY")]
        entity: String,
    },

    /// Propose a column mapping for a CSV file and print it.
    Map(MapArgs),

    /// Map a CSV file and write its rows as JSON records.
    Convert(ConvertArgs),
}

#[derive(Parser)]
pub struct MapArgs {
    /// Entity key to map onto.
    #[arg(value_name = "ENTITY")]
    pub entity: String,

    /// CSV file with a header row.
    #[arg(value_name = "CSV")]
    pub csv: PathBuf,

    /// Override a column: COL=FIELD, where COL is a zero-based index or a
    /// header and FIELD is a field key or `none`. May be repeated.
    #[arg(long = "assign", value_name = "COL=FIELD")]
    pub assign: Vec<ColumnAssignment>,

    /// Lock-in threshold for the first matching pass.
    #[arg(long = "lock-in", value_name = "SCORE", default_value_t = 0.8)]
    pub lock_in: f64,

    /// Minimum score for any automatic match.
    #[arg(long = "min-score", value_name = "SCORE", default_value_t = 0.5)]
    pub min_score: f64,
}

#[derive(Parser)]
pub struct ConvertArgs {
    #[command(flatten)]
    pub map: MapArgs,

    /// Write records to this file instead of stdout.
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Convert even when required fields are unmapped.
    #[arg(long = "allow-invalid")]
    pub allow_invalid: bool,

    /// Keep unrecognized enum values as-is instead of using the first option.
    #[arg(long = "raw-enums")]
    pub raw_enums: bool,
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
