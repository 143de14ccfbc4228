use crate::logging::LogFormat;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the idsig binary.
#[derive(Parser, Debug)]
#[command(
    name = "idsig",
    version,
    about = "Dump declaration mangles and cross-module signatures of a module"
)]
pub struct CliArgs {
    /// Module description (JSON) to load.
    pub input: PathBuf,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, ignore_case = true)]
    pub format: OutputFormat,

    /// Print raw mangles: no kind prefix and no `#expect` marker.
    #[arg(long)]
    pub raw: bool,

    /// Only list declarations on the exported surface.
    #[arg(long = "only-exported", alias = "onlyExported")]
    pub only_exported: bool,

    /// Seed for file-local ids, overriding the module description.
    #[arg(long = "start-index", alias = "startIndex", allow_negative_numbers = true)]
    pub start_index: Option<i64>,

    /// Pretty-print JSON output.
    #[arg(long)]
    pub pretty: bool,

    /// Disable colored text output.
    #[arg(long = "no-color", alias = "noColor")]
    pub no_color: bool,

    /// Log filter for stderr diagnostics, e.g. `idsig_signature=debug`.
    /// Falls back to `IDSIG_LOG`, then `RUST_LOG`.
    #[arg(long, value_name = "FILTER")]
    pub log: Option<String>,

    /// Layout of stderr diagnostics.
    #[arg(
        long = "log-format",
        alias = "logFormat",
        value_enum,
        default_value_t,
        ignore_case = true
    )]
    pub log_format: LogFormat,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[cfg(test)]
#[path = "../tests/args_tests.rs"]
mod tests;
