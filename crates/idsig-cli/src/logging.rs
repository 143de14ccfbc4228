//! Diagnostic logging for the `idsig` binary.
//!
//! Everything is written to stderr so it never mixes with the dump on stdout.
//! No subscriber is installed unless a filter comes from `--log`, `IDSIG_LOG`
//! or `RUST_LOG`, checked in that order. Filters use the `RUST_LOG` syntax:
//!
//! ```bash
//! idsig --log idsig_signature=debug --log-format tree module.json
//! IDSIG_LOG=idsig_mangle=trace idsig --log-format json module.json
//! ```

use clap::ValueEnum;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};
use tracing_tree::HierarchicalLayer;

/// Layout of log lines on stderr.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    /// Indented by span via `tracing-tree`.
    Tree,
    /// One JSON object per event.
    Json,
}

/// Filter directives from the `--log` flag, else the first environment
/// variable `lookup` finds. Blank values count as unset.
pub fn filter_directives<F>(flag: Option<&str>, lookup: F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    flag.map(str::to_string)
        .or_else(|| lookup("IDSIG_LOG"))
        .or_else(|| lookup("RUST_LOG"))
        .filter(|directives| !directives.trim().is_empty())
}

/// Install the global subscriber. Returns whether one was installed by this
/// call; a subscriber set up earlier by an embedding host is left alone.
pub fn init_logging(flag: Option<&str>, format: LogFormat) -> bool {
    let Some(directives) = filter_directives(flag, |name| std::env::var(name).ok()) else {
        return false;
    };
    let registry = Registry::default().with(EnvFilter::builder().parse_lossy(directives));

    let installed = match format {
        LogFormat::Text => registry
            .with(fmt::layer().without_time().with_writer(std::io::stderr))
            .try_init(),
        LogFormat::Tree => registry
            .with(HierarchicalLayer::new(2).with_targets(true).with_indent_lines(true))
            .try_init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init(),
    };
    installed.is_ok()
}

#[cfg(test)]
#[path = "../tests/logging_tests.rs"]
mod tests;
