use anyhow::Result;
use clap::Parser;
use std::io::{IsTerminal, Write};

use idsig_cli::args::{CliArgs, OutputFormat};
use idsig_cli::config::load_config;
use idsig_cli::driver::{DumpOptions, dump_module};
use idsig_cli::logging::init_logging;
use idsig_cli::reporter::Reporter;

/// Exit status when two declarations of the module claim the same signature.
const EXIT_SIGNATURE_CLASH: i32 = 2;

fn main() -> Result<()> {
    let args = CliArgs::parse();
    init_logging(args.log.as_deref(), args.log_format);

    let config = load_config(&args.input)?;
    let options = DumpOptions {
        raw: args.raw,
        only_exported: args.only_exported,
        start_index: args.start_index,
    };
    let dump = dump_module(&config, &options)?;

    let color = !args.no_color && std::io::stdout().is_terminal();
    let reporter = Reporter::new(color);
    let output = match args.format {
        OutputFormat::Text => reporter.render_text(&dump),
        OutputFormat::Json => reporter.render_json(&dump, args.pretty)?,
    };

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", output.trim_end())?;
    stdout.flush()?;

    if !dump.clashes.is_empty() {
        std::process::exit(EXIT_SIGNATURE_CLASH);
    }
    Ok(())
}
