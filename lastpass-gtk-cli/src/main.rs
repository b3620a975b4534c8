//! `lastpass-gtk-cli` - command-line companion for the LastPass entry browser.
//!
//! Lists the vault catalog, shows entry details, and checks or establishes
//! the `lpass` session without opening a window.

mod cli;
mod commands;
mod error;
mod util;

use clap::Parser;
use cli::Cli;
use lastpass_gtk_core::tracing::{TracingConfig, TracingLevel, TracingOutput, init_tracing};

/// Subscriber configuration for the global flags; `None` when quiet.
fn tracing_config(cli: &Cli) -> Option<TracingConfig> {
    if cli.quiet && cli.log_file.is_none() {
        return None;
    }
    let config = TracingConfig::new().with_level(TracingLevel::Warn.raised_by(cli.verbose));
    Some(match &cli.log_file {
        Some(path) => config.with_output(TracingOutput::File(path.clone())),
        None => config,
    })
}

fn main() {
    let cli = Cli::parse();

    if let Some(config) = tracing_config(&cli)
        && let Err(e) = init_tracing(&config)
        && !cli.quiet
    {
        eprintln!("Warning: {e}");
    }

    let result = commands::dispatch(cli.config.as_deref(), cli.command);

    if let Err(e) = result {
        if !cli.quiet {
            eprintln!("Error: {e}");
        }
        std::process::exit(e.exit_code());
    }
}
