//! CLI argument parsing types using `clap`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use lastpass_gtk_core::vault::SyncMode;

/// Command-line access to the LastPass entry catalog
#[derive(Parser)]
#[command(name = "lastpass-gtk-cli")]
#[command(author, version, about = "Browse LastPass entries from the terminal")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the configuration directory
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except results
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Write log lines to this file instead of stderr
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// List vault entries
    #[command(about = "List vault entries as shown in the window selector")]
    List {
        /// Output format
        #[arg(short, long, default_value = "table", value_enum)]
        format: OutputFormat,

        /// Sync mode for the listing (defaults to the configured mode)
        #[arg(short, long, value_enum)]
        sync: Option<SyncArg>,
    },

    /// Show one entry
    #[command(about = "Show the details of one entry")]
    Show {
        /// Entry id or exact display label, e.g. "Email (Work)"
        entry: String,

        /// Print the password instead of a mask
        #[arg(long)]
        reveal: bool,

        /// Output format
        #[arg(short, long, default_value = "table", value_enum)]
        format: OutputFormat,
    },

    /// Report whether lpass has a session
    #[command(about = "Check whether lpass is logged in")]
    Status,

    /// Log in to LastPass
    #[command(about = "Log in through lpass")]
    Login {
        /// Account identifier, usually an email address
        identifier: String,
    },

    /// Generate shell completions
    #[command(about = "Generate shell completion scripts")]
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Output format for listing and show
#[derive(Clone, Copy, Debug, Default, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    /// Aligned columns
    #[default]
    Table,
    /// JSON document
    Json,
}

/// `--sync` values
#[derive(Clone, Copy, Debug, ValueEnum, PartialEq, Eq)]
pub enum SyncArg {
    /// Sync with the server first
    Now,
    /// Let lpass decide
    Auto,
    /// Use the local cache only
    No,
}

impl From<SyncArg> for SyncMode {
    fn from(arg: SyncArg) -> Self {
        match arg {
            SyncArg::Now => Self::Now,
            SyncArg::Auto => Self::Auto,
            SyncArg::No => Self::No,
        }
    }
}
