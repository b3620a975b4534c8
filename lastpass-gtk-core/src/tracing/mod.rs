//! Tracing setup for structured logging.
//!
//! Both binaries call [`init_tracing`] once at startup. `RUST_LOG`, when set,
//! takes precedence over the configured level. Listing output, passwords and
//! notes are never logged; only ids, counts and exit codes are.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

use thiserror::Error;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

static TRACING_INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Crates whose events pass the default filter.
const FILTER_TARGETS: &[&str] = &["lastpass_gtk_core", "lastpass_gtk", "lastpass_gtk_cli"];

/// Errors that can occur during tracing initialization.
#[derive(Debug, Error)]
pub enum TracingError {
    /// The filter or the subscriber could not be set up.
    #[error("Failed to initialize tracing: {0}")]
    InitializationFailed(String),

    /// [`init_tracing`] was already called in this process.
    #[error("Tracing has already been initialized")]
    AlreadyInitialized,

    /// The log file could not be created.
    #[error("Failed to create log file {path}: {source}")]
    FileCreationFailed {
        /// Requested log file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// Result type for tracing operations.
pub type TracingResult<T> = Result<T, TracingError>;

/// Verbosity of the default filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum TracingLevel {
    /// Errors only.
    Error,
    /// Errors and warnings.
    Warn,
    /// Startup and catalog events (default).
    #[default]
    Info,
    /// Every vault command and selection step.
    Debug,
    /// Everything.
    Trace,
}

impl TracingLevel {
    const ALL: [Self; 5] = [Self::Error, Self::Warn, Self::Info, Self::Debug, Self::Trace];

    /// Filter directive name for this level.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }

    /// Level for a `-v` count: 0 keeps `self`, then info, debug, trace.
    #[must_use]
    pub const fn raised_by(self, verbose: u8) -> Self {
        match verbose {
            0 => self,
            1 => Self::Info,
            2 => Self::Debug,
            _ => Self::Trace,
        }
    }
}

impl std::str::FromStr for TracingLevel {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        if s == "warning" {
            return Ok(Self::Warn);
        }
        Self::ALL.into_iter().find(|l| l.as_str() == s).ok_or(())
    }
}

impl std::fmt::Display for TracingLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where log lines are written.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TracingOutput {
    /// Standard error, with colours.
    #[default]
    Stderr,
    /// A file, truncated on startup, without colours.
    File(PathBuf),
}

/// Configuration for [`init_tracing`].
#[derive(Debug, Clone, Default)]
pub struct TracingConfig {
    /// Level for the crates of this workspace.
    pub level: TracingLevel,
    /// Output destination.
    pub output: TracingOutput,
    /// Full `EnvFilter` directive string; replaces `level` and `RUST_LOG`.
    pub filter: Option<String>,
}

impl TracingConfig {
    /// Creates a configuration logging at `info` to stderr.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the log level.
    #[must_use]
    pub const fn with_level(mut self, level: TracingLevel) -> Self {
        self.level = level;
        self
    }

    /// Sets the output destination.
    #[must_use]
    pub fn with_output(mut self, output: TracingOutput) -> Self {
        self.output = output;
        self
    }

    /// Sets a custom filter string.
    #[must_use]
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    /// Filter directives derived from the level.
    #[must_use]
    pub fn default_directives(&self) -> String {
        FILTER_TARGETS
            .iter()
            .map(|target| format!("{target}={}", self.level))
            .collect::<Vec<_>>()
            .join(",")
    }

    fn env_filter(&self) -> TracingResult<EnvFilter> {
        if let Some(custom) = &self.filter {
            return EnvFilter::try_new(custom)
                .map_err(|e| TracingError::InitializationFailed(e.to_string()));
        }
        EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(self.default_directives()))
            .map_err(|e| TracingError::InitializationFailed(e.to_string()))
    }

    fn writer(&self) -> TracingResult<(BoxMakeWriter, bool)> {
        match &self.output {
            TracingOutput::Stderr => Ok((BoxMakeWriter::new(std::io::stderr), true)),
            TracingOutput::File(path) => {
                let file = std::fs::File::create(path).map_err(|source| {
                    TracingError::FileCreationFailed {
                        path: path.clone(),
                        source,
                    }
                })?;
                Ok((BoxMakeWriter::new(file), false))
            }
        }
    }
}

/// Installs the global subscriber.
///
/// # Errors
///
/// Returns an error if tracing was already initialized, the filter string
/// is invalid, or the log file cannot be created.
pub fn init_tracing(config: &TracingConfig) -> TracingResult<()> {
    if TRACING_INITIALIZED.swap(true, Ordering::SeqCst) {
        return Err(TracingError::AlreadyInitialized);
    }

    let filter = config.env_filter()?;
    let (writer, ansi) = config.writer()?;

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_ansi(ansi)
                .with_writer(writer),
        )
        .try_init()
        .map_err(|e| TracingError::InitializationFailed(e.to_string()))?;

    tracing::debug!(level = %config.level, output = ?config.output, "Tracing initialized");
    Ok(())
}
