//! `lastpass-gtk` Core Library
//!
//! Everything the entry browser does apart from drawing widgets: running the
//! `lpass` client, turning its listing into a catalog, resolving what the
//! user picked or typed, and fetching the chosen entry.
//!
//! # Crate Structure
//!
//! - [`vault`] - The [`VaultCli`] capability and its `lpass` implementation
//! - [`catalog`] - Listing parser and the sorted entry catalog
//! - [`selection`] - Input resolution and the selection state machine
//! - [`record`] - Entry detail decoding and display formatting
//! - [`session`] - Login flow before the catalog is loaded
//! - [`config`] - Settings file and keyboard shortcuts
//! - [`tracing`] - Logging setup
//! - [`testing`] - Fake vault client for tests

#![warn(missing_docs)]

pub mod catalog;
pub mod config;
pub mod error;
pub mod record;
pub mod selection;
pub mod session;
pub mod testing;
pub mod tracing;
pub mod vault;

pub use catalog::{Catalog, CatalogEntry, load_catalog, parse_listing};
pub use error::{AppError, ConfigError, RecordParseError, VaultError, VaultResult};
pub use record::{RecordView, VaultRecord, decode_record, fetch_record};
pub use selection::{FetchTicket, SelectionController, SelectionState, resolve};
pub use session::{AuthOutcome, CredentialPrompt, ensure_authenticated};
pub use vault::{LpassCli, SyncMode, VaultCli};
