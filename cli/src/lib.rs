//! Broadcast administration CLI.
//!
//! The command table lives in [`commands`]; handlers talk to the API through
//! an injected [`BroadcastClient`](broadcast_client::BroadcastClient), so the
//! same tree runs against [`LazyClient`] in the binary and against fakes in
//! tests.
//!
//! ```
//! use broadcast_admin_cli::command_tree;
//!
//! let tree = command_tree(None).unwrap();
//! let help = tree.help(&["broadcasts", "create"]).unwrap();
//! assert!(help.text.contains("--level"));
//! ```

mod client;
pub mod commands;
mod config;
mod error;
pub mod logging;
mod output;

pub use client::LazyClient;
pub use commands::{Node, ROOT_COMMAND, Service, command_tree};
pub use config::{API_URL_ENV, CONFIG_ENV, Config, ConfigError, DEFAULT_MAX_CONTENT_BYTES, TOKEN_ENV};
pub use error::CliError;
pub use output::{OutputFormat, format_outcome};
