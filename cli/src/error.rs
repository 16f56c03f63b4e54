//! Error type for the admin CLI.

use broadcast_client::{ApiError, ParseLevelError};
use command_spec_core::{DispatchError, SpecError};
use thiserror::Error;

use crate::config::ConfigError;

/// Everything that can make a CLI invocation fail.
#[derive(Debug, Error)]
pub enum CliError {
    /// Routing or argument validation failure.
    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    /// Failure reported by the remote API.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Standard input could not be read.
    #[error("failed to read broadcast content: {0}")]
    Input(#[source] std::io::Error),

    /// Standard input exceeded the configured size cap.
    #[error("broadcast content exceeds the {limit} byte limit")]
    ContentTooLarge { limit: u64 },

    /// Writing to standard output failed.
    #[error("failed to write output: {0}")]
    Output(#[source] std::io::Error),

    /// A result could not be rendered in the requested format.
    #[error("failed to render output: {0}")]
    Render(String),

    #[error(transparent)]
    Level(#[from] ParseLevelError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The command table itself is invalid.
    #[error("invalid command definitions: {}", join_errors(.0))]
    InvalidCommands(Vec<SpecError>),
}

fn join_errors(errors: &[SpecError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
