//! Invocation-time error types.
//!
//! [`UsageError`] covers malformed input caught before a handler runs.
//! [`DispatchError`] wraps it together with routing and rendering failures;
//! application error types implement `From<DispatchError>` so the tree can
//! surface both through a single `Result`.

use thiserror::Error;

/// Malformed or disallowed user input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UsageError {
    /// Fewer positional tokens than declared arguments.
    #[error("missing required argument: <{name}>")]
    MissingArgument { name: String },
    /// More positional tokens than declared arguments.
    #[error("too many arguments: expected {expected}, got {got}")]
    TooManyArguments { expected: usize, got: usize },
    /// A flag token that the command does not declare.
    #[error("unknown flag: {0}")]
    UnknownFlag(String),
    /// A value-taking flag at the end of input.
    #[error("flag --{0} requires a value")]
    MissingFlagValue(String),
    /// A flag value rejected by its type or validator.
    #[error("invalid value {value:?} for flag --{flag}{}", allowed_suffix(.allowed))]
    InvalidFlagValue {
        flag: String,
        value: String,
        allowed: Vec<String>,
    },
}

fn allowed_suffix(allowed: &[String]) -> String {
    if allowed.is_empty() {
        String::new()
    } else {
        format!(": must be one of {}", allowed.join(", "))
    }
}

/// Failures raised by the dispatcher itself.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Input rejected before the handler ran.
    #[error(transparent)]
    Usage(#[from] UsageError),
    /// No child of the current group matches the token.
    #[error("unknown command {token:?} for {path:?}")]
    UnknownCommand { path: String, token: String },
    /// A handler result could not be serialized for rendering.
    #[error("failed to serialize result: {0}")]
    Serialize(#[from] serde_json::Error),
}
