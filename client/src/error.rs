//! Structured remote errors.
//!
//! Every failure surfaced by a [`BroadcastClient`](crate::BroadcastClient)
//! carries an [`ErrorKind`] discriminant. Callers that need to recognize a
//! specific failure compare kinds by value instead of matching messages.

use thiserror::Error;

/// Category of a remote failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The API reported that the requested broadcast does not exist.
    BroadcastNotFound,
    /// HTTP 404 without the API's error body (wrong base path, proxy,
    /// missing route).
    NotFound,
    /// Missing or rejected credentials (HTTP 401).
    Unauthorized,
    /// Authenticated but not allowed (HTTP 403).
    Forbidden,
    /// The server rejected the payload (HTTP 400/422).
    InvalidData,
    /// Any other non-success status.
    Server,
    /// The request never produced a response (connect, timeout, TLS).
    Transport,
    /// The response body could not be decoded.
    Decode,
}

/// Error returned by the remote API client.
///
/// # Examples
///
/// ```
/// use broadcast_client::{ApiError, ErrorKind, is_error_kind};
///
/// let err = ApiError::new(ErrorKind::BroadcastNotFound, "broadcast does not exist").with_status(404);
/// assert!(err.is(ErrorKind::BroadcastNotFound));
/// assert!(!is_error_kind(&err, ErrorKind::Forbidden));
/// assert_eq!(err.to_string(), "broadcast does not exist");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ApiError {
    pub kind: ErrorKind,
    pub status: Option<u16>,
    pub message: String,
}

impl ApiError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            status: None,
            message: message.into(),
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Checks the error's kind.
    pub fn is(&self, kind: ErrorKind) -> bool {
        self.kind == kind
    }

    /// Maps a non-success HTTP status to an error.
    ///
    /// `message` is the message from the API's structured error body, if the
    /// response carried one; otherwise a generic one is derived from the
    /// status. A 404 is [`ErrorKind::BroadcastNotFound`] only when the body
    /// was present.
    pub fn from_status(status: u16, message: Option<String>) -> Self {
        let kind = match status {
            404 if message.is_some() => ErrorKind::BroadcastNotFound,
            404 => ErrorKind::NotFound,
            401 => ErrorKind::Unauthorized,
            403 => ErrorKind::Forbidden,
            400 | 422 => ErrorKind::InvalidData,
            _ => ErrorKind::Server,
        };
        let message = message.unwrap_or_else(|| match kind {
            ErrorKind::NotFound => format!("not found (status {status})"),
            ErrorKind::Unauthorized => "authentication required".to_string(),
            ErrorKind::Forbidden => "forbidden".to_string(),
            ErrorKind::InvalidData => "invalid data".to_string(),
            _ => format!("request failed with status {status}"),
        });
        Self::new(kind, message).with_status(status)
    }
}

/// Returns `true` if `err` is of the given kind.
pub fn is_error_kind(err: &ApiError, kind: ErrorKind) -> bool {
    err.is(kind)
}

/// Convenience alias for results with [`ApiError`].
pub type Result<T> = std::result::Result<T, ApiError>;
