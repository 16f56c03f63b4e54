//! Client side of the broadcast admin API.
//!
//! - [`Broadcast`] / [`Level`]: the announcement domain object.
//! - [`BroadcastClient`]: the four remote operations the CLI needs.
//! - [`ApiError`] / [`ErrorKind`]: structured failures; callers compare
//!   kinds by value (see [`is_error_kind`]).
//! - [`HttpClient`]: blocking HTTP implementation.
//!
//! # Example
//!
//! ```no_run
//! use broadcast_client::{BroadcastClient, ClientConfig, HttpClient};
//!
//! let mut config = ClientConfig::new("https://api.example.com");
//! config.token = Some("secret".into());
//! let client = HttpClient::new(&config).unwrap();
//! for bc in client.broadcasts().unwrap() {
//!     println!("{} [{}] {}", bc.id, bc.level, bc.title);
//! }
//! ```

mod broadcast;
mod error;
mod http;

pub use broadcast::{Broadcast, Level, ParseLevelError};
pub use error::{ApiError, ErrorKind, Result, is_error_kind};
pub use http::{ClientConfig, DEFAULT_TIMEOUT, HttpClient};

/// Remote operations on broadcasts.
///
/// Implementations own transport, authentication and timeouts; the command
/// layer only sees results and [`ApiError`]s.
pub trait BroadcastClient {
    /// Creates a broadcast.
    fn broadcast_create(&self, broadcast: &Broadcast) -> Result<()>;
    /// Fetches one broadcast by id.
    fn broadcast_get(&self, id: &str) -> Result<Broadcast>;
    /// Deletes one broadcast by id.
    fn broadcast_delete(&self, id: &str) -> Result<()>;
    /// Lists broadcasts in server order.
    fn broadcasts(&self) -> Result<Vec<Broadcast>>;
}
