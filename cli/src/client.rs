//! Deferred construction of the HTTP client.

use std::cell::OnceCell;

use broadcast_client::{ApiError, Broadcast, BroadcastClient, HttpClient, Result};

use crate::config::Config;

/// [`BroadcastClient`] that builds its [`HttpClient`] on first use.
///
/// Help output and argument errors never touch the network, so they must not
/// require an API URL either; configuration problems surface only when a
/// command actually calls the API.
#[derive(Debug)]
pub struct LazyClient {
    config: Config,
    client: OnceCell<std::result::Result<HttpClient, ApiError>>,
}

impl LazyClient {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            client: OnceCell::new(),
        }
    }

    fn client(&self) -> Result<&HttpClient> {
        self.client
            .get_or_init(|| HttpClient::new(&self.config.client_config()?))
            .as_ref()
            .map_err(Clone::clone)
    }
}

impl BroadcastClient for LazyClient {
    fn broadcast_create(&self, broadcast: &Broadcast) -> Result<()> {
        self.client()?.broadcast_create(broadcast)
    }

    fn broadcast_get(&self, id: &str) -> Result<Broadcast> {
        self.client()?.broadcast_get(id)
    }

    fn broadcast_delete(&self, id: &str) -> Result<()> {
        self.client()?.broadcast_delete(id)
    }

    fn broadcasts(&self) -> Result<Vec<Broadcast>> {
        self.client()?.broadcasts()
    }
}
