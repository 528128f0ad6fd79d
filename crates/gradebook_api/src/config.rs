//! Server configuration.

use std::net::{Ipv4Addr, SocketAddr};

pub const DEFAULT_PORT: u16 = 8000;

/// Runtime options for the HTTP server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Listen address.
    pub bind: SocketAddr,
    /// Load the bootstrap records on startup.
    pub seed: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from((Ipv4Addr::LOCALHOST, DEFAULT_PORT)),
            seed: true,
        }
    }
}
