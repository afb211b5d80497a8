//! Configuration module

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// Port shared by convention with the lead-scoring service
pub const DEFAULT_PORT: u16 = 9696;

/// Application configuration
///
/// The bind address is fixed; it is not read from flags or the environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// Interface to bind (all interfaces)
    pub host: IpAddr,

    /// Server port
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
        }
    }
}

impl Config {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
