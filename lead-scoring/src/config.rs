//! Configuration module

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

/// Port shared by convention with the ping service
pub const DEFAULT_PORT: u16 = 9696;

/// Model artifact, relative to the working directory
pub const DEFAULT_MODEL_PATH: &str = "pipeline_v1.json";

/// Application configuration
///
/// Fixed at build time: the bind address and artifact path are not read
/// from flags or the environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// Interface to bind (all interfaces)
    pub host: IpAddr,

    /// Server port
    pub port: u16,

    /// Serialized model artifact
    pub model_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
        }
    }
}

impl Config {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
