//! Server configuration.

use std::net::{Ipv4Addr, SocketAddr};

use log::warn;

/// Port used by [`ServerConfig::from_env`] when `PORT` is unset.
pub const DEFAULT_PORT: u16 = 9000;

/// HTTP server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// The address to bind to.
    pub addr: SocketAddr,
    /// The maximum number of concurrent connections.
    pub max_connections: usize,
    /// The read buffer size.
    pub read_buffer_size: usize,
    /// The largest request (head and body) read from a connection.
    pub max_request_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from((Ipv4Addr::LOCALHOST, 8080)),
            max_connections: 1024,
            read_buffer_size: 8192,
            max_request_size: 1024 * 1024,
        }
    }
}

impl ServerConfig {
    /// Listen on all interfaces, on the port named by the `PORT` environment
    /// variable or [`DEFAULT_PORT`].
    pub fn from_env() -> Self {
        Self::with_port_var(std::env::var("PORT").ok().as_deref())
    }

    fn with_port_var(port: Option<&str>) -> Self {
        let port = match port {
            None | Some("") => DEFAULT_PORT,
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                warn!("Ignoring invalid PORT value {raw:?}, using {DEFAULT_PORT}");
                DEFAULT_PORT
            }),
        };

        Self {
            addr: SocketAddr::from((Ipv4Addr::UNSPECIFIED, port)),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod config_tests {
    use super::*;

    #[test]
    fn test_port_from_env_value() {
        assert_eq!(ServerConfig::with_port_var(Some("3000")).addr.port(), 3000);
        assert_eq!(ServerConfig::with_port_var(None).addr.port(), DEFAULT_PORT);
        assert_eq!(ServerConfig::with_port_var(Some("")).addr.port(), DEFAULT_PORT);
        assert_eq!(ServerConfig::with_port_var(Some("http")).addr.port(), DEFAULT_PORT);
        assert!(ServerConfig::with_port_var(Some("3000")).addr.ip().is_unspecified());
    }
}
