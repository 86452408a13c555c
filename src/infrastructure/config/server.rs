//! HTTP server configuration.

use std::net::SocketAddr;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Where the REST and WebSocket server listens.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Events buffered per WebSocket client before it starts skipping.
    #[serde(default = "default_broadcast_capacity")]
    pub broadcast_capacity: usize,
    /// Origins allowed by CORS. Empty allows any origin.
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "127.0.0.1".into()
}

const fn default_port() -> u16 {
    8080
}

const fn default_broadcast_capacity() -> usize {
    256
}

impl ServerConfig {
    /// Parsed listen address.
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e: std::net::AddrParseError| {
                ConfigError::InvalidValue {
                    field: "server.host",
                    reason: e.to_string(),
                }
                .into()
            })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            broadcast_capacity: default_broadcast_capacity(),
            cors_origins: Vec::new(),
        }
    }
}
