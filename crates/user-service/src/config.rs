//! Command-line and environment configuration.

use anyhow::Context;
use clap::Parser;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

/// In-memory user records over HTTP.
#[derive(Parser, Debug, Clone)]
#[command(name = "user-service", version)]
pub struct ServiceConfig {
    /// Interface to bind.
    #[arg(long, env = "BIND_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// TCP port to listen on. `0` picks a free port.
    #[arg(long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// Seconds in-flight requests get to finish after a shutdown signal.
    #[arg(long, env = "SHUTDOWN_TIMEOUT_SECS", default_value_t = 5)]
    pub shutdown_timeout_secs: u64,
}

impl ServiceConfig {
    pub fn bind_addr(&self) -> anyhow::Result<SocketAddr> {
        let ip: IpAddr = self
            .host
            .parse()
            .with_context(|| format!("invalid bind host: {}", self.host))?;
        Ok(SocketAddr::new(ip, self.port))
    }

    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout_secs)
    }
}
