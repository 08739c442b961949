//! Server configuration from the environment.

use std::net::SocketAddr;
use std::str::FromStr;

use sortvis_steps::Algorithm;

use crate::error::{Error, Result};
use crate::playback::{clamp_speed, DEFAULT_SPEED_MS};

/// Configuration for the visualization server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisConfig {
    /// HTTP listen address
    pub addr: SocketAddr,

    /// Initial auto-advance interval in milliseconds
    pub speed_ms: u64,

    /// Algorithm selected at startup
    pub algorithm: Algorithm,
}

impl Default for VisConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            speed_ms: DEFAULT_SPEED_MS,
            algorithm: Algorithm::default(),
        }
    }
}

impl VisConfig {
    /// Create config from environment variables with sensible defaults.
    ///
    /// Reads `SORTVIS_ADDR`, `SORTVIS_SPEED_MS` and `SORTVIS_ALGORITHM`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let addr = parse_var(&lookup, "SORTVIS_ADDR")?.unwrap_or(defaults.addr);
        let speed_ms = parse_var::<u64, _>(&lookup, "SORTVIS_SPEED_MS")?
            .map(clamp_speed)
            .unwrap_or(defaults.speed_ms);
        let algorithm = parse_var(&lookup, "SORTVIS_ALGORITHM")?.unwrap_or(defaults.algorithm);

        Ok(Self {
            addr,
            speed_ms,
            algorithm,
        })
    }

    /// Replace the port, keeping the host.
    pub fn with_port(mut self, port: u16) -> Self {
        self.addr.set_port(port);
        self
    }
}

fn parse_var<T, F>(lookup: &F, key: &'static str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => raw.trim().parse().map(Some).map_err(|e: T::Err| Error::Config {
            key,
            message: format!("{:?}: {}", raw, e),
        }),
    }
}
