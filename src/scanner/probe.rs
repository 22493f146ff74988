//! Single-port reachability probes.
//!
//! A probe performs one full TCP handshake against `host:port` and releases
//! the connection immediately. There are no retries: one attempt per port
//! per scan.

use crate::error::ProbeError;
use crate::scanner::aggregate::Outcome;
use crate::types::Port;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{Duration, Instant};
use tokio::net::TcpStream;
use tokio::time::timeout;

/// Transport protocol used by a probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    #[default]
    Tcp,
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tcp => write!(f, "tcp"),
        }
    }
}

/// Probe a single port and report whether it accepted a connection.
///
/// Every failure mode (refusal, timeout, unreachable network, failed name
/// resolution) is reported as [`Outcome::Closed`].
pub async fn probe(protocol: Protocol, host: &str, port: Port, limit: Duration) -> Outcome {
    probe_detailed(protocol, host, port, limit).await.into()
}

/// Like [`probe`], but keeps the failure reason and the connect latency.
///
/// `limit` bounds name resolution and the handshake together.
pub async fn probe_detailed(
    protocol: Protocol,
    host: &str,
    port: Port,
    limit: Duration,
) -> Result<Duration, ProbeError> {
    match protocol {
        Protocol::Tcp => {
            let start = Instant::now();
            match timeout(limit, TcpStream::connect((host, port.as_u16()))).await {
                Ok(Ok(stream)) => {
                    let elapsed = start.elapsed();
                    drop(stream);
                    Ok(elapsed)
                }
                Ok(Err(e)) => Err(ProbeError::from_io(&e)),
                Err(_) => Err(ProbeError::TimedOut),
            }
        }
    }
}

impl From<Result<Duration, ProbeError>> for Outcome {
    fn from(result: Result<Duration, ProbeError>) -> Self {
        match result {
            Ok(_) => Outcome::Open,
            Err(_) => Outcome::Closed,
        }
    }
}

/// Something that can test one port of a host for reachability.
///
/// The coordinator only talks to ports through this trait, so alternative
/// implementations can stand in for the network.
#[async_trait]
pub trait Prober: Send + Sync {
    /// Protocol this prober speaks.
    fn protocol(&self) -> Protocol;

    /// Attempt one connection. `Ok` carries the time taken to connect.
    async fn probe(&self, host: &str, port: Port) -> Result<Duration, ProbeError>;
}

/// Prober backed by the operating system's `connect()`.
///
/// Does not require elevated privileges.
#[derive(Debug, Clone)]
pub struct TcpConnectProber {
    timeout: Duration,
}

impl TcpConnectProber {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[async_trait]
impl Prober for TcpConnectProber {
    fn protocol(&self) -> Protocol {
        Protocol::Tcp
    }

    async fn probe(&self, host: &str, port: Port) -> Result<Duration, ProbeError> {
        probe_detailed(Protocol::Tcp, host, port, self.timeout).await
    }
}
