//! Scanner module - TCP connect scanning of a single host.
//!
//! [`probe`] tests one port, [`Scanner`] fans probes out across a port range
//! and collects them into a [`ScanAggregate`]. The free functions below are
//! convenience wrappers that run one default full-range scan each.

pub mod aggregate;
pub mod coordinator;
pub mod probe;

pub use aggregate::{Outcome, ScanAggregate, ScanResult};
pub use coordinator::{ScanConfig, Scanner, DEFAULT_TIMEOUT};
pub use probe::{probe, probe_detailed, Prober, Protocol, TcpConnectProber};

use crate::types::Host;

/// Scan all 65535 ports of `host` with the default configuration.
pub async fn scan(host: &Host) -> ScanAggregate {
    Scanner::default().scan(host).await
}

/// Run a full scan and keep only the open results.
///
/// Each call performs its own scan. To get several views of one scan, call
/// [`scan`] once and project the returned aggregate.
pub async fn open_ports(host: &Host) -> Vec<ScanResult> {
    Scanner::default().open_ports(host).await
}

/// Run a full scan and keep only the closed results.
pub async fn closed_ports(host: &Host) -> Vec<ScanResult> {
    Scanner::default().closed_ports(host).await
}

/// Run a full scan and return open results followed by closed results.
pub async fn full_scan(host: &Host) -> Vec<ScanResult> {
    Scanner::default().full_scan(host).await
}
