//! Scan results and the per-scan aggregate.

use crate::error::ProbeError;
use crate::types::{Host, Port};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::IpAddr;

/// Reachability of a port as seen by a connect scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// A connection was established and immediately released.
    Open,
    /// The attempt failed or did not complete within the timeout.
    Closed,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open => write!(f, "open"),
            Self::Closed => write!(f, "closed"),
        }
    }
}

/// Result of probing a single port.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanResult {
    pub port: Port,
    pub outcome: Outcome,
    /// Why the port was classified closed. Diagnostic only.
    #[serde(skip)]
    pub failure: Option<ProbeError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_time_ms: Option<u64>,
}

impl ScanResult {
    pub fn open(port: Port, response_time_ms: u64) -> Self {
        Self {
            port,
            outcome: Outcome::Open,
            failure: None,
            response_time_ms: Some(response_time_ms),
        }
    }

    pub fn closed(port: Port, failure: ProbeError) -> Self {
        Self {
            port,
            outcome: Outcome::Closed,
            failure: Some(failure),
            response_time_ms: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.outcome == Outcome::Open
    }
}

/// The complete, partitioned result of one scan.
///
/// Buckets hold results in the order probes completed, which differs from
/// run to run. Once returned from a scan the aggregate is read-only; every
/// view below is a pure projection over it.
#[derive(Debug, Clone, Serialize)]
pub struct ScanAggregate {
    pub host: Host,
    /// Address the probes were sent to, if the host resolved.
    pub address: Option<IpAddr>,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
    open: Vec<ScanResult>,
    closed: Vec<ScanResult>,
}

impl ScanAggregate {
    pub(crate) fn new(
        host: Host,
        address: Option<IpAddr>,
        started_at: DateTime<Utc>,
        capacity: usize,
    ) -> Self {
        Self {
            host,
            address,
            started_at,
            completed_at: started_at,
            open: Vec::new(),
            closed: Vec::with_capacity(capacity),
        }
    }

    /// Append a result to the bucket matching its outcome.
    pub(crate) fn record(&mut self, result: ScanResult) {
        match result.outcome {
            Outcome::Open => self.open.push(result),
            Outcome::Closed => self.closed.push(result),
        }
    }

    pub(crate) fn finish(&mut self) {
        self.completed_at = Utc::now();
    }

    /// Results for one outcome, in arrival order.
    pub fn bucket(&self, outcome: Outcome) -> &[ScanResult] {
        match outcome {
            Outcome::Open => &self.open,
            Outcome::Closed => &self.closed,
        }
    }

    pub fn open(&self) -> &[ScanResult] {
        &self.open
    }

    pub fn closed(&self) -> &[ScanResult] {
        &self.closed
    }

    /// Open results followed by closed results.
    pub fn full(&self) -> Vec<ScanResult> {
        self.open.iter().chain(self.closed.iter()).cloned().collect()
    }

    /// Total number of results across both buckets.
    pub fn total(&self) -> usize {
        self.open.len() + self.closed.len()
    }

    /// Port numbers of one bucket, ascending.
    pub fn sorted_ports(&self, outcome: Outcome) -> Vec<Port> {
        let mut ports: Vec<Port> = self.bucket(outcome).iter().map(|r| r.port).collect();
        ports.sort_unstable();
        ports
    }

    pub fn duration_ms(&self) -> u64 {
        (self.completed_at - self.started_at)
            .num_milliseconds()
            .max(0) as u64
    }
}
