//! JSON output formatting.

use crate::cli::View;
use crate::scanner::{ScanAggregate, ScanResult};
use crate::types::Host;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::{self, Write};
use std::net::IpAddr;

/// Serialized form of one scan.
#[derive(Debug, Serialize)]
pub struct ScanReport {
    pub host: Host,
    pub address: Option<IpAddr>,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
    pub duration_ms: u64,
    pub open_ports: usize,
    pub closed_ports: usize,
    pub results: Vec<ScanResult>,
}

impl ScanReport {
    pub fn new(aggregate: &ScanAggregate, view: View) -> Self {
        Self {
            host: aggregate.host.clone(),
            address: aggregate.address,
            started_at: aggregate.started_at,
            completed_at: aggregate.completed_at,
            duration_ms: aggregate.duration_ms(),
            open_ports: aggregate.open().len(),
            closed_ports: aggregate.closed().len(),
            results: super::select(aggregate, view),
        }
    }
}

/// Write results in JSON format.
pub fn write_json<W: Write>(out: &mut W, aggregate: &ScanAggregate, view: View) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, &ScanReport::new(aggregate, view))?;
    writeln!(out)
}
