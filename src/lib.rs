//! # portsweep - full-range TCP connect scanning
//!
//! portsweep determines, for every TCP port of a host, whether a connection
//! can be established within a bounded time, and classifies each port as
//! open or closed.
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use portsweep::scanner::{ScanConfig, Scanner};
//! use portsweep::types::Host;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() {
//!     let host = Host::parse("192.168.1.1").unwrap();
//!     let config = ScanConfig::new()
//!         .with_timeout(Duration::from_secs(2))
//!         .with_concurrency(1000);
//!
//!     let aggregate = Scanner::new(config).scan(&host).await;
//!     for result in aggregate.open() {
//!         println!("{} is open", result.port);
//!     }
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`types`] - Validated ports, port ranges and host identifiers
//! - [`scanner`] - Probes, the scan coordinator and the result aggregate
//! - [`config`] - Settings used by the command-line front end
//! - [`cli`] and [`output`] - The thin command-line wrapper
//! - [`error`] - Error types

pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod scanner;
pub mod types;

// Re-export commonly used types
pub use error::ProbeError;
pub use scanner::{
    closed_ports, full_scan, open_ports, probe, scan, Outcome, ScanAggregate, ScanConfig,
    ScanResult, Scanner,
};
pub use types::{Host, Port, PortRange};
