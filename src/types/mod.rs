//! Core type definitions using newtype patterns for type safety.

mod host;
mod port;

pub use host::{Host, HostError};
pub use port::{Port, PortError, PortRange};
