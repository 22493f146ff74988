//! Error types for portsweep.
//!
//! Uses `thiserror` for ergonomic error definitions.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Why a single probe failed to establish a connection.
///
/// Every variant collapses to [`Outcome::Closed`](crate::scanner::Outcome)
/// in the public result; the reason is kept for diagnostics only.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProbeError {
    #[error("connection refused")]
    Refused,

    #[error("connection timed out")]
    TimedOut,

    #[error("host or network unreachable: {0}")]
    Unreachable(String),

    #[error("failed to resolve host: {0}")]
    Resolution(String),

    #[error("connection failed: {0}")]
    Other(String),
}

impl ProbeError {
    /// Classify an I/O error returned by a connect attempt.
    pub fn from_io(err: &io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::ConnectionRefused => Self::Refused,
            io::ErrorKind::TimedOut => Self::TimedOut,
            _ => {
                let msg = err.to_string();
                let lower = msg.to_lowercase();
                if lower.contains("unreachable") {
                    Self::Unreachable(msg)
                } else if lower.contains("lookup") || lower.contains("resolve") {
                    Self::Resolution(msg)
                } else {
                    Self::Other(msg)
                }
            }
        }
    }
}

/// Configuration loading errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not determine configuration directory")]
    DirectoryNotFound,

    #[error("failed to read {path}: {reason}")]
    ReadFailed { path: PathBuf, reason: String },

    #[error("failed to write {path}: {reason}")]
    WriteFailed { path: PathBuf, reason: String },

    #[error("invalid settings file: {0}")]
    InvalidFormat(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidFormat(err.to_string())
    }
}

/// Errors surfaced by the command-line front end.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Host(#[from] crate::types::HostError),

    #[error("output error: {0}")]
    Output(#[from] io::Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;
pub type CliResult<T> = Result<T, CliError>;
