//! Host identifiers.
//!
//! A scan targets exactly one host, given either as an IP literal or as a
//! hostname that is resolved once before probing starts.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;
use tracing::debug;
use trust_dns_resolver::config::{ResolverConfig, ResolverOpts};
use trust_dns_resolver::error::ResolveError;
use trust_dns_resolver::TokioAsyncResolver;

/// Error type for host parsing and resolution.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HostError {
    #[error("invalid host: '{0}'")]
    InvalidFormat(String),
    #[error("failed to resolve hostname '{0}': {1}")]
    DnsResolutionFailed(String, String),
    #[error("no IP addresses found for hostname '{0}'")]
    NoAddressesFound(String),
}

/// The host a scan is aimed at.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Host {
    Ip(IpAddr),
    Name(String),
}

impl Host {
    /// Parse a host identifier.
    pub fn parse(s: &str) -> Result<Self, HostError> {
        let s = s.trim();

        // Bracketed IPv6 literals are accepted as well: "[::1]"
        let unbracketed = s
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'))
            .unwrap_or(s);
        if let Ok(ip) = unbracketed.parse::<IpAddr>() {
            return Ok(Self::Ip(ip));
        }

        if is_valid_hostname(s) {
            return Ok(Self::Name(s.to_string()));
        }

        Err(HostError::InvalidFormat(s.to_string()))
    }

    /// Resolve this host to a single address.
    ///
    /// IP literals resolve to themselves. Hostnames go through the system's
    /// resolver configuration (hosts file, `/etc/resolv.conf`, search
    /// domains) and the first returned address is used.
    pub async fn resolve(&self) -> Result<IpAddr, HostError> {
        match self {
            Self::Ip(ip) => Ok(*ip),
            Self::Name(name) => {
                let resolver = resolver_or_default(TokioAsyncResolver::tokio_from_system_conf());

                let response = resolver
                    .lookup_ip(name.as_str())
                    .await
                    .map_err(|e| HostError::DnsResolutionFailed(name.clone(), e.to_string()))?;

                response
                    .iter()
                    .next()
                    .ok_or_else(|| HostError::NoAddressesFound(name.clone()))
            }
        }
    }
}

impl FromStr for Host {
    type Err = HostError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<IpAddr> for Host {
    fn from(ip: IpAddr) -> Self {
        Self::Ip(ip)
    }
}

impl fmt::Display for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ip(ip) => write!(f, "{}", ip),
            Self::Name(name) => write!(f, "{}", name),
        }
    }
}

/// Use the system resolver, or the built-in public nameservers if the system
/// configuration cannot be read.
fn resolver_or_default(system: Result<TokioAsyncResolver, ResolveError>) -> TokioAsyncResolver {
    system.unwrap_or_else(|e| {
        debug!(error = %e, "system resolver configuration unavailable, using defaults");
        TokioAsyncResolver::tokio(ResolverConfig::default(), ResolverOpts::default())
    })
}

/// Check if a string is a valid hostname.
fn is_valid_hostname(s: &str) -> bool {
    if s.is_empty() || s.len() > 253 {
        return false;
    }

    // Each label must be 1-63 characters
    for label in s.split('.') {
        if label.is_empty() || label.len() > 63 {
            return false;
        }
        // Must start and end with alphanumeric
        if !label.chars().next().is_some_and(|c| c.is_ascii_alphanumeric()) {
            return false;
        }
        if !label.chars().last().is_some_and(|c| c.is_ascii_alphanumeric()) {
            return false;
        }
        // Can only contain alphanumeric and hyphens
        if !label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return false;
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{Ipv4Addr, Ipv6Addr};

    #[test]
    fn test_parse_ipv4() {
        let host = Host::parse("192.168.1.1").unwrap();
        assert_eq!(host, Host::Ip(IpAddr::V4(Ipv4Addr::new(192, 168, 1, 1))));
    }

    #[test]
    fn test_parse_ipv6() {
        assert_eq!(Host::parse("::1").unwrap(), Host::Ip(IpAddr::V6(Ipv6Addr::LOCALHOST)));
        assert_eq!(Host::parse("[::1]").unwrap(), Host::Ip(IpAddr::V6(Ipv6Addr::LOCALHOST)));
    }

    #[test]
    fn test_parse_hostname() {
        assert_eq!(Host::parse("example.com").unwrap(), Host::Name("example.com".into()));
        assert_eq!(Host::parse("localhost").unwrap(), Host::Name("localhost".into()));
    }

    #[test]
    fn test_parse_invalid() {
        assert!(Host::parse("").is_err());
        assert!(Host::parse("-invalid.com").is_err());
        assert!(Host::parse("bad host").is_err());
        assert!(Host::parse("10.0.0.0/8").is_err());
    }

    #[tokio::test]
    async fn test_resolver_falls_back_without_system_conf() {
        let resolver = resolver_or_default(Err(ResolveError::from("no resolv.conf")));
        let response = resolver.lookup_ip("127.0.0.1").await.unwrap();
        assert_eq!(response.iter().next(), Some(IpAddr::V4(Ipv4Addr::LOCALHOST)));
    }

    #[tokio::test]
    async fn test_resolve_name_from_hosts_file() {
        let ip = Host::parse("localhost").unwrap().resolve().await.unwrap();
        assert!(ip.is_loopback());
    }

    #[test]
    fn test_resolve_ip_literal() {
        let host = Host::parse("127.0.0.1").unwrap();
        let ip = tokio_test::block_on(host.resolve()).unwrap();
        assert_eq!(ip, IpAddr::V4(Ipv4Addr::LOCALHOST));
    }
}
