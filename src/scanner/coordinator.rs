//! Scan coordinator.
//!
//! Fans one probe task out per port, funnels every result through a single
//! consumer, and partitions them into a [`ScanAggregate`].

use crate::error::ProbeError;
use crate::scanner::aggregate::{Outcome, ScanAggregate, ScanResult};
use crate::scanner::probe::{Prober, TcpConnectProber};
use crate::types::{Host, PortRange};
use chrono::Utc;
use indicatif::ProgressBar;
use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info, trace, warn};

/// Per-probe timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Parameters of one scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    /// Ports to probe. Defaults to the full 1-65535 range.
    pub ports: PortRange,
    /// Upper bound on each connection attempt.
    pub timeout: Duration,
    /// Maximum number of probes in flight. `None` launches every probe at once.
    pub concurrency: Option<NonZeroUsize>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            ports: PortRange::full(),
            timeout: DEFAULT_TIMEOUT,
            concurrency: None,
        }
    }
}

impl ScanConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ports(mut self, ports: PortRange) -> Self {
        self.ports = ports;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Cap the number of concurrent probes; `0` removes the cap.
    pub fn with_concurrency(mut self, limit: usize) -> Self {
        self.concurrency = NonZeroUsize::new(limit);
        self
    }
}

/// Runs scans against one host at a time.
///
/// Each call to [`Scanner::scan`] builds and owns its own aggregate; nothing
/// is shared between concurrent scans.
pub struct Scanner<P = TcpConnectProber> {
    config: ScanConfig,
    prober: Arc<P>,
    progress: Option<ProgressBar>,
}

impl Scanner<TcpConnectProber> {
    /// Create a scanner that probes with real TCP connects.
    pub fn new(config: ScanConfig) -> Self {
        let prober = TcpConnectProber::new(config.timeout);
        Self::with_prober(config, prober)
    }
}

impl Default for Scanner<TcpConnectProber> {
    fn default() -> Self {
        Self::new(ScanConfig::default())
    }
}

impl<P: Prober + 'static> Scanner<P> {
    /// Create a scanner that probes through `prober`.
    ///
    /// The prober is responsible for honouring its own timeout;
    /// `config.timeout` is not applied to it.
    pub fn with_prober(config: ScanConfig, prober: P) -> Self {
        Self {
            config,
            prober: Arc::new(prober),
            progress: None,
        }
    }

    /// Tick `progress` once per completed probe.
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = Some(progress);
        self
    }

    /// The scan parameters. `timeout` only takes effect for scanners built
    /// with [`Scanner::new`]; a custom prober carries its own.
    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Scan every configured port of `host` and wait for all probes to finish.
    ///
    /// Never fails: a host that does not resolve yields an aggregate in which
    /// every port is closed.
    pub async fn scan(&self, host: &Host) -> ScanAggregate {
        let started_at = Utc::now();
        let ports = self.config.ports;
        info!(
            %host,
            %ports,
            timeout_ms = self.config.timeout.as_millis() as u64,
            concurrency = self.config.concurrency.map_or(0, NonZeroUsize::get),
            "starting scan"
        );

        let address = match host.resolve().await {
            Ok(address) => address,
            Err(e) => {
                warn!(%host, error = %e, "host did not resolve, reporting all ports closed");
                let failure = ProbeError::Resolution(e.to_string());
                let mut aggregate = ScanAggregate::new(host.clone(), None, started_at, ports.len());
                for port in ports.iter() {
                    aggregate.record(ScanResult::closed(port, failure.clone()));
                    self.tick(Outcome::Closed);
                }
                aggregate.finish();
                return aggregate;
            }
        };
        debug!(%host, %address, "resolved target");

        let target: Arc<str> = Arc::from(address.to_string());
        let limiter = self
            .config
            .concurrency
            .map(|limit| Arc::new(Semaphore::new(limit.get())));

        let mut tasks = JoinSet::new();
        let mut in_flight = HashMap::with_capacity(ports.len());

        for port in ports.iter() {
            let prober = Arc::clone(&self.prober);
            let target = Arc::clone(&target);
            let limiter = limiter.clone();

            let handle = tasks.spawn(async move {
                // The semaphore is never closed, so acquisition only waits.
                let _permit = match limiter {
                    Some(sem) => sem.acquire_owned().await.ok(),
                    None => None,
                };

                match prober.probe(&target, port).await {
                    Ok(elapsed) => ScanResult::open(port, elapsed.as_millis() as u64),
                    Err(failure) => {
                        trace!(%port, %failure, "probe failed");
                        ScanResult::closed(port, failure)
                    }
                }
            });
            in_flight.insert(handle.id(), port);
        }

        let mut aggregate = ScanAggregate::new(host.clone(), Some(address), started_at, ports.len());

        while let Some(joined) = tasks.join_next_with_id().await {
            let result = match joined {
                Ok((id, result)) => {
                    in_flight.remove(&id);
                    result
                }
                Err(err) => {
                    let Some(port) = in_flight.remove(&err.id()) else {
                        warn!(error = %err, "probe task ended for an unknown port");
                        continue;
                    };
                    warn!(%port, error = %err, "probe task did not complete");
                    ScanResult::closed(port, ProbeError::Other(err.to_string()))
                }
            };

            self.tick(result.outcome);
            aggregate.record(result);
        }

        aggregate.finish();
        info!(
            %host,
            open = aggregate.open().len(),
            closed = aggregate.closed().len(),
            duration_ms = aggregate.duration_ms(),
            "scan complete"
        );

        aggregate
    }

    /// Run one scan and keep only the open results.
    pub async fn open_ports(&self, host: &Host) -> Vec<ScanResult> {
        self.scan(host).await.open().to_vec()
    }

    /// Run one scan and keep only the closed results.
    pub async fn closed_ports(&self, host: &Host) -> Vec<ScanResult> {
        self.scan(host).await.closed().to_vec()
    }

    /// Run one scan and return open results followed by closed results.
    pub async fn full_scan(&self, host: &Host) -> Vec<ScanResult> {
        self.scan(host).await.full()
    }

    fn tick(&self, outcome: Outcome) {
        if let Some(pb) = &self.progress {
            pb.inc(1);
            if outcome == Outcome::Open {
                pb.set_message("found open port");
            }
        }
    }
}
