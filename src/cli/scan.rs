//! Scan subcommand implementation.
//!
//! Handles the `portsweep scan <host>` command.

use crate::cli::{OutputFormat, View};
use crate::config::AppSettings;
use crate::error::CliResult;
use crate::output;
use crate::scanner::{ScanConfig, Scanner};
use crate::types::{Host, PortRange};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Scan a host for open ports.
#[derive(Parser, Debug)]
pub struct ScanCommand {
    /// Host to scan (IP address or hostname)
    #[arg(value_name = "HOST")]
    pub host: String,

    /// Port range to scan (e.g., "80", "1-1024")
    #[arg(short, long, default_value = "1-65535")]
    pub ports: PortRange,

    /// Maximum number of probes in flight (0 = unlimited)
    #[arg(short = 'c', long)]
    pub concurrency: Option<usize>,

    /// Connection timeout in milliseconds
    #[arg(short = 't', long)]
    pub timeout: Option<u64>,

    /// Which ports to report
    #[arg(long, value_enum, default_value = "full")]
    pub view: View,

    /// Output format for results
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// List closed ports in plain output
    #[arg(long)]
    pub show_closed: bool,
}

impl ScanCommand {
    /// Build the scan configuration, letting flags override settings.
    pub fn scan_config(&self, settings: &AppSettings) -> ScanConfig {
        let timeout_ms = self.timeout.unwrap_or(settings.default_timeout_ms);
        let concurrency = self.concurrency.unwrap_or(settings.default_concurrency);

        ScanConfig::new()
            .with_ports(self.ports)
            .with_timeout(Duration::from_millis(timeout_ms))
            .with_concurrency(concurrency)
    }

    /// Execute the scan command.
    pub async fn execute(&self, settings: &AppSettings, quiet: bool) -> CliResult<()> {
        let host = Host::parse(&self.host)?;
        let config = self.scan_config(settings);
        let format = self.output.unwrap_or(settings.default_output_format);
        let show_closed = self.show_closed || settings.show_closed;
        let interactive = !quiet && format == OutputFormat::Plain;

        if interactive {
            output::print_scan_header(&host, &config);
        }

        let mut scanner = Scanner::new(config);
        let progress = interactive.then(|| progress_bar(self.ports.len() as u64));
        if let Some(pb) = &progress {
            scanner = scanner.with_progress(pb.clone());
        }

        let aggregate = scanner.scan(&host).await;

        if let Some(pb) = progress {
            pb.finish_and_clear();
        }

        output::print_results(&aggregate, self.view, format, show_closed)?;
        Ok(())
    }
}

fn progress_bar(len: u64) -> ProgressBar {
    let pb = ProgressBar::new(len);
    if let Ok(style) = ProgressStyle::default_bar().template(
        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}",
    ) {
        pb.set_style(style.progress_chars("=>-"));
    }
    pb
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};

    fn parse(args: &[&str]) -> ScanCommand {
        let mut argv = vec!["portsweep", "scan"];
        argv.extend_from_slice(args);
        match Cli::try_parse_from(argv).unwrap().command {
            Commands::Scan(cmd) => cmd,
        }
    }

    #[test]
    fn test_settings_fill_missing_flags() {
        let settings = AppSettings {
            default_concurrency: 42,
            default_timeout_ms: 1500,
            ..AppSettings::default()
        };
        let config = parse(&["localhost"]).scan_config(&settings);

        assert_eq!(config.timeout, Duration::from_millis(1500));
        assert_eq!(config.concurrency.map(|n| n.get()), Some(42));
        assert_eq!(config.ports, PortRange::full());
    }

    #[test]
    fn test_flags_override_settings() {
        let config = parse(&["localhost", "-c", "0", "-t", "250", "-p", "20-30"])
            .scan_config(&AppSettings::default());

        assert_eq!(config.timeout, Duration::from_millis(250));
        assert_eq!(config.concurrency, None);
        assert_eq!(config.ports.len(), 11);
    }
}
