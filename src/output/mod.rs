//! Output formatting module.
//!
//! Provides formatters for plain text, JSON, and CSV output of scan results.

mod csv_format;
mod json_format;
mod plain;

pub use csv_format::write_csv;
pub use json_format::{write_json, ScanReport};
pub use plain::{print_error, print_scan_header, print_warning, write_plain};

use crate::cli::{OutputFormat, View};
use crate::scanner::{ScanAggregate, ScanResult};
use std::io;

/// The results a view selects, in bucket order.
pub fn select(aggregate: &ScanAggregate, view: View) -> Vec<ScanResult> {
    match view {
        View::Open => aggregate.open().to_vec(),
        View::Closed => aggregate.closed().to_vec(),
        View::Full => aggregate.full(),
    }
}

/// Format and print scan results according to the specified format.
pub fn print_results(
    aggregate: &ScanAggregate,
    view: View,
    format: OutputFormat,
    show_closed: bool,
) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Plain => write_plain(&mut out, aggregate, view, show_closed),
        OutputFormat::Json => write_json(&mut out, aggregate, view),
        OutputFormat::Csv => write_csv(&mut out, aggregate, view),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProbeError;
    use crate::types::{Host, Port};
    use std::net::{IpAddr, Ipv4Addr};

    fn port(n: u16) -> Port {
        Port::new(n).unwrap()
    }

    fn sample() -> ScanAggregate {
        let ip = IpAddr::V4(Ipv4Addr::LOCALHOST);
        let mut agg = ScanAggregate::new(Host::Ip(ip), Some(ip), chrono::Utc::now(), 3);
        agg.record(ScanResult::closed(port(21), ProbeError::Refused));
        agg.record(ScanResult::open(port(22), 3));
        agg.record(ScanResult::closed(port(23), ProbeError::TimedOut));
        agg.finish();
        agg
    }

    fn render<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> io::Result<()>,
    {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_select_views() {
        let agg = sample();
        let ports = |view| -> Vec<u16> {
            select(&agg, view).iter().map(|r| r.port.as_u16()).collect()
        };
        assert_eq!(ports(View::Open), vec![22]);
        assert_eq!(ports(View::Closed), vec![21, 23]);
        assert_eq!(ports(View::Full), vec![22, 21, 23]);
    }

    #[test]
    fn test_csv_output() {
        let agg = sample();
        let text = render(|out| write_csv(out, &agg, View::Full));
        assert_eq!(
            text,
            "port,state,response_time_ms\n22,open,3\n21,closed,\n23,closed,\n"
        );
    }

    #[test]
    fn test_json_output() {
        let agg = sample();
        let text = render(|out| write_json(out, &agg, View::Open));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();

        assert_eq!(value["host"], "127.0.0.1");
        assert_eq!(value["open_ports"], 1);
        assert_eq!(value["closed_ports"], 2);
        assert_eq!(value["results"][0]["port"], 22);
        assert_eq!(value["results"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_plain_hides_closed_by_default() {
        console::set_colors_enabled(false);
        let agg = sample();

        let text = render(|out| write_plain(out, &agg, View::Full, false));
        assert!(text.contains("1 open, 2 closed"));
        assert!(text.contains("    22"));
        assert!(!text.contains("    21"));

        let text = render(|out| write_plain(out, &agg, View::Full, true));
        assert!(text.contains("    21"));
    }
}
