//! Plain text output formatting.
//!
//! Produces human-readable output with colors and formatting.

use crate::cli::View;
use crate::scanner::{Outcome, ScanAggregate, ScanConfig};
use crate::types::Host;
use console::{style, Style};
use std::io::{self, Write};

const RULE: &str = "═══════════════════════════════════════════════════════════════";
const THIN_RULE: &str = "───────────────────────────────────────────────────────────────";

/// Write results in human-readable plain text format.
///
/// Closed ports are only listed when `show_closed` is set or the view asks
/// for them explicitly; with 65535 ports they are usually noise.
pub fn write_plain<W: Write>(
    out: &mut W,
    aggregate: &ScanAggregate,
    view: View,
    show_closed: bool,
) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", style(RULE).cyan())?;
    writeln!(out, "                    {} Scan Results", style("portsweep").cyan().bold())?;
    writeln!(out, "{}", style(RULE).cyan())?;
    writeln!(out)?;

    writeln!(out, "  {} {}", style("Host:").bold(), aggregate.host)?;
    let address = aggregate
        .address
        .map_or_else(|| "unresolved".to_string(), |ip| ip.to_string());
    writeln!(out, "  {} {}", style("Address:").bold(), address)?;
    writeln!(out)?;

    writeln!(
        out,
        "  {} {} ports scanned in {:.2}s",
        style("Statistics:").bold(),
        aggregate.total(),
        aggregate.duration_ms() as f64 / 1000.0
    )?;
    writeln!(
        out,
        "               {} open, {} closed",
        style(aggregate.open().len()).green().bold(),
        style(aggregate.closed().len()).red()
    )?;
    writeln!(out)?;

    let rows: Vec<_> = super::select(aggregate, view)
        .into_iter()
        .filter(|r| r.is_open() || show_closed || view == View::Closed)
        .collect();

    if rows.is_empty() {
        writeln!(out, "  {}", style("No ports to display.").dim())?;
    } else {
        writeln!(out, "  {}", style(THIN_RULE).dim())?;
        writeln!(
            out,
            "  {:>6}  {:^8}  {}",
            style("PORT").bold(),
            style("STATE").bold(),
            style("RTT").bold()
        )?;
        writeln!(out, "  {}", style(THIN_RULE).dim())?;

        for result in rows {
            let state_style = match result.outcome {
                Outcome::Open => Style::new().green().bold(),
                Outcome::Closed => Style::new().red(),
            };
            let rtt = result
                .response_time_ms
                .map(|ms| format!("{}ms", ms))
                .unwrap_or_default();

            writeln!(
                out,
                "  {:>6}  {:^8}  {}",
                result.port.as_u16(),
                state_style.apply_to(result.outcome.to_string()),
                style(rtt).dim()
            )?;
        }

        writeln!(out, "  {}", style(THIN_RULE).dim())?;
    }

    writeln!(out)?;
    writeln!(out, "{}", style(RULE).cyan())?;
    writeln!(out)?;

    Ok(())
}

/// Print a scan header before scanning begins.
pub fn print_scan_header(host: &Host, config: &ScanConfig) {
    let concurrency = config
        .concurrency
        .map_or_else(|| "unlimited".to_string(), |n| n.to_string());

    println!();
    println!(
        "{} {} v{}",
        style("Starting").cyan(),
        style("portsweep").cyan().bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!("{} Target: {}", style("•").dim(), style(host).white().bold());
    println!(
        "{} Ports: {} ({} total)",
        style("•").dim(),
        config.ports,
        style(config.ports.len()).white().bold()
    );
    println!(
        "{} Timeout: {}ms, concurrency: {}",
        style("•").dim(),
        config.timeout.as_millis(),
        concurrency
    );
    println!();
}

/// Print an error message.
pub fn print_error(msg: &str) {
    eprintln!("{} {}", style("Error:").red().bold(), msg);
}

/// Print a warning message.
pub fn print_warning(msg: &str) {
    eprintln!("{} {}", style("Warning:").yellow().bold(), msg);
}
