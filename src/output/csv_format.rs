//! CSV output formatting.

use crate::cli::View;
use crate::scanner::ScanAggregate;
use std::io::{self, Write};

/// Write results in CSV format.
pub fn write_csv<W: Write>(out: &mut W, aggregate: &ScanAggregate, view: View) -> io::Result<()> {
    let mut wtr = csv::Writer::from_writer(out);

    wtr.write_record(["port", "state", "response_time_ms"])?;

    for result in super::select(aggregate, view) {
        wtr.write_record([
            &result.port.to_string(),
            &result.outcome.to_string(),
            &result.response_time_ms.map_or(String::new(), |t| t.to_string()),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
