//! The end-to-end batch: billing CSV in, Graphite lines out.

use std::io::{Read, Write};

use awsbill_core::error::{BillingError, Result};
use awsbill_core::formatting::MetricFormatter;
use awsbill_core::models::LineItemType;
use awsbill_core::time_utils::HOURLY_INTERVAL_SECS;
use tracing::{debug, trace};

use crate::aggregator::MetricLedger;
use crate::record::ColumnIndex;
use crate::rules::default_rules;

/// Counters describing one pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Data rows read, excluding the header.
    pub rows_read: u64,
    /// Rows dropped because their line-item type is not `Usage`.
    pub skipped_line_item_type: u64,
    /// Rows dropped because they do not cover exactly one hour.
    pub skipped_non_hourly: u64,
    /// Rows handed to the ledger.
    pub rows_aggregated: u64,
    /// Metric lines written to the output.
    pub lines_written: usize,
}

/// Read a billing report from `input`, aggregate it with the default rule
/// set and write Graphite lines to `output`.
///
/// Nothing is written until the whole report has been read, so a malformed
/// row aborts the run without partial output.
pub fn generate_metrics<R: Read, W: Write + ?Sized>(
    input: R,
    output: &mut W,
    formatter: &MetricFormatter,
) -> Result<RunSummary> {
    let mut ledger = MetricLedger::new(default_rules());
    let mut summary = aggregate_report(input, &mut ledger)?;

    summary.lines_written = ledger.output(formatter, output)?;
    debug!(
        "Read {} rows: {} aggregated, {} skipped by line-item type, {} non-hourly; wrote {} lines",
        summary.rows_read,
        summary.rows_aggregated,
        summary.skipped_line_item_type,
        summary.skipped_non_hourly,
        summary.lines_written
    );

    Ok(summary)
}

/// Feed every hourly `Usage` row of the report into `ledger`.
pub fn aggregate_report<R: Read>(input: R, ledger: &mut MetricLedger) -> Result<RunSummary> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(input);

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    if headers.is_empty() {
        return Err(BillingError::malformed("report has no header row"));
    }
    let columns = ColumnIndex::from_headers(&headers)?;
    debug!("Report header has {} columns", columns.width());

    let mut summary = RunSummary::default();
    let mut row = csv::StringRecord::new();

    while reader.read_record(&mut row)? {
        summary.rows_read += 1;
        let row_number = summary.rows_read;

        let values: Vec<&str> = row.iter().collect();
        let record = columns
            .record(values.as_slice())
            .map_err(|e| e.at_row(row_number))?;

        if record.kind() != LineItemType::Usage {
            trace!(
                "Row {}: skipping line-item type \"{}\"",
                row_number,
                record.line_item_type()
            );
            summary.skipped_line_item_type += 1;
            continue;
        }

        let interval = record.interval().map_err(|e| e.at_row(row_number))?;
        if interval != HOURLY_INTERVAL_SECS {
            trace!("Row {}: skipping {}s interval", row_number, interval);
            summary.skipped_non_hourly += 1;
            continue;
        }

        ledger.process(&record).map_err(|e| e.at_row(row_number))?;
        summary.rows_aggregated += 1;
    }

    Ok(summary)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
