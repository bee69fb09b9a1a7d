//! The conversion pipeline
//!
//! Wires reader, date filter, mapper, and writer: stream records in source
//! order, drop those outside the date range, decompose the rest into ledger
//! entries, and accumulate per category. Nothing is written until the whole
//! input has been read and mapped, so a failing run leaves no partial
//! output behind.

use std::path::PathBuf;

use crate::error::ConvertResult;
use crate::export::csv::{write_ledger, OutputPaths};
use crate::models::{EntryKind, LedgerEntry, Marketplace};
use crate::services::filter::DateRange;
use crate::services::import::RecordReader;
use crate::services::mapper::map_record;

/// Inputs of one conversion run
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Path to the marketplace export
    pub input: PathBuf,

    /// Explicit output base; derived from the input path when absent
    pub output_base: Option<PathBuf>,

    /// Which export schema the input uses
    pub marketplace: Marketplace,

    /// Inclusive date-range filter
    pub range: DateRange,
}

/// One written output file and its entry count
#[derive(Debug, Clone)]
pub struct OutputReport {
    pub path: PathBuf,
    pub entries: usize,
}

/// Counters reported after a successful run
#[derive(Debug, Clone)]
pub struct ConvertSummary {
    /// Records decomposed into ledger entries
    pub converted: usize,

    /// Records dropped by the date-range filter
    pub filtered_out: usize,

    /// Cancelled shop rows skipped
    pub cancelled: usize,

    /// The three written files, in category order
    pub outputs: Vec<OutputReport>,
}

/// Run one conversion
pub fn convert(opts: &ConvertOptions) -> ConvertResult<ConvertSummary> {
    let mut reader = RecordReader::open(&opts.input, opts.marketplace)?;

    let mut sales = Vec::new();
    let mut commission = Vec::new();
    let mut shipping = Vec::new();
    let mut converted = 0usize;
    let mut filtered_out = 0usize;

    while let Some(record) = reader.next_record()? {
        if !opts.range.contains(record.date) {
            filtered_out += 1;
            continue;
        }
        for entry in map_record(&record, opts.marketplace) {
            match entry.kind {
                EntryKind::Sales => sales.push(entry),
                EntryKind::Commission => commission.push(entry),
                EntryKind::Shipping => shipping.push(entry),
            }
        }
        converted += 1;
    }

    let paths = OutputPaths::derive(&opts.input, opts.output_base.as_deref(), opts.marketplace);
    let outputs = vec![
        write_category(paths.sales, sales)?,
        write_category(paths.commission, commission)?,
        write_category(paths.shipping, shipping)?,
    ];

    Ok(ConvertSummary {
        converted,
        filtered_out,
        cancelled: reader.cancelled(),
        outputs,
    })
}

fn write_category(path: PathBuf, entries: Vec<LedgerEntry>) -> ConvertResult<OutputReport> {
    write_ledger(&path, &entries)?;
    Ok(OutputReport {
        path,
        entries: entries.len(),
    })
}
