// This software is provided for non-commercial use only.
// Commercial use is strictly prohibited.
// If you use, modify, or redistribute this software, you must provide proper attribution to the original author.
// (c) 2026 Onur Tuna. All rights reserved.

//! Human-readable and JSON rendering of decoded runs and resolved ranges.
//!
//! Used by the CLI for `--verbose` diagnostics and for reporting mode (no
//! source image given). Nothing here performs I/O.

use std::fmt;

use serde::Serialize;

use crate::runs::{total_bytes, ResolvedRange, Run};

/// Uppercase hex with a leading `-` for negative values.
pub fn fmt_hex(value: i128) -> String {
    if value < 0 {
        format!("-{:X}", value.unsigned_abs())
    } else {
        format!("{value:X}")
    }
}

/// Field bytes as they appear once reassembled big-endian, e.g. `3418`.
fn field_hex(value: u128, width: usize) -> String {
    if width == 0 {
        return "(none)".into();
    }
    format!("{value:0digits$X}", digits = width * 2)
}

/// One line of per-run decode diagnostics.
pub fn describe_run(run: &Run) -> String {
    format!(
        "Header: {:02X}, Length: {} - {} | Offset: {} - {}",
        run.header.raw,
        field_hex(u128::from(run.length_in_clusters), run.header.length_size),
        run.length_in_clusters,
        field_hex(run.raw_offset, run.header.offset_size),
        run.relative_offset_in_clusters,
    )
}

/// One line describing where a run lives on the medium.
pub fn describe_range(range: &ResolvedRange) -> String {
    format!(
        "Run {}: Starting Location = {} | {}, End Point = {} | {}, LCN = {}",
        range.run_index,
        range.start_byte,
        fmt_hex(range.start_byte),
        range.end_byte,
        fmt_hex(range.end_byte),
        range.absolute_lcn,
    )
}

/// Decode diagnostics for a whole run list.
pub struct RunTable<'a>(pub &'a [Run]);

impl fmt::Display for RunTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Detailed calculations for each run:")?;
        for run in self.0 {
            writeln!(f, "{}", describe_run(run))?;
        }
        Ok(())
    }
}

/// Start/end points for a whole range list.
pub struct RangeTable<'a>(pub &'a [ResolvedRange]);

impl fmt::Display for RangeTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Calculated start and end points for each run:")?;
        for range in self.0 {
            writeln!(f, "{}", describe_range(range))?;
        }
        Ok(())
    }
}

/// Everything known about a data run without touching a source image.
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub cluster_size: u32,
    pub runs: &'a [Run],
    pub ranges: &'a [ResolvedRange],
    pub total_bytes: u128,
}

impl<'a> Report<'a> {
    pub fn new(cluster_size: u32, runs: &'a [Run], ranges: &'a [ResolvedRange]) -> Self {
        Self { cluster_size, runs, ranges, total_bytes: total_bytes(ranges) }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
