// This software is provided for non-commercial use only.
// Commercial use is strictly prohibited.
// If you use, modify, or redistribute this software, you must provide proper attribution to the original author.
// (c) 2026 Onur Tuna. All rights reserved.

//! Address resolver — maps decoded runs onto absolute byte ranges.
//!
//! The absolute LCN is threaded through the run list as fold state: each
//! run's offset is a delta from the previous run's starting cluster, so a
//! range can only be computed after every run before it.

use serde::Serialize;

use crate::runs::decoder::Run;

/// Absolute placement of one run on the source medium.
///
/// `start_byte = cluster_size * absolute_lcn` and
/// `end_byte = start_byte + cluster_size * length_in_clusters - 1`.
/// A negative start is representable; the carver rejects it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedRange {
    /// 1-based position of the run in the list.
    pub run_index: usize,
    pub start_byte: i128,
    /// Inclusive.
    pub end_byte: i128,
    pub absolute_lcn: i128,
    pub length_in_clusters: u64,
    pub sparse: bool,
}

impl ResolvedRange {
    /// Number of bytes covered by this range.
    pub fn byte_len(&self) -> u128 {
        u128::try_from(self.end_byte - self.start_byte + 1).unwrap_or(0)
    }

    pub fn is_addressable(&self) -> bool {
        self.start_byte >= 0
    }
}

/// Resolve `runs` against a volume with `cluster_size`-byte clusters.
///
/// Total: every input run yields exactly one range, in order.
pub fn resolve(runs: &[Run], cluster_size: u32) -> Vec<ResolvedRange> {
    let cluster = i128::from(cluster_size);
    runs.iter()
        .enumerate()
        .scan(0i128, |lcn, (i, run)| {
            *lcn += i128::from(run.relative_offset_in_clusters);
            let start_byte = cluster * *lcn;
            let end_byte = start_byte + cluster * i128::from(run.length_in_clusters) - 1;
            Some(ResolvedRange {
                run_index: i + 1,
                start_byte,
                end_byte,
                absolute_lcn: *lcn,
                length_in_clusters: run.length_in_clusters,
                sparse: run.is_sparse(),
            })
        })
        .collect()
}

/// Size in bytes of the file the ranges reconstruct.
pub fn total_bytes(ranges: &[ResolvedRange]) -> u128 {
    ranges.iter().map(ResolvedRange::byte_len).sum()
}
