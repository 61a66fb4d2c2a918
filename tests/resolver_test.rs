//! Resolver tests: LCN fold, byte arithmetic, negative and sparse ranges.

use proptest::prelude::*;

use datarun::runs::{decode, resolve, total_bytes, Run, RunHeader};

fn run(length: u64, offset: i64) -> Run {
    Run {
        header: RunHeader::from_byte(0x44),
        length_in_clusters: length,
        relative_offset_in_clusters: offset,
        raw_offset: 0,
    }
}

#[test]
fn test_offsets_accumulate() {
    let runs = vec![run(4, 100), run(2, -30), run(8, 1000)];
    let ranges = resolve(&runs, 512);

    assert_eq!(ranges.len(), 3);
    assert_eq!(ranges[0].absolute_lcn, 100);
    assert_eq!(ranges[1].absolute_lcn, 70);
    assert_eq!(ranges[2].absolute_lcn, 1070);

    assert_eq!(ranges[1].start_byte, 70 * 512);
    assert_eq!(ranges[1].end_byte, 70 * 512 + 2 * 512 - 1);
    assert_eq!(ranges[1].byte_len(), 1024);

    let indices: Vec<usize> = ranges.iter().map(|r| r.run_index).collect();
    assert_eq!(indices, vec![1, 2, 3]);
}

#[test]
fn test_cluster_size_is_per_call() {
    let runs = decode("21 18 34 56").expect("decode");
    let small = resolve(&runs, 512);
    let large = resolve(&runs, 4096);
    assert_eq!(small[0].start_byte, 86 * 512);
    assert_eq!(large[0].start_byte, 86 * 4096);
    assert_eq!(small[0].absolute_lcn, large[0].absolute_lcn);
}

#[test]
fn test_negative_lcn_is_representable() {
    let ranges = resolve(&[run(1, -5)], 4096);
    assert_eq!(ranges[0].absolute_lcn, -5);
    assert_eq!(ranges[0].start_byte, -20480);
    assert!(!ranges[0].is_addressable());
}

#[test]
fn test_zero_length_run_is_empty() {
    let ranges = resolve(&[run(0, 3)], 4096);
    assert_eq!(ranges[0].end_byte, ranges[0].start_byte - 1);
    assert_eq!(ranges[0].byte_len(), 0);
}

#[test]
fn test_extreme_values_do_not_overflow() {
    let runs = vec![run(u64::MAX, i64::MAX), run(u64::MAX, i64::MAX)];
    let ranges = resolve(&runs, u32::MAX);
    assert_eq!(ranges[1].absolute_lcn, 2 * i128::from(i64::MAX));
    assert_eq!(
        ranges[1].byte_len(),
        u128::from(u32::MAX) * u128::from(u64::MAX)
    );
}

#[test]
fn test_total_bytes() {
    let ranges = resolve(&[run(2, 10), run(3, 10)], 4096);
    assert_eq!(total_bytes(&ranges), 5 * 4096);
    assert_eq!(total_bytes(&[]), 0);
}

#[test]
fn test_empty_input() {
    assert!(resolve(&[], 4096).is_empty());
}

proptest! {
    #[test]
    fn prop_lcn_is_prefix_sum(
        pairs in proptest::collection::vec((0u64..10_000, -1_000_000i64..1_000_000), 0..32),
        cluster in prop::sample::select(vec![512u32, 1024, 4096, 65536]),
    ) {
        let runs: Vec<Run> = pairs.iter().map(|&(l, o)| run(l, o)).collect();
        let ranges = resolve(&runs, cluster);
        prop_assert_eq!(ranges.len(), runs.len());

        let mut sum: i128 = 0;
        for (range, &(length, offset)) in ranges.iter().zip(&pairs) {
            sum += i128::from(offset);
            prop_assert_eq!(range.absolute_lcn, sum);
            prop_assert_eq!(range.start_byte, i128::from(cluster) * sum);
            prop_assert_eq!(
                range.end_byte,
                range.start_byte + i128::from(cluster) * i128::from(length) - 1
            );
        }
    }
}
