//! Property and contract tests for the deduplicator, the batch
//! partitioner, and the statistics engine

use endpoint_connectivity_tester::{
    catalog::{dedupe_endpoints, normalize_address, Endpoint},
    probe::partition_batches,
    stats::LatencyStatistics,
    types::ReachabilityStatus,
};
use proptest::prelude::*;
use std::time::Duration;

fn endpoint(name: &str, address: &str) -> Endpoint {
    Endpoint::new(name, address)
}

#[test]
fn dedupe_keeps_first_of_identical_addresses() {
    let endpoints = vec![
        endpoint("first", "http://dup.example"),
        endpoint("second", "http://dup.example"),
    ];

    let unique = dedupe_endpoints(&endpoints);
    assert_eq!(unique.len(), 1);
    assert_eq!(unique[0], endpoints[0]);
}

#[test]
fn dedupe_treats_path_variants_as_one_address() {
    let endpoints = vec![
        endpoint("root", "http://server.example/"),
        endpoint("deep", "http://server.example/files/archive?page=2"),
    ];

    let unique = dedupe_endpoints(&endpoints);
    assert_eq!(unique.len(), 1);
    assert_eq!(unique[0].name, "root");
}

#[test]
fn normalization_is_case_insensitive_on_hosts() {
    assert_eq!(
        normalize_address("http://Server.Example/x"),
        normalize_address("http://server.example/y")
    );
}

#[test]
fn classification_thresholds() {
    assert_eq!(
        ReachabilityStatus::from_counts(5, 5),
        ReachabilityStatus::FullyReachable
    );
    assert_eq!(
        ReachabilityStatus::from_counts(3, 5),
        ReachabilityStatus::PartiallyReachable
    );
    assert_eq!(
        ReachabilityStatus::from_counts(0, 5),
        ReachabilityStatus::Unreachable
    );
}

#[test]
fn loss_percentages_for_attempt_ratios() {
    let three_of_five = LatencyStatistics::from_samples(
        &[
            Duration::from_millis(10),
            Duration::from_millis(20),
            Duration::from_millis(30),
        ],
        5,
    );
    assert!((three_of_five.loss_pct - 40.0).abs() < f64::EPSILON);

    let none_of_five = LatencyStatistics::from_samples(&[], 5);
    assert_eq!(none_of_five.loss_pct, 100.0);

    let all_of_five = LatencyStatistics::from_samples(
        &[Duration::from_millis(10); 5],
        5,
    );
    assert_eq!(all_of_five.loss_pct, 0.0);
}

#[test]
fn statistics_for_known_sample_set() {
    let stats = LatencyStatistics::from_samples(
        &[
            Duration::from_millis(10),
            Duration::from_millis(20),
            Duration::from_millis(30),
        ],
        3,
    );

    assert_eq!(stats.min_ms, 10.0);
    assert_eq!(stats.max_ms, 30.0);
    assert_eq!(stats.avg_ms, 20.0);
    assert!((stats.std_dev_ms - 8.165).abs() < 0.001);
}

#[test]
fn empty_statistics_are_zeroed_with_full_loss() {
    let stats = LatencyStatistics::from_samples(&[], 4);

    assert_eq!(stats.min_ms, 0.0);
    assert_eq!(stats.max_ms, 0.0);
    assert_eq!(stats.avg_ms, 0.0);
    assert_eq!(stats.std_dev_ms, 0.0);
    assert_eq!(stats.loss_pct, 100.0);
}

proptest! {
    /// Deduplicating an already-deduplicated sequence yields the same
    /// sequence, and output length never exceeds input length
    #[test]
    fn dedupe_is_idempotent(addresses in prop::collection::vec("[a-d]{1,2}", 0..40)) {
        let endpoints: Vec<Endpoint> = addresses
            .iter()
            .enumerate()
            .map(|(i, host)| endpoint(&format!("ep-{}", i), &format!("http://{}.example", host)))
            .collect();

        let once = dedupe_endpoints(&endpoints);
        let twice = dedupe_endpoints(&once);

        prop_assert_eq!(&once, &twice);
        prop_assert!(once.len() <= endpoints.len());
    }

    /// The partitioner yields ceil(n/b) batches, each of size <= b,
    /// covering every index exactly once in order
    #[test]
    fn partitioner_covers_all_indices(total in 0usize..500, batch_size in 1usize..64) {
        let batches = partition_batches(total, batch_size);

        let expected = if total == 0 { 0 } else { total.div_ceil(batch_size.min(total)) };
        prop_assert_eq!(batches.len(), expected);

        let mut covered = Vec::new();
        for range in &batches {
            prop_assert!(range.len() <= batch_size);
            covered.extend(range.clone());
        }
        prop_assert_eq!(covered, (0..total).collect::<Vec<_>>());
    }

    /// Statistics bounds: min <= avg <= max for any non-empty sample set
    #[test]
    fn statistics_ordering_invariant(samples in prop::collection::vec(1u64..10_000, 1..50)) {
        let durations: Vec<Duration> = samples.iter().map(|&ms| Duration::from_millis(ms)).collect();
        let stats = LatencyStatistics::from_samples(&durations, durations.len());

        prop_assert!(stats.min_ms <= stats.avg_ms + 1e-9);
        prop_assert!(stats.avg_ms <= stats.max_ms + 1e-9);
        prop_assert_eq!(stats.loss_pct, 0.0);
        prop_assert!(stats.std_dev_ms >= 0.0);
    }
}
