//! Property-based tests for tracker history.
//!
//! These tests verify:
//! - H1: after every ingestion the history never exceeds its capacity
//! - H2: the history equals the last `min(total, capacity)` samples in arrival order
//! - H3: recent locations are the exact reverse of arrival order, led by the current location

use chrono::{TimeZone, Utc};
use locus_core::location::testing::RecordingProvider;
use locus_core::location::{LocationError, LocationSample, LocationTracker, TrackerConfig};
use proptest::prelude::*;

/// Builds a sample whose latitude encodes its global arrival index.
fn numbered(index: usize) -> LocationSample {
    let seconds = i64::try_from(index).expect("index fits in i64");
    #[allow(clippy::cast_precision_loss)]
    let latitude = (index % 90) as f64;
    LocationSample::at(
        latitude,
        0.0,
        Utc.timestamp_opt(1_700_000_000 + seconds, 0).unwrap(),
    )
}

fn tracker(capacity: usize) -> LocationTracker<RecordingProvider> {
    let config = TrackerConfig {
        capacity,
        ..TrackerConfig::default()
    };
    LocationTracker::with_config(RecordingProvider::default(), config).unwrap()
}

/// Splits `0..total` into consecutive batches of the given sizes.
fn batches(sizes: &[usize]) -> Vec<Vec<LocationSample>> {
    let mut next = 0;
    sizes
        .iter()
        .map(|&size| {
            let batch = (next..next + size).map(numbered).collect();
            next += size;
            batch
        })
        .collect()
}

// ============================================================================
// Fixed scenarios
// ============================================================================

#[test]
fn h_default_capacity_without_ingest_is_empty() {
    let tracker = LocationTracker::new(RecordingProvider::default());

    assert_eq!(tracker.config().capacity, 20);
    assert_eq!(tracker.current_location(), Err(LocationError::LocationsEmpty));
}

#[test]
fn h_default_capacity_keeps_last_twenty() {
    let tracker = LocationTracker::new(RecordingProvider::default());
    tracker.ingest((0..25).map(numbered));

    let recent = tracker.recent_locations().unwrap();
    assert_eq!(recent.len(), 20);
    assert_eq!(recent[0], numbered(24));
    assert_eq!(recent[19], numbered(5));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Property: no ingestion sequence ever leaves more samples than the capacity.
    #[test]
    fn h1_length_never_exceeds_capacity(
        capacity in 1usize..30,
        sizes in prop::collection::vec(0usize..15, 0..20),
    ) {
        let tracker = tracker(capacity);
        for batch in batches(&sizes) {
            tracker.ingest(batch);
            prop_assert!(tracker.location_count() <= capacity);
        }
    }

    /// Property: the retained samples are exactly the newest ones, in order.
    #[test]
    fn h2_history_is_tail_of_arrivals(
        capacity in 1usize..30,
        sizes in prop::collection::vec(0usize..15, 1..20),
    ) {
        let tracker = tracker(capacity);
        for batch in batches(&sizes) {
            tracker.ingest(batch);
        }

        let total: usize = sizes.iter().sum();
        let kept = total.min(capacity);
        let expected: Vec<LocationSample> = (total - kept..total).rev().map(numbered).collect();

        if kept == 0 {
            prop_assert_eq!(tracker.recent_locations(), Err(LocationError::LocationsEmpty));
        } else {
            prop_assert_eq!(tracker.recent_locations().unwrap(), expected);
        }
    }

    /// Property: the current location is the head of the recent list.
    #[test]
    fn h3_current_is_first_recent(
        capacity in 1usize..30,
        sizes in prop::collection::vec(1usize..15, 1..10),
    ) {
        let tracker = tracker(capacity);
        for batch in batches(&sizes) {
            tracker.ingest(batch);
        }

        let recent = tracker.recent_locations().unwrap();
        let current = tracker.current_location().unwrap();
        prop_assert_eq!(&recent[0], &current);

        let mut arrival = recent.clone();
        arrival.reverse();
        let mut timestamps = arrival.iter().map(|s| s.timestamp).collect::<Vec<_>>();
        timestamps.dedup();
        prop_assert_eq!(timestamps.len(), arrival.len());
        prop_assert!(arrival.windows(2).all(|w| w[0].timestamp < w[1].timestamp));
    }

    /// Property: shrinking the capacity between ingestions trims to the new bound
    /// on the next ingestion.
    #[test]
    fn h1_capacity_change_applies_on_next_ingest(
        first in 1usize..30,
        second in 1usize..30,
        count in 0usize..40,
    ) {
        let tracker = tracker(first);
        tracker.ingest((0..count).map(numbered));
        tracker.set_capacity(second).unwrap();
        tracker.ingest(Vec::new());

        prop_assert_eq!(tracker.location_count(), count.min(first).min(second));
    }
}
