//! Behavior-driven tests for the sync engine
//!
//! These tests verify HOW raw historical series become chart-ready data:
//! downsampling, axis normalization, percent-change derivation, and the
//! time-of-day rotation window, focusing on user-visible outcomes.

use coinmirror_core::{
    downsample, normalize, percent_change, select_batch, Anchor, ChartSet, CoinId, Horizon,
    SeriesBundle, TimePoint, UtcDateTime,
};
use time::Duration;

fn hourly_series(len: usize, start_value: f64) -> Vec<TimePoint> {
    (0..len)
        .map(|index| TimePoint {
            ts: UtcDateTime::from_unix_ms(1_672_531_200_000 + index as i64 * 3_600_000)
                .expect("in range"),
            value: start_value + index as f64,
        })
        .collect()
}

fn bundle(len: usize) -> SeriesBundle {
    SeriesBundle {
        prices: hourly_series(len, 100.0),
        market_caps: hourly_series(len, 1_000_000.0),
        volumes: hourly_series(len, 50_000.0),
    }
}

// =============================================================================
// Downsampling
// =============================================================================

#[test]
fn when_a_year_of_hourly_data_is_charted_every_horizon_lands_near_its_cardinality() {
    // Given: 365 days of hourly samples
    let now = UtcDateTime::parse("2024-01-01T00:00:00Z").expect("valid");
    let raw = bundle(8_760);

    // When: The full chart set is built
    let set = ChartSet::build(CoinId::parse("bitcoin").expect("valid"), &raw, now);

    // Then: Each horizon holds its target cardinality, give or take the
    // forced tail sample
    for bucket in &set.buckets {
        let len = bucket.prices.len();
        let target = bucket.horizon.target_points();
        assert!(
            len == target || len == target + 1,
            "{} holds {len} points for target {target}",
            bucket.horizon
        );
        assert_eq!(bucket.prices.len(), bucket.price_changes.len());
        assert_eq!(bucket.market_caps.len(), bucket.market_cap_changes.len());
        assert_eq!(bucket.volumes.len(), bucket.volume_changes.len());
    }
}

#[test]
fn when_the_source_is_shorter_than_the_target_nothing_is_invented() {
    // Given: A coin listed for only three days
    let raw = hourly_series(72, 100.0);

    // When: Downsampled toward a week of hourly points
    let out = downsample(&raw, Horizon::Week.target_points());

    // Then: All 72 source samples pass through, none are fabricated
    assert_eq!(out.len(), 72);
    assert_eq!(out.first().map(|p| p.value), Some(100.0));
    assert_eq!(out.last().map(|p| p.value), Some(171.0));
}

#[test]
fn when_the_stride_skips_the_newest_sample_it_is_appended_anyway() {
    // Given: A series whose stride would end before the last sample
    let raw = hourly_series(10, 0.0);

    // When: Reduced to three points (stride 3: indices 0, 3, 6)
    let out = downsample(&raw, 3);

    // Then: The newest sample still closes the series
    let values: Vec<f64> = out.iter().map(|p| p.value).collect();
    assert_eq!(values, vec![0.0, 3.0, 6.0, 9.0]);
}

// =============================================================================
// Axis normalization
// =============================================================================

#[test]
fn when_series_are_normalized_their_axes_line_up_regardless_of_source_cadence() {
    let now = UtcDateTime::parse("2024-06-01T12:00:00Z").expect("valid");

    // Given: Two series fetched at different times with ragged timestamps
    let early: Vec<TimePoint> = (0..168)
        .map(|index| TimePoint {
            ts: UtcDateTime::from_unix_ms(1_600_000_000_000 + index * 3_555_000).expect("in range"),
            value: index as f64,
        })
        .collect();
    let late: Vec<TimePoint> = (0..168)
        .map(|index| TimePoint {
            ts: UtcDateTime::from_unix_ms(1_650_000_000_000 + index * 3_601_000).expect("in range"),
            value: index as f64 * 2.0,
        })
        .collect();

    // When: Both are rewritten onto the weekly hourly axis
    let axis_a = normalize(&early, 168, now, Anchor::Hourly);
    let axis_b = normalize(&late, 168, now, Anchor::Hourly);

    // Then: The timestamps are identical while values stay their own
    let stamps_a: Vec<_> = axis_a.iter().map(|p| p.ts).collect();
    let stamps_b: Vec<_> = axis_b.iter().map(|p| p.ts).collect();
    assert_eq!(stamps_a, stamps_b);
    assert_eq!(axis_a[0].ts, now - Duration::hours(168));
    assert_eq!(axis_a[1].ts - axis_a[0].ts, Duration::hours(1));
    assert_ne!(axis_a[10].value, axis_b[10].value);
}

#[test]
fn when_the_yearly_axis_is_built_it_spans_365_days_ending_before_now() {
    let now = UtcDateTime::parse("2024-06-01T00:00:00Z").expect("valid");
    let raw = hourly_series(365, 1.0);

    let out = normalize(&raw, 365, now, Anchor::Yearly);

    assert_eq!(out[0].ts, now - Duration::days(365));
    assert_eq!(out[1].ts - out[0].ts, Duration::days(1));
    assert_eq!(out.last().map(|p| p.ts), Some(now - Duration::days(1)));
}

// =============================================================================
// Percent change
// =============================================================================

#[test]
fn when_prices_double_the_percent_series_reads_one_hundred() {
    // Given: A price that doubles then halves against the opening sample
    let raw = vec![
        TimePoint {
            ts: UtcDateTime::from_unix_ms(1_700_000_000_000).expect("in range"),
            value: 50.0,
        },
        TimePoint {
            ts: UtcDateTime::from_unix_ms(1_700_003_600_000).expect("in range"),
            value: 100.0,
        },
        TimePoint {
            ts: UtcDateTime::from_unix_ms(1_700_007_200_000).expect("in range"),
            value: 25.0,
        },
    ];

    // When: Percent changes are derived
    let out = percent_change(&raw);

    // Then: Each sample is measured against the first
    let percents: Vec<f64> = out.iter().map(|p| p.percent).collect();
    assert_eq!(percents, vec![0.0, 100.0, -50.0]);
}

#[test]
fn when_the_baseline_is_zero_the_percent_series_stays_flat() {
    // Given: A dead listing whose opening price is zero
    let raw = vec![
        TimePoint {
            ts: UtcDateTime::from_unix_ms(1_700_000_000_000).expect("in range"),
            value: 0.0,
        },
        TimePoint {
            ts: UtcDateTime::from_unix_ms(1_700_003_600_000).expect("in range"),
            value: 3.0,
        },
    ];

    // When / Then: No division by zero, just a flat zero series
    let percents: Vec<f64> = percent_change(&raw).iter().map(|p| p.percent).collect();
    assert_eq!(percents, vec![0.0, 0.0]);
}

// =============================================================================
// Rotation window
// =============================================================================

#[test]
fn when_a_day_of_runs_passes_every_coin_gets_a_chart_refresh() {
    // Given: 50 tracked coins in 7-coin batches rotating every 2 hours
    let all: Vec<u32> = (0..50).collect();
    let mut covered = std::collections::BTreeSet::new();

    // When: One run fires per rotation period across a day
    for hour in (0..24).step_by(2) {
        let now = UtcDateTime::parse(&format!("2024-06-01T{hour:02}:30:00Z")).expect("valid");
        let (_, batch) = select_batch(now, &all, 2, 7);
        covered.extend(batch.iter().copied());
    }

    // Then: Every coin was selected at least once
    assert_eq!(covered.len(), 50);
}

#[test]
fn when_runs_repeat_within_one_period_the_batch_does_not_move() {
    let all: Vec<u32> = (0..50).collect();

    let (index_a, batch_a) = select_batch(
        UtcDateTime::parse("2024-06-01T04:05:00Z").expect("valid"),
        &all,
        2,
        7,
    );
    let (index_b, batch_b) = select_batch(
        UtcDateTime::parse("2024-06-01T05:55:00Z").expect("valid"),
        &all,
        2,
        7,
    );

    assert_eq!(index_a, index_b);
    assert_eq!(batch_a, batch_b);
}

#[test]
fn when_the_list_does_not_divide_evenly_the_last_batch_is_the_remainder() {
    let all: Vec<u32> = (0..50).collect();

    // ceil(50 / 7) = 8 batches; the eighth holds the single leftover coin.
    let (index, batch) = select_batch(
        UtcDateTime::parse("2024-06-01T14:00:00Z").expect("valid"),
        &all,
        2,
        7,
    );

    assert_eq!(index, 7);
    assert_eq!(batch, &[49]);
}
