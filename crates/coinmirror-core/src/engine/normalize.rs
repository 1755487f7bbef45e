//! Synthetic timeline rewriting for chart series.
//!
//! Provider sample cadence drifts across fetches and rotation batches, so
//! charts drawn from different sync runs would not line up visually. The
//! normalizer rewrites every timestamp onto an evenly spaced axis anchored at
//! `now`; values pass through untouched.

use serde::{Deserialize, Serialize};
use time::Duration;

use crate::{TimePoint, UtcDateTime};

/// Anchor kind for the synthetic axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Anchor {
    /// Window of `hours_back` hours ending at `now`.
    Hourly,
    /// Window of 365 days ending at `now`.
    Yearly,
}

/// Rewrite `points` onto an even axis over the anchor window.
///
/// The window start is `now - span`; the i-th output timestamp is
/// `start + i * (span / len)`. The last emitted timestamp is therefore one
/// interval short of `now`, which keeps the formula identical for every
/// series length.
pub fn normalize(
    points: &[TimePoint],
    point_count: usize,
    now: UtcDateTime,
    anchor: Anchor,
) -> Vec<TimePoint> {
    if points.is_empty() {
        return Vec::new();
    }

    let span = match anchor {
        Anchor::Yearly => Duration::days(365),
        Anchor::Hourly => Duration::hours(i64::from(hours_back(point_count))),
    };
    let start = now - span;
    let interval = span / points.len() as i32;

    points
        .iter()
        .enumerate()
        .map(|(index, point)| TimePoint {
            ts: start + interval * index as i32,
            value: point.value,
        })
        .collect()
}

/// Lookback hours for an hourly-anchored window.
///
/// The canonical chart cardinalities map one point per hour; anything else
/// falls back to the point count itself.
fn hours_back(point_count: usize) -> u32 {
    match point_count {
        24 => 24,
        168 => 168,
        720 => 720,
        other => other as u32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points(count: usize) -> Vec<TimePoint> {
        (0..count)
            .map(|index| TimePoint {
                // Deliberately ragged source timestamps.
                ts: UtcDateTime::from_unix_ms(1_600_000_000_000 + index as i64 * 37_000)
                    .expect("in range"),
                value: index as f64,
            })
            .collect()
    }

    #[test]
    fn empty_input_is_empty() {
        let now = UtcDateTime::parse("2024-06-01T12:00:00Z").expect("valid");
        assert!(normalize(&[], 24, now, Anchor::Hourly).is_empty());
    }

    #[test]
    fn hourly_axis_starts_at_window_open() {
        let now = UtcDateTime::parse("2024-06-01T12:00:00Z").expect("valid");
        let out = normalize(&points(24), 24, now, Anchor::Hourly);

        assert_eq!(out[0].ts, now - Duration::hours(24));
        assert_eq!(out[1].ts - out[0].ts, Duration::hours(1));
        assert_eq!(out.last().map(|p| p.ts), Some(now - Duration::hours(1)));
    }

    #[test]
    fn values_pass_through_unchanged() {
        let now = UtcDateTime::parse("2024-06-01T12:00:00Z").expect("valid");
        let input = points(7);
        let out = normalize(&input, 168, now, Anchor::Hourly);

        let values: Vec<f64> = out.iter().map(|p| p.value).collect();
        let expected: Vec<f64> = input.iter().map(|p| p.value).collect();
        assert_eq!(values, expected);
    }

    #[test]
    fn yearly_axis_spans_365_days() {
        let now = UtcDateTime::parse("2024-06-01T00:00:00Z").expect("valid");
        let out = normalize(&points(365), 365, now, Anchor::Yearly);

        assert_eq!(out[0].ts, now - Duration::days(365));
        assert_eq!(out[1].ts - out[0].ts, Duration::days(1));
    }

    #[test]
    fn non_canonical_count_falls_back_to_itself() {
        let now = UtcDateTime::parse("2024-06-01T12:00:00Z").expect("valid");
        let out = normalize(&points(10), 10, now, Anchor::Hourly);

        assert_eq!(out[0].ts, now - Duration::hours(10));
        assert_eq!(out[1].ts - out[0].ts, Duration::hours(1));
    }
}
