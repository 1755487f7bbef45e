//! Fixed-cardinality reduction of historical series.

use crate::{PercentPoint, TimePoint};

/// Reduce `series` to at most `target_points` representative samples.
///
/// Short inputs (`len <= target_points`) pass through unchanged; there is no
/// upsampling. Longer inputs are stride-sampled at `step = len / target`
/// starting from index 0, and the final source sample is appended whenever the
/// stride would have skipped it, so the most recent data point is always
/// represented. The forced append may overshoot the target by one; callers
/// that need an exact cardinality re-run the series through the normalizer's
/// point count anyway, so the overshoot is accepted rather than dropping an
/// interior sample.
pub fn downsample(series: &[TimePoint], target_points: usize) -> Vec<TimePoint> {
    if series.is_empty() || target_points == 0 {
        return Vec::new();
    }
    if series.len() <= target_points {
        return series.to_vec();
    }

    let step = series.len() / target_points;
    let mut sampled: Vec<TimePoint> = series
        .iter()
        .step_by(step)
        .take(target_points)
        .copied()
        .collect();

    if let Some(last) = series.last() {
        let tail_covered = sampled.last().map(|point| point.ts) == Some(last.ts);
        if !tail_covered {
            sampled.push(*last);
        }
    }

    sampled
}

/// Derive a percentage-change series relative to the first sample.
///
/// A zero baseline yields an all-zero series instead of dividing by zero.
/// Note the baseline is the first point of the series *as given*: when fed an
/// already-downsampled series whose stride dropped the true earliest raw
/// sample, the percentages are biased toward that surviving first point. This
/// mirrors the upstream pipeline deliberately; change the call site, not this
/// function, if true-baseline semantics are ever wanted.
pub fn percent_change(series: &[TimePoint]) -> Vec<PercentPoint> {
    let Some(first) = series.first() else {
        return Vec::new();
    };

    let baseline = first.value;
    series
        .iter()
        .map(|point| {
            let percent = if baseline == 0.0 {
                0.0
            } else {
                round2((point.value - baseline) / baseline * 100.0)
            };
            PercentPoint {
                ts: point.ts,
                percent,
            }
        })
        .collect()
}

/// Round half away from zero to two decimal places.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::UtcDateTime;

    fn series(values: &[f64]) -> Vec<TimePoint> {
        values
            .iter()
            .enumerate()
            .map(|(index, value)| TimePoint {
                ts: UtcDateTime::from_unix_ms(1_700_000_000_000 + index as i64 * 60_000)
                    .expect("in range"),
                value: *value,
            })
            .collect()
    }

    #[test]
    fn zero_target_yields_empty() {
        assert!(downsample(&series(&[1.0, 2.0]), 0).is_empty());
    }

    #[test]
    fn stride_is_floor_of_ratio() {
        let input = series(&(0..10).map(f64::from).collect::<Vec<_>>());
        let out = downsample(&input, 3);
        // step = 3: indices 0, 3, 6, plus the forced tail.
        let values: Vec<f64> = out.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![0.0, 3.0, 6.0, 9.0]);
    }

    #[test]
    fn tail_already_covered_is_not_duplicated() {
        let input = series(&(0..8).map(f64::from).collect::<Vec<_>>());
        // step = 2: indices 0, 2, 4, 6; tail index 7 gets appended once.
        let out = downsample(&input, 4);
        assert_eq!(out.len(), 5);
        assert_eq!(out.last().map(|p| p.value), Some(7.0));

        // step = 1 with target == len: stride ends exactly on the tail.
        let exact = downsample(&input, 8);
        assert_eq!(exact.len(), 8);
    }

    #[test]
    fn rounds_half_away_from_zero() {
        // 0.125 is exactly representable, so the .5 case is genuine.
        assert_eq!(round2(0.125), 0.13);
        assert_eq!(round2(-0.125), -0.13);
        assert_eq!(round2(2.674_999), 2.67);
    }

    #[test]
    fn percent_change_uses_first_sample_as_baseline() {
        let out = percent_change(&series(&[200.0, 250.0, 150.0]));
        let percents: Vec<f64> = out.iter().map(|p| p.percent).collect();
        assert_eq!(percents, vec![0.0, 25.0, -25.0]);
    }
}
