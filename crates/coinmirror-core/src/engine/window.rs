//! Time-of-day rotation over the tracked entity list.
//!
//! Refreshing every coin's historical series each run would blow the provider
//! rate budget, so runs refresh one contiguous batch, selected
//! deterministically from the UTC hour of day. Consecutive runs spaced one
//! rotation period apart walk every batch in order.

use crate::UtcDateTime;

/// Select the rotation batch for `now`.
///
/// `batch_count = ceil(len / batch_size)`;
/// `batch_index = (hour_of_day / rotation_period_hours) mod batch_count`.
/// Full coverage within a single day requires
/// `24 / rotation_period_hours >= batch_count`; otherwise coverage spans
/// multiple days. A zero batch size or rotation period yields the empty
/// batch (config validation rejects both upstream).
pub fn select_batch<T>(
    now: UtcDateTime,
    all: &[T],
    rotation_period_hours: u32,
    batch_size: usize,
) -> (usize, &[T]) {
    if all.is_empty() || batch_size == 0 || rotation_period_hours == 0 {
        return (0, &all[..0]);
    }

    let batch_count = all.len().div_ceil(batch_size);
    let batch_index = (usize::from(now.hour()) / rotation_period_hours as usize) % batch_count;

    let start = batch_index * batch_size;
    let end = ((batch_index + 1) * batch_size).min(all.len());
    (batch_index, &all[start..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at_hour(hour: u8) -> UtcDateTime {
        UtcDateTime::parse(&format!("2024-06-01T{hour:02}:00:00Z")).expect("valid")
    }

    #[test]
    fn batch_is_contiguous_slice() {
        let all: Vec<u32> = (0..50).collect();
        let (index, batch) = select_batch(at_hour(2), &all, 2, 7);

        assert_eq!(index, 1);
        assert_eq!(batch, &[7, 8, 9, 10, 11, 12, 13]);
    }

    #[test]
    fn final_batch_is_the_remainder() {
        let all: Vec<u32> = (0..50).collect();
        // ceil(50 / 7) = 8 batches; hour 14 with a 2h period lands on batch 7.
        let (index, batch) = select_batch(at_hour(14), &all, 2, 7);

        assert_eq!(index, 7);
        assert_eq!(batch, &[49]);
    }

    #[test]
    fn index_wraps_modulo_batch_count() {
        let all: Vec<u32> = (0..50).collect();
        let (index, _) = select_batch(at_hour(16), &all, 2, 7);
        assert_eq!(index, 0);
    }

    #[test]
    fn degenerate_inputs_yield_empty_batch() {
        let all: Vec<u32> = (0..5).collect();
        assert!(select_batch(at_hour(0), &all, 0, 2).1.is_empty());
        assert!(select_batch(at_hour(0), &all, 2, 0).1.is_empty());

        let empty: Vec<u32> = Vec::new();
        assert!(select_batch(at_hour(0), &empty, 2, 2).1.is_empty());
    }
}
