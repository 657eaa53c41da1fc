//! Splitting an index space into contiguous, disjoint chunks, one per worker.

use crate::error::ReduceError;
use std::ops::Range;

/// `ceil(len / workers)`.
pub fn chunk_size(len: usize, workers: usize) -> Result<usize, ReduceError> {
    if workers == 0 {
        return Err(ReduceError::invalid_argument(
            "worker count must be at least 1",
        ));
    }
    Ok(len.div_ceil(workers))
}

/// Partition `0..len` into exactly `workers` half-open ranges.
///
/// Range `i` covers `[i * chunk, (i + 1) * chunk)` clamped to `len`, so when there are
/// more workers than elements the trailing ranges come out empty.
pub fn partition(len: usize, workers: usize) -> Result<Vec<Range<usize>>, ReduceError> {
    let chunk = chunk_size(len, workers)?;

    let ranges = (0..workers)
        .map(|i| {
            let start = i.saturating_mul(chunk).min(len);
            let end = (i + 1).saturating_mul(chunk).min(len);
            start..end
        })
        .collect();

    Ok(ranges)
}

/// Verify that `ranges` tile `0..len` in order with no overlap and no gap.
pub fn check_partitions(len: usize, ranges: &[Range<usize>]) -> Result<(), ReduceError> {
    let mut expected_start = 0;

    for (i, range) in ranges.iter().enumerate() {
        if range.start != expected_start {
            return Err(ReduceError::invalid_argument(format!(
                "malformed partition bounds: partition {} starts at {}, expected {}",
                i, range.start, expected_start
            )));
        }
        if range.end < range.start || range.end > len {
            return Err(ReduceError::invalid_argument(format!(
                "malformed partition bounds: partition {} is {:?} over length {}",
                i, range, len
            )));
        }
        expected_start = range.end;
    }

    if expected_start != len {
        return Err(ReduceError::invalid_argument(format!(
            "malformed partition bounds: partitions cover 0..{} of 0..{}",
            expected_start, len
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_size_rounds_up() {
        assert_eq!(chunk_size(100, 4).unwrap(), 25);
        assert_eq!(chunk_size(101, 4).unwrap(), 26);
        assert_eq!(chunk_size(0, 3).unwrap(), 0);
        assert!(chunk_size(3, 0).unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_even_split() {
        let parts = partition(100, 4).unwrap();
        assert_eq!(parts, vec![0..25, 25..50, 50..75, 75..100]);
        check_partitions(100, &parts).unwrap();
    }

    #[test]
    fn test_more_workers_than_elements() {
        let parts = partition(1, 8).unwrap();
        assert_eq!(parts.len(), 8);
        assert_eq!(parts[0], 0..1);
        assert!(parts[1..].iter().all(|r| r.is_empty()));
        check_partitions(1, &parts).unwrap();
    }

    #[test]
    fn test_uneven_tail() {
        // chunk = 2, so the third range only gets one element and the last is empty
        let parts = partition(5, 4).unwrap();
        assert_eq!(parts, vec![0..2, 2..4, 4..5, 5..5]);
    }

    #[test]
    fn test_empty_sequence() {
        let parts = partition(0, 3).unwrap();
        assert_eq!(parts, vec![0..0, 0..0, 0..0]);
        check_partitions(0, &parts).unwrap();
    }

    #[test]
    fn test_zero_workers() {
        let err = partition(3, 0).unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_check_rejects_gap_and_overlap() {
        assert!(check_partitions(10, &[0..4, 5..10]).unwrap_err().is_invalid_argument());
        assert!(check_partitions(10, &[0..6, 5..10]).unwrap_err().is_invalid_argument());
        assert!(check_partitions(10, &[0..4, 4..8]).unwrap_err().is_invalid_argument());
        assert!(check_partitions(10, &[0..4, 4..12]).unwrap_err().is_invalid_argument());
    }
}
