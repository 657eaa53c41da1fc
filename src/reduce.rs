//! Parallel reduction by fixed fan-out over scoped threads.
//!
//! The sequence is split into one contiguous partition per worker. Each worker gets a
//! read-only view of its partition and a `&mut` to its own slot in the partial-result
//! buffer, so the hot loop needs no lock. The coordinator joins every worker before it
//! looks at any partial result.

use crate::error::ReduceError;
use crate::partition::{check_partitions, chunk_size, partition};
use std::any::Any;
use std::iter::Sum;
use std::ops::AddAssign;
use std::thread;

/// Run `f` over every partition of `seq` on its own thread and return the partial
/// results indexed by worker id.
///
/// Empty partitions are not given a thread; their slot keeps `R::default()`.
/// The returned buffer always has `workers` slots, so memory grows with `workers`;
/// [`reduce_sum`] clamps the count to the sequence length before calling this.
/// A panic inside any worker is reported as a single [`ReduceError::WorkerFailure`]
/// naming every worker that failed.
pub fn map_partitions<T, R, F>(seq: &[T], workers: usize, f: F) -> Result<Vec<R>, ReduceError>
where
    T: Sync,
    R: Default + Send,
    F: Fn(&[T]) -> R + Sync,
{
    let ranges = partition(seq.len(), workers)?;
    check_partitions(seq.len(), &ranges)?;
    log::debug!(
        "partitioned {} elements across {} workers: {:?}",
        seq.len(),
        workers,
        ranges
    );

    let mut partials: Vec<R> = (0..workers).map(|_| R::default()).collect();
    let busy = ranges.iter().filter(|r| !r.is_empty()).count();
    let f = &f;

    let (spawn_error, failed) = thread::scope(|s| {
        let mut handles = Vec::with_capacity(busy);
        let mut spawn_error = None;

        for (id, (range, slot)) in ranges.into_iter().zip(partials.iter_mut()).enumerate() {
            if range.is_empty() {
                continue;
            }
            let chunk = &seq[range];
            let spawned = thread::Builder::new()
                .name(format!("reduce-worker-{}", id))
                .spawn_scoped(s, move || {
                    *slot = f(chunk);
                });

            match spawned {
                Ok(handle) => handles.push((id, handle)),
                Err(e) => {
                    spawn_error = Some(e);
                    break;
                }
            }
        }
        log::debug!("spawned {} workers", handles.len());

        // Join every handle by hand: a scoped thread that was joined manually does not
        // re-raise its panic when the scope closes.
        let mut failed = Vec::new();
        for (id, handle) in handles {
            if let Err(payload) = handle.join() {
                let message = panic_message(payload.as_ref());
                log::warn!("worker {} panicked: {}", id, message);
                failed.push((id, message));
            }
        }

        (spawn_error, failed)
    });

    if let Some(e) = spawn_error {
        return Err(ReduceError::Spawn(e));
    }

    if !failed.is_empty() {
        let message = failed[0].1.clone();
        return Err(ReduceError::WorkerFailure {
            workers: failed.into_iter().map(|(id, _)| id).collect(),
            message,
        });
    }

    Ok(partials)
}

/// Sum `seq` with up to `workers` threads.
///
/// More workers than elements would only add empty partitions, so the count is
/// clamped to `max(1, seq.len())`. The accumulator has the element type. Picking a
/// type wide enough for the total is up to the caller.
pub fn reduce_sum<T>(seq: &[T], workers: usize) -> Result<T, ReduceError>
where
    T: Copy + Default + Send + Sync + Sum<T>,
{
    chunk_size(seq.len(), workers)?;
    let workers = workers.min(seq.len()).max(1);

    let partials = map_partitions(seq, workers, |chunk| chunk.iter().copied().sum::<T>())?;
    Ok(partials.into_iter().sum())
}

/// Index loop, no iterator adapters.
#[allow(clippy::needless_range_loop)]
pub fn naive_sum<T>(seq: &[T]) -> T
where
    T: Copy + Default + AddAssign,
{
    let mut sum = T::default();
    for i in 0..seq.len() {
        sum += seq[i];
    }
    sum
}

pub fn accumulate_sum<T>(seq: &[T]) -> T
where
    T: Copy + Sum<T>,
{
    seq.iter().copied().sum()
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Sums like an integer but panics when it meets a negative value.
    #[derive(Debug, Clone, Copy, Default, PartialEq)]
    struct Fragile(i64);

    impl Sum<Fragile> for Fragile {
        fn sum<I: Iterator<Item = Fragile>>(iter: I) -> Self {
            let mut total = 0;
            for Fragile(v) in iter {
                if v < 0 {
                    panic!("negative value {}", v);
                }
                total += v;
            }
            Fragile(total)
        }
    }

    #[test]
    fn test_hundred_elements_four_workers() {
        let data: Vec<i64> = (0..100).collect();
        assert_eq!(reduce_sum(&data, 4).unwrap(), 4950);
    }

    #[test]
    fn test_single_element_many_workers() {
        assert_eq!(reduce_sum(&[5i64], 8).unwrap(), 5);

        let partials = map_partitions(&[5i64], 8, |chunk| chunk.iter().sum::<i64>()).unwrap();
        assert_eq!(partials, vec![5, 0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_huge_worker_count_is_clamped() {
        assert_eq!(reduce_sum(&[1i64, 2, 3], usize::MAX).unwrap(), 6);
        assert_eq!(reduce_sum(&[7i64], 1 << 40).unwrap(), 7);

        let empty: [i64; 0] = [];
        assert_eq!(reduce_sum(&empty, usize::MAX).unwrap(), 0);
    }

    #[test]
    fn test_empty_sequence() {
        let empty: [i64; 0] = [];
        assert_eq!(reduce_sum(&empty, 1).unwrap(), 0);
        assert_eq!(reduce_sum(&empty, 16).unwrap(), 0);
    }

    #[test]
    fn test_zero_workers() {
        let err = reduce_sum(&[1i64, 2, 3], 0).unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_one_worker_matches_sequential() {
        let data: Vec<i64> = (-50..50).map(|x| x * 7).collect();
        assert_eq!(reduce_sum(&data, 1).unwrap(), naive_sum(&data));
        assert_eq!(reduce_sum(&data, 1).unwrap(), accumulate_sum(&data));
    }

    #[test]
    fn test_baselines_agree() {
        let data: Vec<i64> = (0..10_000).collect();
        assert_eq!(naive_sum(&data), 49_995_000);
        assert_eq!(accumulate_sum(&data), 49_995_000);
        assert_eq!(reduce_sum(&data, 7).unwrap(), 49_995_000);
    }

    #[test]
    fn test_floats() {
        let data = [0.5f64, 1.5, 2.0, 4.0];
        assert_eq!(reduce_sum(&data, 2).unwrap(), 8.0);
    }

    #[test]
    fn test_worker_panic_is_reported() {
        let data = vec![Fragile(1), Fragile(2), Fragile(-3), Fragile(4)];
        match reduce_sum(&data, 4) {
            Err(ReduceError::WorkerFailure { workers, message }) => {
                assert_eq!(workers, vec![2]);
                assert!(message.contains("negative value -3"));
            }
            other => panic!("expected WorkerFailure, got {:?}", other),
        }
    }

    #[test]
    fn test_every_failed_worker_is_named() {
        let data: Vec<i64> = (0..40).collect();
        let result = map_partitions(&data, 4, |chunk| {
            if chunk[0] % 20 == 0 {
                panic!("chunk starting at {}", chunk[0]);
            }
            chunk.len()
        });

        match result {
            Err(ReduceError::WorkerFailure { mut workers, .. }) => {
                workers.sort();
                assert_eq!(workers, vec![0, 2]);
            }
            other => panic!("expected WorkerFailure, got {:?}", other),
        }
    }

    #[test]
    fn test_workers_run_on_named_threads() {
        let data: Vec<u8> = vec![0; 9];
        let names = map_partitions(&data, 3, |_| {
            thread::current().name().map(str::to_string).unwrap_or_default()
        })
        .unwrap();
        assert_eq!(names, vec!["reduce-worker-0", "reduce-worker-1", "reduce-worker-2"]);
    }
}
